//! Block size configuration.
//!
//! Every RSA block handled by this crate, whether an OAEP encoding, a
//! ciphertext or a decrypted plaintext, has the same fixed width: the modulus
//! byte width of the underlying field times the field length. That width is
//! carried around as an [`RsaConfig`] value instead of a global constant, so
//! keys of different sizes can be used side by side.

use crate::errors::{Error, Result};

/// Smallest block size accepted by [`RsaConfig::new`], in bytes.
const MIN_BLOCK_SIZE: usize = 16;

/// Fixed-width block configuration for one RSA key size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RsaConfig {
    modulus_bytes: usize,
    field_len: usize,
}

impl RsaConfig {
    /// 1024-bit modulus, two 512-bit field elements.
    pub const RSA1024: Self = Self {
        modulus_bytes: 64,
        field_len: 2,
    };

    /// 2048-bit modulus, two 1024-bit field elements.
    pub const RSA2048: Self = Self {
        modulus_bytes: 128,
        field_len: 2,
    };

    /// 3072-bit modulus, eight 384-bit field elements.
    pub const RSA3072: Self = Self {
        modulus_bytes: 48,
        field_len: 8,
    };

    /// 4096-bit modulus, eight 512-bit field elements.
    pub const RSA4096: Self = Self {
        modulus_bytes: 64,
        field_len: 8,
    };

    /// Create a configuration from the byte width of one field element and
    /// the number of elements making up the modulus.
    ///
    /// The resulting block size must be even, since the modulus is the
    /// product of two primes of exactly half its width.
    pub fn new(modulus_bytes: usize, field_len: usize) -> Result<Self> {
        let block_size = modulus_bytes
            .checked_mul(field_len)
            .ok_or(Error::InvalidConfig)?;

        if block_size < MIN_BLOCK_SIZE || block_size % 2 != 0 {
            return Err(Error::InvalidConfig);
        }

        Ok(Self {
            modulus_bytes,
            field_len,
        })
    }

    /// Byte width of a single field element.
    pub const fn modulus_bytes(&self) -> usize {
        self.modulus_bytes
    }

    /// Number of field elements in the modulus.
    pub const fn field_len(&self) -> usize {
        self.field_len
    }

    /// Size in bytes of every RSA block for this configuration.
    pub const fn block_size(&self) -> usize {
        self.modulus_bytes * self.field_len
    }

    /// Bit length of the public modulus.
    pub const fn modulus_bits(&self) -> usize {
        self.block_size() * 8
    }

    /// Byte length of each of the two secret primes.
    pub const fn prime_bytes(&self) -> usize {
        self.block_size() / 2
    }

    /// Bit length of each of the two secret primes.
    pub const fn prime_bits(&self) -> usize {
        self.prime_bytes() * 8
    }

    /// Longest message that OAEP can pad into one block when the label digest
    /// produces `hash_len` bytes.
    ///
    /// Returns `None` if the block cannot even hold an empty message, i.e.
    /// when it is shorter than `2 * hash_len + 2` bytes.
    pub const fn max_message_len(&self, hash_len: usize) -> Option<usize> {
        self.block_size().checked_sub(2 * hash_len + 2)
    }
}

impl Default for RsaConfig {
    fn default() -> Self {
        Self::RSA2048
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(RsaConfig::RSA1024.block_size(), 128);
        assert_eq!(RsaConfig::RSA2048.block_size(), 256);
        assert_eq!(RsaConfig::RSA3072.block_size(), 384);
        assert_eq!(RsaConfig::RSA4096.block_size(), 512);
        assert_eq!(RsaConfig::RSA2048.prime_bits(), 1024);
        assert_eq!(RsaConfig::default(), RsaConfig::RSA2048);
    }

    #[test]
    fn test_new_rejects_degenerate_sizes() {
        assert_eq!(RsaConfig::new(0, 8), Err(Error::InvalidConfig));
        assert_eq!(RsaConfig::new(7, 1), Err(Error::InvalidConfig));
        assert_eq!(RsaConfig::new(17, 1), Err(Error::InvalidConfig));
        assert_eq!(RsaConfig::new(usize::MAX, 2), Err(Error::InvalidConfig));

        let config = RsaConfig::new(32, 3).unwrap();
        assert_eq!(config.block_size(), 96);
        assert_eq!(config.modulus_bits(), 768);
        assert_eq!(config.prime_bytes(), 48);
        assert_eq!(config.modulus_bytes(), 32);
        assert_eq!(config.field_len(), 3);
    }

    #[test]
    fn test_max_message_len() {
        assert_eq!(RsaConfig::RSA1024.max_message_len(32), Some(62));
        assert_eq!(RsaConfig::RSA1024.max_message_len(20), Some(86));
        assert_eq!(RsaConfig::RSA1024.max_message_len(63), Some(0));
        assert_eq!(RsaConfig::RSA1024.max_message_len(64), None);

        let small = RsaConfig::new(16, 1).unwrap();
        assert_eq!(small.max_message_len(7), Some(0));
        assert_eq!(small.max_message_len(32), None);
    }
}
