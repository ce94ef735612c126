//! Encryption and Decryption using [OAEP padding](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1).
//!
//! # Usage
//!
//! See [code example in the toplevel rustdoc](../index.html#oaep-encryption).

mod decrypting_key;
mod encrypting_key;

pub use self::{decrypting_key::DecryptingKey, encrypting_key::EncryptingKey};

use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use digest::{Digest, FixedOutputReset};
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use crate::algorithms::oaep::{oaep_decode_digest, oaep_encode_digest};
use crate::config::RsaConfig;
use crate::errors::{Error, Result};
use crate::key::{self, RsaPrivateKey, RsaPublicKey};
use crate::traits::PublicKeyParts;

/// OAEP codec for one block size.
///
/// - `D` hashes the label. The maximum possible message length is
///   `k - 2 * h_len - 2`, where `k` is the block size and `h_len` the output
///   size of `D`; the random seed is `h_len` bytes long as well.
/// - `MGD` is the hash function used in the [MGF1](https://datatracker.ietf.org/doc/html/rfc8017#appendix-B.2).
///
/// The two hash functions can, but don't need to be the same.
///
/// Encoding yields exactly one block and decoding accepts one block, so the
/// codec sits directly on top of [`RsaPublicKey::encrypt_block`] and
/// [`RsaPrivateKey::decrypt_block`].
pub struct Oaep<D, MGD = D>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    config: RsaConfig,
    phantom: PhantomData<D>,
    mg_phantom: PhantomData<MGD>,
}

impl<D, MGD> Oaep<D, MGD>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    /// Create a codec producing blocks of `config.block_size()` bytes.
    pub fn new(config: RsaConfig) -> Self {
        Self {
            config,
            phantom: PhantomData,
            mg_phantom: PhantomData,
        }
    }

    /// Block size configuration of this codec.
    pub fn config(&self) -> RsaConfig {
        self.config
    }

    /// Longest message [`encode`](Self::encode) accepts, or `None` if the
    /// block is too small for the digest `D` and every message is rejected.
    pub fn max_message_len(&self) -> Option<usize> {
        self.config.max_message_len(<D as Digest>::output_size())
    }

    /// Pad `msg` into one block. A missing label is hashed as the empty
    /// string.
    ///
    /// Fails with [`Error::MessageTooLong`] if `msg` exceeds
    /// [`max_message_len`](Self::max_message_len), and for every message
    /// when that is `None`.
    pub fn encode<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        msg: &[u8],
        label: Option<&[u8]>,
    ) -> Result<Zeroizing<Vec<u8>>> {
        oaep_encode_digest::<R, D, MGD>(
            rng,
            msg,
            label.unwrap_or_default(),
            self.config.block_size(),
        )
    }

    /// Recover the message from a padded block.
    ///
    /// A block shorter than the block size is left padded with zeros first.
    /// Any structural problem, a label mismatch included, is reported as the
    /// same [`Error::Decryption`].
    pub fn decode(&self, label: Option<&[u8]>, block: &[u8]) -> Result<Vec<u8>> {
        oaep_decode_digest::<D, MGD>(block, label.unwrap_or_default(), self.config.block_size())
    }
}

impl<D, MGD> Clone for Oaep<D, MGD>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<D, MGD> Copy for Oaep<D, MGD>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
}

impl<D, MGD> fmt::Debug for Oaep<D, MGD>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAEP")
            .field("config", &self.config)
            .field("digest", &"...")
            .field("mgf_digest", &"...")
            .finish()
    }
}

/// Encrypts the given message with RSA and the padding scheme from
/// [PKCS#1 OAEP].
///
/// The message must be no longer than the block size minus
/// `2 + (2 * hash.size())`.
///
/// [PKCS#1 OAEP]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1
#[inline]
pub fn encrypt_digest<R: CryptoRngCore + ?Sized, D: Digest, MGD: Digest + FixedOutputReset>(
    rng: &mut R,
    pub_key: &RsaPublicKey,
    msg: &[u8],
    label: Option<&[u8]>,
) -> Result<Vec<u8>> {
    key::check_public(pub_key)?;

    let em = Oaep::<D, MGD>::new(pub_key.config()).encode(rng, msg, label)?;

    pub_key.encrypt_block(&em)
}

/// Decrypts a ciphertext using RSA and the padding scheme from [PKCS#1 OAEP].
///
/// Every failure, whether a malformed ciphertext or a bad padding, comes
/// back as [`Error::Decryption`].
///
/// [PKCS#1 OAEP]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1
#[inline]
pub fn decrypt_digest<D: Digest, MGD: Digest + FixedOutputReset>(
    priv_key: &RsaPrivateKey,
    ciphertext: &[u8],
    label: Option<&[u8]>,
) -> Result<Vec<u8>> {
    let em = priv_key
        .decrypt_block(ciphertext)
        .map_err(|_| Error::Decryption)?;

    Oaep::<D, MGD>::new(priv_key.config()).decode(label, &em)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::{
        rand_core::{RngCore, SeedableRng},
        ChaCha8Rng,
    };
    use sha1::Sha1;
    use sha2::{Sha224, Sha256, Sha384, Sha512};
    use sha3::{Sha3_256, Sha3_384};

    fn get_private_key() -> RsaPrivateKey {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        RsaPrivateKey::new(&mut rng, RsaConfig::RSA1024).unwrap()
    }

    #[test]
    fn test_codec_round_trip() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let codec = Oaep::<Sha256>::new(RsaConfig::RSA1024);
        assert_eq!(codec.config(), RsaConfig::RSA1024);
        assert_eq!(codec.max_message_len(), Some(62));

        let em = codec.encode(&mut rng, b"test", None).unwrap();
        assert_eq!(em.len(), 128);
        assert_eq!(codec.decode(None, &em).unwrap(), b"test");
        assert_eq!(codec.decode(Some(b""), &em).unwrap(), b"test");

        let mut tampered = em.clone();
        tampered[10] ^= 1;
        assert_eq!(codec.decode(None, &tampered), Err(Error::Decryption));
    }

    fn do_test_encrypt_decrypt_oaep<D, MGD>(prk: &RsaPrivateKey)
    where
        D: Digest,
        MGD: Digest + FixedOutputReset,
    {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let k = prk.size();
        let max = Oaep::<D, MGD>::new(prk.config()).max_message_len().unwrap();

        for i in 1..8 {
            let input = {
                let len = (i * 7) % (max + 1);
                let mut input = vec![0u8; len];
                rng.fill_bytes(&mut input);
                input
            };

            let label = if i % 2 == 0 {
                Some(alloc::format!("label-{}", i).into_bytes())
            } else {
                None
            };

            let pub_key: RsaPublicKey = prk.into();
            let ciphertext =
                encrypt_digest::<_, D, MGD>(&mut rng, &pub_key, &input, label.as_deref())
                    .unwrap();
            assert_eq!(ciphertext.len(), k);
            assert_ne!(input, ciphertext);

            let plaintext = decrypt_digest::<D, MGD>(prk, &ciphertext, label.as_deref()).unwrap();
            assert_eq!(input, plaintext);
        }
    }

    #[test]
    fn test_encrypt_decrypt_oaep() {
        let priv_key = get_private_key();
        do_test_encrypt_decrypt_oaep::<Sha1, Sha1>(&priv_key);
        do_test_encrypt_decrypt_oaep::<Sha224, Sha224>(&priv_key);
        do_test_encrypt_decrypt_oaep::<Sha256, Sha256>(&priv_key);
        do_test_encrypt_decrypt_oaep::<Sha384, Sha384>(&priv_key);
        do_test_encrypt_decrypt_oaep::<Sha3_256, Sha3_256>(&priv_key);
        do_test_encrypt_decrypt_oaep::<Sha3_384, Sha3_384>(&priv_key);
        do_test_encrypt_decrypt_oaep::<Sha256, Sha1>(&priv_key);
        do_test_encrypt_decrypt_oaep::<Sha384, Sha256>(&priv_key);
    }

    #[test]
    fn test_decrypt_oaep_invalid_hash() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let priv_key = get_private_key();
        let pub_key: RsaPublicKey = (&priv_key).into();
        let ciphertext =
            encrypt_digest::<_, Sha1, Sha1>(&mut rng, &pub_key, "a_plain_text".as_bytes(), None)
                .unwrap();
        assert!(
            decrypt_digest::<Sha1, Sha1>(&priv_key, &ciphertext, Some(b"label")).is_err(),
            "decrypt should have failed on hash verification"
        );
    }

    #[test]
    fn test_decrypt_rejects_malformed_ciphertext() {
        let priv_key = get_private_key();
        let k = priv_key.size();

        for ciphertext in [vec![0u8; k - 1], vec![0u8; k + 1], vec![0xffu8; k], vec![0u8; k]] {
            assert_eq!(
                decrypt_digest::<Sha256, Sha256>(&priv_key, &ciphertext, None),
                Err(Error::Decryption)
            );
        }
    }

    #[test]
    fn test_encrypt_too_long() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let pub_key = get_private_key().to_public_key();
        let msg = [0u8; 63];

        assert_eq!(
            encrypt_digest::<_, Sha256, Sha256>(&mut rng, &pub_key, &msg, None),
            Err(Error::MessageTooLong)
        );
        assert_eq!(Oaep::<Sha512>::new(pub_key.config()).max_message_len(), None);
        assert_eq!(
            encrypt_digest::<_, Sha512, Sha512>(&mut rng, &pub_key, b"", None),
            Err(Error::MessageTooLong)
        );
    }

    #[test]
    fn test_block_too_small_for_digest() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let config = RsaConfig::new(16, 1).unwrap();

        let codec = Oaep::<Sha256>::new(config);
        assert_eq!(codec.max_message_len(), None);
        assert_eq!(codec.encode(&mut rng, &[], None), Err(Error::MessageTooLong));
        assert_eq!(codec.decode(None, &[0u8; 16]), Err(Error::Decryption));

        // SHA-1 leaves room for an empty message and nothing more
        let codec = Oaep::<Sha1>::new(RsaConfig::new(42, 1).unwrap());
        assert_eq!(codec.max_message_len(), Some(0));
        let em = codec.encode(&mut rng, &[], None).unwrap();
        assert_eq!(codec.decode(None, &em).unwrap(), b"");
        assert_eq!(codec.encode(&mut rng, &[0], None), Err(Error::MessageTooLong));
    }

    #[test]
    fn test_debug() {
        let codec = Oaep::<Sha256>::new(RsaConfig::RSA2048);
        let debug = alloc::format!("{:?}", codec);
        assert!(debug.starts_with("OAEP"));
    }
}
