//! Traits related to the key components

use num_bigint::BigUint;

use crate::config::RsaConfig;

/// Components of an RSA public key.
pub trait PublicKeyParts {
    /// Returns the modulus of the key.
    fn n(&self) -> &BigUint;

    /// Returns the public exponent of the key.
    fn e(&self) -> &BigUint;

    /// Returns the block size configuration the key was built for.
    fn config(&self) -> RsaConfig;

    /// Returns the block size in bytes. Padded messages, ciphertexts and
    /// decrypted blocks for or by this key all have exactly this size.
    fn size(&self) -> usize {
        self.config().block_size()
    }
}

/// Components of an RSA private key, in the form used by the CRT decryption.
pub trait PrivateKeyParts: PublicKeyParts {
    /// Returns the first prime factor of the modulus.
    fn p(&self) -> &BigUint;

    /// Returns the second prime factor of the modulus.
    fn q(&self) -> &BigUint;

    /// Returns the CRT exponent for `p`, the inverse of `e` modulo `(p - 1) / 2`
    /// with odd parity.
    fn dp(&self) -> &BigUint;

    /// Returns the CRT exponent for `q`, the inverse of `e` modulo `(q - 1) / 2`
    /// with odd parity.
    fn dq(&self) -> &BigUint;

    /// Returns the CRT coefficient, `p^-1 mod q`.
    fn crt_coefficient(&self) -> &BigUint;
}
