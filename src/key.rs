use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::algorithms::generate::generate_crt_key;
use crate::algorithms::pad::{uint_to_be_pad, uint_to_zeroizing_be_pad};
use crate::algorithms::rsa::{
    compute_crt_coefficient, compute_crt_exponent, rsa_decrypt, rsa_encrypt,
};
use crate::config::RsaConfig;
use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// Default public exponent, 65537.
pub const DEFAULT_EXPONENT: u32 = 65537;

/// Represents the public part of an RSA key.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct RsaPublicKey {
    /// Modulus: product of the two secret primes.
    n: BigUint,
    /// Public exponent: small odd integer coprime to both `p - 1` and `q - 1`.
    e: BigUint,
    /// Block size the key works with.
    config: RsaConfig,
}

/// Represents a whole RSA key, public and private parts.
///
/// The private part is kept in CRT form only. Call
/// [`destroy`](RsaPrivateKey::destroy) to wipe the secret values as soon as
/// the key is no longer needed; dropping the key wipes them as well.
#[derive(Clone)]
pub struct RsaPrivateKey {
    /// Public components of the private key.
    pubkey_components: RsaPublicKey,
    /// First prime factor of `n`.
    p: BigUint,
    /// Second prime factor of `n`.
    q: BigUint,
    /// `e^-1 mod (p - 1) / 2`, odd.
    dp: BigUint,
    /// `e^-1 mod (q - 1) / 2`, odd.
    dq: BigUint,
    /// `p^-1 mod q`.
    c: BigUint,
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("pubkey_components", &self.pubkey_components)
            .field("p", &"...")
            .field("q", &"...")
            .field("dp", &"...")
            .field("dq", &"...")
            .field("c", &"...")
            .finish()
    }
}

impl Eq for RsaPrivateKey {}
impl PartialEq for RsaPrivateKey {
    #[inline]
    fn eq(&self, other: &RsaPrivateKey) -> bool {
        self.pubkey_components == other.pubkey_components
            && self.p == other.p
            && self.q == other.q
            && self.dp == other.dp
            && self.dq == other.dq
            && self.c == other.c
    }
}

impl AsRef<RsaPublicKey> for RsaPrivateKey {
    fn as_ref(&self) -> &RsaPublicKey {
        &self.pubkey_components
    }
}

impl Hash for RsaPrivateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Domain separator for RSA private keys
        state.write(b"RsaPrivateKey");
        Hash::hash(&self.pubkey_components, state);
    }
}

impl Zeroize for RsaPrivateKey {
    fn zeroize(&mut self) {
        for secret in [
            &mut self.p,
            &mut self.q,
            &mut self.dp,
            &mut self.dq,
            &mut self.c,
        ] {
            secret.zeroize();
            *secret = BigUint::zero();
        }
    }
}

impl Drop for RsaPrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for RsaPrivateKey {}

impl From<RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: RsaPrivateKey) -> Self {
        (&private_key).into()
    }
}

impl From<&RsaPrivateKey> for RsaPublicKey {
    fn from(private_key: &RsaPrivateKey) -> Self {
        private_key.to_public_key()
    }
}

impl PublicKeyParts for RsaPublicKey {
    fn n(&self) -> &BigUint {
        &self.n
    }

    fn e(&self) -> &BigUint {
        &self.e
    }

    fn config(&self) -> RsaConfig {
        self.config
    }
}

impl RsaPublicKey {
    /// Create a new public key from its components.
    ///
    /// The modulus must be odd and fill the configured block exactly: its top
    /// byte is non-zero, so every OAEP block (which starts with a zero byte)
    /// is smaller than it.
    pub fn new(n: BigUint, e: BigUint, config: RsaConfig) -> Result<Self> {
        let k = Self { n, e, config };
        check_public(&k)?;
        Ok(k)
    }

    /// Encrypt one block with the raw RSA primitive, `f^e mod n`.
    ///
    /// `block` is normally an OAEP encoding and must be exactly
    /// [`size`](PublicKeyParts::size) bytes long; the result has the same
    /// length.
    pub fn encrypt_block(&self, block: &[u8]) -> Result<Vec<u8>> {
        let k = self.size();
        if block.len() != k {
            return Err(Error::InvalidPadLen);
        }

        let f = BigUint::from_bytes_be(block);
        let g = rsa_encrypt(self, &f)?;
        uint_to_be_pad(g, k)
    }
}

impl PublicKeyParts for RsaPrivateKey {
    fn n(&self) -> &BigUint {
        &self.pubkey_components.n
    }

    fn e(&self) -> &BigUint {
        &self.pubkey_components.e
    }

    fn config(&self) -> RsaConfig {
        self.pubkey_components.config
    }
}

impl PrivateKeyParts for RsaPrivateKey {
    fn p(&self) -> &BigUint {
        &self.p
    }

    fn q(&self) -> &BigUint {
        &self.q
    }

    fn dp(&self) -> &BigUint {
        &self.dp
    }

    fn dq(&self) -> &BigUint {
        &self.dq
    }

    fn crt_coefficient(&self) -> &BigUint {
        &self.c
    }
}

impl RsaPrivateKey {
    /// Generate a new RSA key pair for the given block size, with the
    /// default public exponent of 65537.
    pub fn new<R: CryptoRngCore + ?Sized>(rng: &mut R, config: RsaConfig) -> Result<Self> {
        Self::new_with_exp(rng, config, DEFAULT_EXPONENT)
    }

    /// Generate a new RSA key pair for the given block size and public
    /// exponent.
    ///
    /// The exponent must be odd and at least 3. Generation loops until two
    /// suitable primes are found; there is no upper bound on the number of
    /// candidates tried.
    pub fn new_with_exp<R: CryptoRngCore + ?Sized>(
        rng: &mut R,
        config: RsaConfig,
        exp: u32,
    ) -> Result<Self> {
        log::debug!(
            "generating {}-bit RSA key, e = {}",
            config.modulus_bits(),
            exp
        );

        let components = generate_crt_key(rng, config.prime_bits(), exp)?;

        let key = RsaPrivateKey {
            pubkey_components: RsaPublicKey {
                n: components.n,
                e: components.e,
                config,
            },
            p: components.p,
            q: components.q,
            dp: components.dp,
            dq: components.dq,
            c: components.c,
        };

        log::debug!("generated {}-bit RSA key", key.n().bits());
        Ok(key)
    }

    /// Constructs an RSA key pair from its two primes.
    ///
    /// The CRT exponents and coefficient are recomputed the same way key
    /// generation computes them.
    pub fn from_components(
        n: BigUint,
        e: BigUint,
        p: BigUint,
        q: BigUint,
        config: RsaConfig,
    ) -> Result<Self> {
        let pubkey_components = RsaPublicKey::new(n, e, config)?;

        if p <= BigUint::one() || q <= BigUint::one() || p == q {
            return Err(Error::InvalidPrime);
        }
        if &p * &q != pubkey_components.n {
            return Err(Error::InvalidModulus);
        }

        let dp = compute_crt_exponent(&pubkey_components.e, &p)?;
        let dq = compute_crt_exponent(&pubkey_components.e, &q)?;
        let c = compute_crt_coefficient(&p, &q)?;

        let key = RsaPrivateKey {
            pubkey_components,
            p,
            q,
            dp,
            dq,
            c,
        };
        key.validate()?;

        Ok(key)
    }

    /// Get the public key from the private key, cloning `n` and `e`.
    ///
    /// Generally this is not needed since `RsaPrivateKey` implements the `PublicKeyParts` trait,
    /// but it can occasionally be useful to discard the private information entirely.
    pub fn to_public_key(&self) -> RsaPublicKey {
        self.pubkey_components.clone()
    }

    /// Performs basic sanity checks on the key.
    /// Returns `Ok(())` if everything is good, otherwise an appropriate error.
    pub fn validate(&self) -> Result<()> {
        check_public(self)?;

        let one = BigUint::one();
        let n = self.n();
        let e = self.e();

        if self.p.is_zero() || self.q.is_zero() || &self.p * &self.q != *n {
            return Err(Error::InvalidModulus);
        }

        for (prime, d) in [(&self.p, &self.dp), (&self.q, &self.dq)] {
            let prime_minus_one = prime - &one;
            if !prime_minus_one.gcd(e).is_one() {
                return Err(Error::InvalidPrime);
            }

            // e·d ≡ 1 mod (prime - 1) / 2, with d odd
            let t = prime_minus_one >> 1usize;
            if t.is_zero() || d.is_even() || (e * d) % &t != one {
                return Err(Error::InvalidExponent);
            }
        }

        if (&self.c * &self.p) % &self.q != one {
            return Err(Error::InvalidCoefficient);
        }

        Ok(())
    }

    /// Decrypt one block with the CRT form of the private key.
    ///
    /// `block` must be exactly [`size`](PublicKeyParts::size) bytes long and,
    /// read as a big-endian integer, smaller than the modulus. The result is
    /// the padded block, still to be handed to the OAEP decoder.
    pub fn decrypt_block(&self, block: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let k = self.size();
        if block.len() != k {
            return Err(Error::InvalidPadLen);
        }

        let g = BigUint::from_bytes_be(block);
        let f = rsa_decrypt(self, &g)?;
        uint_to_zeroizing_be_pad(f, k)
    }

    /// Wipe the secret values `p`, `q`, `dp`, `dq` and `c`.
    ///
    /// Afterwards all five read back as zero and the key can no longer
    /// decrypt. The public components are left untouched.
    pub fn destroy(&mut self) {
        self.zeroize();
    }
}

/// Generate a fresh key pair for `config` with public exponent `exp`.
pub fn generate_key_pair<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    config: RsaConfig,
    exp: u32,
) -> Result<(RsaPublicKey, RsaPrivateKey)> {
    let private_key = RsaPrivateKey::new_with_exp(rng, config, exp)?;
    Ok((private_key.to_public_key(), private_key))
}

/// Check that the public key is well formed for its block size.
#[inline]
pub(crate) fn check_public(public_key: &impl PublicKeyParts) -> Result<()> {
    let n = public_key.n();
    let bits = public_key.config().modulus_bits();

    if n.is_even() || n.bits() > bits || n.bits() <= bits - 8 {
        return Err(Error::InvalidModulus);
    }

    let e = public_key.e();
    if e < &BigUint::from(3u32) || e.is_even() || e >= n {
        return Err(Error::InvalidExponent);
    }

    Ok(())
}
