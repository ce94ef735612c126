//! Generic RSA implementation

use num_bigint::{BigUint, IntoBigUint, ModInverse};
use num_integer::Integer;
use num_traits::{One, Zero};
use zeroize::Zeroize;

use crate::errors::{Error, Result};
use crate::traits::{PrivateKeyParts, PublicKeyParts};

/// ⚠️ Raw RSA encryption of m with the public key. No padding is performed.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_encrypt<K: PublicKeyParts>(key: &K, m: &BigUint) -> Result<BigUint> {
    if m >= key.n() {
        return Err(Error::MessageTooLong);
    }

    Ok(m.modpow(key.e(), key.n()))
}

/// ⚠️ Performs raw RSA decryption with no padding or error checking.
///
/// The exponentiation is split over the two prime factors using the
/// precomputed CRT exponents and recombined with Garner's formula.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
pub fn rsa_decrypt(priv_key: &impl PrivateKeyParts, c: &BigUint) -> Result<BigUint> {
    if c >= priv_key.n() {
        return Err(Error::Decryption);
    }

    let p = priv_key.p();
    let q = priv_key.q();

    // A destroyed key has its factors wiped to zero.
    if p.is_zero() || q.is_zero() {
        return Err(Error::Decryption);
    }

    let mut cp = c % p;
    let mut cq = c % q;
    let mut jp = cp.modpow(priv_key.dp(), p);
    let mut jq = cq.modpow(priv_key.dq(), q);

    let mut h = &jp % q;
    if h > jq {
        jq += q;
    }
    jq -= &h;

    let mut t = &jq * priv_key.crt_coefficient();
    t %= q;
    let mut tp = &t * p;
    let m = &tp + &jp;

    // clear tmp values
    for tmp in [&mut cp, &mut cq, &mut jp, &mut jq, &mut h, &mut t, &mut tp] {
        tmp.zeroize();
    }

    Ok(m)
}

/// ⚠️ Performs raw RSA decryption with no padding.
///
/// This will also check for errors in the CRT computation.
///
/// # ☢️️ WARNING: HAZARDOUS API ☢️
///
/// Use this function with great care! Raw RSA should never be used without an appropriate padding
/// scheme. See the [module-level documentation][crate::hazmat] for more information.
#[inline]
#[cfg_attr(not(feature = "hazmat"), allow(dead_code))]
pub fn rsa_decrypt_and_check(priv_key: &impl PrivateKeyParts, c: &BigUint) -> Result<BigUint> {
    let m = rsa_decrypt(priv_key, c)?;

    // In order to defend against errors in the CRT computation, m^e is
    // calculated, which should match the original ciphertext.
    let check = rsa_encrypt(priv_key, &m).map_err(|_| Error::Internal)?;

    if c != &check {
        return Err(Error::Internal);
    }

    Ok(m)
}

/// Computes the CRT exponent for `prime`: the inverse of `exp` modulo
/// `(prime - 1) / 2`, moved to the odd representative when it comes out even.
pub(crate) fn compute_crt_exponent(exp: &BigUint, prime: &BigUint) -> Result<BigUint> {
    let t = (prime - BigUint::one()) >> 1usize;
    if t <= BigUint::one() {
        return Err(Error::InvalidPrime);
    }
    if !exp.gcd(&t).is_one() {
        return Err(Error::InvalidExponent);
    }

    let mut d = (exp % &t)
        .mod_inverse(&t)
        .and_then(IntoBigUint::into_biguint)
        .ok_or(Error::InvalidExponent)?;

    if d.is_even() {
        d += &t;
    }

    Ok(d)
}

/// Computes the CRT coefficient `p^-1 mod q`.
pub(crate) fn compute_crt_coefficient(p: &BigUint, q: &BigUint) -> Result<BigUint> {
    (p % q)
        .mod_inverse(q)
        .and_then(IntoBigUint::into_biguint)
        .ok_or(Error::InvalidCoefficient)
}
