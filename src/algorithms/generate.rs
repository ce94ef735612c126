//! Generate prime components for the RSA Private Key

use alloc::vec;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use super::prime::is_probable_prime;
use crate::{
    algorithms::rsa::{compute_crt_coefficient, compute_crt_exponent},
    errors::{Error, Result},
};

pub(crate) struct RsaPrivateKeyComponents {
    pub n: BigUint,
    pub e: BigUint,
    pub p: BigUint,
    pub q: BigUint,
    pub dp: BigUint,
    pub dq: BigUint,
    pub c: BigUint,
}

/// Generates a two-prime RSA key with primes of `prime_bits` bits each,
/// along the lines of IEEE 1363 A.16.11/A.16.12.
///
/// Both primes are congruent to 3 mod 4 and `p - 1`, `q - 1` share no factor
/// with `exp`. The CRT exponents are taken modulo `(p - 1) / 2` and
/// `(q - 1) / 2` and made odd, which keeps them valid modulo `p - 1` and
/// `q - 1` since both halves are odd.
///
/// The search has no iteration bound; it ends with probability one.
pub(crate) fn generate_crt_key<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    prime_bits: usize,
    exp: u32,
) -> Result<RsaPrivateKeyComponents> {
    if exp < 3 || exp % 2 == 0 {
        return Err(Error::InvalidExponent);
    }
    if prime_bits < 8 {
        return Err(Error::InvalidPrime);
    }

    let e = BigUint::from(exp);

    let p = generate_prime_with_rng(rng, prime_bits, &e);
    let q = loop {
        let q = generate_prime_with_rng(rng, prime_bits, &e);
        if q != p {
            break q;
        }
        log::trace!("second prime equals the first, searching again");
    };

    let n = &p * &q;
    let dp = compute_crt_exponent(&e, &p)?;
    let dq = compute_crt_exponent(&e, &q)?;
    let c = compute_crt_coefficient(&p, &q)?;

    Ok(RsaPrivateKeyComponents {
        n,
        e,
        p,
        q,
        dp,
        dq,
        c,
    })
}

/// Finds a probable prime `x` of exactly `bit_length` bits with
/// `x ≡ 3 (mod 4)` and `gcd(x - 1, exp) = 1`.
///
/// Each attempt starts from fresh random bytes with the top two bits set,
/// steps up to the next value ending in `0b11` and then walks in steps of
/// four until a probable prime turns up. A prime whose `x - 1` shares a
/// factor with `exp`, or a walk that runs past `bit_length` bits, throws the
/// whole attempt away.
pub(crate) fn generate_prime_with_rng<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    bit_length: usize,
    exp: &BigUint,
) -> BigUint {
    let one = BigUint::one();
    let three = BigUint::from(3u32);
    let four = BigUint::from(4u32);

    let mut b = bit_length % 8;
    if b == 0 {
        b = 8;
    }

    let bytes_len = (bit_length + 7) / 8;
    let mut bytes = Zeroizing::new(vec![0u8; bytes_len]);
    let mut rejected = 0usize;

    loop {
        rng.fill_bytes(&mut bytes);
        // Clear bits in the first byte to make sure the candidate has a size <= bits.
        bytes[0] &= ((1u32 << b) - 1) as u8;

        // Set the most significant two bits, so that the product of two such
        // values is never one bit short.
        if b >= 2 {
            bytes[0] |= 3u8 << (b - 2);
        } else {
            bytes[0] |= 1;
            bytes[1] |= 0x80;
        }

        let mut candidate = BigUint::from_bytes_be(&bytes);
        while &candidate % &four != three {
            candidate += &one;
        }

        while !is_probable_prime(rng, &candidate) {
            candidate += &four;
        }

        if candidate.bits() != bit_length {
            rejected += 1;
            log::trace!("prime candidate overflowed {} bits, restarting", bit_length);
            continue;
        }

        if !(&candidate - &one).gcd(exp).is_one() {
            rejected += 1;
            log::trace!("prime candidate shares a factor with the public exponent, restarting");
            continue;
        }

        log::debug!(
            "found {}-bit prime after {} rejected candidates",
            bit_length,
            rejected
        );
        return candidate;
    }
}
