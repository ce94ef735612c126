//! Randomized primality testing for the key generation.

use alloc::vec;
use num_bigint::{prime::probably_prime, BigUint};
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

/// Number of Miller-Rabin rounds with random bases run on top of the
/// Baillie-PSW test.
pub(crate) const MILLER_RABIN_ROUNDS: usize = 20;

/// Reports whether `candidate` is probably prime.
///
/// The candidate first has to pass a Baillie-PSW test, which is exact for
/// inputs below 2^64. Larger candidates then go through
/// [`MILLER_RABIN_ROUNDS`] Miller-Rabin rounds whose bases are drawn from
/// `rng`, so a composite survives with probability at most 4^-20 on top of
/// the Baillie-PSW bound.
pub(crate) fn is_probable_prime<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    candidate: &BigUint,
) -> bool {
    if !probably_prime(candidate, 0) {
        return false;
    }

    if candidate.bits() <= 64 {
        return true;
    }

    miller_rabin(rng, candidate, MILLER_RABIN_ROUNDS)
}

/// Miller-Rabin test of the odd integer `n > 4` with `reps` random bases.
fn miller_rabin<R: CryptoRngCore + ?Sized>(rng: &mut R, n: &BigUint, reps: usize) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2u32);
    let n_minus_one = n - &one;
    let n_minus_three = n - &BigUint::from(3u32);
    let mut bytes = Zeroizing::new(vec![0u8; (n.bits() + 7) / 8 + 8]);

    // n - 1 = 2^s * d with d odd
    let mut d = n_minus_one.clone();
    let mut s = 0usize;
    while d.is_even() {
        d >>= 1usize;
        s += 1;
    }

    'witness: for _ in 0..reps {
        // a in [2, n - 2]; the extra bytes keep the modulo bias negligible
        rng.fill_bytes(&mut bytes);
        let a = BigUint::from_bytes_be(&bytes) % &n_minus_three + &two;
        let mut x = a.modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                continue 'witness;
            }
            if x == one {
                return false;
            }
        }

        return false;
    }

    true
}
