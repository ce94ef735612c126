//! Mask generation function used by the OAEP padding

use alloc::vec::Vec;
use digest::{Digest, FixedOutputReset};

/// Mask generation function.
///
/// XORs the MGF1 stream derived from `seed` into `out`.
///
/// Panics if out is larger than 2**32. This is in accordance with RFC 8017 - PKCS #1 B.2.1
pub(crate) fn mgf1_xor_digest<D>(out: &mut [u8], digest: &mut D, seed: &[u8])
where
    D: Digest + FixedOutputReset,
{
    let mut counter = [0u8; 4];
    let mut i = 0;

    const MAX_LEN: u64 = u32::MAX as u64 + 1;
    assert!(out.len() as u64 <= MAX_LEN);

    while i < out.len() {
        Digest::update(digest, seed);
        Digest::update(digest, counter);

        let digest_output = digest.finalize_reset();
        for byte in digest_output.iter() {
            if i >= out.len() {
                break;
            }
            out[i] ^= byte;
            i += 1;
        }
        inc_counter(&mut counter);
    }
}

/// MGF1 over the digest `D`: expands `seed` into `len` pseudorandom bytes.
///
/// Block `i` of the output is `D(seed || I2OSP(i, 4))`; the concatenated
/// blocks are truncated to `len` bytes, so shorter outputs are prefixes of
/// longer ones.
#[cfg_attr(not(feature = "hazmat"), allow(dead_code))]
pub fn mgf1<D>(seed: &[u8], len: usize) -> Vec<u8>
where
    D: Digest + FixedOutputReset,
{
    let mut out = vec![0u8; len];
    mgf1_xor_digest(&mut out, &mut D::new(), seed);
    out
}

fn inc_counter(counter: &mut [u8; 4]) {
    for i in (0..4).rev() {
        counter[i] = counter[i].wrapping_add(1);
        if counter[i] != 0 {
            // No overflow
            return;
        }
    }
}
