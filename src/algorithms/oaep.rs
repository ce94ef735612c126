//! Encoding and decoding of [OAEP padding](https://datatracker.ietf.org/doc/html/rfc8017#section-7.1).
//!
use alloc::vec::Vec;

use digest::{Digest, FixedOutputReset};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::Zeroizing;

use super::mgf::mgf1_xor_digest;
use super::pad::left_pad;
use crate::errors::{Error, Result};

#[inline]
fn encode_internal<R: CryptoRngCore + ?Sized, MGF: FnMut(&mut [u8], &mut [u8])>(
    rng: &mut R,
    msg: &[u8],
    p_hash: &[u8],
    h_size: usize,
    k: usize,
    mut mgf: MGF,
) -> Result<Zeroizing<Vec<u8>>> {
    if msg.len() + 2 * h_size + 2 > k {
        return Err(Error::MessageTooLong);
    }

    let mut em = Zeroizing::new(vec![0u8; k]);

    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_size);
    rng.fill_bytes(seed);

    // Data block DB =  pHash || PS || 01 || M
    let db_len = k - h_size - 1;

    db[0..h_size].copy_from_slice(p_hash);
    db[db_len - msg.len() - 1] = 1;
    db[db_len - msg.len()..].copy_from_slice(msg);

    mgf(seed, db);

    Ok(em)
}

/// Pads the given message into a `k` byte block using [PKCS#1 OAEP].
///
/// The block is `0x00 || maskedSeed || maskedDB`, where the seed is drawn
/// from `rng`, so its value as a big-endian integer is always below
/// `2^(8 * (k - 1))`.
///
/// The message must be no longer than `k - 2 - 2 * D::output_size()`.
///
/// [PKCS#1 OAEP]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1
#[inline]
pub(crate) fn oaep_encode_digest<
    R: CryptoRngCore + ?Sized,
    D: Digest,
    MGD: Digest + FixedOutputReset,
>(
    rng: &mut R,
    msg: &[u8],
    label: &[u8],
    k: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    let h_size = <D as Digest>::output_size();

    let p_hash = D::digest(label);

    encode_internal(rng, msg, &p_hash, h_size, k, |seed, db| {
        let mut mgf_digest = MGD::new();
        mgf1_xor_digest(db, &mut mgf_digest, seed);
        mgf1_xor_digest(seed, &mut mgf_digest, db);
    })
}

/// Removes [PKCS#1 OAEP] padding from a `k` byte block.
///
/// Blocks shorter than `k` are taken to have lost leading zero bytes and are
/// left padded back to `k` bytes.
///
/// Note that whether this function returns an error or not discloses secret
/// information. If an attacker can cause this function to run repeatedly and
/// learn whether each instance returned an error then they can decrypt
/// ciphertexts as if they had the private key. The error is always the
/// same and the checks themselves run in constant time.
///
/// [PKCS#1 OAEP]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1
#[inline]
pub(crate) fn oaep_decode_digest<D: Digest, MGD: Digest + FixedOutputReset>(
    block: &[u8],
    label: &[u8],
    k: usize,
) -> Result<Vec<u8>> {
    let h_size = <D as Digest>::output_size();

    if k < h_size * 2 + 2 || block.len() > k {
        return Err(Error::Decryption);
    }

    let mut em = Zeroizing::new(left_pad(block, k).map_err(|_| Error::Decryption)?);

    let expected_p_hash = D::digest(label);

    let res = decode_inner(&mut em, h_size, &expected_p_hash, |seed, db| {
        let mut mgf_digest = MGD::new();
        mgf1_xor_digest(seed, &mut mgf_digest, db);
        mgf1_xor_digest(db, &mut mgf_digest, seed);
    });

    let index: Option<u32> = res.into();
    match index {
        Some(index) => Ok(em[index as usize..].to_vec()),
        None => Err(Error::Decryption),
    }
}

/// Unmasks `em` in place and locates the message. The returned option is
/// set only if the block was correctly structured; its value is the offset
/// of the message within `em`.
///
/// Every byte of the data block is inspected regardless of where the
/// separator or the first mismatch sits.
#[inline]
fn decode_inner<MGF: FnMut(&mut [u8], &mut [u8])>(
    em: &mut [u8],
    h_size: usize,
    expected_p_hash: &[u8],
    mut mgf: MGF,
) -> CtOption<u32> {
    let first_byte_is_zero = em[0].ct_eq(&0u8);

    let (_, payload) = em.split_at_mut(1);
    let (seed, db) = payload.split_at_mut(h_size);

    mgf(seed, db);

    let hash_are_equal = db[0..h_size].ct_eq(expected_p_hash);

    // The remainder of the plaintext must be zero or more 0x00, followed
    // by 0x01, followed by the message.
    //   looking_for_index: 1 if we are still looking for the 0x01
    //   index: the offset of the first 0x01 byte
    //   nonzero_before_one: 1 if we saw a non-zero byte before the 1
    let mut looking_for_index = Choice::from(1u8);
    let mut index = 0u32;
    let mut nonzero_before_one = Choice::from(0u8);

    for (i, el) in db.iter().skip(h_size).enumerate() {
        let equals0 = el.ct_eq(&0u8);
        let equals1 = el.ct_eq(&1u8);
        index.conditional_assign(&(i as u32), looking_for_index & equals1);
        looking_for_index &= !equals1;
        nonzero_before_one |= looking_for_index & !equals0;
    }

    let valid = first_byte_is_zero & hash_are_equal & !nonzero_before_one & !looking_for_index;

    CtOption::new(index + 2 + (h_size * 2) as u32, valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};
    use sha1::Sha1;
    use sha2::{Sha256, Sha512};

    const K: usize = 128;

    fn encode(msg: &[u8], label: &[u8]) -> Zeroizing<Vec<u8>> {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        oaep_encode_digest::<_, Sha256, Sha256>(&mut rng, msg, label, K).unwrap()
    }

    fn decode(block: &[u8], label: &[u8]) -> Result<Vec<u8>> {
        oaep_decode_digest::<Sha256, Sha256>(block, label, K)
    }

    /// Masks a hand-built data block the same way the encoder does.
    fn mask(seed: &[u8], db: &[u8]) -> Vec<u8> {
        let mut seed = seed.to_vec();
        let mut db = db.to_vec();
        let mut digest = Sha256::new();
        mgf1_xor_digest(&mut db, &mut digest, &seed);
        mgf1_xor_digest(&mut seed, &mut digest, &db);

        let mut em = vec![0u8];
        em.extend_from_slice(&seed);
        em.extend_from_slice(&db);
        em
    }

    #[test]
    fn test_encode_decode_test_message() {
        let em = encode(b"test", b"");
        assert_eq!(em.len(), K);
        assert_eq!(em[0], 0);
        assert_eq!(decode(&em, b"").unwrap(), b"test");

        let mut tampered = em.to_vec();
        tampered[10] ^= 0x01;
        assert_eq!(decode(&tampered, b""), Err(Error::Decryption));
    }

    #[test]
    fn test_any_single_byte_flip_is_rejected() {
        let em = encode(b"attack at dawn", b"label");

        for i in 0..K {
            let mut tampered = em.to_vec();
            tampered[i] ^= 0x80;
            assert_eq!(
                decode(&tampered, b"label"),
                Err(Error::Decryption),
                "flip at {i}"
            );
        }
    }

    #[test]
    fn test_label_must_match() {
        let em = encode(b"hello", b"label one");
        assert_eq!(decode(&em, b"label one").unwrap(), b"hello");
        assert_eq!(decode(&em, b"label two"), Err(Error::Decryption));
        assert_eq!(decode(&em, b""), Err(Error::Decryption));
    }

    #[test]
    fn test_message_length_limits() {
        let max = K - 2 * 32 - 2;
        let msg = vec![0xa5u8; max];
        let em = encode(&msg, b"");
        assert_eq!(decode(&em, b"").unwrap(), msg);

        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let too_long = vec![0xa5u8; max + 1];
        assert!(matches!(
            oaep_encode_digest::<_, Sha256, Sha256>(&mut rng, &too_long, b"", K),
            Err(Error::MessageTooLong)
        ));

        let em = encode(b"", b"");
        assert_eq!(decode(&em, b"").unwrap(), b"");
    }

    #[test]
    fn test_message_ending_in_separator_bytes() {
        let msg = [0u8, 1, 0, 1, 1];
        let em = encode(&msg, b"");
        assert_eq!(decode(&em, b"").unwrap(), msg);
    }

    #[test]
    fn test_short_block_is_left_padded() {
        let mut rng = ChaCha8Rng::from_seed([1; 32]);
        let em = loop {
            let em = oaep_encode_digest::<_, Sha256, Sha256>(&mut rng, b"short", b"", K).unwrap();
            if em[1] == 0 {
                break em;
            }
        };

        assert_eq!(decode(&em[1..], b"").unwrap(), b"short");
        // dropping trailing bytes shifts the whole block
        assert_eq!(decode(&em[..K - 1], b""), Err(Error::Decryption));
    }

    #[test]
    fn test_oversized_block_and_degenerate_size() {
        let em = encode(b"test", b"");
        let mut long = vec![0u8];
        long.extend_from_slice(&em);
        assert_eq!(decode(&long, b""), Err(Error::Decryption));

        // 2 * 64 + 2 bytes needed for SHA-512
        assert_eq!(
            oaep_decode_digest::<Sha512, Sha512>(&em, b"", K),
            Err(Error::Decryption)
        );
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        assert!(matches!(
            oaep_encode_digest::<_, Sha512, Sha512>(&mut rng, b"", b"", K),
            Err(Error::MessageTooLong)
        ));
    }

    #[test]
    fn test_nonzero_leading_byte_is_rejected() {
        let mut em = encode(b"test", b"").to_vec();
        em[0] = 1;
        assert_eq!(decode(&em, b""), Err(Error::Decryption));
    }

    #[test]
    fn test_missing_separator_is_rejected() {
        let seed = [7u8; 32];
        let mut db = vec![0u8; K - 33];
        db[..32].copy_from_slice(&Sha256::digest(b""));

        assert_eq!(decode(&mask(&seed, &db), b""), Err(Error::Decryption));

        let last = db.len() - 1;
        db[last] = 1;
        assert_eq!(decode(&mask(&seed, &db), b"").unwrap(), b"");
    }

    #[test]
    fn test_garbage_before_separator_is_rejected() {
        let seed = [9u8; 32];
        let mut db = vec![0u8; K - 33];
        db[..32].copy_from_slice(&Sha256::digest(b""));
        db[40] = 2;
        db[50] = 1;

        assert_eq!(decode(&mask(&seed, &db), b""), Err(Error::Decryption));

        db[40] = 0;
        assert_eq!(decode(&mask(&seed, &db), b"").unwrap(), &db[51..]);
    }

    #[test]
    fn test_distinct_label_and_mask_digests() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let em = oaep_encode_digest::<_, Sha256, Sha1>(&mut rng, b"mixed", b"", K).unwrap();

        assert_eq!(
            oaep_decode_digest::<Sha256, Sha1>(&em, b"", K).unwrap(),
            b"mixed"
        );
        assert_eq!(
            oaep_decode_digest::<Sha256, Sha256>(&em, b"", K),
            Err(Error::Decryption)
        );
    }

    #[test]
    fn test_encoding_is_randomized() {
        let mut rng = ChaCha8Rng::from_seed([42; 32]);
        let a = oaep_encode_digest::<_, Sha256, Sha256>(&mut rng, b"same", b"", K).unwrap();
        let b = oaep_encode_digest::<_, Sha256, Sha256>(&mut rng, b"same", b"", K).unwrap();

        assert_ne!(a, b);
        assert_eq!(decode(&a, b"").unwrap(), decode(&b, b"").unwrap());
    }
}
