use super::{decrypt_digest, EncryptingKey};
use crate::{
    traits::{Decryptor, EncryptingKeypair},
    Result, RsaPrivateKey,
};
use alloc::{boxed::Box, vec::Vec};
use core::marker::PhantomData;
use digest::{Digest, FixedOutputReset};
use zeroize::ZeroizeOnDrop;

/// Decryption key for OAEP decryption as described in [RFC8017 § 7.1].
///
/// [RFC8017 § 7.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1
#[derive(Debug, Clone)]
pub struct DecryptingKey<D, MGD = D>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    inner: RsaPrivateKey,
    label: Option<Box<[u8]>>,
    phantom: PhantomData<D>,
    mg_phantom: PhantomData<MGD>,
}

impl<D, MGD> DecryptingKey<D, MGD>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    /// Create a new decrypting key from an RSA private key.
    pub fn new(key: RsaPrivateKey) -> Self {
        Self {
            inner: key,
            label: None,
            phantom: Default::default(),
            mg_phantom: Default::default(),
        }
    }

    /// Create a new decrypting key from an RSA private key using provided label
    pub fn new_with_label<S: Into<Box<[u8]>>>(key: RsaPrivateKey, label: S) -> Self {
        Self {
            inner: key,
            label: Some(label.into()),
            phantom: Default::default(),
            mg_phantom: Default::default(),
        }
    }

    /// Wipe the wrapped private key. Any later [`decrypt`](Decryptor::decrypt)
    /// fails.
    pub fn destroy(&mut self) {
        self.inner.destroy();
    }
}

impl<D, MGD> Decryptor for DecryptingKey<D, MGD>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        decrypt_digest::<D, MGD>(&self.inner, ciphertext, self.label.as_deref())
    }
}

impl<D, MGD> EncryptingKeypair for DecryptingKey<D, MGD>
where
    D: Digest + Clone,
    MGD: Digest + FixedOutputReset + Clone,
{
    type EncryptingKey = EncryptingKey<D, MGD>;

    fn encrypting_key(&self) -> EncryptingKey<D, MGD> {
        let key = self.inner.to_public_key();
        match &self.label {
            Some(label) => EncryptingKey::new_with_label(key, label.clone()),
            None => EncryptingKey::new(key),
        }
    }
}

impl<D, MGD> ZeroizeOnDrop for DecryptingKey<D, MGD>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
}

impl<D, MGD> PartialEq for DecryptingKey<D, MGD>
where
    D: Digest,
    MGD: Digest + FixedOutputReset,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.label == other.label
    }
}
