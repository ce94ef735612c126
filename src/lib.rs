#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo_small.png")]
#![warn(missing_docs)]

//! # Supported algorithms
//!
//! This crate implements the [OAEP encryption scheme](#oaep-encryption) of
//! [RFC8017] over fixed-width blocks. The block width is chosen through an
//! [`RsaConfig`], and private keys carry the values needed for decryption
//! with the Chinese Remainder Theorem.
//!
//! # Usage
//!
//! ## OAEP encryption
//!
//! Note: requires `sha2` feature of `rsa-oaep-crt` crate is enabled.
//!
#![cfg_attr(feature = "sha2", doc = "```")]
#![cfg_attr(not(feature = "sha2"), doc = "```ignore")]
//! use rsa_oaep_crt::{generate_key_pair, oaep, RsaConfig, sha2::Sha256};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let (public_key, private_key) =
//!     generate_key_pair(&mut rng, RsaConfig::RSA1024, 65537).expect("failed to generate a key");
//!
//! // Encrypt
//! let data = b"hello world";
//! let enc_data = oaep::encrypt_digest::<_, Sha256, Sha256>(&mut rng, &public_key, data, None)
//!     .expect("failed to encrypt");
//! assert_eq!(enc_data.len(), 128);
//!
//! // Decrypt
//! let dec_data = oaep::decrypt_digest::<Sha256, Sha256>(&private_key, &enc_data, None)
//!     .expect("failed to decrypt");
//! assert_eq!(&data[..], &dec_data[..]);
//! ```
//!
//! ## Padding and raw blocks
//!
//! The [`Oaep`] codec and the block methods of the keys can also be used
//! separately:
//!
#![cfg_attr(feature = "sha2", doc = "```")]
#![cfg_attr(not(feature = "sha2"), doc = "```ignore")]
//! use rsa_oaep_crt::{Oaep, RsaConfig, RsaPrivateKey, sha2::Sha256};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let config = RsaConfig::RSA1024;
//! let mut private_key = RsaPrivateKey::new(&mut rng, config).expect("failed to generate a key");
//! let public_key = private_key.to_public_key();
//!
//! let codec = Oaep::<Sha256>::new(config);
//! let block = codec.encode(&mut rng, b"test", Some(b"label")).expect("failed to encode");
//! let ciphertext = public_key.encrypt_block(&block).expect("failed to encrypt");
//!
//! let block = private_key.decrypt_block(&ciphertext).expect("failed to decrypt");
//! assert_eq!(codec.decode(Some(b"label"), &block).expect("failed to decode"), b"test");
//!
//! // Wipe the secret values once they are no longer needed.
//! private_key.destroy();
//! assert!(private_key.decrypt_block(&ciphertext).is_err());
//! ```
//!
//! ## Encryption keys
//!
#![cfg_attr(feature = "sha2", doc = "```")]
#![cfg_attr(not(feature = "sha2"), doc = "```ignore")]
//! use rsa_oaep_crt::{RsaConfig, RsaPrivateKey, sha2::Sha256};
//! use rsa_oaep_crt::oaep::DecryptingKey;
//! use rsa_oaep_crt::traits::{Decryptor, EncryptingKeypair, RandomizedEncryptor};
//!
//! let mut rng = rand::thread_rng(); // rand@0.8
//!
//! let private_key = RsaPrivateKey::new(&mut rng, RsaConfig::RSA1024).expect("failed to generate a key");
//! let decrypting_key = DecryptingKey::<Sha256>::new_with_label(private_key, &b"label"[..]);
//! let encrypting_key = decrypting_key.encrypting_key();
//!
//! let ciphertext = encrypting_key.encrypt_with_rng(&mut rng, b"hello world").expect("failed to encrypt");
//! let plaintext = decrypting_key.decrypt(&ciphertext).expect("failed to decrypt");
//! assert_eq!(&plaintext[..], b"hello world");
//! ```
//!
//! [RFC8017]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1

#[cfg(doctest)]
pub struct ReadmeDoctests;

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use num_bigint::BigUint;
pub use rand_core;

mod algorithms;
pub mod config;
pub mod errors;
pub mod oaep;
pub mod traits;

mod key;

#[cfg(feature = "sha1")]
pub use sha1;
#[cfg(feature = "sha2")]
pub use sha2;

pub use crate::{
    config::RsaConfig,
    errors::{Error, Result},
    key::{generate_key_pair, RsaPrivateKey, RsaPublicKey, DEFAULT_EXPONENT},
    oaep::Oaep,
};

#[cfg(feature = "hazmat")]
pub mod hazmat;
