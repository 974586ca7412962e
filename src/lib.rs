// src/lib.rs
//! crypto-compat — cross-validates a crypto stack against fixture files
//!
//! Features:
//! - Base64 / hex / PEM codecs
//! - MD5, SHA-1, SHA-2 digests, HMAC and PBKDF2
//! - AES-ECB/CBC with and without PKCS#7, plus streaming for large files
//! - RSA PKCS#1 v1.5 signatures and small-payload encryption
//! - A sequential fixture suite with a JSON run report

pub mod aliases;
pub mod codec;
pub mod config;
pub mod consts;
pub mod cryptor;
pub mod digest;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod kdf;
pub mod rsa_cryptor;
pub mod rsa_key;
pub mod signature;
pub mod stream;

// Re-export everything users need at the crate root
pub use aliases::{HmacKey, InitVector, Passphrase, SymmetricKey};
pub use config::load as load_config;
pub use cryptor::{AesCryptor, BlockMode, Padding};
pub use digest::DigestAlgorithm;
pub use error::{CompatError, Result};
pub use fixtures::{FixtureSet, VectorManifest};
pub use harness::{Report, Suite};
pub use rsa_cryptor::{RsaPadding, RsaSmallCryptor};
pub use rsa_key::RsaKeys;
