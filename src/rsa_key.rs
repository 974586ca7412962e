// src/rsa_key.rs
//! RSA key loading — SPKI / PKCS#1 public keys, PKCS#1 / PKCS#8 private keys,
//! as PEM or DER

use std::path::Path;

use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::debug;

use crate::codec::{pem_block, pem_label};
use crate::error::{CompatError, Result};

const SPKI_TAG: &str = "PUBLIC KEY";
const PKCS1_PUBLIC_TAG: &str = "RSA PUBLIC KEY";
const PKCS8_TAG: &str = "PRIVATE KEY";
const PKCS1_PRIVATE_TAG: &str = "RSA PRIVATE KEY";

/// The key pair a suite run signs, verifies, encrypts and decrypts with
pub struct RsaKeys {
    pub public: RsaPublicKey,
    pub private: RsaPrivateKey,
}

impl RsaKeys {
    pub fn load<P: AsRef<Path>>(public_path: P, private_path: P) -> Result<Self> {
        Ok(Self {
            public: load_public_key(public_path)?,
            private: load_private_key(private_path)?,
        })
    }

    /// Modulus size in bytes
    pub fn modulus_len(&self) -> usize {
        self.public.size()
    }
}

pub fn load_public_key<P: AsRef<Path>>(path: P) -> Result<RsaPublicKey> {
    let bytes = std::fs::read(path.as_ref())?;
    debug!("loading public key from {}", path.as_ref().display());
    match std::str::from_utf8(&bytes) {
        Ok(text) if pem_label(text).is_some() => public_key_from_pem(text),
        _ => public_key_from_der(&bytes),
    }
}

pub fn load_private_key<P: AsRef<Path>>(path: P) -> Result<RsaPrivateKey> {
    let bytes = std::fs::read(path.as_ref())?;
    debug!("loading private key from {}", path.as_ref().display());
    match std::str::from_utf8(&bytes) {
        Ok(text) if pem_label(text).is_some() => private_key_from_pem(text),
        _ => private_key_from_der(&bytes),
    }
}

pub fn public_key_from_pem(text: &str) -> Result<RsaPublicKey> {
    match pem_label(text) {
        Some(PKCS1_PUBLIC_TAG) => Ok(RsaPublicKey::from_pkcs1_der(&pem_block(
            text,
            PKCS1_PUBLIC_TAG,
        )?)?),
        _ => Ok(RsaPublicKey::from_public_key_der(&pem_block(text, SPKI_TAG)?)?),
    }
}

pub fn private_key_from_pem(text: &str) -> Result<RsaPrivateKey> {
    match pem_label(text) {
        Some(PKCS1_PRIVATE_TAG) => Ok(RsaPrivateKey::from_pkcs1_der(&pem_block(
            text,
            PKCS1_PRIVATE_TAG,
        )?)?),
        _ => Ok(RsaPrivateKey::from_pkcs8_der(&pem_block(text, PKCS8_TAG)?)?),
    }
}

/// SPKI first, then bare PKCS#1
pub fn public_key_from_der(der: &[u8]) -> Result<RsaPublicKey> {
    match RsaPublicKey::from_public_key_der(der) {
        Ok(key) => Ok(key),
        Err(spki_err) => RsaPublicKey::from_pkcs1_der(der).map_err(|_| CompatError::Spki(spki_err)),
    }
}

/// PKCS#8 first, then bare PKCS#1
pub fn private_key_from_der(der: &[u8]) -> Result<RsaPrivateKey> {
    match RsaPrivateKey::from_pkcs8_der(der) {
        Ok(key) => Ok(key),
        Err(pkcs8_err) => {
            RsaPrivateKey::from_pkcs1_der(der).map_err(|_| CompatError::Pkcs8(pkcs8_err))
        }
    }
}
