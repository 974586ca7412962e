// src/rsa_cryptor.rs
//! RSA encryption of small payloads — at most one modulus worth of data
//!
//! Large data should be encrypted with AES under a random key and only that
//! key encrypted with RSA; this module only covers the RSA step.
//!
//! Without padding the input must be exactly the modulus size and
//! numerically below the modulus, and the result is deterministic. PKCS#1
//! v1.5 padding adds random bytes, so only decryption of it can be compared
//! against a fixture.

use std::fmt;
use std::str::FromStr;

use rand::rngs::OsRng;
use rsa::traits::{PrivateKeyParts, PublicKeyParts};
use rsa::{BigUint, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};

use crate::consts::PKCS1_PADDING_OVERHEAD;
use crate::error::{CompatError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsaPadding {
    None,
    #[default]
    Pkcs1,
}

impl fmt::Display for RsaPadding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RsaPadding::None => "none",
            RsaPadding::Pkcs1 => "pkcs1",
        })
    }
}

impl FromStr for RsaPadding {
    type Err = CompatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "raw" => Ok(RsaPadding::None),
            "pkcs1" => Ok(RsaPadding::Pkcs1),
            _ => Err(CompatError::UnknownAlgorithm(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RsaSmallCryptor {
    padding: RsaPadding,
}

impl RsaSmallCryptor {
    pub fn new(padding: RsaPadding) -> Self {
        Self { padding }
    }

    pub fn padding(&self) -> RsaPadding {
        self.padding
    }

    /// Largest plaintext this padding accepts for `key`
    pub fn max_input_len<K: PublicKeyParts>(&self, key: &K) -> usize {
        match self.padding {
            RsaPadding::None => key.size(),
            RsaPadding::Pkcs1 => key.size().saturating_sub(PKCS1_PADDING_OVERHEAD),
        }
    }

    /// Encrypt with the public key; output is always modulus-sized
    pub fn encrypt(&self, key: &RsaPublicKey, plaintext: &[u8]) -> Result<Vec<u8>> {
        let modulus = key.size();
        match self.padding {
            RsaPadding::None => {
                if plaintext.len() != modulus {
                    return Err(CompatError::ModulusSizeMismatch {
                        len: plaintext.len(),
                        modulus,
                    });
                }
                let m = below_modulus(plaintext, key.n())?;
                Ok(left_pad(m.modpow(key.e(), key.n()), modulus))
            }
            RsaPadding::Pkcs1 => {
                let max = self.max_input_len(key);
                if plaintext.len() > max {
                    return Err(CompatError::MessageTooLong {
                        len: plaintext.len(),
                        max,
                    });
                }
                Ok(key.encrypt(&mut OsRng, Pkcs1v15Encrypt, plaintext)?)
            }
        }
    }

    /// Decrypt with the private key; with PKCS#1 the output may be any length
    pub fn decrypt(&self, key: &RsaPrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let modulus = key.size();
        if ciphertext.len() != modulus {
            return Err(CompatError::ModulusSizeMismatch {
                len: ciphertext.len(),
                modulus,
            });
        }
        match self.padding {
            RsaPadding::None => {
                let c = below_modulus(ciphertext, key.n())?;
                Ok(left_pad(c.modpow(key.d(), key.n()), modulus))
            }
            RsaPadding::Pkcs1 => Ok(key.decrypt(Pkcs1v15Encrypt, ciphertext)?),
        }
    }
}

fn below_modulus(data: &[u8], n: &BigUint) -> Result<BigUint> {
    let value = BigUint::from_bytes_be(data);
    if &value >= n {
        return Err(CompatError::InvalidParameter(
            "input is not numerically below the modulus",
        ));
    }
    Ok(value)
}

/// Big-endian bytes of `value`, zero-extended to `len`
fn left_pad(value: BigUint, len: usize) -> Vec<u8> {
    let bytes = value.to_bytes_be();
    let mut out = vec![0u8; len.saturating_sub(bytes.len())];
    out.extend_from_slice(&bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_names_parse() {
        assert_eq!("none".parse::<RsaPadding>().unwrap(), RsaPadding::None);
        assert_eq!("PKCS1".parse::<RsaPadding>().unwrap(), RsaPadding::Pkcs1);
        assert!("oaep".parse::<RsaPadding>().is_err());
        assert_eq!(RsaPadding::default(), RsaPadding::Pkcs1);
    }

    #[test]
    fn left_pad_keeps_leading_zeros() {
        let out = left_pad(BigUint::from(0x0102u32), 4);
        assert_eq!(out, vec![0, 0, 1, 2]);
    }
}
