// src/cryptor.rs
//! AES one-shot encryption and decryption — ECB or CBC, with or without PKCS#7
//!
//! Key size picks the cipher: 16 bytes → AES-128, 24 → AES-192,
//! 32 → AES-256. Without padding every input must be a whole number of
//! blocks; empty input is allowed and yields empty output.

use std::fmt;

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use serde::{Deserialize, Serialize};

use crate::aliases::{InitVector, SymmetricKey};
use crate::consts::{AES_BLOCK_SIZE, AES_KEY_SIZES};
use crate::error::{CompatError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockMode {
    Ecb,
    Cbc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    None,
    Pkcs7,
}

impl fmt::Display for BlockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlockMode::Ecb => "ecb",
            BlockMode::Cbc => "cbc",
        })
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Padding::None => "nopad",
            Padding::Pkcs7 => "pkcs7",
        })
    }
}

/// Expands to a block with `$cipher` bound to the AES variant for `$key`
macro_rules! with_aes {
    ($key:expr, $cipher:ident => $body:expr) => {
        match $key.len() {
            16 => {
                type $cipher = Aes128;
                $body
            }
            24 => {
                type $cipher = Aes192;
                $body
            }
            32 => {
                type $cipher = Aes256;
                $body
            }
            n => Err(CompatError::InvalidKeyLength(n)),
        }
    };
}

pub(crate) use with_aes;

/// A validated AES configuration; borrows its key material
pub struct AesCryptor<'a> {
    pub(crate) key: &'a SymmetricKey,
    pub(crate) iv: Option<&'a InitVector>,
    mode: BlockMode,
    padding: Padding,
}

impl<'a> AesCryptor<'a> {
    /// Validate key/IV against the mode. CBC needs a 16-byte IV, ECB takes none.
    pub fn new(
        key: &'a SymmetricKey,
        iv: Option<&'a InitVector>,
        mode: BlockMode,
        padding: Padding,
    ) -> Result<Self> {
        let key_len = key.expose_secret().len();
        if !AES_KEY_SIZES.contains(&key_len) {
            return Err(CompatError::InvalidKeyLength(key_len));
        }

        match (mode, iv) {
            (BlockMode::Ecb, Some(_)) => return Err(CompatError::UnexpectedIv),
            (BlockMode::Cbc, None) => return Err(CompatError::MissingIv),
            (BlockMode::Cbc, Some(iv)) if iv.expose_secret().len() != AES_BLOCK_SIZE => {
                return Err(CompatError::InvalidIvLength(iv.expose_secret().len()))
            }
            _ => {}
        }

        Ok(Self {
            key,
            iv,
            mode,
            padding,
        })
    }

    pub fn mode(&self) -> BlockMode {
        self.mode
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Bits of key, for naming (`aes-128-cbc` etc.)
    pub fn key_bits(&self) -> usize {
        self.key.expose_secret().len() * 8
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        if self.padding == Padding::None {
            check_aligned(plaintext)?;
        }

        let key = self.key.expose_secret();
        match self.mode {
            BlockMode::Ecb => with_aes!(key, C => {
                let mode = ecb::Encryptor::<C>::new_from_slice(key)
                    .map_err(|_| CompatError::InvalidKeyLength(key.len()))?;
                Ok(encrypt_with(mode, plaintext, self.padding))
            }),
            BlockMode::Cbc => {
                let iv = self.iv_bytes()?;
                with_aes!(key, C => {
                    let mode = cbc::Encryptor::<C>::new_from_slices(key, iv)
                        .map_err(|_| CompatError::InvalidIvLength(iv.len()))?;
                    Ok(encrypt_with(mode, plaintext, self.padding))
                })
            }
        }
    }

    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        check_aligned(ciphertext)?;

        let key = self.key.expose_secret();
        match self.mode {
            BlockMode::Ecb => with_aes!(key, C => {
                let mode = ecb::Decryptor::<C>::new_from_slice(key)
                    .map_err(|_| CompatError::InvalidKeyLength(key.len()))?;
                decrypt_with(mode, ciphertext, self.padding)
            }),
            BlockMode::Cbc => {
                let iv = self.iv_bytes()?;
                with_aes!(key, C => {
                    let mode = cbc::Decryptor::<C>::new_from_slices(key, iv)
                        .map_err(|_| CompatError::InvalidIvLength(iv.len()))?;
                    decrypt_with(mode, ciphertext, self.padding)
                })
            }
        }
    }

    pub(crate) fn iv_bytes(&self) -> Result<&[u8]> {
        self.iv
            .map(|iv| iv.expose_secret().as_slice())
            .ok_or(CompatError::MissingIv)
    }
}

pub(crate) fn check_aligned(data: &[u8]) -> Result<()> {
    if data.len() % AES_BLOCK_SIZE != 0 {
        return Err(CompatError::UnalignedInput {
            len: data.len(),
            block: AES_BLOCK_SIZE,
        });
    }
    Ok(())
}

fn encrypt_with<M: BlockEncryptMut>(mut mode: M, data: &[u8], padding: Padding) -> Vec<u8> {
    match padding {
        Padding::Pkcs7 => mode.encrypt_padded_vec_mut::<Pkcs7>(data),
        Padding::None => {
            let mut out = data.to_vec();
            for block in out.chunks_exact_mut(M::block_size()) {
                mode.encrypt_block_mut(GenericArray::from_mut_slice(block));
            }
            out
        }
    }
}

fn decrypt_with<M: BlockDecryptMut>(mut mode: M, data: &[u8], padding: Padding) -> Result<Vec<u8>> {
    match padding {
        Padding::Pkcs7 => mode
            .decrypt_padded_vec_mut::<Pkcs7>(data)
            .map_err(|_| CompatError::BadPadding),
        Padding::None => {
            let mut out = data.to_vec();
            for block in out.chunks_exact_mut(M::block_size()) {
                mode.decrypt_block_mut(GenericArray::from_mut_slice(block));
            }
            Ok(out)
        }
    }
}
