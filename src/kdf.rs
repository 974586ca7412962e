// src/kdf.rs
//! PBKDF2 key derivation

use md5::Md5;
use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use tracing::debug;

use crate::aliases::Passphrase;
use crate::digest::DigestAlgorithm;
use crate::error::{CompatError, Result};

/// Derive `key_len` bytes from `password` and `salt` with an HMAC-based PRF.
///
/// The password is used as its UTF-8 bytes. `rounds` and `key_len` must both
/// be at least 1.
pub fn pbkdf2(
    prf: DigestAlgorithm,
    password: &Passphrase,
    salt: &[u8],
    rounds: u32,
    key_len: usize,
) -> Result<Vec<u8>> {
    if rounds == 0 {
        return Err(CompatError::InvalidParameter("PBKDF2 rounds must be at least 1"));
    }
    if key_len == 0 {
        return Err(CompatError::InvalidParameter("PBKDF2 key length must be at least 1"));
    }

    debug!(%prf, rounds, key_len, "deriving key");

    let password = password.expose_secret().as_bytes();
    let mut key = vec![0u8; key_len];
    match prf {
        DigestAlgorithm::Md5 => pbkdf2_hmac::<Md5>(password, salt, rounds, &mut key),
        DigestAlgorithm::Sha1 => pbkdf2_hmac::<Sha1>(password, salt, rounds, &mut key),
        DigestAlgorithm::Sha224 => pbkdf2_hmac::<Sha224>(password, salt, rounds, &mut key),
        DigestAlgorithm::Sha256 => pbkdf2_hmac::<Sha256>(password, salt, rounds, &mut key),
        DigestAlgorithm::Sha384 => pbkdf2_hmac::<Sha384>(password, salt, rounds, &mut key),
        DigestAlgorithm::Sha512 => pbkdf2_hmac::<Sha512>(password, salt, rounds, &mut key),
    }
    Ok(key)
}
