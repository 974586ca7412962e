// src/signature.rs
//! RSA PKCS#1 v1.5 signatures over a message digest

use md5::Md5;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use tracing::debug;

use crate::digest::{digest, DigestAlgorithm};
use crate::error::Result;

fn scheme(alg: DigestAlgorithm) -> Pkcs1v15Sign {
    match alg {
        DigestAlgorithm::Md5 => Pkcs1v15Sign::new::<Md5>(),
        DigestAlgorithm::Sha1 => Pkcs1v15Sign::new::<Sha1>(),
        DigestAlgorithm::Sha224 => Pkcs1v15Sign::new::<Sha224>(),
        DigestAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        DigestAlgorithm::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        DigestAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
    }
}

/// Hash `data` with `alg` and sign the digest. PKCS#1 v1.5 signing is
/// deterministic, so the result can be compared against a fixture.
pub fn sign(key: &RsaPrivateKey, alg: DigestAlgorithm, data: &[u8]) -> Result<Vec<u8>> {
    let hashed = digest(alg, data);
    Ok(key.sign(scheme(alg), &hashed)?)
}

/// `true` when `signature` is a valid signature of `data`. A bad or
/// malformed signature is `false`, never an error.
pub fn verify(key: &RsaPublicKey, alg: DigestAlgorithm, data: &[u8], signature: &[u8]) -> bool {
    let hashed = digest(alg, data);
    match key.verify(scheme(alg), &hashed, signature) {
        Ok(()) => true,
        Err(err) => {
            debug!(%alg, "signature rejected: {err}");
            false
        }
    }
}

pub fn sign_sha1(key: &RsaPrivateKey, data: &[u8]) -> Result<Vec<u8>> {
    sign(key, DigestAlgorithm::Sha1, data)
}

pub fn verify_sha1(key: &RsaPublicKey, data: &[u8], signature: &[u8]) -> bool {
    verify(key, DigestAlgorithm::Sha1, data, signature)
}
