// tests/rsa_tests.rs
//! Key loading, SHA-1 signatures and small-payload RSA encryption
mod common;
mod support;

use crypto_compat::error::CompatError;
use crypto_compat::rsa_key::{load_private_key, private_key_from_der, public_key_from_der};
use crypto_compat::signature::{sign, sign_sha1, verify, verify_sha1};
use crypto_compat::{DigestAlgorithm, RsaPadding, RsaSmallCryptor};
use rsa::traits::PublicKeyParts;

#[test]
fn key_pair_loads_and_matches() {
    let keys = support::keys();
    assert_eq!(keys.modulus_len(), 256);
    assert_eq!(keys.private.to_public_key(), keys.public);
}

#[test]
fn pkcs8_and_pkcs1_private_keys_are_the_same_key() {
    let dir = support::fixture_dir();
    let pkcs1 = load_private_key(dir.join("private.pem")).unwrap();
    let pkcs8 = load_private_key(dir.join("private-pkcs8.pem")).unwrap();
    assert_eq!(pkcs1, pkcs8);
}

#[test]
fn der_keys_load_from_pem_bodies() {
    let fx = support::fixtures();
    let public = public_key_from_der(&fx.pem("public.pem", "PUBLIC KEY").unwrap()).unwrap();
    let private =
        private_key_from_der(&fx.pem("private.pem", "RSA PRIVATE KEY").unwrap()).unwrap();
    assert_eq!(private.to_public_key(), public);
    assert!(public_key_from_der(b"not a key").is_err());
}

#[test]
fn sha1_signature_is_reproduced_exactly() {
    let fx = support::fixtures();
    let keys = support::keys();
    let signature = sign_sha1(&keys.private, &fx.bytes("test.cer").unwrap()).unwrap();
    assert_eq!(signature, fx.bytes("test.cer.sig").unwrap());
    assert_eq!(signature.len(), keys.modulus_len());
}

#[test]
fn signature_of_empty_file() {
    let fx = support::fixtures();
    let keys = support::keys();
    let sig = fx.bytes("plaintext-0.dat.sig").unwrap();
    assert!(verify_sha1(&keys.public, &[], &sig));
    assert_eq!(sign_sha1(&keys.private, &[]).unwrap(), sig);
}

#[test]
fn corrupted_certificate_does_not_verify() {
    common::setup();
    let fx = support::fixtures();
    let keys = support::keys();
    let sig = fx.bytes("test.cer.sig").unwrap();
    assert!(verify_sha1(&keys.public, &fx.bytes("test.cer").unwrap(), &sig));
    assert!(!verify_sha1(
        &keys.public,
        &fx.bytes("test-corrupted.cer").unwrap(),
        &sig
    ));
}

#[test]
fn malformed_signature_is_false_not_error() {
    let keys = support::keys();
    assert!(!verify_sha1(&keys.public, b"data", b"short"));
}

#[test]
fn signatures_under_other_digests_round_trip() {
    let keys = support::keys();
    for alg in DigestAlgorithm::ALL {
        let sig = sign(&keys.private, alg, b"payload").unwrap();
        assert!(verify(&keys.public, alg, b"payload", &sig), "{alg}");
        assert!(!verify(&keys.public, alg, b"payload!", &sig), "{alg}");
    }
}

#[test]
fn unpadded_encrypt_matches_fixture() {
    let fx = support::fixtures();
    let keys = support::keys();
    let cryptor = RsaSmallCryptor::new(RsaPadding::None);
    let plaintext = fx.bytes("plaintext-256.dat").unwrap();
    let ciphertext = cryptor.encrypt(&keys.public, &plaintext).unwrap();
    assert_eq!(ciphertext, fx.bytes("ciphertext-rsa-nopad-256.dat").unwrap());
    assert_eq!(cryptor.decrypt(&keys.private, &ciphertext).unwrap(), plaintext);
}

#[test]
fn unpadded_requires_exact_modulus_size() {
    let keys = support::keys();
    let cryptor = RsaSmallCryptor::new(RsaPadding::None);
    assert!(matches!(
        cryptor.encrypt(&keys.public, &[1u8; 32]),
        Err(CompatError::ModulusSizeMismatch {
            len: 32,
            modulus: 256
        })
    ));
}

#[test]
fn unpadded_rejects_value_above_modulus() {
    let keys = support::keys();
    let cryptor = RsaSmallCryptor::new(RsaPadding::None);
    assert!(matches!(
        cryptor.encrypt(&keys.public, &[0xFF; 256]),
        Err(CompatError::InvalidParameter(_))
    ));
}

#[test]
fn pkcs1_fixture_decrypts() {
    let fx = support::fixtures();
    let keys = support::keys();
    let plaintext = RsaSmallCryptor::new(RsaPadding::Pkcs1)
        .decrypt(&keys.private, &fx.bytes("ciphertext-rsa-pkcs1-32.dat").unwrap())
        .unwrap();
    assert_eq!(plaintext, fx.bytes("plaintext-32.dat").unwrap());
}

#[test]
fn pkcs1_encryption_is_randomised_but_round_trips() {
    let keys = support::keys();
    let cryptor = RsaSmallCryptor::default();
    let a = cryptor.encrypt(&keys.public, b"secret").unwrap();
    let b = cryptor.encrypt(&keys.public, b"secret").unwrap();
    assert_ne!(a, b);
    assert_eq!(a.len(), keys.public.size());
    assert_eq!(cryptor.decrypt(&keys.private, &a).unwrap(), b"secret");
    assert_eq!(cryptor.decrypt(&keys.private, &b).unwrap(), b"secret");
}

#[test]
fn pkcs1_limit_is_modulus_minus_eleven() {
    let keys = support::keys();
    let cryptor = RsaSmallCryptor::new(RsaPadding::Pkcs1);
    assert_eq!(cryptor.max_input_len(&keys.public), 245);
    assert!(cryptor.encrypt(&keys.public, &[7u8; 245]).is_ok());
    assert!(matches!(
        cryptor.encrypt(&keys.public, &[7u8; 246]),
        Err(CompatError::MessageTooLong { len: 246, max: 245 })
    ));
}

#[test]
fn decrypt_rejects_wrong_ciphertext_length() {
    let keys = support::keys();
    assert!(matches!(
        RsaSmallCryptor::new(RsaPadding::Pkcs1).decrypt(&keys.private, &[0u8; 100]),
        Err(CompatError::ModulusSizeMismatch { len: 100, .. })
    ));
}
