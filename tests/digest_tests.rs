// tests/digest_tests.rs
//! Digests, HMAC and PBKDF2 against the fixture values
mod support;

use crypto_compat::aliases::{HmacKey, Passphrase};
use crypto_compat::codec::{from_hex, to_hex};
use crypto_compat::digest::{digest, hmac};
use crypto_compat::kdf::pbkdf2;
use crypto_compat::DigestAlgorithm;

#[test]
fn certificate_digests() {
    let cert = support::fixtures().bytes("test.cer").unwrap();
    assert_eq!(
        to_hex(&digest(DigestAlgorithm::Md5, &cert)),
        "7452d7ac0df0cdfa5d5333aa3840a69b"
    );
    assert_eq!(
        to_hex(&digest(DigestAlgorithm::Sha1, &cert)),
        "1804dfccad1ee03416d49370ea094799a18953a0"
    );
}

#[test]
fn every_manifest_digest_matches() {
    let fx = support::fixtures();
    for v in fx.manifest().unwrap().digests {
        let actual = digest(v.algorithm, &fx.bytes(&v.input).unwrap());
        assert_eq!(to_hex(&actual), v.expected_hex, "{} of {}", v.algorithm, v.input);
    }
}

#[test]
fn hmac_accepts_empty_key() {
    let fx = support::fixtures();
    let cert = fx.bytes("test.cer").unwrap();
    let empty = HmacKey::new(Vec::new());
    assert_eq!(
        to_hex(&hmac(DigestAlgorithm::Sha1, &empty, &cert).unwrap()),
        "809e78e10ce4ea3eb152c37735962bdd5d907490"
    );
}

#[test]
fn every_manifest_hmac_matches() {
    let fx = support::fixtures();
    for v in fx.manifest().unwrap().hmacs {
        let key = HmacKey::new(from_hex(&v.key_hex).unwrap());
        let actual = hmac(v.algorithm, &key, &fx.bytes(&v.input).unwrap()).unwrap();
        assert_eq!(to_hex(&actual), v.expected_hex);
    }
}

#[test]
fn hmac_rfc4231_case_2() {
    let key = HmacKey::new(b"Jefe".to_vec());
    let mac = hmac(
        DigestAlgorithm::Sha256,
        &key,
        b"what do ya want for nothing?",
    )
    .unwrap();
    assert_eq!(
        to_hex(&mac),
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
    );
}

#[test]
fn pbkdf2_sha1_thousand_rounds() {
    let password = Passphrase::new("Hello Cruel World!".to_string());
    let key = pbkdf2(DigestAlgorithm::Sha1, &password, b"Some salt sir?", 1000, 10).unwrap();
    assert_eq!(to_hex(&key), "e56c27f5eed251db50a3");
}

#[test]
fn every_manifest_pbkdf2_matches() {
    for v in support::fixtures().manifest().unwrap().pbkdf2 {
        let password = Passphrase::new(v.password.clone());
        let key = pbkdf2(v.prf, &password, v.salt.as_bytes(), v.rounds, v.key_len).unwrap();
        assert_eq!(key.len(), v.key_len);
        assert_eq!(to_hex(&key), v.expected_hex);
    }
}

#[test]
fn pbkdf2_longer_output_extends_shorter() {
    let password = Passphrase::new("Hello Cruel World!".to_string());
    let short = pbkdf2(DigestAlgorithm::Sha256, &password, b"salt", 10, 16).unwrap();
    let long = pbkdf2(DigestAlgorithm::Sha256, &password, b"salt", 10, 48).unwrap();
    assert_eq!(&long[..16], &short[..]);
}
