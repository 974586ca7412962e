// tests/codec_tests.rs
mod support;

use crypto_compat::codec::{base64_decode, base64_encode, pem_block};
use crypto_compat::error::CompatError;
use proptest::prelude::*;

#[test]
fn certificate_encodes_to_openssl_layout() {
    let fx = support::fixtures();
    let encoded = base64_encode(&fx.bytes("test.cer").unwrap(), true);
    assert_eq!(encoded, fx.string("test.pem").unwrap());
}

#[test]
fn openssl_base64_decodes_to_certificate() {
    let fx = support::fixtures();
    assert_eq!(fx.base64("test.pem").unwrap(), fx.bytes("test.cer").unwrap());
}

#[test]
fn single_line_encoding_has_no_breaks() {
    let fx = support::fixtures();
    let encoded = base64_encode(&fx.bytes("test.cer").unwrap(), false);
    assert!(!encoded.contains('\n'));
    assert_eq!(base64_decode(&encoded).unwrap(), fx.bytes("test.cer").unwrap());
}

#[test]
fn key_files_carry_expected_pem_blocks() {
    let fx = support::fixtures();
    assert!(!fx.pem("public.pem", "PUBLIC KEY").unwrap().is_empty());
    assert!(!fx.pem("private.pem", "RSA PRIVATE KEY").unwrap().is_empty());
    assert!(matches!(
        fx.pem("public.pem", "CERTIFICATE"),
        Err(CompatError::PemMarkerMissing { .. })
    ));
}

#[test]
fn pem_body_must_be_terminated() {
    let text = "-----BEGIN PUBLIC KEY-----\nAAAA\n";
    assert!(matches!(
        pem_block(text, "PUBLIC KEY"),
        Err(CompatError::PemMarkerMissing { .. })
    ));
}

proptest! {
    #[test]
    fn wrapped_base64_round_trips(data in prop::collection::vec(any::<u8>(), 0..600)) {
        let text = base64_encode(&data, true);
        for line in text.lines() {
            prop_assert!(line.len() <= 64);
        }
        prop_assert_eq!(base64_decode(&text).unwrap(), data);
    }
}
