// src/codec.rs
//! Text encodings the fixtures use: Base64, hex, and PEM blocks
//!
//! Base64 output matches `openssl enc -base64` when wrapped: 64-column lines,
//! each terminated by `\n`, nothing at all for empty input.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::consts::BASE64_LINE_WIDTH;
use crate::error::{CompatError, Result};

/// Standard-alphabet Base64, optionally wrapped at 64 columns
pub fn base64_encode(data: &[u8], wrap: bool) -> String {
    let encoded = STANDARD.encode(data);
    if !wrap {
        return encoded;
    }

    let mut out = String::with_capacity(encoded.len() + encoded.len() / BASE64_LINE_WIDTH + 1);
    // Base64 output is pure ASCII, so byte chunks are char boundaries
    for line in encoded.as_bytes().chunks(BASE64_LINE_WIDTH) {
        out.extend(line.iter().map(|&b| b as char));
        out.push('\n');
    }
    out
}

/// Decode Base64 text, ignoring line breaks and other ASCII whitespace
pub fn base64_decode(text: &str) -> Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

/// Lowercase hex, the format every digest and signature is printed in
pub fn to_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Parse hex in either case; surrounding whitespace is ignored
pub fn from_hex(text: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(text.trim())?)
}

/// Extract and decode the body of the first `-----BEGIN <tag>-----` block
pub fn pem_block(text: &str, tag: &str) -> Result<Vec<u8>> {
    let begin = format!("-----BEGIN {tag}-----");
    let end = format!("-----END {tag}-----");

    let missing = || CompatError::PemMarkerMissing {
        tag: tag.to_string(),
    };
    let start = text.find(&begin).ok_or_else(missing)? + begin.len();
    let body_len = text[start..].find(&end).ok_or_else(missing)?;

    base64_decode(&text[start..start + body_len])
}

/// Label of the first PEM block in `text`, e.g. `RSA PRIVATE KEY`
pub fn pem_label(text: &str) -> Option<&str> {
    let rest = &text[text.find("-----BEGIN ")? + "-----BEGIN ".len()..];
    rest.find("-----").map(|end| &rest[..end])
}
