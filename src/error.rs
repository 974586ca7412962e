// src/error.rs
//! Public error type for the entire crate

use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompatError {
    // ── Infrastructure errors (exit code 2) ──────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fixture not found: {path}")]
    FixtureMissing { path: PathBuf },

    #[error("Vector manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Invalid TOML config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("PEM block `{tag}` not found")]
    PemMarkerMissing { tag: String },

    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    // ── Operation errors (exit code 2) ───────────────────────────
    #[error("Invalid AES key length: {0} bytes (expected 16, 24 or 32)")]
    InvalidKeyLength(usize),

    #[error("Invalid IV length: {0} bytes (expected 16)")]
    InvalidIvLength(usize),

    #[error("ECB mode takes no IV")]
    UnexpectedIv,

    #[error("CBC mode requires an IV")]
    MissingIv,

    #[error("Input of {len} bytes is not a multiple of the {block}-byte block size")]
    UnalignedInput { len: usize, block: usize },

    #[error("Bad padding")]
    BadPadding,

    #[error("Message of {len} bytes is too long (limit {max})")]
    MessageTooLong { len: usize, max: usize },

    #[error("Input of {len} bytes must match the {modulus}-byte modulus exactly")]
    ModulusSizeMismatch { len: usize, modulus: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),

    #[error("RSA operation failed: {0}")]
    Rsa(#[from] rsa::Error),

    #[error("PKCS#8 key error: {0}")]
    Pkcs8(#[from] rsa::pkcs8::Error),

    #[error("SPKI key error: {0}")]
    Spki(#[from] rsa::pkcs8::spki::Error),

    #[error("PKCS#1 key error: {0}")]
    Pkcs1(#[from] rsa::pkcs1::Error),

    // ── Assertion failures (exit code 1) ─────────────────────────
    #[error("{case}: expected {expected}, got {actual}")]
    Mismatch {
        case: String,
        expected: String,
        actual: String,
    },
}

impl CompatError {
    /// Exit code for the process when this error ends a run.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CompatError::Mismatch { .. } => ExitCode::from(1),
            _ => ExitCode::from(2),
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, CompatError::Mismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, CompatError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch() -> CompatError {
        CompatError::Mismatch {
            case: "md5-digest a.bin".into(),
            expected: "00".into(),
            actual: "ff".into(),
        }
    }

    #[test]
    fn mismatch_exits_one_everything_else_two() {
        assert_eq!(mismatch().exit_code(), ExitCode::from(1));

        let config = toml::from_str::<toml::Value>("[x").unwrap_err();
        for err in [
            CompatError::FixtureMissing {
                path: PathBuf::from("public.pem"),
            },
            CompatError::BadPadding,
            CompatError::Config(config),
        ] {
            assert!(!err.is_mismatch());
            assert_eq!(err.exit_code(), ExitCode::from(2), "{err}");
        }
    }

    #[cfg(feature = "cli")]
    #[test]
    fn exit_code_survives_anyhow_context() {
        let err = anyhow::Error::from(mismatch()).context("running suite");
        let inner = err.downcast_ref::<CompatError>().unwrap();
        assert!(inner.is_mismatch());
        assert_eq!(inner.exit_code(), ExitCode::from(1));
    }
}
