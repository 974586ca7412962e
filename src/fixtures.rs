// src/fixtures.rs
//! Fixture directory access and the vector manifest
//!
//! Fixtures are read-only. Every file is addressed by name relative to the
//! directory; nothing is cached between reads.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::codec::{base64_decode, pem_block};
use crate::consts::VECTOR_MANIFEST;
use crate::cryptor::{BlockMode, Padding};
use crate::digest::DigestAlgorithm;
use crate::error::{CompatError, Result};
use crate::rsa_cryptor::RsaPadding;

#[derive(Debug, Clone)]
pub struct FixtureSet {
    dir: PathBuf,
}

impl FixtureSet {
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(CompatError::FixtureMissing { path: dir });
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    pub fn bytes(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.path(name);
        debug!("reading fixture {}", path.display());
        std::fs::read(&path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => CompatError::FixtureMissing { path },
            _ => CompatError::Io(err),
        })
    }

    pub fn string(&self, name: &str) -> Result<String> {
        let bytes = self.bytes(name)?;
        String::from_utf8(bytes).map_err(|err| {
            CompatError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
        })
    }

    /// Decoded contents of a Base64 text fixture
    pub fn base64(&self, name: &str) -> Result<Vec<u8>> {
        base64_decode(&self.string(name)?)
    }

    /// Decoded body of the `tag` block inside a PEM fixture
    pub fn pem(&self, name: &str, tag: &str) -> Result<Vec<u8>> {
        pem_block(&self.string(name)?, tag)
    }

    pub fn manifest(&self) -> Result<VectorManifest> {
        let text = self.string(VECTOR_MANIFEST)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Every regular file in the directory with its size and BLAKE3 hash,
    /// sorted by name
    pub fn inventory(&self) -> Result<Vec<FixtureDigest>> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|err| CompatError::Io(err.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let data = std::fs::read(entry.path())?;
            let name = entry
                .path()
                .strip_prefix(&self.dir)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .replace('\\', "/");
            entries.push(FixtureDigest {
                name,
                size: data.len() as u64,
                blake3: blake3::hash(&data).to_hex().to_string(),
            });
        }
        Ok(entries)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureDigest {
    pub name: String,
    pub size: u64,
    pub blake3: String,
}

/// Contents of `vectors.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectorManifest {
    #[serde(default)]
    pub base64: Vec<Base64Vector>,
    #[serde(default)]
    pub digests: Vec<DigestVector>,
    #[serde(default)]
    pub hmacs: Vec<HmacVector>,
    #[serde(default)]
    pub pbkdf2: Vec<Pbkdf2Vector>,
    #[serde(default)]
    pub ciphers: Vec<CipherVector>,
    #[serde(default)]
    pub signatures: Vec<SignatureVector>,
    #[serde(default)]
    pub rsa: Vec<RsaVector>,
}

/// Binary file and its wrapped Base64 rendition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Base64Vector {
    pub binary: String,
    pub encoded: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestVector {
    pub algorithm: DigestAlgorithm,
    pub input: String,
    pub expected_hex: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HmacVector {
    pub algorithm: DigestAlgorithm,
    pub key_hex: String,
    pub input: String,
    pub expected_hex: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pbkdf2Vector {
    pub prf: DigestAlgorithm,
    pub password: String,
    pub salt: String,
    pub rounds: u32,
    pub key_len: usize,
    pub expected_hex: String,
}

/// One plaintext/ciphertext file pair; checked in both directions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CipherVector {
    pub mode: BlockMode,
    pub padding: Padding,
    pub key_hex: String,
    #[serde(default)]
    pub iv_hex: Option<String>,
    pub plaintext: String,
    pub ciphertext: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureVector {
    pub digest: DigestAlgorithm,
    pub input: String,
    pub signature: String,
    pub valid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsaVector {
    pub padding: RsaPadding,
    pub plaintext: String,
    pub ciphertext: String,
    /// Unpadded vectors encrypt to the fixture exactly
    pub deterministic: bool,
}
