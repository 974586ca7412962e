// src/harness.rs
//! The cross-validation suite
//!
//! Every vector in the manifest becomes one or more named cases. Cases run
//! strictly in order and the first failure ends the run; nothing after it
//! executes.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::aliases::{HmacKey, InitVector, Passphrase, SymmetricKey};
use crate::codec::{base64_decode, base64_encode, from_hex, to_hex};
use crate::config::Config;
use crate::cryptor::AesCryptor;
use crate::digest::{digest, hmac};
use crate::error::{CompatError, Result};
use crate::fixtures::{
    Base64Vector, CipherVector, DigestVector, FixtureDigest, FixtureSet, HmacVector,
    Pbkdf2Vector, RsaVector, SignatureVector, VectorManifest,
};
use crate::kdf::pbkdf2;
use crate::rsa_cryptor::RsaSmallCryptor;
use crate::rsa_key::RsaKeys;
use crate::signature::{sign, verify};

/// What a case checks
#[derive(Debug, Clone)]
pub enum Check {
    Base64Encode(Base64Vector),
    Base64Decode(Base64Vector),
    Digest(DigestVector),
    Hmac(HmacVector),
    Pbkdf2(Pbkdf2Vector),
    Encrypt(CipherVector),
    Decrypt(CipherVector),
    Verify(SignatureVector),
    Sign(SignatureVector),
    RsaEncrypt(RsaVector),
    RsaDecrypt(RsaVector),
    RsaRoundTrip(RsaVector),
}

#[derive(Debug, Clone)]
pub struct Case {
    pub name: String,
    pub check: Check,
}

impl Case {
    fn new(name: String, check: Check) -> Self {
        Self { name, check }
    }

    fn needs_rsa_keys(&self) -> bool {
        matches!(
            self.check,
            Check::Verify(_)
                | Check::Sign(_)
                | Check::RsaEncrypt(_)
                | Check::RsaDecrypt(_)
                | Check::RsaRoundTrip(_)
        )
    }
}

/// Expand a manifest into the ordered case list
pub fn cases_from_manifest(manifest: &VectorManifest) -> Vec<Case> {
    let mut cases = Vec::new();

    for v in &manifest.base64 {
        cases.push(Case::new(
            format!("base64-encode {}", v.binary),
            Check::Base64Encode(v.clone()),
        ));
        cases.push(Case::new(
            format!("base64-decode {}", v.encoded),
            Check::Base64Decode(v.clone()),
        ));
    }

    for v in &manifest.digests {
        cases.push(Case::new(
            format!("{}-digest {}", v.algorithm, v.input),
            Check::Digest(v.clone()),
        ));
    }

    for v in &manifest.hmacs {
        cases.push(Case::new(
            format!(
                "hmac-{} {} (key {} bytes)",
                v.algorithm,
                v.input,
                v.key_hex.len() / 2
            ),
            Check::Hmac(v.clone()),
        ));
    }

    for v in &manifest.pbkdf2 {
        cases.push(Case::new(
            format!("pbkdf2-{} {} rounds, {} bytes", v.prf, v.rounds, v.key_len),
            Check::Pbkdf2(v.clone()),
        ));
    }

    for v in &manifest.ciphers {
        let cipher = format!("aes-{}-{}-{}", v.key_hex.len() * 4, v.mode, v.padding);
        cases.push(Case::new(
            format!("{cipher} encrypt {}", v.plaintext),
            Check::Encrypt(v.clone()),
        ));
        cases.push(Case::new(
            format!("{cipher} decrypt {}", v.ciphertext),
            Check::Decrypt(v.clone()),
        ));
    }

    for v in &manifest.signatures {
        cases.push(Case::new(
            format!("rsa-{}-verify {}", v.digest, v.input),
            Check::Verify(v.clone()),
        ));
        if v.valid {
            cases.push(Case::new(
                format!("rsa-{}-sign {}", v.digest, v.input),
                Check::Sign(v.clone()),
            ));
        }
    }

    for v in &manifest.rsa {
        if v.deterministic {
            cases.push(Case::new(
                format!("rsa-{}-encrypt {}", v.padding, v.plaintext),
                Check::RsaEncrypt(v.clone()),
            ));
        }
        cases.push(Case::new(
            format!("rsa-{}-decrypt {}", v.padding, v.ciphertext),
            Check::RsaDecrypt(v.clone()),
        ));
        if !v.deterministic {
            cases.push(Case::new(
                format!("rsa-{}-roundtrip {}", v.padding, v.plaintext),
                Check::RsaRoundTrip(v.clone()),
            ));
        }
    }

    cases
}

/// Fail with both sides in hex unless `actual == expected`
pub fn expect_eq(case: &str, expected: &[u8], actual: &[u8]) -> Result<()> {
    if expected == actual {
        return Ok(());
    }
    Err(CompatError::Mismatch {
        case: case.to_string(),
        expected: to_hex(expected),
        actual: to_hex(actual),
    })
}

fn expect_bool(case: &str, expected: bool, actual: bool) -> Result<()> {
    if expected == actual {
        return Ok(());
    }
    Err(CompatError::Mismatch {
        case: case.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    })
}

pub struct Suite {
    fixtures: FixtureSet,
    public_key: PathBuf,
    private_key: PathBuf,
    keys: Option<RsaKeys>,
    cases: Vec<Case>,
}

impl Suite {
    /// Load the manifest and, if any case needs them, the RSA key pair
    pub fn load(fixtures: FixtureSet, public_key: &str, private_key: &str) -> Result<Self> {
        let cases = cases_from_manifest(&fixtures.manifest()?);
        let public_key = fixtures.path(public_key);
        let private_key = fixtures.path(private_key);
        let keys = if cases.iter().any(Case::needs_rsa_keys) {
            Some(RsaKeys::load(&public_key, &private_key)?)
        } else {
            None
        };
        Ok(Self {
            fixtures,
            public_key,
            private_key,
            keys,
            cases,
        })
    }

    /// Fixture directory and key names from `config`; `dir` overrides the
    /// configured directory
    pub fn from_config(config: &Config, dir: Option<&Path>) -> Result<Self> {
        let fixtures = FixtureSet::open(dir.unwrap_or(config.fixtures.dir.as_path()))?;
        Self::load(fixtures, &config.keys.public, &config.keys.private)
    }

    pub fn fixtures(&self) -> &FixtureSet {
        &self.fixtures
    }

    pub fn cases(&self) -> &[Case] {
        &self.cases
    }

    pub fn case(&self, name: &str) -> Option<&Case> {
        self.cases.iter().find(|c| c.name == name)
    }

    /// Run every case in order, stopping at the first failure
    pub fn run(&self, report: &mut Report) -> Result<()> {
        for case in &self.cases {
            match self.run_case(case) {
                Ok(()) => {
                    info!(case = %case.name, "passed");
                    report.record_pass(&case.name);
                }
                Err(err) => {
                    error!(case = %case.name, "failed: {err}");
                    report.record_failure(&case.name, &err);
                    return Err(err);
                }
            }
        }
        Ok(())
    }

    pub fn run_case(&self, case: &Case) -> Result<()> {
        let name = case.name.as_str();
        let fx = &self.fixtures;

        match &case.check {
            Check::Base64Encode(v) => {
                let encoded = base64_encode(&fx.bytes(&v.binary)?, true);
                expect_eq(name, fx.string(&v.encoded)?.as_bytes(), encoded.as_bytes())
            }
            Check::Base64Decode(v) => {
                let decoded = base64_decode(&fx.string(&v.encoded)?)?;
                expect_eq(name, &fx.bytes(&v.binary)?, &decoded)
            }
            Check::Digest(v) => {
                let actual = digest(v.algorithm, &fx.bytes(&v.input)?);
                expect_eq(name, &from_hex(&v.expected_hex)?, &actual)
            }
            Check::Hmac(v) => {
                let key = HmacKey::new(from_hex(&v.key_hex)?);
                let actual = hmac(v.algorithm, &key, &fx.bytes(&v.input)?)?;
                expect_eq(name, &from_hex(&v.expected_hex)?, &actual)
            }
            Check::Pbkdf2(v) => {
                let password = Passphrase::new(v.password.clone());
                let actual = pbkdf2(v.prf, &password, v.salt.as_bytes(), v.rounds, v.key_len)?;
                expect_eq(name, &from_hex(&v.expected_hex)?, &actual)
            }
            Check::Encrypt(v) => {
                let (key, iv) = cipher_material(v)?;
                let cryptor = AesCryptor::new(&key, iv.as_ref(), v.mode, v.padding)?;
                let actual = cryptor.encrypt(&fx.bytes(&v.plaintext)?)?;
                expect_eq(name, &fx.bytes(&v.ciphertext)?, &actual)
            }
            Check::Decrypt(v) => {
                let (key, iv) = cipher_material(v)?;
                let cryptor = AesCryptor::new(&key, iv.as_ref(), v.mode, v.padding)?;
                let actual = cryptor.decrypt(&fx.bytes(&v.ciphertext)?)?;
                expect_eq(name, &fx.bytes(&v.plaintext)?, &actual)
            }
            Check::Verify(v) => {
                let keys = self.keys(case)?;
                let actual = verify(
                    &keys.public,
                    v.digest,
                    &fx.bytes(&v.input)?,
                    &fx.bytes(&v.signature)?,
                );
                expect_bool(name, v.valid, actual)
            }
            Check::Sign(v) => {
                let keys = self.keys(case)?;
                let actual = sign(&keys.private, v.digest, &fx.bytes(&v.input)?)?;
                expect_eq(name, &fx.bytes(&v.signature)?, &actual)
            }
            Check::RsaEncrypt(v) => {
                let keys = self.keys(case)?;
                let actual = RsaSmallCryptor::new(v.padding)
                    .encrypt(&keys.public, &fx.bytes(&v.plaintext)?)?;
                expect_eq(name, &fx.bytes(&v.ciphertext)?, &actual)
            }
            Check::RsaDecrypt(v) => {
                let keys = self.keys(case)?;
                let actual = RsaSmallCryptor::new(v.padding)
                    .decrypt(&keys.private, &fx.bytes(&v.ciphertext)?)?;
                expect_eq(name, &fx.bytes(&v.plaintext)?, &actual)
            }
            Check::RsaRoundTrip(v) => {
                let keys = self.keys(case)?;
                let cryptor = RsaSmallCryptor::new(v.padding);
                let plaintext = fx.bytes(&v.plaintext)?;
                let ciphertext = cryptor.encrypt(&keys.public, &plaintext)?;
                let actual = cryptor.decrypt(&keys.private, &ciphertext)?;
                expect_eq(name, &plaintext, &actual)
            }
        }
    }

    /// The loaded key pair; without one, names the key file `case` needed
    fn keys(&self, case: &Case) -> Result<&RsaKeys> {
        self.keys.as_ref().ok_or_else(|| {
            let path = match case.check {
                Check::Verify(_) | Check::RsaEncrypt(_) => &self.public_key,
                _ => &self.private_key,
            };
            CompatError::FixtureMissing { path: path.clone() }
        })
    }
}

fn cipher_material(v: &CipherVector) -> Result<(SymmetricKey, Option<InitVector>)> {
    let key = SymmetricKey::new(from_hex(&v.key_hex)?);
    let iv = v
        .iv_hex
        .as_deref()
        .map(from_hex)
        .transpose()?
        .map(InitVector::new);
    Ok((key, iv))
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub name: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// JSON run report: what ran, against which fixture bytes
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub fixture_dir: String,
    pub fixtures: Vec<FixtureDigest>,
    pub results: Vec<CaseResult>,
    pub success: bool,
}

impl Report {
    pub fn new(fixtures: &FixtureSet) -> Result<Self> {
        Ok(Self {
            generated_at: Utc::now(),
            fixture_dir: fixtures.dir().display().to_string(),
            fixtures: fixtures.inventory()?,
            results: Vec::new(),
            success: true,
        })
    }

    pub fn record_pass(&mut self, name: &str) {
        self.results.push(CaseResult {
            name: name.to_string(),
            passed: true,
            error: None,
        });
    }

    pub fn record_failure(&mut self, name: &str, err: &CompatError) {
        self.success = false;
        self.results.push(CaseResult {
            name: name.to_string(),
            passed: false,
            error: Some(err.to_string()),
        });
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
