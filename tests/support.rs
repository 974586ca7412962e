// tests/support.rs
//! Test utilities — the checked-in fixture set and throwaway copies of it

use std::fs;
use std::path::{Path, PathBuf};

use crypto_compat::aliases::{InitVector, SymmetricKey};
use crypto_compat::codec::from_hex;
use crypto_compat::{FixtureSet, RsaKeys};

#[allow(dead_code)]
pub const AES_128_KEY: &str = "0c1032520302ec8537a4a82c4ef7579d";
#[allow(dead_code)]
pub const AES_256_KEY: &str = "0c1032520302ec8537a4a82c4ef7579d2b88e4309655eb40707decdb143e328a";
#[allow(dead_code)]
pub const AES_IV: &str = "ab5bbeb426015da7eedcee8bee3dffb7";

pub fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

#[allow(dead_code)]
pub fn fixtures() -> FixtureSet {
    FixtureSet::open(fixture_dir()).expect("tests/data must exist")
}

#[allow(dead_code)]
pub fn keys() -> RsaKeys {
    let dir = fixture_dir();
    RsaKeys::load(dir.join("public.pem"), dir.join("private.pem")).expect("load test key pair")
}

#[allow(dead_code)]
pub fn aes_key(hex: &str) -> SymmetricKey {
    SymmetricKey::new(from_hex(hex).expect("key hex"))
}

#[allow(dead_code)]
pub fn aes_iv() -> InitVector {
    InitVector::new(from_hex(AES_IV).expect("iv hex"))
}

/// Copy every fixture into `dest` so a test can tamper with it
#[allow(dead_code)]
pub fn copy_fixtures(dest: &Path) -> FixtureSet {
    for entry in fs::read_dir(fixture_dir()).expect("read tests/data") {
        let entry = entry.expect("dir entry");
        if entry.file_type().expect("file type").is_file() {
            fs::copy(entry.path(), dest.join(entry.file_name())).expect("copy fixture");
        }
    }
    FixtureSet::open(dest).expect("open copied fixtures")
}
