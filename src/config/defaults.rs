// src/config/defaults.rs
use crate::config::app::{Fixtures, Keys, Report};

pub const DEFAULT_CONFIG_FILE: &str = "compat.toml";
pub const DEFAULT_FIXTURE_DIR: &str = "tests/data";
pub const DEFAULT_PUBLIC_KEY: &str = "public.pem";
pub const DEFAULT_PRIVATE_KEY: &str = "private.pem";

/// Env var naming the TOML config file
pub const CONFIG_ENV: &str = "CRYPTO_COMPAT_CONFIG";

/// Env var overriding `fixtures.dir`
pub const FIXTURES_ENV: &str = "CRYPTO_COMPAT_FIXTURES";

pub fn default_fixtures() -> Fixtures {
    Fixtures {
        dir: DEFAULT_FIXTURE_DIR.into(),
    }
}

pub fn default_keys() -> Keys {
    Keys {
        public: DEFAULT_PUBLIC_KEY.into(),
        private: DEFAULT_PRIVATE_KEY.into(),
    }
}

pub fn default_report() -> Report {
    Report { path: None }
}
