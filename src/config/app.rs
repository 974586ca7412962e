// src/config/app.rs
use super::defaults::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::error::Result;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_fixtures")]
    pub fixtures: Fixtures,
    #[serde(default = "default_keys")]
    pub keys: Keys,
    #[serde(default = "default_report")]
    pub report: Report,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fixtures {
    pub dir: PathBuf,
}

/// Key file names, relative to the fixture directory
#[derive(Debug, Clone, Deserialize)]
pub struct Keys {
    pub public: String,
    pub private: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Report {
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fixtures: default_fixtures(),
            keys: default_keys(),
            report: default_report(),
        }
    }
}

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Load the global config once — later calls return the cached value
pub fn load() -> Result<&'static Config> {
    if let Some(conf) = CONFIG.get() {
        return Ok(conf);
    }

    let config_path =
        std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let conf = load_from(Path::new(&config_path))?;

    Ok(CONFIG.get_or_init(|| conf))
}

/// Read a config file, falling back to defaults if it does not exist,
/// then apply env overrides
pub fn load_from(path: &Path) -> Result<Config> {
    let mut conf: Config = if path.exists() {
        debug!("Reading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        warn!(
            "{} not found — using built-in defaults",
            path.display()
        );
        Config::default()
    };

    if let Ok(dir) = std::env::var(FIXTURES_ENV) {
        conf.fixtures.dir = PathBuf::from(dir);
    }

    Ok(conf)
}
