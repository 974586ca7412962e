// src/config/mod.rs
//! Configuration system for crypto-compat
//!
//! Lazy-loaded global config: TOML file + env overrides, built-in defaults
//! when no file exists.

pub use app::{load, load_from, Config, Fixtures, Keys, Report};

mod app;
mod defaults;
