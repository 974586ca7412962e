// tests/config_tests.rs
use std::fs;
use std::path::PathBuf;

use crypto_compat::config::load_from;
use crypto_compat::error::CompatError;
use crypto_compat::harness::Suite;
use tempfile::tempdir;

// Only one test touches CRYPTO_COMPAT_FIXTURES, and no other test here
// asserts on `fixtures.dir`.

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let conf = load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(conf.keys.public, "public.pem");
    assert_eq!(conf.keys.private, "private.pem");
    assert!(conf.report.path.is_none());
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("compat.toml");
    fs::write(
        &path,
        r#"
[keys]
public = "other-public.pem"
private = "private-pkcs8.pem"
"#,
    )
    .unwrap();

    let conf = load_from(&path).unwrap();
    assert_eq!(conf.keys.public, "other-public.pem");
    assert_eq!(conf.keys.private, "private-pkcs8.pem");
    assert!(conf.report.path.is_none());
}

#[test]
fn report_path_is_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("compat.toml");
    fs::write(&path, "[report]\npath = \"out/report.json\"\n").unwrap();
    let conf = load_from(&path).unwrap();
    assert_eq!(conf.report.path, Some(PathBuf::from("out/report.json")));
}

#[test]
fn invalid_toml_is_a_config_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("compat.toml");
    fs::write(&path, "[keys\npublic = ").unwrap();
    assert!(matches!(load_from(&path), Err(CompatError::Config(_))));
}

#[test]
fn fixture_dir_from_file_then_env_override() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("compat.toml");
    fs::write(&path, "[fixtures]\ndir = \"somewhere/else\"\n").unwrap();

    std::env::remove_var("CRYPTO_COMPAT_FIXTURES");
    let conf = load_from(&path).unwrap();
    assert_eq!(conf.fixtures.dir, PathBuf::from("somewhere/else"));

    let fixtures = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data");
    std::env::set_var("CRYPTO_COMPAT_FIXTURES", &fixtures);
    let conf = load_from(&path).unwrap();
    std::env::remove_var("CRYPTO_COMPAT_FIXTURES");
    assert_eq!(conf.fixtures.dir, fixtures);

    // The override is usable as-is by the suite
    let suite = Suite::from_config(&conf, None).unwrap();
    assert!(!suite.cases().is_empty());

    // An explicit directory beats config and env
    let empty = tempdir().unwrap();
    assert!(matches!(
        Suite::from_config(&conf, Some(empty.path())),
        Err(CompatError::FixtureMissing { .. })
    ));
}
