//! Tests for config file loading and precedence
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use employee_registry::config::{Args, Config, ConfigFile};
use employee_registry::error::ConfigError;
use employee_registry::i18n::Locale;

#[test]
fn test_explicit_config_file_is_used() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("config.toml");
    fs::write(
        &path,
        r#"
data_dir = "/srv/employees"
locale = "tr"
log_level = "info"
page_size = 6
"#,
    )
    .expect("write config");

    let args = Args::parse_from(["employees", "--config", path.to_str().unwrap(), "list"]);
    let config = Config::from_args(&args).expect("load config");

    assert_eq!(config.data_dir, PathBuf::from("/srv/employees"));
    assert_eq!(config.locale, Locale::Tr);
    assert_eq!(config.log_level, "info");
    assert_eq!(config.page_sizes.default, 6);
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let args = Args::parse_from([
        "employees",
        "--config",
        tmp.path().join("absent.toml").to_str().unwrap(),
        "list",
    ]);

    assert!(matches!(Config::from_args(&args), Err(ConfigError::Read { .. })));
}

#[test]
fn test_invalid_config_reports_parse_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("config.toml");
    fs::write(&path, "page_size = \"ten\"").expect("write config");

    let err = ConfigFile::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_empty_config_file_is_all_defaults() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let path = tmp.path().join("config.toml");
    fs::write(&path, "").expect("write config");

    assert_eq!(ConfigFile::load(&path).unwrap(), ConfigFile::default());
}
