use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

use pipestamp::util::config::AppConfig;

#[test]
fn test_load_full_config() {
    let toml = r#"
[logging]
dir = "/var/log/pipestamp"
filter = "pipestamp=trace"
"#;
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(toml.as_bytes()).unwrap();

    let config = AppConfig::load(Some(f.path())).unwrap();
    assert_eq!(
        config.logging.dir,
        Some(PathBuf::from("/var/log/pipestamp"))
    );
    assert_eq!(config.logging.filter, "pipestamp=trace");
    assert_eq!(config.log_dir(), PathBuf::from("/var/log/pipestamp"));
}

#[test]
fn test_load_partial_config_uses_defaults() {
    let toml = r#"
[logging]
dir = "/tmp/pipestamp-logs"
"#;
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(toml.as_bytes()).unwrap();

    let config = AppConfig::load(Some(f.path())).unwrap();
    assert_eq!(config.logging.filter, "pipestamp=debug");
}

#[test]
fn test_load_empty_config_uses_all_defaults() {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(b"").unwrap();

    let config = AppConfig::load(Some(f.path())).unwrap();
    assert!(config.logging.dir.is_none());
    assert_eq!(config.logging.filter, "pipestamp=debug");
}

#[test]
fn test_load_nonexistent_file_fails() {
    let result = AppConfig::load(Some(std::path::Path::new("/nonexistent/path/config.toml")));
    assert!(result.is_err());
}

#[test]
fn test_load_invalid_toml_fails() {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(b"this is not [valid toml {{").unwrap();

    let result = AppConfig::load(Some(f.path()));
    assert!(result.is_err());
}

#[test]
fn test_default_log_dir_is_not_empty() {
    let config = AppConfig::default();
    assert!(config.log_dir().ends_with("logs"));
}
