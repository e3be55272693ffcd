use std::io::Write;
use tempfile::NamedTempFile;

use humanize_time::util::config::AppConfig;

#[test]
fn test_load_full_config() {
    let toml = r#"
[display]
precise = true
convert_to_local = true

[local]
utc_offset_secs = -18000
"#;
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(toml.as_bytes()).unwrap();

    let config = AppConfig::load(Some(f.path())).unwrap();
    assert!(config.display.precise);
    assert!(config.display.convert_to_local);
    assert_eq!(config.local.utc_offset_secs, Some(-18000));
}

#[test]
fn test_load_partial_config_uses_defaults() {
    let toml = r#"
[display]
precise = true
"#;
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(toml.as_bytes()).unwrap();

    let config = AppConfig::load(Some(f.path())).unwrap();
    assert!(config.display.precise);
    assert!(!config.display.convert_to_local);
    assert!(config.local.utc_offset_secs.is_none());
}

#[test]
fn test_load_empty_config_uses_all_defaults() {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(b"").unwrap();

    let config = AppConfig::load(Some(f.path())).unwrap();
    assert!(!config.display.precise);
    assert!(!config.display.convert_to_local);
    assert!(config.local.utc_offset_secs.is_none());
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
fn test_load_wrong_type_fails() {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(b"[local]\nutc_offset_secs = \"east\"\n").unwrap();

    assert!(AppConfig::load(Some(f.path())).is_err());
}

#[test]
fn test_log_dir_is_named_for_app() {
    let dir = AppConfig::default().log_dir();
    assert!(dir.ends_with("logs"));
    assert!(dir.to_string_lossy().contains("humanize-time"));
}
