//! Tests for configuration precedence order

use cloudview_config::{ConfigError, ConfigProvider, ValidationMode};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
#[serial]
fn test_environment_overrides_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cloudview.toml");
    fs::write(
        &path,
        r#"
validation = "lenient"
view_mode = "teaser"
render_cache = false
"#,
    )
    .unwrap();

    std::env::set_var("CLOUDVIEW_VIEW_MODE", "full");
    std::env::set_var("CLOUDVIEW_FIELDSET_WEIGHT_START", "100");

    let result = ConfigProvider::new().with_file(&path).load();

    std::env::remove_var("CLOUDVIEW_VIEW_MODE");
    std::env::remove_var("CLOUDVIEW_FIELDSET_WEIGHT_START");

    let config = result.unwrap();
    assert_eq!(config.view_mode, "full");
    assert_eq!(config.fieldset_weight_start, 100);
    // File-only values survive
    assert_eq!(config.validation, ValidationMode::Lenient);
    assert!(!config.render_cache);
}

#[test]
#[serial]
fn test_json_file_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cloudview.json");
    fs::write(
        &path,
        r#"{"registry_root": "/srv/cloudview", "render_cache": false}"#,
    )
    .unwrap();

    let config = ConfigProvider::new().with_file(&path).load().unwrap();
    assert_eq!(
        config.registry_root.as_deref(),
        Some(std::path::Path::new("/srv/cloudview"))
    );
    assert!(!config.render_cache);
    assert_eq!(config.validation, ValidationMode::Strict);
}

#[test]
#[serial]
fn test_bad_value_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cloudview.toml");
    fs::write(&path, "validation = \"sometimes\"\n").unwrap();

    let result = ConfigProvider::new().with_file(&path).load();
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
#[serial]
fn test_blank_langcode_in_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("cloudview.yaml");
    fs::write(&path, "langcode: \"  \"\n").unwrap();

    let result = ConfigProvider::new().with_file(&path).load();
    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue { ref key, .. }) if key == "langcode"
    ));
}
