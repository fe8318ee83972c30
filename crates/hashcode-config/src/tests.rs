//! Tests for hash configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        strict = true
        max_depth = 128
    "#;

    let config = HashConfig::from_toml_str(toml).unwrap();
    assert!(config.strict);
    assert_eq!(config.max_depth, Some(128));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        strict: false
        max_depth: 16
    "#;

    let config = HashConfig::from_yaml_str(yaml).unwrap();
    assert!(!config.strict);
    assert_eq!(config.max_depth, Some(16));
}

#[test]
fn test_empty_toml_is_default() {
    let config = HashConfig::from_toml_str("").unwrap();
    assert_eq!(config, HashConfig::default());
    assert!(!config.strict);
    assert_eq!(config.max_depth, None);
}

#[test]
fn test_zero_depth_rejected() {
    let err = HashConfig::from_toml_str("max_depth = 0").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_unknown_field_rejected() {
    let err = HashConfig::from_toml_str("stirct = true").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_missing_file() {
    let err = HashConfig::load("/nonexistent/hashcode.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_builder() {
    let config = HashConfig::new().with_strict(true).with_max_depth(8);
    assert!(config.strict);
    assert_eq!(config.max_depth, Some(8));

    let config = config.unbounded();
    assert_eq!(config.max_depth, None);
}

#[test]
fn test_builder_zero_depth_fails_validation() {
    let config = HashConfig::new().with_max_depth(0);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    assert!(HashConfig::new().with_max_depth(1).validate().is_ok());
}
