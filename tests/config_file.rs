//! Integration test for YAML configuration file loading.

use std::io::Write;

use testresult::TestResult;

use emporium::config::{AppConfig, ConfigError};

#[test]
fn test_load_full_config_file() -> TestResult {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        "app_name: Test Store\n\
         port: 9090\n\
         debug: true\n\
         database_url: postgres://localhost/test\n\
         max_connections: 25\n"
    )?;

    let config = AppConfig::from_yaml_file(file.path())?;

    assert_eq!(config.app_name, "Test Store");
    assert_eq!(config.port, 9090);
    assert!(config.debug);
    assert_eq!(config.max_connections, 25);

    Ok(())
}

#[test]
fn test_missing_keys_fall_back_to_defaults() -> TestResult {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, "database_url: postgres://localhost/test\n")?;

    let config = AppConfig::from_yaml_file(file.path())?;

    assert_eq!(config.app_name, "Emporium Online Store");
    assert_eq!(config.port, 8000);
    assert!(!config.debug);
    assert_eq!(config.max_connections, 100);

    Ok(())
}

#[test]
fn test_out_of_range_values_are_rejected_together() -> TestResult {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        "database_url: postgres://localhost/test\n\
         port: 70000\n\
         max_connections: 0\n"
    )?;

    let result = AppConfig::from_yaml_file(file.path());

    let Err(ConfigError::Invalid(errors)) = result else {
        return Err(std::io::Error::other("expected a validation failure").into());
    };

    assert_eq!(errors.len(), 2, "both range violations should be reported");

    Ok(())
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().map(|d| d.path().join("absent.yml"));

    let result = dir.map(AppConfig::from_yaml_file);

    assert!(
        matches!(result, Ok(Err(ConfigError::Io(_)))),
        "reading a missing file should surface the IO error"
    );
}

#[test]
fn test_malformed_yaml_is_a_parse_error() -> TestResult {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, ": not yaml\n  - [")?;

    let result = AppConfig::from_yaml_file(file.path());

    assert!(matches!(result, Err(ConfigError::Yaml(_))));

    Ok(())
}

#[test]
fn test_config_survives_yaml_round_trip() -> TestResult {
    let original = AppConfig::from_yaml_str("database_url: postgres://localhost/test\n")?;
    let rendered = serde_norway::to_string(&original)?;
    let reloaded = AppConfig::from_yaml_str(&rendered)?;

    assert_eq!(reloaded, original);

    Ok(())
}
