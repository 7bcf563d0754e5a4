/*!
 * Tests for application configuration
 */

use std::fs;

use lrcpress::app_config::{Config, LogLevel};

use crate::common;

/// Defaults are sane and pass validation
#[test]
fn test_defaultConfig_shouldValidate() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert!(config.api.endpoint.starts_with("https://"));
    assert!(config.solver.max_attempts.is_none());
    assert_eq!(config.log_level, LogLevel::Info);
}

/// A config file written to disk loads back with the same values
#[test]
fn test_config_fileRoundTrip_shouldPreserveValues() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.solver.max_attempts = Some(1_000_000);
    config.solver.progress_interval = 10_000;
    config.log_level = LogLevel::Debug;

    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    let loaded: Config = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(loaded.solver.max_attempts, Some(1_000_000));
    assert_eq!(loaded.solver.progress_interval, 10_000);
    assert_eq!(loaded.log_level, LogLevel::Debug);
}

/// Partial config files fall back to defaults for missing sections
#[test]
fn test_config_partialFile_shouldFillDefaults() {
    let json = r#"{"solver": {"max_attempts": 42}}"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.solver.max_attempts, Some(42));
    assert!(config.api.endpoint.starts_with("https://"));
    assert_eq!(config.live.idle_window_ms, 1000);
}

/// The derived solver config mirrors the solver section
#[test]
fn test_solverConfig_shouldMirrorSection() {
    let mut config = Config::default();
    config.solver.progress_interval = 123;
    config.solver.max_attempts = Some(456);

    let solver = config.solver_config();
    assert_eq!(solver.progress_interval, 123);
    assert_eq!(solver.max_attempts, Some(456));
}
