//! Tests for process-wide configuration
//!
//! The default severity is set at most once per process, so everything that
//! touches it lives in a single test.

use liberr::{
    default_severity, init_default_severity, loggable_level, loggable_level_with,
    ConfigError, Error, LiberrConfig, Severity,
};
use liberr::config::severity_from_var;

#[test]
fn test_default_severity_is_set_once() {
    let base = Error::new("leaf");

    assert_eq!(default_severity(), Severity::Warn);
    assert_eq!(loggable_level(Some(&base)).1, Severity::Warn);

    let config: LiberrConfig = serde_json::from_str(r#"{"default_severity":"error"}"#).unwrap();
    config.install().unwrap();

    assert_eq!(default_severity(), Severity::Error);
    assert_eq!(loggable_level(Some(&base)).1, Severity::Error);
    assert_eq!(loggable_level(None).1, Severity::Error);

    // An explicit default bypasses the global.
    assert_eq!(loggable_level_with(Some(&base), Severity::Debug).1, Severity::Debug);

    assert_eq!(
        init_default_severity(Severity::Fatal),
        Err(ConfigError::AlreadyInitialized(Severity::Error))
    );
    assert_eq!(default_severity(), Severity::Error);
}

#[test]
fn test_severity_from_var() {
    std::env::remove_var("LIBERR_TEST_UNSET_LEVEL");
    assert_eq!(severity_from_var("LIBERR_TEST_UNSET_LEVEL"), Ok(None));

    std::env::set_var("LIBERR_TEST_EMPTY_LEVEL", "  ");
    assert_eq!(severity_from_var("LIBERR_TEST_EMPTY_LEVEL"), Ok(None));

    std::env::set_var("LIBERR_TEST_GOOD_LEVEL", "Trace");
    assert_eq!(
        severity_from_var("LIBERR_TEST_GOOD_LEVEL"),
        Ok(Some(Severity::Trace))
    );

    std::env::set_var("LIBERR_TEST_BAD_LEVEL", "loud");
    let err = severity_from_var("LIBERR_TEST_BAD_LEVEL").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidLevel { ref var, .. } if var == "LIBERR_TEST_BAD_LEVEL"));
    assert!(err.to_string().contains("LIBERR_TEST_BAD_LEVEL"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_config_section_defaults_to_warn() {
    let config: LiberrConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, LiberrConfig::default());
    assert_eq!(config.default_severity, Severity::Warn);

    assert_eq!(
        serde_json::to_string(&LiberrConfig {
            default_severity: Severity::Buss
        })
        .unwrap(),
        r#"{"default_severity":"buss"}"#
    );
}
