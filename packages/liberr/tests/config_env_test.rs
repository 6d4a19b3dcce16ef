//! Tests for reading the default severity from the environment
//!
//! Kept apart from the other configuration tests because the default can be
//! set only once per process.

use liberr::config::{init_default_severity_from_env, DEFAULT_LEVEL_ENV};
use liberr::{default_severity, ConfigError, Severity};

#[test]
fn test_default_severity_from_env() {
    std::env::remove_var(DEFAULT_LEVEL_ENV);
    assert_eq!(init_default_severity_from_env(), Ok(None));
    assert_eq!(default_severity(), Severity::Warn);

    std::env::set_var(DEFAULT_LEVEL_ENV, "shout");
    assert!(matches!(
        init_default_severity_from_env(),
        Err(ConfigError::InvalidLevel { .. })
    ));
    assert_eq!(default_severity(), Severity::Warn);

    std::env::set_var(DEFAULT_LEVEL_ENV, "fatal");
    assert_eq!(init_default_severity_from_env(), Ok(Some(Severity::Fatal)));
    assert_eq!(default_severity(), Severity::Fatal);

    std::env::set_var(DEFAULT_LEVEL_ENV, "debug");
    assert_eq!(
        init_default_severity_from_env(),
        Err(ConfigError::AlreadyInitialized(Severity::Fatal))
    );

    std::env::remove_var(DEFAULT_LEVEL_ENV);
}
