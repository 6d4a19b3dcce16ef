//! Process-wide configuration
//!
//! The only global is the severity reported for chains that carry no tag. It
//! is written at most once, at startup, and read-only afterwards. Code that
//! needs a different default per call passes it to
//! [`loggable_level_with`](crate::loggable_level_with) instead.

use crate::error::level::{ParseSeverityError, Severity};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable read by [`init_default_severity_from_env`]
pub const DEFAULT_LEVEL_ENV: &str = "LIBERR_DEFAULT_LEVEL";

static DEFAULT_SEVERITY: OnceCell<Severity> = OnceCell::new();

/// Error type for configuration operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The default severity was already set
    #[error("default severity already initialized to {0}")]
    AlreadyInitialized(Severity),

    /// A severity name could not be parsed
    #[error("invalid severity in {var}: {source}")]
    InvalidLevel {
        /// Where the value came from
        var: String,
        /// Parse failure
        #[source]
        source: ParseSeverityError,
    },
}

/// Severity used when no node in a chain declares one
///
/// [`Severity::Warn`] unless [`init_default_severity`] ran.
#[must_use]
pub fn default_severity() -> Severity {
    DEFAULT_SEVERITY.get().copied().unwrap_or_default()
}

/// Set the process default severity
///
/// # Errors
///
/// Returns `ConfigError::AlreadyInitialized` on every call after the first.
pub fn init_default_severity(level: Severity) -> Result<(), ConfigError> {
    DEFAULT_SEVERITY
        .set(level)
        .map_err(|_| ConfigError::AlreadyInitialized(default_severity()))?;
    tracing::debug!(%level, "default severity initialized");
    Ok(())
}

/// Read a severity name from environment variable `var`
///
/// An unset or empty variable yields `Ok(None)`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidLevel` if the value is not a severity name.
pub fn severity_from_var(var: &str) -> Result<Option<Severity>, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .parse()
                .map(Some)
                .map_err(|source| ConfigError::InvalidLevel {
                    var: var.to_string(),
                    source,
                })
        }
        _ => Ok(None),
    }
}

/// Set the process default from [`DEFAULT_LEVEL_ENV`] when it is present
///
/// # Errors
///
/// Returns `ConfigError::InvalidLevel` for an unparsable value and
/// `ConfigError::AlreadyInitialized` if a default was already set.
pub fn init_default_severity_from_env() -> Result<Option<Severity>, ConfigError> {
    let Some(level) = severity_from_var(DEFAULT_LEVEL_ENV)? else {
        return Ok(None);
    };
    init_default_severity(level)?;
    Ok(Some(level))
}

/// Embeddable configuration section for host applications
///
/// # TOML Example
///
/// ```toml
/// [liberr]
/// default_severity = "error"
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiberrConfig {
    /// Severity for untagged chains
    #[serde(default)]
    pub default_severity: Severity,
}

impl LiberrConfig {
    /// Make this section's default the process default
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AlreadyInitialized` if a default was already set.
    pub fn install(&self) -> Result<(), ConfigError> {
        init_default_severity(self.default_severity)
    }
}
