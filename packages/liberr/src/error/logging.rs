//! Structured logging of error chains
//!
//! Provides env_logger-based setup and writes each error chain as one record at
//! the severity the chain asks for.

use super::level::{loggable_level, Severity};
use super::types::Error;
use log::{info, log};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Log target used for business-level records
pub const BUSINESS_TARGET: &str = "business";

/// Logging bridge between error chains and the `log` facade
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via the `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs
    /// - `RUST_LOG=info` - Enable info and above
    /// - `RUST_LOG=liberr=trace,business=info` - Per-target levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Use this in test modules to avoid initialization conflicts
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Write `err` as a single record at its aggregated severity
    ///
    /// `Error` and `Fatal` records carry the verbose chain with stacks; every
    /// other level logs the plain text only. Returns the severity used.
    pub fn log_chain(err: &Error) -> Severity {
        let (_, level, _) = loggable_level(Some(err));
        let target = match level {
            Severity::Buss => BUSINESS_TARGET,
            _ => module_path!(),
        };
        match level {
            Severity::Error | Severity::Fatal => {
                log!(target: target, level.log_level(), "[{level}] {err:#}");
            }
            _ => log!(target: target, level.log_level(), "[{level}] {err}"),
        }
        level
    }

    /// Hash an identifier for use in context messages
    ///
    /// Returns `#` followed by the first 12 hex characters of the SHA-256
    /// digest, so a phone number or key can be correlated across records
    /// without being written out.
    #[must_use]
    pub fn redact(value: &str) -> String {
        let hash = Sha256::digest(value.as_bytes());
        let hex_hash = format!("{hash:x}");
        format!("#{}", &hex_hash[..12])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::level::{with_buss_level, with_debug_level, with_fatal_level_msg};

    #[test]
    fn test_redact_is_stable_and_short() {
        LoggingTransformer::init_test();

        let first = LoggingTransformer::redact("13800000000");
        let second = LoggingTransformer::redact("13900000000");

        assert_ne!(first, second);
        assert_eq!(first, LoggingTransformer::redact("13800000000"));
        assert!(first.starts_with('#'));
        assert_eq!(first.len(), 13);
        assert!(!first.contains("138"));
    }

    #[test]
    fn test_log_chain_uses_aggregated_level() {
        LoggingTransformer::init_test();

        let base = Error::new("cache miss");
        assert_eq!(LoggingTransformer::log_chain(&base), Severity::Warn);

        let debug = with_debug_level(Some(base.clone())).unwrap();
        assert_eq!(LoggingTransformer::log_chain(&debug), Severity::Debug);

        let fatal = with_fatal_level_msg(Some(debug), "store unreachable").unwrap();
        assert_eq!(LoggingTransformer::log_chain(&fatal), Severity::Fatal);

        let business = with_buss_level(Some(base)).unwrap();
        assert_eq!(LoggingTransformer::log_chain(&business), Severity::Buss);
    }
}
