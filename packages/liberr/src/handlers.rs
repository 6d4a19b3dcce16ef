//! Pass-through hooks for result and error handling
//!
//! These emit `tracing` events so services that already run a tracing
//! subscriber see error chains without going through the `log` bridge.

use crate::error::{loggable_level, Error, Severity};

/// Result hook: records a debug event and passes the value through
pub fn on_result<T>(result: T) -> T {
    tracing::debug!("Operation completed successfully");
    result
}

/// Error hook: records the chain at its aggregated severity and passes it through
///
/// `Error` and `Fatal` events carry the verbose chain with stacks; lower
/// levels only the plain text.
pub fn on_error(error: Error) -> Error {
    let (_, level, tagged) = loggable_level(Some(&error));
    match level {
        Severity::Trace => tracing::trace!(%error, tagged, "Error occurred"),
        Severity::Debug => tracing::debug!(%error, tagged, "Error occurred"),
        Severity::Info => tracing::info!(%error, tagged, "Error occurred"),
        Severity::Buss => tracing::info!(%error, tagged, business = true, "Error occurred"),
        Severity::Warn => tracing::warn!(%error, tagged, "Error occurred"),
        Severity::Error | Severity::Fatal => tracing::error!(
            error = %format_args!("{error:#}"),
            %level,
            tagged,
            "Error occurred"
        ),
    }
    error
}
