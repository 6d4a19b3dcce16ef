//! Flat coded error rendered as compact JSON
//!
//! [`ResultMessage`] is what HTTP and gRPC handlers return to callers. Its plain
//! text is a JSON object whose field names (`data`, `result`, `message`,
//! `code`, `err-code`) are consumed by log sinks and response encoders, so
//! they must stay stable.

use crate::error::{Error, ErrorNode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coded error with a result tag, message and optional payload
///
/// Setter-style methods return a new value and leave `self` untouched, so a
/// value can serve as a template at many call sites.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
    result: String,
    message: String,
    code: i32,
    #[serde(rename = "err-code", default)]
    err_code: i32,
    #[serde(skip)]
    args: Vec<String>,
}

impl ResultMessage {
    /// New value whose message equals its result tag
    #[must_use]
    pub fn new(result: impl Into<String>, code: i32) -> Self {
        let result = result.into();
        Self::with_message_code(result.clone(), result, code)
    }

    /// New value with an explicit message
    #[must_use]
    pub fn with_message_code(result: impl Into<String>, msg: impl Into<String>, code: i32) -> Self {
        Self {
            result: result.into(),
            message: msg.into(),
            code,
            ..Self::default()
        }
    }

    /// New value with a specific error code as well as the status code
    #[must_use]
    pub fn with_err_code(
        result: impl Into<String>,
        err_code: i32,
        code: i32,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            err_code,
            ..Self::with_message_code(result, msg, code)
        }
    }

    /// Result tag such as `success` or `failure`
    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Human-readable message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// General status code
    #[must_use]
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Specific error code
    #[must_use]
    pub fn err_code(&self) -> i32 {
        self.err_code
    }

    /// Attached payload
    #[must_use]
    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }

    /// Internal arguments; never serialized
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Copy with a different message
    #[must_use]
    pub fn msg(&self, msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            ..self.clone()
        }
    }

    /// Copy whose message is the plain text of `err`
    #[must_use]
    pub fn err(&self, err: &impl fmt::Display) -> Self {
        self.msg(err.to_string())
    }

    /// Copy carrying internal arguments
    #[must_use]
    pub fn with_args<I>(&self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        Self {
            args: args.into_iter().map(|a| a.to_string()).collect(),
            ..self.clone()
        }
    }

    /// Copy carrying a payload
    ///
    /// A payload that fails to serialize leaves `data` empty.
    #[must_use]
    pub fn with_data(&self, data: impl Serialize) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(result = %self.result, "dropping unserializable data: {e}");
                None
            }
        };
        Self {
            data,
            ..self.clone()
        }
    }

    /// Fresh value with this result tag and code and a formatted message
    ///
    /// Error code, payload and arguments are not carried over.
    #[must_use]
    pub fn errorf(&self, msg: impl fmt::Display) -> Self {
        Self::with_message_code(self.result.clone(), msg.to_string(), self.code)
    }

    /// Compact JSON text
    #[must_use]
    pub fn json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Whether `other` is this error
    ///
    /// Compares against the root cause of `other`: true when it is this very
    /// value, or another `ResultMessage` with the same result tag.
    #[must_use]
    pub fn is(&self, other: &Error) -> bool {
        self.equal(other)
    }

    /// See [`ResultMessage::is`]
    #[must_use]
    pub fn equal(&self, other: &Error) -> bool {
        let root = other.root_cause();
        let this = (self as *const Self).cast::<()>();
        let that = (root.node() as *const dyn ErrorNode).cast::<()>();
        if std::ptr::eq(this, that) {
            return true;
        }
        root.downcast_ref::<Self>()
            .is_some_and(|o| o.result == self.result)
    }
}

impl fmt::Display for ResultMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.json_string())
    }
}

impl ErrorNode for ResultMessage {
    fn fmt_plain(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }

    fn message(&self) -> Option<&str> {
        Some(&self.message)
    }
}
