//! Logging severity tags and their aggregation across a chain
//!
//! A tag records how loudly the caller further up should log an error. Tags
//! never capture a stack; they only annotate. When several tags pile up along
//! a chain, [`loggable_level`] picks the highest one by declaration order.

use super::types::{Error, ErrorNode, HasCause, HasLevel, WithMessage};
use crate::config::default_severity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered logging intent
///
/// The order is the declaration order below and is only used to pick the
/// maximum among several tags. Codes start at 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Severity {
    /// Warning, also the level of an untagged chain
    #[default]
    Warn = 1,
    /// Informational
    Info = 2,
    /// Trace
    Trace = 3,
    /// Debug
    Debug = 4,
    /// Error
    Error = 5,
    /// Fatal
    Fatal = 6,
    /// Business event
    Buss = 7,
}

impl Severity {
    /// Every level in declaration order
    pub const ALL: [Severity; 7] = [
        Severity::Warn,
        Severity::Info,
        Severity::Trace,
        Severity::Debug,
        Severity::Error,
        Severity::Fatal,
        Severity::Buss,
    ];

    /// Integer code, `Warn = 1` through `Buss = 7`
    #[inline]
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Inverse of [`Severity::code`]
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Warn),
            2 => Some(Self::Info),
            3 => Some(Self::Trace),
            4 => Some(Self::Debug),
            5 => Some(Self::Error),
            6 => Some(Self::Fatal),
            7 => Some(Self::Buss),
            _ => None,
        }
    }

    /// Upper-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
            Self::Buss => "BUSS",
        }
    }

    /// Level a `log` sink should use
    #[must_use]
    pub const fn log_level(self) -> log::Level {
        match self {
            Self::Warn => log::Level::Warn,
            Self::Info | Self::Buss => log::Level::Info,
            Self::Trace => log::Level::Trace,
            Self::Debug => log::Level::Debug,
            Self::Error | Self::Fatal => log::Level::Error,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised severity name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity level `{0}`")]
pub struct ParseSeverityError(pub String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            "buss" | "business" => Ok(Self::Buss),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// Wrapper carrying a severity and an optional context message
pub struct LevelMsg {
    inner: WithMessage,
    level: Severity,
}

impl HasCause for LevelMsg {
    fn cause(&self) -> &Error {
        self.inner.cause()
    }
}

impl HasLevel for LevelMsg {
    fn level(&self) -> Severity {
        self.level
    }
}

impl ErrorNode for LevelMsg {
    fn fmt_plain(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt_plain(f)
    }

    fn fmt_verbose(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt_verbose(f)
    }

    fn message(&self) -> Option<&str> {
        self.inner.message()
    }

    fn as_cause(&self) -> Option<&dyn HasCause> {
        Some(self)
    }

    fn as_level(&self) -> Option<&dyn HasLevel> {
        Some(self)
    }
}

impl Error {
    /// Severity declared at this node, if it is a tag
    #[must_use]
    pub fn level(&self) -> Option<Severity> {
        self.inner.as_level().map(|l| l.level())
    }
}

/// Tag `err` with `level`; `None` stays `None`
#[must_use]
pub fn with_level(err: Option<Error>, level: Severity) -> Option<Error> {
    let err = err?;
    Some(level_node(err, level, String::new()))
}

/// Tag `err` with `level` and a context message; `None` stays `None`
#[must_use]
pub fn with_level_msg(err: Option<Error>, level: Severity, msg: impl fmt::Display) -> Option<Error> {
    let err = err?;
    Some(level_node(err, level, msg.to_string()))
}

pub(crate) fn level_node(cause: Error, level: Severity, msg: String) -> Error {
    Error::from(LevelMsg {
        inner: WithMessage::new(cause, msg),
        level,
    })
}

macro_rules! level_constructors {
    ($($level:ident => $plain:ident, $msg:ident;)*) => {$(
        #[doc = concat!("Ask the caller to log `err` at [`Severity::", stringify!($level), "`]; `None` stays `None`")]
        #[must_use]
        pub fn $plain(err: Option<Error>) -> Option<Error> {
            with_level(err, Severity::$level)
        }

        #[doc = concat!("Like [`", stringify!($plain), "`], adding a context message")]
        #[must_use]
        pub fn $msg(err: Option<Error>, msg: impl fmt::Display) -> Option<Error> {
            with_level_msg(err, Severity::$level, msg)
        }
    )*};
}

level_constructors! {
    Warn => with_warn_level, with_warn_level_msg;
    Info => with_info_level, with_info_level_msg;
    Trace => with_trace_level, with_trace_level_msg;
    Debug => with_debug_level, with_debug_level_msg;
    Error => with_error_level, with_error_level_msg;
    Fatal => with_fatal_level, with_fatal_level_msg;
    Buss => with_buss_level, with_buss_level_msg;
}

/// Root cause and effective severity of `err`, using the process default
///
/// Returns `(root cause, level, tagged)`. `tagged` is false when no node in
/// the chain declares a severity; the level is then the default.
#[must_use]
pub fn loggable_level(err: Option<&Error>) -> (Option<Error>, Severity, bool) {
    loggable_level_with(err, default_severity())
}

/// [`loggable_level`] with an explicit default severity
///
/// Tagged nodes are checked before plain wrappers; the walk stops at the
/// first node that wraps nothing, which becomes the root cause.
#[must_use]
pub fn loggable_level_with(
    err: Option<&Error>,
    default: Severity,
) -> (Option<Error>, Severity, bool) {
    let Some(mut node) = err else {
        return (None, default, false);
    };

    let mut levels = Vec::with_capacity(4);
    loop {
        if let Some(tagged) = node.inner.as_level() {
            levels.push(tagged.level());
            node = tagged.cause();
            continue;
        }
        match node.inner.as_cause() {
            Some(wrapper) => node = wrapper.cause(),
            None => break,
        }
    }

    let root = Some(node.clone());
    match levels.as_slice() {
        [] => (root, default, false),
        [only] => (root, *only, true),
        _ => (root, levels.iter().copied().max().unwrap_or(default), true),
    }
}
