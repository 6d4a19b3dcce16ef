//! Error chains with captured call stacks for the service workspace
//!
//! This crate provides:
//! - Leaf errors that record the call stack where they were created
//! - Context wrappers added as an error climbs the call hierarchy
//! - Logging severity tags, aggregated along a chain
//! - Plain and verbose renderings, plus a JSON-coded [`ResultMessage`]
//!
//! Wrapping never mutates: every wrap allocates a new node that points at the
//! old one, so errors can be shared and reused across threads.
//!
//! ```
//! use liberr::{loggable_level, with_error_level_msg, wrapf, Error, Severity};
//!
//! let err = Error::new("redis put failed");
//! let wrapped = wrapf!(Some(err.clone()), "captcha store for {}", "13800000000");
//! let tagged = with_error_level_msg(wrapped, "giving up");
//!
//! let (root, level, ok) = loggable_level(tagged.as_ref());
//! assert!(Error::ptr_eq(&root.unwrap(), &err));
//! assert_eq!(level, Severity::Error);
//! assert!(ok);
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod result_message;
pub mod stack;

pub use config::{default_severity, init_default_severity, ConfigError, LiberrConfig};
pub use error::*;
pub use handlers::{on_error, on_result};
pub use result_message::ResultMessage;
pub use stack::{CapturedStack, Frame, FrameVerb, StackTrace, MAX_STACK_DEPTH};
