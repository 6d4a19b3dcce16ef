//! Wrapping helpers on `Result` and `Option`
//!
//! `Ok` values pass through untouched, which is the `None`-in, `None`-out
//! rule of the free functions expressed on `Result`.

use super::constructors::{fundamental, message_node, stack_node};
use super::level::{level_node, Severity};
use super::types::Error;
use crate::stack::CapturedStack;
use std::fmt;

/// Context and severity helpers for fallible results
pub trait ResultExt<T> {
    /// Add a context message, see [`with_message`](crate::with_message)
    fn wrap_msg<C: fmt::Display>(self, msg: C) -> Result<T, Error>;

    /// Lazily built variant of [`ResultExt::wrap_msg`]
    fn wrap_msg_with<C, F>(self, f: F) -> Result<T, Error>
    where
        C: fmt::Display,
        F: FnOnce() -> C;

    /// Attach the caller's stack, see [`with_stack`](crate::with_stack)
    fn with_stack(self) -> Result<T, Error>;

    /// Context message plus a stack on first wrap, see [`wrapf`](crate::wrapf)
    fn wrapf<C: fmt::Display>(self, msg: C) -> Result<T, Error>;

    /// Tag with a logging severity
    fn with_level(self, level: Severity) -> Result<T, Error>;

    /// Tag with a logging severity and a context message
    fn with_level_msg<C: fmt::Display>(self, level: Severity, msg: C) -> Result<T, Error>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<Error>,
{
    fn wrap_msg<C: fmt::Display>(self, msg: C) -> Result<T, Error> {
        self.map_err(|e| message_node(e.into(), msg))
    }

    fn wrap_msg_with<C, F>(self, f: F) -> Result<T, Error>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| message_node(e.into(), f()))
    }

    #[inline(never)]
    fn with_stack(self) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => {
                let err: Error = e.into();
                if err.is_wrapper() {
                    Err(err)
                } else {
                    Err(stack_node(err, CapturedStack::capture()))
                }
            }
        }
    }

    #[inline(never)]
    fn wrapf<C: fmt::Display>(self, msg: C) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(e) => {
                let err: Error = e.into();
                if err.is_wrapper() {
                    Err(message_node(err, msg))
                } else {
                    Err(stack_node(message_node(err, msg), CapturedStack::capture()))
                }
            }
        }
    }

    fn with_level(self, level: Severity) -> Result<T, Error> {
        self.map_err(|e| level_node(e.into(), level, String::new()))
    }

    fn with_level_msg<C: fmt::Display>(self, level: Severity, msg: C) -> Result<T, Error> {
        self.map_err(|e| level_node(e.into(), level, msg.to_string()))
    }
}

/// Turn a missing value into a leaf error
pub trait OptionExt<T> {
    /// `None` becomes a leaf error carrying `msg` and the caller's stack
    fn ok_or_error<C: fmt::Display>(self, msg: C) -> Result<T, Error>;
}

impl<T> OptionExt<T> for Option<T> {
    #[inline(never)]
    fn ok_or_error<C: fmt::Display>(self, msg: C) -> Result<T, Error> {
        match self {
            Some(value) => Ok(value),
            None => Err(fundamental(msg.to_string(), CapturedStack::capture())),
        }
    }
}
