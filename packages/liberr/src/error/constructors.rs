//! Error constructors, wrapping and cause-chain traversal
//!
//! Every wrap function maps `None` to `None`, so a success path can go
//! through the same helpers without fabricating an error.

use super::types::{Error, ErrorNode, Foreign, Fundamental, WithMessage, WithStack};
use crate::stack::{CapturedStack, StackTrace};
use std::fmt;

impl Error {
    /// Create a leaf error with the caller's stack
    #[inline(never)]
    #[must_use]
    pub fn new<M: Into<String>>(msg: M) -> Self {
        fundamental(msg.into(), CapturedStack::capture())
    }

    /// Adopt an error from outside this library as a leaf (no stack, no cause)
    #[must_use]
    pub fn from_std<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::from(Foreign {
            inner: Box::new(error),
        })
    }

    /// True when both handles point at the same node
    #[must_use]
    pub fn ptr_eq(a: &Error, b: &Error) -> bool {
        std::sync::Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// The node behind this handle
    #[must_use]
    pub fn node(&self) -> &dyn ErrorNode {
        self.inner.as_ref()
    }

    /// Downcast the node to a concrete type
    #[must_use]
    pub fn downcast_ref<T: ErrorNode>(&self) -> Option<&T> {
        self.node().as_any().downcast_ref::<T>()
    }

    /// Is the node of type `T`
    #[must_use]
    pub fn is<T: ErrorNode>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Context text added at this node
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.inner.message()
    }

    /// Stack captured at this node, if it captured one
    #[must_use]
    pub fn stack_trace(&self) -> Option<&StackTrace> {
        self.inner.stack_trace()
    }

    /// The directly wrapped error
    #[must_use]
    pub fn cause(&self) -> Option<&Error> {
        self.inner.as_cause().map(|c| c.cause())
    }

    /// Whether this node wraps another error
    #[must_use]
    pub fn is_wrapper(&self) -> bool {
        self.inner.as_cause().is_some()
    }

    /// Follow causes to the end of the chain
    ///
    /// Returns `self` when this node wraps nothing.
    #[must_use]
    pub fn root_cause(&self) -> Error {
        let mut err = self;
        while let Some(wrapper) = err.inner.as_cause() {
            err = wrapper.cause();
        }
        err.clone()
    }

    /// Iterate this node and every cause below it, outermost first
    #[must_use]
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }
}

/// Iterator over an error chain, see [`Error::chain`]
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause();
        Some(current)
    }
}

/// Leaf error with a formatted message and the caller's stack
///
/// Usually reached through [`errorf!`](crate::errorf).
#[inline(never)]
#[must_use]
pub fn errorf(msg: impl fmt::Display) -> Error {
    fundamental(msg.to_string(), CapturedStack::capture())
}

/// Wrap `err` with a context message; no stack is captured
#[must_use]
pub fn with_message(err: Option<Error>, msg: impl fmt::Display) -> Option<Error> {
    let err = err?;
    Some(message_node(err, msg))
}

/// Attach the caller's stack to `err`
///
/// An error that already wraps another one is returned unchanged, so
/// repeated calls capture at most once.
#[inline(never)]
#[must_use]
pub fn with_stack(err: Option<Error>) -> Option<Error> {
    let err = err?;
    if err.is_wrapper() {
        return Some(err);
    }
    Some(stack_node(err, CapturedStack::capture()))
}

/// Wrap `err` with a context message, capturing a stack only at the first wrap
///
/// Usually reached through [`wrapf!`](crate::wrapf).
#[inline(never)]
#[must_use]
pub fn wrapf(err: Option<Error>, msg: impl fmt::Display) -> Option<Error> {
    let err = err?;
    if err.is_wrapper() {
        return Some(message_node(err, msg));
    }
    Some(stack_node(message_node(err, msg), CapturedStack::capture()))
}

/// Root cause of `err`; `None` stays `None`
#[must_use]
pub fn cause(err: Option<&Error>) -> Option<Error> {
    err.map(Error::root_cause)
}

pub(crate) fn fundamental(msg: String, captured: CapturedStack) -> Error {
    Error::from(Fundamental {
        msg,
        stack: captured.resolve(),
    })
}

pub(crate) fn message_node(cause: Error, msg: impl fmt::Display) -> Error {
    Error::from(WithMessage::new(cause, msg.to_string()))
}

pub(crate) fn stack_node(cause: Error, captured: CapturedStack) -> Error {
    Error::from(WithStack {
        cause,
        stack: captured.resolve(),
    })
}
