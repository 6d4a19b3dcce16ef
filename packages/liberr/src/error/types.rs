//! Core error types and capability traits

use super::level::Severity;
use crate::stack::StackTrace;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Shared handle to one node of an error chain
///
/// Cloning is cheap and never copies the node. Two handles are the same error
/// when [`Error::ptr_eq`] says so.
#[derive(Clone)]
pub struct Error {
    pub(super) inner: Arc<dyn ErrorNode>,
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// `&dyn Any` access for every node, used by [`Error::downcast_ref`]
pub trait AsAny: Any {
    /// The node as `&dyn Any`
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Anything that can sit in an error chain
///
/// Implementors are immutable once built. Capabilities are opt-in: a node
/// that wraps another error answers [`ErrorNode::as_cause`], a node carrying
/// a logging severity answers [`ErrorNode::as_level`].
pub trait ErrorNode: AsAny + Send + Sync + 'static {
    /// Plain, single-line text of this node including its causes
    fn fmt_plain(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Diagnostic text: messages, the cause chain and captured stacks
    fn fmt_verbose(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_plain(f)
    }

    /// Context text added at this node
    fn message(&self) -> Option<&str> {
        None
    }

    /// Stack captured when this node was built
    fn stack_trace(&self) -> Option<&StackTrace> {
        None
    }

    /// Cause capability
    fn as_cause(&self) -> Option<&dyn HasCause> {
        None
    }

    /// Severity capability
    fn as_level(&self) -> Option<&dyn HasLevel> {
        None
    }
}

/// A node that wraps a prior error
pub trait HasCause {
    /// The wrapped error
    fn cause(&self) -> &Error;
}

/// A node that declares the severity it should be logged at
pub trait HasLevel: HasCause {
    /// Declared severity
    fn level(&self) -> Severity;
}

/// Leaf error: a message and the stack at its creation
pub struct Fundamental {
    pub(super) msg: String,
    pub(super) stack: StackTrace,
}

impl Fundamental {
    /// The message
    #[must_use]
    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// Captured stack
    #[must_use]
    pub fn stack(&self) -> &StackTrace {
        &self.stack
    }
}

impl ErrorNode for Fundamental {
    fn fmt_plain(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)
    }

    fn fmt_verbose(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.msg)?;
        self.stack.fmt_frames(f)
    }

    fn message(&self) -> Option<&str> {
        Some(&self.msg)
    }

    fn stack_trace(&self) -> Option<&StackTrace> {
        Some(&self.stack)
    }
}

/// Wrapper adding a stack to an error that had none
pub struct WithStack {
    pub(super) cause: Error,
    pub(super) stack: StackTrace,
}

impl WithStack {
    /// Captured stack
    #[must_use]
    pub fn stack(&self) -> &StackTrace {
        &self.stack
    }
}

impl HasCause for WithStack {
    fn cause(&self) -> &Error {
        &self.cause
    }
}

impl ErrorNode for WithStack {
    fn fmt_plain(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cause.inner.fmt_plain(f)
    }

    fn fmt_verbose(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cause.inner.fmt_verbose(f)?;
        self.stack.fmt_frames(f)
    }

    fn stack_trace(&self) -> Option<&StackTrace> {
        Some(&self.stack)
    }

    fn as_cause(&self) -> Option<&dyn HasCause> {
        Some(self)
    }
}

/// Wrapper adding a context message
pub struct WithMessage {
    pub(super) cause: Error,
    pub(super) msg: String,
}

impl WithMessage {
    pub(super) fn new(cause: Error, msg: String) -> Self {
        Self { cause, msg }
    }
}

impl HasCause for WithMessage {
    fn cause(&self) -> &Error {
        &self.cause
    }
}

impl ErrorNode for WithMessage {
    fn fmt_plain(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.msg.is_empty() {
            write!(f, "{}: ", self.msg)?;
        }
        self.cause.inner.fmt_plain(f)
    }

    fn fmt_verbose(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.msg.is_empty() {
            writeln!(f, "{}", self.msg)?;
        }
        self.cause.inner.fmt_verbose(f)?;
        writeln!(f)
    }

    fn message(&self) -> Option<&str> {
        Some(self.msg.as_str()).filter(|m| !m.is_empty())
    }

    fn as_cause(&self) -> Option<&dyn HasCause> {
        Some(self)
    }
}

/// Leaf holding an error from outside this library
///
/// Exposes neither cause nor severity, even when the wrapped value has a
/// `source()`.
pub struct Foreign {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl Foreign {
    /// The wrapped error
    #[must_use]
    pub fn get_ref(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.inner.as_ref()
    }
}

impl ErrorNode for Foreign {
    fn fmt_plain(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl<T: ErrorNode> From<T> for Error {
    fn from(node: T) -> Self {
        Self {
            inner: Arc::new(node),
        }
    }
}
