//! Display and trait implementations for Error

use super::types::{Error, ErrorNode};
use std::fmt;

/// Rendering verbs shared by errors and stack traces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// The message text; safe to show outside the process
    Plain,
    /// The message text as an escaped, double-quoted string
    Quoted,
    /// One line, no stack data; a wrapper shows only its own message
    Line,
    /// Messages, the full cause chain and captured stacks; internal use only
    Verbose,
}

/// [`fmt::Display`] adapter returned by [`Error::render`]
pub struct Rendered<'a> {
    node: &'a dyn ErrorNode,
    verb: Verb,
}

struct Plain<'a>(&'a dyn ErrorNode);

impl fmt::Display for Plain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_plain(f)
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verb {
            Verb::Plain => self.node.fmt_plain(f),
            Verb::Line => fmt_line(self.node, f),
            Verb::Quoted => write!(f, "{:?}", Plain(self.node).to_string()),
            Verb::Verbose => self.node.fmt_verbose(f),
        }
    }
}

/// Walk down past wrappers without a message of their own; newlines are escaped.
fn fmt_line(mut node: &dyn ErrorNode, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    while let Some(wrapper) = node.as_cause() {
        if let Some(msg) = node.message() {
            return write_single_line(msg, f);
        }
        node = wrapper.cause().node();
    }
    write_single_line(&Plain(node).to_string(), f)
}

fn write_single_line(text: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for c in text.chars() {
        match c {
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            _ => fmt::Write::write_char(f, c)?,
        }
    }
    Ok(())
}

impl Error {
    /// Render with the given verb
    #[must_use]
    pub fn render(&self, verb: Verb) -> Rendered<'_> {
        Rendered {
            node: self.inner.as_ref(),
            verb,
        }
    }
}

impl fmt::Display for Error {
    /// `{}` is the plain text, `{:#}` the verbose form
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.inner.fmt_verbose(f)
        } else {
            self.inner.fmt_plain(f)
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt_verbose(f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}
