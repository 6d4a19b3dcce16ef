//! Call-stack capture and lazily resolved frames
//!
//! A [`CapturedStack`] records raw return addresses at the moment an error is
//! built. Turning it into a [`StackTrace`] is cheap: every [`Frame`] resolves
//! its symbol only when one of its fields is first read, and caches the result.

use once_cell::sync::OnceCell;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Maximum number of frames kept per capture
pub const MAX_STACK_DEPTH: usize = 32;

/// Library frames sitting between the walker and the user's call site:
/// [`CapturedStack::capture`] and the public entry point that called it.
const CAPTURE_SKIP: usize = 2;

/// Extra room for unwinder-internal frames above the walker.
#[cfg(feature = "full-backtrace")]
const WALK_SLACK: usize = 16;

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone)]
struct Symbol {
    function: String,
    file: String,
    line: u32,
}

/// One entry of a captured call stack
///
/// Holds an opaque instruction address. File, line and function are looked up
/// on first access; an address with no symbol reports `unknown` and line `0`.
pub struct Frame {
    ip: usize,
    symbol: OnceCell<Option<Symbol>>,
}

impl Frame {
    fn new(ip: usize) -> Self {
        Self {
            ip,
            symbol: OnceCell::new(),
        }
    }

    /// Raw instruction address of this frame
    #[must_use]
    pub fn ip(&self) -> usize {
        self.ip
    }

    fn symbol(&self) -> Option<&Symbol> {
        self.symbol.get_or_init(|| resolve_ip(self.ip)).as_ref()
    }

    /// Whether a symbol was found for this address
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.symbol().is_some()
    }

    /// Source file path, or `unknown`
    #[must_use]
    pub fn file(&self) -> &str {
        self.symbol().map_or(UNKNOWN, |s| s.file.as_str())
    }

    /// Source line, or `0` when unresolved
    #[must_use]
    pub fn line(&self) -> u32 {
        self.symbol().map_or(0, |s| s.line)
    }

    /// Fully qualified function name, or `unknown`
    #[must_use]
    pub fn function(&self) -> &str {
        self.symbol().map_or(UNKNOWN, |s| s.function.as_str())
    }

    /// Function name with its module path stripped
    #[must_use]
    pub fn name(&self) -> &str {
        bare_name(self.function())
    }

    /// Line number and the function name cut to its last three path segments
    #[must_use]
    pub fn caller_info(&self) -> (u32, &str) {
        match self.symbol() {
            Some(s) => (s.line, left_trim_path(&s.function)),
            None => (0, UNKNOWN),
        }
    }

    /// Render this frame with the given verb
    #[must_use]
    pub fn render(&self, verb: FrameVerb) -> FrameDisplay<'_> {
        FrameDisplay { frame: self, verb }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_resolved() {
            return f.write_str(UNKNOWN);
        }
        write!(f, "{} {}:{}", self.function(), self.file(), self.line())
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("ip", &format_args!("{:#x}", self.ip))
            .field("function", &self.function())
            .field("file", &self.file())
            .field("line", &self.line())
            .finish()
    }
}

impl Serialize for Frame {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How a single [`Frame`] is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameVerb {
    /// Source file path
    File,
    /// Source line number
    Line,
    /// Function name without module path
    Name,
    /// `function\n\tfile:line`
    Full,
}

/// [`fmt::Display`] adapter returned by [`Frame::render`]
pub struct FrameDisplay<'a> {
    frame: &'a Frame,
    verb: FrameVerb,
}

impl fmt::Display for FrameDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.frame;
        match self.verb {
            FrameVerb::File => f.write_str(frame.file()),
            FrameVerb::Line => write!(f, "{}", frame.line()),
            FrameVerb::Name => f.write_str(frame.name()),
            FrameVerb::Full => write!(f, "{}\n\t{}:{}", frame.function(), frame.file(), frame.line()),
        }
    }
}

/// Immutable, ordered frames from one capture; index 0 is the innermost call
///
/// Cloning shares the frames (and their resolved symbols).
#[derive(Clone)]
pub struct StackTrace {
    frames: Arc<[Frame]>,
}

impl Default for StackTrace {
    fn default() -> Self {
        Self {
            frames: Arc::from(Vec::new()),
        }
    }
}

impl StackTrace {
    /// Number of frames
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when nothing was captured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames as a slice
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Iterate frames innermost first; may be called any number of times
    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    /// Render the whole trace with the given verb
    #[must_use]
    pub fn render(&self, verb: crate::Verb) -> StackDisplay<'_> {
        StackDisplay { trace: self, verb }
    }

    pub(crate) fn fmt_frames(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in self.iter() {
            write!(f, "\n{}", frame.render(FrameVerb::Full))?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a StackTrace {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if f.alternate() {
            crate::Verb::Verbose
        } else {
            crate::Verb::Plain
        };
        fmt::Display::fmt(&self.render(verb), f)
    }
}

impl Serialize for StackTrace {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// [`fmt::Display`] adapter returned by [`StackTrace::render`]
pub struct StackDisplay<'a> {
    trace: &'a StackTrace,
    verb: crate::Verb,
}

impl fmt::Display for StackDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verb {
            crate::Verb::Verbose => self.trace.fmt_frames(f),
            crate::Verb::Plain | crate::Verb::Line | crate::Verb::Quoted => {
                f.write_str("[")?;
                for (i, frame) in self.trace.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    fmt::Display::fmt(&frame.render(FrameVerb::File), f)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Raw return addresses recorded at error construction
#[derive(Debug, Clone, Default)]
pub struct CapturedStack {
    ips: Vec<usize>,
}

impl CapturedStack {
    /// Record the caller's call stack
    ///
    /// Skips this routine and the library entry point that called it, so the
    /// first recorded frame is the code that asked for the error. Returns an
    /// empty capture when stack walking is unavailable.
    #[inline(never)]
    #[must_use]
    pub fn capture() -> Self {
        Self::walk(CAPTURE_SKIP)
    }

    #[cfg(feature = "full-backtrace")]
    #[inline(never)]
    fn walk(skip: usize) -> Self {
        let marker = Self::walk as usize;
        let limit = MAX_STACK_DEPTH + skip + WALK_SLACK;
        let mut raw = Vec::with_capacity(limit);
        let mut marker_at = None;

        backtrace::trace(|frame| {
            if marker_at.is_none() && frame.symbol_address() as usize == marker {
                marker_at = Some(raw.len());
            }
            raw.push(frame.ip() as usize);
            raw.len() < limit
        });

        // Without a located marker nothing is skipped.
        let start = marker_at.map_or(0, |at| at + 1 + skip);
        Self {
            ips: raw.into_iter().skip(start).take(MAX_STACK_DEPTH).collect(),
        }
    }

    #[cfg(not(feature = "full-backtrace"))]
    fn walk(_skip: usize) -> Self {
        Self::default()
    }

    /// Number of recorded addresses
    #[must_use]
    pub fn len(&self) -> usize {
        self.ips.len()
    }

    /// True when nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ips.is_empty()
    }

    /// Convert to frames; symbols are looked up lazily per frame
    #[must_use]
    pub fn resolve(&self) -> StackTrace {
        StackTrace {
            frames: self.ips.iter().copied().map(Frame::new).collect(),
        }
    }
}

impl From<CapturedStack> for StackTrace {
    fn from(captured: CapturedStack) -> Self {
        captured.resolve()
    }
}

#[cfg(feature = "full-backtrace")]
fn resolve_ip(ip: usize) -> Option<Symbol> {
    let mut found = None;
    // `resolve` already steps back from the return address to the call.
    backtrace::resolve(ip as *mut std::ffi::c_void, |symbol| {
        if found.is_some() {
            return;
        }
        let Some(name) = symbol.name() else {
            return;
        };
        found = Some(Symbol {
            function: format!("{name:#}"),
            file: symbol
                .filename()
                .map_or_else(|| UNKNOWN.to_string(), |p| p.display().to_string()),
            line: symbol.lineno().unwrap_or(0),
        });
    });
    found
}

#[cfg(not(feature = "full-backtrace"))]
fn resolve_ip(_ip: usize) -> Option<Symbol> {
    None
}

/// `a::b::c` -> `c`
fn bare_name(function: &str) -> &str {
    function.rsplit("::").next().unwrap_or(function)
}

/// `a::b::c::d::e` -> `c::d::e`
fn left_trim_path(path: &str) -> &str {
    match path.rmatch_indices("::").nth(2) {
        Some((i, _)) => &path[i + 2..],
        None => path,
    }
}
