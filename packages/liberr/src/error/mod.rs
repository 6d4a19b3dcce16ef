//! Error chains with context propagation
//!
//! Provides:
//! - Leaf errors carrying the stack at their creation
//! - Context and stack wrappers that never mutate what they wrap
//! - Severity tags and their aggregation along a chain
//! - Rendering verbs for external and diagnostic output

pub mod constructors;
pub mod display;
pub mod extensions;
pub mod level;
pub mod logging;
pub mod macros;
pub mod types;

// Re-export all public types and traits
pub use constructors::{cause, errorf, with_message, with_stack, wrapf, Chain};
pub use display::{Rendered, Verb};
pub use extensions::{OptionExt, ResultExt};
pub use level::{
    loggable_level, loggable_level_with, with_buss_level, with_buss_level_msg, with_debug_level,
    with_debug_level_msg, with_error_level, with_error_level_msg, with_fatal_level,
    with_fatal_level_msg, with_info_level, with_info_level_msg, with_level, with_level_msg,
    with_trace_level, with_trace_level_msg, with_warn_level, with_warn_level_msg, LevelMsg,
    ParseSeverityError, Severity,
};
pub use logging::LoggingTransformer;
pub use types::{
    AsAny, Error, ErrorNode, Foreign, Fundamental, HasCause, HasLevel, Result, WithMessage,
    WithStack,
};
