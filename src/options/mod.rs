//! Parsers for the textual options the core consumes.
//!
//! None of these parsers fail: malformed input degrades to zero dimensions,
//! an undefined ratio, ignored rules or skipped options, and the caller
//! decides whether that is worth reporting.
//!
//! - [`geometry`]: `WxH` geometry strings and the autofit ratio
//! - [`log_level`]: `msg-level` rules and engine log text formatting
//! - [`engine_args`]: `--key=value` option strings

pub mod engine_args;
pub mod geometry;
pub mod log_level;

pub use engine_args::{apply_options, split_options};
pub use geometry::{autofit_ratio, parse_geometry, Dimensions};
pub use log_level::{format_log_text, LogFilter, LogLevel, LogLevelRule};
