//! Error types for the synchronization core.
//!
//! This module defines the centralized error type [`SyncError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented with the
//! `thiserror` crate.
//!
//! # Fatal vs. recoverable
//!
//! Only the initialization path produces [`SyncError::Fatal`]. The core never
//! terminates the process on its own; the owning application decides what a
//! fatal error means (log and exit, restart the engine, ...). Every other
//! variant is recoverable and is usually logged and skipped by the caller.

use thiserror::Error;

/// The main error type for synchronization core operations.
///
/// # Examples
///
/// ```
/// use mpv_mirror::SyncError;
///
/// let err = SyncError::EngineCall {
///     operation: "get_property(volume)".to_string(),
///     code: -8,
///     message: "property unavailable".to_string(),
/// };
/// assert!(!err.is_fatal());
/// assert!(err.into_fatal().is_fatal());
/// ```
#[derive(Debug, Error)]
pub enum SyncError {
    /// An engine property read/write or command returned a negative status
    /// during steady-state operation.
    ///
    /// Callers skip the affected field and keep going.
    #[error("Engine call `{operation}` failed: {message} ({code})")]
    EngineCall {
        /// Human-readable name of the failed call, e.g. `set_property(pause)`.
        operation: String,
        /// Raw negative status returned by the engine.
        code: i32,
        /// Engine-provided description of `code`.
        message: String,
    },

    /// An initialization-critical engine call failed.
    ///
    /// A misconfigured engine cannot safely continue, so the owning process
    /// is expected to stop using this core instance.
    #[error("Fatal engine error in `{operation}`: {message} ({code})")]
    Fatal {
        /// Human-readable name of the failed call.
        operation: String,
        /// Raw negative status returned by the engine.
        code: i32,
        /// Engine-provided description of `code`.
        message: String,
    },

    /// One or more user-supplied engine options could not be applied.
    ///
    /// Reported once after every option has been attempted.
    #[error("Failed to apply {failed} engine option(s)")]
    OptionApply {
        /// Number of options the engine rejected.
        failed: usize,
    },

    /// A track reported by the engine has a type outside audio/video/sub.
    #[error("Unclassified track type: {0}")]
    UnclassifiedTrack(String),

    /// The environment lacks something configuration depends on, such as a
    /// home directory for the per-user config and data locations.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A settings file could not be parsed as TOML.
    #[error("Settings parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SyncError {
    /// Returns `true` for errors the owning process must act on.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal { .. })
    }

    /// Promotes an engine call failure to a fatal one.
    ///
    /// Used by initialization-critical call sites. Other variants are
    /// returned unchanged.
    #[must_use]
    pub fn into_fatal(self) -> Self {
        match self {
            Self::EngineCall {
                operation,
                code,
                message,
            } => Self::Fatal {
                operation,
                code,
                message,
            },
            other => other,
        }
    }
}

/// A specialized `Result` type for synchronization core operations.
pub type Result<T> = std::result::Result<T, SyncError>;
