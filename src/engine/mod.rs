//! The media engine collaborator.
//!
//! The core talks to the embedded engine only through the [`Engine`] trait:
//! typed property access, commands, option setting and a non-blocking event
//! queue. A binding to the real engine implements it in the application
//! crate; tests implement it with an in-memory fake.
//!
//! Engine calls report failure as a negative [`ErrorCode`]. Call sites turn
//! it into a [`SyncError`](crate::SyncError) with [`EngineResultExt`], and
//! initialization-critical sites promote it to a fatal error.

use crate::domain::{Node, SyncError};
use crate::options::LogLevel;
use std::fmt;

/// Negative status code returned by a failed engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    pub const EVENT_QUEUE_FULL: Self = Self(-1);
    pub const NOMEM: Self = Self(-2);
    pub const UNINITIALIZED: Self = Self(-3);
    pub const INVALID_PARAMETER: Self = Self(-4);
    pub const OPTION_NOT_FOUND: Self = Self(-5);
    pub const OPTION_FORMAT: Self = Self(-6);
    pub const OPTION_ERROR: Self = Self(-7);
    pub const PROPERTY_NOT_FOUND: Self = Self(-8);
    pub const PROPERTY_FORMAT: Self = Self(-9);
    pub const PROPERTY_UNAVAILABLE: Self = Self(-10);
    pub const PROPERTY_ERROR: Self = Self(-11);
    pub const COMMAND: Self = Self(-12);
    pub const LOADING_FAILED: Self = Self(-13);
    pub const AO_INIT_FAILED: Self = Self(-14);
    pub const VO_INIT_FAILED: Self = Self(-15);
    pub const NOTHING_TO_PLAY: Self = Self(-16);
    pub const UNKNOWN_FORMAT: Self = Self(-17);
    pub const UNSUPPORTED: Self = Self(-18);
    pub const NOT_IMPLEMENTED: Self = Self(-19);
    pub const GENERIC: Self = Self(-20);

    /// Engine description of the code.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self.0 {
            0 => "success",
            -1 => "event queue full",
            -2 => "memory allocation failed",
            -3 => "core not initialized",
            -4 => "invalid parameter",
            -5 => "option not found",
            -6 => "unsupported format for accessing option",
            -7 => "error setting option",
            -8 => "property not found",
            -9 => "unsupported format for accessing property",
            -10 => "property unavailable",
            -11 => "error accessing property",
            -12 => "error running command",
            -13 => "loading failed",
            -14 => "audio output initialization failed",
            -15 => "video output initialization failed",
            -16 => "no audio or video data played",
            -17 => "unrecognized file format",
            -18 => "not supported",
            -19 => "operation not implemented",
            -20 => "something happened",
            _ => "unknown error",
        }
    }

    /// Converts the code into a steady-state engine call error.
    #[must_use]
    pub fn into_error(self, operation: impl Into<String>) -> SyncError {
        SyncError::EngineCall {
            operation: operation.into(),
            code: self.0,
            message: self.description().to_string(),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.0)
    }
}

impl std::error::Error for ErrorCode {}

/// Result of a raw engine call.
pub type EngineResult<T> = std::result::Result<T, ErrorCode>;

/// Attaches the failing operation's name to a raw engine result.
pub trait EngineResultExt<T> {
    /// Maps the error to [`SyncError::EngineCall`].
    ///
    /// # Errors
    ///
    /// Returns the mapped error when the engine call failed.
    fn call(self, operation: impl Into<String>) -> crate::Result<T>;

    /// Maps the error to [`SyncError::Fatal`].
    ///
    /// # Errors
    ///
    /// Returns the mapped error when the engine call failed.
    fn fatal(self, operation: impl Into<String>) -> crate::Result<T>
    where
        Self: Sized,
    {
        self.call(operation).map_err(SyncError::into_fatal)
    }
}

impl<T> EngineResultExt<T> for EngineResult<T> {
    fn call(self, operation: impl Into<String>) -> crate::Result<T> {
        self.map_err(|code| code.into_error(operation))
    }
}

/// Value format requested for a property read or observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    String,
    Flag,
    Int64,
    Double,
    Node,
}

/// Identifies an event type independently of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    None,
    Shutdown,
    LogMessage,
    PropertyChange,
    Idle,
    StartFile,
    FileLoaded,
    EndFile,
    VideoReconfig,
    AudioReconfig,
    PlaybackRestart,
    Seek,
    Other(u32),
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Shutdown => f.write_str("shutdown"),
            Self::LogMessage => f.write_str("log-message"),
            Self::PropertyChange => f.write_str("property-change"),
            Self::Idle => f.write_str("idle"),
            Self::StartFile => f.write_str("start-file"),
            Self::FileLoaded => f.write_str("file-loaded"),
            Self::EndFile => f.write_str("end-file"),
            Self::VideoReconfig => f.write_str("video-reconfig"),
            Self::AudioReconfig => f.write_str("audio-reconfig"),
            Self::PlaybackRestart => f.write_str("playback-restart"),
            Self::Seek => f.write_str("seek"),
            Self::Other(id) => write!(f, "event-{id}"),
        }
    }
}

/// Why playback of a file ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndFileReason {
    Eof,
    Stop,
    Quit,
    Error,
    Redirect,
}

/// One message from the engine's log subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    /// Module that emitted the message, e.g. `cplayer` or `ffmpeg/demuxer`.
    pub prefix: String,
    pub level: LogLevel,
    /// Message text, usually newline-terminated.
    pub text: String,
}

/// An event taken from the engine queue.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Queue-empty sentinel.
    None,
    Shutdown,
    LogMessage(LogMessage),
    PropertyChange { name: String, value: Node },
    Idle,
    StartFile,
    FileLoaded,
    EndFile { reason: EndFileReason, error: i32 },
    VideoReconfig,
    AudioReconfig,
    PlaybackRestart,
    Seek,
    Other(u32),
}

impl EngineEvent {
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::None => EventKind::None,
            Self::Shutdown => EventKind::Shutdown,
            Self::LogMessage(_) => EventKind::LogMessage,
            Self::PropertyChange { .. } => EventKind::PropertyChange,
            Self::Idle => EventKind::Idle,
            Self::StartFile => EventKind::StartFile,
            Self::FileLoaded => EventKind::FileLoaded,
            Self::EndFile { .. } => EventKind::EndFile,
            Self::VideoReconfig => EventKind::VideoReconfig,
            Self::AudioReconfig => EventKind::AudioReconfig,
            Self::PlaybackRestart => EventKind::PlaybackRestart,
            Self::Seek => EventKind::Seek,
            Self::Other(id) => EventKind::Other(*id),
        }
    }
}

/// Property, command and event API of the embedded engine.
///
/// All calls are synchronous, bounded and made from the UI thread. The only
/// thread-safe entry point of a real engine, its wakeup callback, is not part
/// of this trait; see [`crate::wakeup`].
pub trait Engine {
    /// Reads a property in the requested format.
    ///
    /// # Errors
    ///
    /// Fails when the property does not exist, is unavailable in the current
    /// state or cannot be converted to `format`.
    fn get_property(&mut self, name: &str, format: Format) -> EngineResult<Node>;

    /// Writes a property.
    ///
    /// # Errors
    ///
    /// Fails when the property does not exist or rejects the value.
    fn set_property(&mut self, name: &str, value: Node) -> EngineResult<()>;

    /// Runs a command given as an argument vector, e.g. `["seek", "10", "absolute"]`.
    ///
    /// # Errors
    ///
    /// Fails when the command is unknown or its arguments are invalid.
    fn command(&mut self, args: &[&str]) -> EngineResult<()>;

    /// Sets an option from its string form. Only valid before [`Engine::initialize`]
    /// for most options.
    ///
    /// # Errors
    ///
    /// Fails for unknown options and unparsable values.
    fn set_option_string(&mut self, name: &str, value: &str) -> EngineResult<()>;

    /// Sets an option from a typed value.
    ///
    /// # Errors
    ///
    /// Fails for unknown options and values of the wrong type.
    fn set_option(&mut self, name: &str, value: Node) -> EngineResult<()>;

    /// Loads an engine configuration file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed.
    fn load_config_file(&mut self, path: &str) -> EngineResult<()>;

    /// Subscribes to change events for a property.
    ///
    /// # Errors
    ///
    /// Fails for unknown properties.
    fn observe_property(&mut self, name: &str, format: Format) -> EngineResult<()>;

    /// Enables log message events at or below `level`.
    ///
    /// # Errors
    ///
    /// Fails when the engine rejects the level.
    fn request_log_messages(&mut self, level: LogLevel) -> EngineResult<()>;

    /// Enables or disables delivery of one event kind.
    ///
    /// # Errors
    ///
    /// Fails for event kinds the engine does not know.
    fn request_event(&mut self, kind: EventKind, enable: bool) -> EngineResult<()>;

    /// Takes the next event, waiting at most `timeout` seconds. The core only
    /// ever passes `0.0`.
    ///
    /// Returns `None` or [`EngineEvent::None`] when the queue is empty.
    fn wait_event(&mut self, timeout: f64) -> Option<EngineEvent>;

    /// Starts the engine after options have been set.
    ///
    /// # Errors
    ///
    /// Fails when the engine cannot start with the configured options.
    fn initialize(&mut self) -> EngineResult<()>;
}
