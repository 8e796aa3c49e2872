//! Per-module log level rules for engine log messages.
//!
//! The `msg-level` option is a comma-separated list of `prefix=level` pairs,
//! e.g. `cplayer=warn,ffmpeg/demuxer=error,all=v`. Each pair becomes a
//! [`LogLevelRule`] except `all`, which only raises the global minimum level
//! requested from the engine.

use std::fmt;
use std::str::FromStr;

/// Engine log severity, ordered from quietest to most verbose.
///
/// `a <= b` means a message at level `a` is shown by a filter set to `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    None,
    Fatal,
    #[default]
    Error,
    Warn,
    Info,
    V,
    Debug,
    Trace,
}

impl LogLevel {
    /// Name used by the engine for this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "no",
            Self::Fatal => "fatal",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::V => "v",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a level name is not one of the engine's level names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLevel(pub String);

impl fmt::Display for UnknownLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level `{}`", self.0)
    }
}

impl std::error::Error for UnknownLevel {}

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no" => Ok(Self::None),
            "fatal" => Ok(Self::Fatal),
            "error" => Ok(Self::Error),
            "warn" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "v" => Ok(Self::V),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(UnknownLevel(other.to_string())),
        }
    }
}

/// Maximum level for messages from one engine module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLevelRule {
    pub prefix: String,
    pub level: LogLevel,
}

impl LogLevelRule {
    /// Whether this rule applies to a message from `module`.
    ///
    /// Matches the exact prefix or any sub-module below it (`cplayer`
    /// matches `cplayer/vo` but not `cplayerx`).
    #[must_use]
    pub fn matches(&self, module: &str) -> bool {
        module
            .strip_prefix(self.prefix.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

/// Parsed `msg-level` option.
///
/// # Example
///
/// ```
/// use mpv_mirror::options::{LogFilter, LogLevel};
///
/// let filter = LogFilter::parse("cplayer=warn,all=v");
/// assert_eq!(filter.min_level(), LogLevel::V);
/// assert!(filter.allows("cplayer/vo", LogLevel::Warn));
/// assert!(!filter.allows("cplayer/vo", LogLevel::Info));
/// assert!(filter.allows("cplayerx", LogLevel::Info));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogFilter {
    rules: Vec<LogLevelRule>,
    min_level: LogLevel,
}

impl LogFilter {
    /// Parses `prefix=level[,prefix=level...]`.
    ///
    /// Pairs with a missing or unknown level are ignored. The minimum level
    /// starts at [`LogLevel::Error`] and is raised to the most verbose level
    /// named by any valid pair, `all` included.
    #[must_use]
    pub fn parse(option: &str) -> Self {
        let mut filter = Self::default();

        for pair in option.split(',').filter(|p| !p.is_empty()) {
            let Some((prefix, level)) = pair.split_once('=') else {
                tracing::debug!(pair, "ignoring msg-level entry without level");
                continue;
            };

            let Ok(level) = level.parse::<LogLevel>() else {
                tracing::debug!(pair, "ignoring msg-level entry with unknown level");
                continue;
            };

            filter.min_level = filter.min_level.max(level);

            if prefix != "all" {
                filter.rules.push(LogLevelRule {
                    prefix: prefix.to_string(),
                    level,
                });
            }
        }

        filter
    }

    /// Level to request from the engine's log subscription.
    #[must_use]
    pub const fn min_level(&self) -> LogLevel {
        self.min_level
    }

    #[must_use]
    pub fn rules(&self) -> &[LogLevelRule] {
        &self.rules
    }

    /// Whether a message from `module` at `level` should be forwarded.
    ///
    /// The first matching rule decides. Messages no rule matches already
    /// passed the engine-side minimum and are forwarded.
    #[must_use]
    pub fn allows(&self, module: &str, level: LogLevel) -> bool {
        self.rules
            .iter()
            .find(|rule| rule.matches(module))
            .map_or(true, |rule| level <= rule.level)
    }
}

/// Prepares engine log text for re-emission.
///
/// Engine messages arrive newline-terminated; one trailing newline is
/// removed. Returns `None` when at most one character remains.
#[must_use]
pub fn format_log_text(text: &str) -> Option<&str> {
    let text = text.strip_suffix('\n').unwrap_or(text);
    (text.chars().count() > 1).then_some(text)
}
