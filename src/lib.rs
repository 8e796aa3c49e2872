//! mpv-mirror: keeps a desktop player's UI in step with an embedded mpv engine.
//!
//! The engine owns playback state (pause, volume, tracks, playlist) and
//! reports changes asynchronously. This crate mirrors that state into the UI
//! and turns UI actions into engine commands, without letting the two
//! directions echo each other.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← SyncCore
//! │  - Event drain and lifecycle state machine          │
//! │  - Property-change router                           │
//! │  - Playlist mirror and edit forwarding              │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Engine (      │   │ UI (ui/)      │   │ Notify        │
//! │ engine/)      │   │ - View        │   │ (notify.rs)   │
//! │ - properties  │   │ - Playlist    │   │ - observers   │
//! │ - commands    │   │ - guards      │   │               │
//! │ - event queue │   │               │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Options, Domain & Infrastructure                   │
//! │  - Geometry, msg-level, option strings (options/)   │
//! │  - Node, tracks, playlist entries, errors (domain/) │
//! │  - Paths and settings file (infrastructure/)        │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - Console output and OTLP span file export         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Threading
//!
//! Everything except [`wakeup::Wakeup`] lives on the UI thread. The engine's
//! wakeup callback calls [`wakeup::Wakeup::wake`]; the UI loop sees the
//! pending wakeup and calls [`SyncCore::drain`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::path::Path;
//! use mpv_mirror::{Config, SyncCore, VideoOutput};
//! use mpv_mirror::infrastructure::{get_config_dir, load_file, SETTINGS_FILE};
//! use mpv_mirror::i18n::init_translations;
//! use mpv_mirror::observability::init_tracing;
//!
//! let settings = load_file(&get_config_dir()?.join(SETTINGS_FILE))?;
//! let config = Config::from_settings(&settings);
//! init_tracing(&config);
//! init_translations(Path::new("/usr/share/locale"))?;
//!
//! let (wakeup, wakeups) = mpv_mirror::wakeup::wakeup_channel();
//! let engine = MpvHandle::new(move || wakeup.wake())?;
//! let mut core = SyncCore::new(engine, window, playlist_store, config);
//! core.initialize(VideoOutput::Window(window_id))?;
//!
//! // on every main loop iteration
//! if wakeups.take() {
//!     core.drain()?;
//! }
//! ```

pub mod app;
pub mod domain;
pub mod engine;
pub mod i18n;
pub mod infrastructure;
pub mod notify;
pub mod observability;
pub mod options;
pub mod ui;
pub mod wakeup;

pub use app::{DrainSummary, PlaybackState, Reaction, SyncCore, VideoOutput};
pub use domain::{Node, PlaylistEntry, Result, SyncError, TrackDescriptor, TrackKind, TrackLists};
pub use engine::{Engine, EngineEvent, EventKind};
pub use notify::{Broadcaster, Notification};
pub use ui::{PlaylistModel, View};

use std::collections::BTreeMap;

/// Application name reported to the engine and used for data directories.
pub const APP_NAME: &str = "mpv-mirror";

/// Settings consumed by the core.
///
/// Built from the flat settings map with [`Config::from_settings`]; every key
/// is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `autofit` geometry, e.g. `"50%x50%"`. Also applied as an engine option.
    pub autofit: Option<String>,

    /// `msg-level` rules, e.g. `"all=warn,cplayer=info"`. Also applied as an
    /// engine option.
    pub msg_level: Option<String>,

    /// Extra engine options in `--key=value` form, applied best-effort.
    pub mpv_options: String,

    /// Initial volume in percent. Default: 100
    pub volume: f64,

    /// Whether to load [`Config::mpv_config_file`].
    pub mpv_config_enable: bool,

    /// Engine config file path, with `~` expanded.
    pub mpv_config_file: Option<String>,

    /// Render through the OpenGL callback API instead of an embedded window.
    pub use_opengl: bool,

    /// `EnvFilter` directive for this crate's own tracing. Default: `"info"`
    pub trace_level: Option<String>,

    /// Screenshot file name template. Default: `"mpv-mirror-shot%n"`
    pub screenshot_template: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            autofit: None,
            msg_level: None,
            mpv_options: String::new(),
            volume: 100.0,
            mpv_config_enable: false,
            mpv_config_file: None,
            use_opengl: false,
            trace_level: None,
            screenshot_template: format!("{APP_NAME}-shot%n"),
        }
    }
}

impl Config {
    /// Parses configuration from a flat settings map.
    ///
    /// # Parsing Rules
    ///
    /// - Empty strings count as unset.
    /// - Booleans accept `true`/`yes`/`1` and `false`/`no`/`0`; anything else
    ///   keeps the default.
    /// - `volume` is clamped to `0..=100`; unparsable values keep 100.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use mpv_mirror::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("autofit".to_string(), "75%".to_string());
    /// map.insert("volume".to_string(), "140".to_string());
    /// map.insert("use-opengl".to_string(), "yes".to_string());
    ///
    /// let config = Config::from_settings(&map);
    /// assert_eq!(config.autofit.as_deref(), Some("75%"));
    /// assert_eq!(config.volume, 100.0);
    /// assert!(config.use_opengl);
    /// ```
    #[must_use]
    pub fn from_settings(settings: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let text = |key: &str| {
            settings
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        let flag = |key: &str, default: bool| {
            settings
                .get(key)
                .and_then(|s| parse_bool(s.trim()))
                .unwrap_or(default)
        };

        let volume = settings
            .get("volume")
            .and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .map_or(defaults.volume, |v| v.clamp(0.0, 100.0));

        Self {
            autofit: text("autofit"),
            msg_level: text("msg-level"),
            mpv_options: text("mpv-options").unwrap_or_default(),
            volume,
            mpv_config_enable: flag("mpv-config-enable", defaults.mpv_config_enable),
            mpv_config_file: text("mpv-config-file")
                .map(|path| infrastructure::expand_tilde(&path)),
            use_opengl: flag("use-opengl", defaults.use_opengl),
            trace_level: text("trace-level"),
            screenshot_template: text("screenshot-template")
                .unwrap_or(defaults.screenshot_template),
        }
    }

    /// Video output matching [`Config::use_opengl`] for the given window.
    #[must_use]
    pub const fn video_output(&self, window_id: i64) -> VideoOutput {
        if self.use_opengl {
            VideoOutput::OpenGl
        } else {
            VideoOutput::Window(window_id)
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn empty_settings_use_defaults() {
        assert_eq!(Config::from_settings(&BTreeMap::new()), Config::default());
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::from_settings(&settings(&[("autofit", "  "), ("msg-level", "")]));
        assert_eq!(config.autofit, None);
        assert_eq!(config.msg_level, None);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = Config::from_settings(&settings(&[
            ("volume", "loud"),
            ("mpv-config-enable", "maybe"),
        ]));
        assert_eq!(config.volume, 100.0);
        assert!(!config.mpv_config_enable);
    }

    #[test]
    fn video_output_follows_opengl_flag() {
        let mut config = Config::default();
        assert_eq!(config.video_output(0x2a), VideoOutput::Window(0x2a));
        config.use_opengl = true;
        assert_eq!(config.video_output(0x2a), VideoOutput::OpenGl);
    }
}
