//! The synchronization core: construction, initialization and load requests.
//!
//! [`SyncCore`] owns the engine handle, the UI collaborators and the playback
//! state. Its behavior is split across this module's siblings:
//!
//! - `dispatcher`: engine event draining
//! - `router`: property-change reactions
//! - `playlist`: playlist mirroring and user edits
//! - `refresh`: transport UI refresh

use crate::app::inhibit::Inhibitor;
use crate::app::state::PlaybackState;
use crate::domain::playlist::{name_from_path, path_from_uri};
use crate::domain::{Node, PlaylistEntry, Result, SyncError};
use crate::engine::{Engine, EngineResultExt, EventKind, Format};
use crate::i18n::i18n;
use crate::infrastructure::get_config_dir;
use crate::notify::{Broadcaster, Notification};
use crate::options::{apply_options, LogFilter};
use crate::ui::{PlaylistModel, Suppressor, View};
use crate::{Config, APP_NAME};

/// Where the engine renders video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoOutput {
    /// Render through the OpenGL callback API into a GL area.
    OpenGl,
    /// Embed the engine's own window into the given native window id.
    Window(i64),
}

/// Properties the core reacts to, with the format each is observed in.
const OBSERVED_PROPERTIES: [(&str, Format); 5] = [
    ("aid", Format::Int64),
    ("pause", Format::Flag),
    ("eof-reached", Format::Flag),
    ("fullscreen", Format::Flag),
    ("volume", Format::Double),
];

/// Keeps engine state and UI state consistent in both directions.
///
/// Engine to UI: [`drain`](Self::drain) consumes queued engine events and
/// updates the view, playlist rows and [`PlaybackState`].
///
/// UI to engine: user actions such as [`load`](Self::load),
/// [`seek`](Self::seek) or [`row_deleted`](Self::row_deleted) become engine
/// commands. Widget callbacks must check [`volume_suppressor`] and
/// [`playlist_suppressor`] before calling in, so that writes made by the core
/// itself are not echoed back.
///
/// [`volume_suppressor`]: Self::volume_suppressor
/// [`playlist_suppressor`]: Self::playlist_suppressor
#[derive(Debug)]
pub struct SyncCore<E, V, P> {
    pub(super) engine: E,
    pub(super) view: V,
    pub(super) playlist: P,
    pub(super) config: Config,
    pub(super) state: PlaybackState,
    pub(super) log_filter: LogFilter,
    pub(super) autofit_ratio: f64,
    pub(super) inhibitor: Inhibitor,
    pub(super) pending_move: Option<usize>,
    pub(super) volume_guard: Suppressor,
    pub(super) playlist_guard: Suppressor,
    pub(super) notifications: Broadcaster,
}

impl<E: Engine, V: View, P: PlaylistModel> SyncCore<E, V, P> {
    /// Creates a core around an uninitialized engine.
    #[must_use]
    pub fn new(engine: E, view: V, playlist: P, config: Config) -> Self {
        Self {
            engine,
            view,
            playlist,
            config,
            state: PlaybackState::default(),
            log_filter: LogFilter::default(),
            autofit_ratio: 1.0,
            inhibitor: Inhibitor::default(),
            pending_move: None,
            volume_guard: Suppressor::new(),
            playlist_guard: Suppressor::new(),
            notifications: Broadcaster::new(),
        }
    }

    /// Configures and starts the engine, then broadcasts
    /// [`Notification::EngineReady`].
    ///
    /// Default options, the configured volume, the user config file and the
    /// user's extra options are applied best-effort. A rejected extra option
    /// is reported once through [`Notification::EngineError`].
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Fatal`] if the engine cannot be started, a
    /// required property cannot be observed or the log subscription fails.
    pub fn initialize(&mut self, output: VideoOutput) -> Result<()> {
        let _span = tracing::info_span!("initialize", ?output).entered();

        self.apply_default_options();

        tracing::debug!(volume = self.config.volume, "setting volume");
        if let Err(code) = self.engine.set_option("volume", Node::Double(self.config.volume)) {
            tracing::warn!(error = %code, "failed to set initial volume");
        }

        if self.config.mpv_config_enable {
            if let Some(path) = self.config.mpv_config_file.as_deref() {
                tracing::info!(path, "loading engine config file");
                if let Err(code) = self.engine.load_config_file(path) {
                    tracing::warn!(path, error = %code, "failed to load engine config file");
                }
            }
        }

        let engine = &mut self.engine;
        let failed = apply_options(&self.config.mpv_options, |key, value| {
            engine.set_option_string(key, value)
        });
        if failed > 0 {
            let error = SyncError::OptionApply { failed };
            tracing::warn!(error = %error, "extra options rejected");
            self.notifications.emit(&Notification::EngineError(i18n(
                "Failed to apply one or more MPV options.",
            )));
        }

        match output {
            VideoOutput::OpenGl => {
                tracing::info!("opengl-cb is enabled; forcing vo=opengl-cb");
                if let Err(code) = self.engine.set_option_string("vo", "opengl-cb") {
                    tracing::warn!(error = %code, "failed to select opengl-cb output");
                }
            }
            VideoOutput::Window(wid) => {
                tracing::debug!(wid = %format!("{wid:#x}"), "attaching engine window");
                if let Err(code) = self.engine.set_option("wid", Node::Int64(wid)) {
                    tracing::warn!(error = %code, "failed to attach engine window");
                }
            }
        }

        for (name, format) in OBSERVED_PROPERTIES {
            self.engine
                .observe_property(name, format)
                .fatal(format!("observe_property({name})"))?;
        }

        self.engine.initialize().fatal("initialize")?;

        self.install_log_filter()?;

        tracing::info!("engine initialized");
        self.notifications.emit(&Notification::EngineReady);

        Ok(())
    }

    fn apply_default_options(&mut self) {
        let config_dir = match get_config_dir() {
            Ok(dir) => Some(dir.display().to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "engine config-dir left at its default");
                None
            }
        };

        let defaults = [
            ("osd-level", "1"),
            ("softvol", "yes"),
            ("force-window", "yes"),
            ("audio-client-name", APP_NAME),
            ("title", "${media-title}"),
            ("pause", "yes"),
            ("ytdl", "yes"),
            ("input-cursor", "no"),
            ("cursor-autohide", "no"),
            ("softvol-max", "100"),
            ("config", "yes"),
            ("screenshot-template", self.config.screenshot_template.as_str()),
        ];

        let configured = [
            ("config-dir", config_dir.as_deref()),
            ("autofit", self.config.autofit.as_deref()),
            ("msg-level", self.config.msg_level.as_deref()),
        ];

        let options = defaults
            .into_iter()
            .chain(configured.into_iter().filter_map(|(k, v)| v.map(|v| (k, v))));

        for (name, value) in options {
            tracing::debug!(option = name, value, "applying default option");
            if let Err(code) = self.engine.set_option_string(name, value) {
                tracing::debug!(option = name, error = %code, "default option rejected");
            }
        }
    }

    /// Reads `msg-level` from the engine (falling back to the configuration),
    /// keeps the parsed rules and subscribes to engine logs at their minimum.
    fn install_log_filter(&mut self) -> Result<()> {
        let option = self
            .engine
            .get_property("options/msg-level", Format::String)
            .ok()
            .and_then(|node| node.as_str().map(ToString::to_string))
            .or_else(|| self.config.msg_level.clone())
            .unwrap_or_default();

        self.log_filter = LogFilter::parse(&option);

        tracing::debug!(
            rules = self.log_filter.rules().len(),
            min_level = %self.log_filter.min_level(),
            "installing msg-level filter"
        );

        self.engine
            .request_log_messages(self.log_filter.min_level())
            .fatal("request_log_messages")
    }

    /// Loads `uri`, or reloads every playlist row when `uri` is `None`.
    ///
    /// With `append` set and a non-empty playlist the file is queued,
    /// otherwise it replaces the current playlist. With `update` set the UI
    /// playlist gets a row for the file (and is cleared first when
    /// replacing).
    ///
    /// # Parameters
    ///
    /// * `uri` - File or URL to open, `None` to reload the UI playlist
    /// * `append` - Queue after the current playlist instead of replacing it
    /// * `update` - Mirror the load into the UI playlist
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Fatal`] when the engine rejects the load.
    pub fn load(&mut self, uri: Option<&str>, append: bool, update: bool) -> Result<()> {
        tracing::info!(
            append,
            update,
            uri = uri.unwrap_or("<PLAYLIST_ITEMS>"),
            "loading file"
        );

        let mode = if append && !self.playlist.is_empty() {
            "append"
        } else {
            "replace"
        };

        if !append && uri.is_some() && update {
            let _guard = self.playlist_guard.guard();
            self.playlist.clear();
            self.state.new_file = true;
            self.state.loaded = false;
        }

        let Some(uri) = uri else {
            let uris: Vec<String> = (0..self.playlist.len())
                .filter_map(|i| self.playlist.entry(i))
                .map(|entry| entry.uri)
                .collect();

            for (i, uri) in uris.iter().enumerate() {
                self.load(Some(uri.as_str()), i > 0, false)?;
            }
            return Ok(());
        };

        let path = path_from_uri(uri);

        if !append {
            self.state.loaded = false;
        }

        if update {
            let _guard = self.playlist_guard.guard();
            self.playlist
                .append(PlaylistEntry::new(name_from_path(path), uri));
        }

        // Replacing the playlist ends the current file; that END_FILE must
        // not clear the state set up above.
        self.engine
            .request_event(EventKind::EndFile, false)
            .fatal("request_event(end-file, off)")?;

        let loaded = self
            .engine
            .command(&["loadfile", path, mode])
            .fatal("command(loadfile)")
            .and_then(|()| {
                self.engine
                    .set_property("pause", Node::Flag(self.state.paused))
                    .fatal("set_property(pause)")
            });

        self.engine
            .request_event(EventKind::EndFile, true)
            .fatal("request_event(end-file, on)")?;

        loaded
    }

    /// Defers loading the UI playlist until the engine first goes idle.
    ///
    /// Used when files are queued before the engine has been initialized.
    pub fn request_initial_load(&mut self) {
        self.state.initial_load_pending = true;
    }

    /// Forwards a user volume change (`0.0..=1.0`) to the engine.
    ///
    /// Ignored while the core itself is moving the volume control.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::EngineCall`] if the engine rejects the value.
    pub fn volume_changed_by_user(&mut self, volume: f64) -> Result<()> {
        if self.volume_guard.is_active() {
            tracing::trace!(volume, "volume change echoed from core write");
            return Ok(());
        }

        self.engine
            .set_property("volume", Node::Double(volume * 100.0))
            .call("set_property(volume)")
    }

    /// Seeks to an absolute position in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::EngineCall`] if the engine rejects the command.
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        let position = seconds.to_string();
        self.engine
            .command(&["seek", &position, "absolute"])
            .call("command(seek)")
    }

    #[must_use]
    pub const fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Window scale factor computed from the `autofit` option for the
    /// current file. 1.0 until a video has been reconfigured.
    #[must_use]
    pub const fn autofit_ratio(&self) -> f64 {
        self.autofit_ratio
    }

    #[must_use]
    pub const fn log_filter(&self) -> &LogFilter {
        &self.log_filter
    }

    #[must_use]
    pub const fn notifications(&self) -> &Broadcaster {
        &self.notifications
    }

    /// Shared flag the volume control's change callback must check.
    #[must_use]
    pub fn volume_suppressor(&self) -> Suppressor {
        self.volume_guard.clone()
    }

    /// Shared flag the playlist model's change callbacks must check.
    #[must_use]
    pub fn playlist_suppressor(&self) -> Suppressor {
        self.playlist_guard.clone()
    }

    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[must_use]
    pub const fn playlist(&self) -> &P {
        &self.playlist
    }

    pub fn playlist_mut(&mut self) -> &mut P {
        &mut self.playlist
    }
}
