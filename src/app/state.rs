//! Playback lifecycle state owned by the synchronization core.
//!
//! [`PlaybackState`] is only mutated in response to engine events or explicit
//! load requests. UI callbacks never write it; they ask the engine to change a
//! property and the resulting change event updates the state.
//!
//! # Lifecycle
//!
//! ```text
//! idle ──load──▶ loading ──FILE_LOADED──▶ loaded ──IDLE / eof-reached──▶ idle
//!                   │                                      ▲
//!                   └──────────END_FILE (error)────────────┘
//! ```

/// Flags describing where playback is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    /// Mirrors the engine's `pause` property.
    pub paused: bool,

    /// A file finished loading and has not ended yet.
    pub loaded: bool,

    /// Files were queued before the engine became idle for the first time;
    /// the first IDLE event loads them.
    pub initial_load_pending: bool,

    /// The current file replaced the playlist and has not been reconfigured
    /// yet. Autofit only applies to new files.
    pub new_file: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            paused: true,
            loaded: false,
            initial_load_pending: false,
            new_file: false,
        }
    }
}

impl PlaybackState {
    /// A load has been requested or completed, so engine property changes
    /// describe real media.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.initial_load_pending || self.loaded
    }

    /// Returns to the paused, nothing-loaded state.
    pub fn stop(&mut self) {
        self.paused = true;
        self.loaded = false;
    }

    /// Marks a file as loaded. A pending initial load is now satisfied.
    pub fn file_loaded(&mut self) {
        self.loaded = true;
        self.initial_load_pending = false;
    }

    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !(self.loaded && self.initial_load_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_paused_and_idle() {
        let state = PlaybackState::default();
        assert!(state.paused);
        assert!(!state.is_active());
        assert!(state.is_settled());
    }

    #[test]
    fn file_loaded_clears_pending_load() {
        let mut state = PlaybackState {
            initial_load_pending: true,
            ..PlaybackState::default()
        };
        state.file_loaded();
        assert!(state.loaded);
        assert!(state.is_settled());

        state.stop();
        assert!(state.paused && !state.loaded);
    }
}
