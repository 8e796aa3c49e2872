//! The UI collaborator.
//!
//! The core never touches widgets directly. It drives the window and control
//! bar through [`View`] and the playlist rows through [`PlaylistModel`]; the
//! GTK layer implements both. Widget callbacks that forward user edits back
//! into the core consult a shared [`Suppressor`] first.
//!
//! # Modules
//!
//! - [`guard`]: RAII suppression of widget change notifications

pub mod guard;

pub use guard::{SignalGuard, Suppressor};

use crate::domain::{PlaylistEntry, TrackLists};
use crate::options::Dimensions;

/// Window, control bar and application-level UI state.
pub trait View {
    /// Size of the screen the window is on, used to resolve `%` geometry.
    fn screen_size(&self) -> Dimensions;

    fn set_title(&mut self, title: &str);

    /// Moves the volume control. `volume` is normalized to `0.0..=1.0`.
    fn set_volume(&mut self, volume: f64);

    fn set_volume_enabled(&mut self, enabled: bool);

    /// Replaces the audio, video and subtitle track menus.
    fn set_track_lists(&mut self, tracks: &TrackLists);

    /// Marks the selected audio and subtitle track, `None` for no selection.
    fn set_track_selection(&mut self, audio: Option<i64>, subtitle: Option<i64>);

    fn is_fullscreen(&self) -> bool;

    fn toggle_fullscreen(&mut self);

    /// Returns the window to its no-media state.
    fn reset(&mut self);

    fn set_chapter_controls_enabled(&mut self, enabled: bool);

    /// Sets the seek bar length in seconds.
    fn set_duration(&mut self, seconds: f64);

    fn set_playing_state(&mut self, playing: bool);

    /// Enables or disables the transport controls as a whole.
    fn set_controls_enabled(&mut self, enabled: bool);

    /// Prevents the session from idling. Returns a nonzero cookie on success.
    fn inhibit(&mut self, reason: &str) -> u32;

    fn uninhibit(&mut self, cookie: u32);
}

/// Index-addressed playlist rows shown in the UI.
///
/// Row mutations fire the model's change notifications; the core wraps its
/// own writes in the playlist [`SignalGuard`].
pub trait PlaylistModel {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, index: usize) -> Option<PlaylistEntry>;

    fn set_name(&mut self, index: usize, name: &str);

    fn set_uri(&mut self, index: usize, uri: &str);

    fn append(&mut self, entry: PlaylistEntry);

    fn remove(&mut self, index: usize);

    fn clear(&mut self);

    /// Marks the currently playing row, `None` to clear the marker.
    fn set_indicator(&mut self, position: Option<usize>);
}
