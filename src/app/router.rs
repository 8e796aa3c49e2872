//! Reactions to engine property changes.
//!
//! Each observed property change produces exactly one [`Reaction`]. Writes
//! into mirrored widgets happen inside the matching [`SignalGuard`] so the
//! widget's own change callback does not send the value back.
//!
//! [`SignalGuard`]: crate::ui::SignalGuard

use crate::app::SyncCore;
use crate::domain::{Node, Result};
use crate::engine::{Engine, Format};
use crate::ui::{PlaylistModel, View};

/// What a property change did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reaction {
    /// `pause` was mirrored into the playback state and the UI refreshed.
    PauseSynced { paused: bool },
    /// `volume` was pushed to the volume control (normalized).
    VolumePushed(f64),
    /// `volume` arrived while nothing is loading or loaded.
    VolumeIgnored,
    /// `aid` changed; the volume control is enabled iff an audio track exists.
    AudioTrackPresence(bool),
    /// `fullscreen` disagreed with the window and the window was toggled.
    FullscreenToggled,
    /// `fullscreen` matched the window or carried no value.
    FullscreenUnchanged,
    /// `eof-reached` became true; playback state and window were reset.
    EndOfFile,
    /// Property not handled here.
    Ignored,
}

impl<E: Engine, V: View, P: PlaylistModel> SyncCore<E, V, P> {
    /// Applies the reaction for one property change.
    ///
    /// # Parameters
    ///
    /// * `name` - Observed property name
    /// * `value` - New value; [`Node::None`] when the property is unavailable
    ///
    /// # Returns
    ///
    /// The [`Reaction`] taken, for callers and tests to inspect.
    ///
    /// # Errors
    ///
    /// Propagates fatal engine failures from the load or refresh a `pause`
    /// change can trigger.
    pub fn route_property(&mut self, name: &str, value: &Node) -> Result<Reaction> {
        let reaction = match name {
            "pause" => self.on_pause(value)?,
            "volume" => self.on_volume(value),
            "aid" => {
                let present = !value.is_none();
                self.view.set_volume_enabled(present);
                Reaction::AudioTrackPresence(present)
            }
            "fullscreen" => match value.as_flag() {
                Some(fullscreen) if fullscreen != self.view.is_fullscreen() => {
                    self.view.toggle_fullscreen();
                    Reaction::FullscreenToggled
                }
                _ => Reaction::FullscreenUnchanged,
            },
            "eof-reached" if value.as_flag() == Some(true) => {
                self.state.stop();
                self.view.reset();
                self.playlist.set_indicator(Some(0));
                Reaction::EndOfFile
            }
            _ => Reaction::Ignored,
        };

        tracing::debug!(property = name, ?reaction, "property routed");
        Ok(reaction)
    }

    fn on_pause(&mut self, value: &Node) -> Result<Reaction> {
        let paused = value.as_flag().unwrap_or(true);
        self.state.paused = paused;

        let idle = match self.engine.get_property("idle", Format::Flag) {
            Ok(node) => node.as_flag().unwrap_or(false),
            Err(code) => {
                tracing::debug!(error = %code, "idle state unavailable");
                false
            }
        };

        if idle && !paused {
            self.load(None, false, true)?;
        }

        self.inhibitor.update(&mut self.view, !paused);
        self.refresh_transport_ui()?;

        Ok(Reaction::PauseSynced { paused })
    }

    fn on_volume(&mut self, value: &Node) -> Reaction {
        if !self.state.is_active() {
            return Reaction::VolumeIgnored;
        }

        let volume = value.as_f64().map_or(0.0, |v| v / 100.0);
        let _guard = self.volume_guard.guard();
        self.view.set_volume(volume);

        Reaction::VolumePushed(volume)
    }
}
