//! Engine event draining and playback lifecycle transitions.
//!
//! The UI thread calls [`SyncCore::drain`] once per wakeup. Several engine
//! events may have been queued behind one wakeup, so the drain runs until the
//! engine reports an empty queue or shuts down.

use crate::app::SyncCore;
use crate::domain::{Node, Result};
use crate::engine::{EndFileReason, Engine, EngineEvent, EngineResultExt, ErrorCode, Format, LogMessage};
use crate::i18n::i18n_f;
use crate::notify::Notification;
use crate::options::{autofit_ratio, format_log_text, parse_geometry, Dimensions, LogLevel};
use crate::ui::{PlaylistModel, View};

/// Outcome of one [`SyncCore::drain`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainSummary {
    /// Events handled, not counting the queue-empty sentinel.
    pub events: usize,
    /// Events whose handling failed without being fatal.
    pub failed: usize,
    pub stopped_by_shutdown: bool,
}

impl<E: Engine, V: View, P: PlaylistModel> SyncCore<E, V, P> {
    /// Handles every queued engine event.
    ///
    /// Each event also broadcasts [`Notification::EventObserved`]. Failures
    /// while handling one event are logged and the drain continues.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Fatal`](crate::SyncError::Fatal) when an engine
    /// call the core cannot continue without fails. Events after the failing
    /// one stay queued.
    pub fn drain(&mut self) -> Result<DrainSummary> {
        let mut summary = DrainSummary::default();

        while let Some(event) = self.engine.wait_event(0.0) {
            if event == EngineEvent::None {
                break;
            }

            let kind = event.kind();
            summary.events += 1;

            let outcome = self.handle_event(&event);
            self.notifications.emit(&Notification::EventObserved(kind));

            match outcome {
                Ok(()) => {}
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    summary.failed += 1;
                    tracing::warn!(event = %kind, error = %e, "event handling failed");
                }
            }

            if event == EngineEvent::Shutdown {
                summary.stopped_by_shutdown = true;
                break;
            }
        }

        Ok(summary)
    }

    /// Applies one engine event to the playback state and UI.
    ///
    /// # Errors
    ///
    /// Returns any error raised while reacting to the event; only
    /// [`SyncError::Fatal`](crate::SyncError::Fatal) stops a drain.
    pub fn handle_event(&mut self, event: &EngineEvent) -> Result<()> {
        let _span = tracing::debug_span!("handle_event", event = %event.kind()).entered();

        match event {
            EngineEvent::PropertyChange { name, value } => {
                let routed = self.route_property(name, value);
                self.notifications
                    .emit(&Notification::PropertyChanged(name.clone()));
                routed.map(|_| ())
            }
            EngineEvent::Idle => self.on_idle(),
            EngineEvent::FileLoaded => {
                self.state.file_loaded();

                if let Err(e) = self.resynchronize() {
                    tracing::warn!(error = %e, "playlist resynchronization skipped");
                }
                self.refresh_transport_ui().map(|_| ())
            }
            EngineEvent::EndFile { reason, error } => {
                self.on_end_file(*reason, *error);
                Ok(())
            }
            EngineEvent::VideoReconfig => {
                if self.state.new_file {
                    self.update_autofit();
                }
                Ok(())
            }
            EngineEvent::PlaybackRestart => {
                self.refresh_transport_ui()?;
                self.notifications.emit(&Notification::PlaybackRestarted);
                Ok(())
            }
            EngineEvent::LogMessage(message) => {
                self.forward_log(message);
                Ok(())
            }
            EngineEvent::Shutdown => {
                tracing::info!("engine shut down");
                Ok(())
            }
            EngineEvent::None
            | EngineEvent::StartFile
            | EngineEvent::AudioReconfig
            | EngineEvent::Seek
            | EngineEvent::Other(_) => {
                tracing::trace!("no state change");
                Ok(())
            }
        }
    }

    fn on_idle(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.state.initial_load_pending);

        if pending {
            tracing::debug!("engine idle, starting initial load");
            self.load(None, false, false)?;
        } else if self.state.loaded {
            tracing::debug!("engine idle after playback");
            self.state.stop();
            self.engine
                .set_property("pause", Node::Flag(true))
                .fatal("set_property(pause)")?;
            self.reset_indicator();
        }

        Ok(())
    }

    fn on_end_file(&mut self, reason: EndFileReason, error: i32) {
        self.state.initial_load_pending = false;

        if self.state.loaded {
            self.state.new_file = false;
        }

        if reason != EndFileReason::Error {
            tracing::debug!(?reason, "file ended");
            return;
        }

        let cause = ErrorCode(error).description();
        tracing::warn!(error, cause, "playback terminated abnormally");

        self.state.paused = true;
        if let Err(code) = self.engine.set_property("pause", Node::Flag(true)) {
            tracing::warn!(error = %code, "failed to pause after playback error");
        }

        let message = i18n_f("Playback was terminated abnormally. Reason: {}.", &[cause]);
        self.notifications.emit(&Notification::EngineError(message));
    }

    /// Recomputes the autofit ratio for the current video.
    ///
    /// Keeps the previous ratio when the option is empty, the video size is
    /// unavailable or the ratio is undefined.
    fn update_autofit(&mut self) {
        let geometry = self
            .engine
            .get_property("options/autofit", Format::String)
            .ok()
            .and_then(|node| node.as_str().map(ToString::to_string))
            .or_else(|| self.config.autofit.clone())
            .filter(|geometry| !geometry.is_empty());

        let Some(geometry) = geometry else {
            return;
        };

        let width = self.engine.get_property("dwidth", Format::Int64);
        let height = self.engine.get_property("dheight", Format::Int64);
        let (Some(width), Some(height)) = (
            width.ok().and_then(|n| n.as_i64()),
            height.ok().and_then(|n| n.as_i64()),
        ) else {
            tracing::debug!("video size unavailable, keeping autofit ratio");
            return;
        };

        let bounds = parse_geometry(&geometry, self.view.screen_size());
        match autofit_ratio(bounds, Dimensions::new(width, height)) {
            Some(ratio) => {
                tracing::debug!(%geometry, width, height, ratio, "autofit ratio updated");
                self.autofit_ratio = ratio;
            }
            None => tracing::debug!(%geometry, width, height, "autofit ratio undefined"),
        }
    }

    fn forward_log(&self, message: &LogMessage) {
        if !self.log_filter.allows(&message.prefix, message.level) {
            return;
        }

        let Some(text) = format_log_text(&message.text) else {
            return;
        };

        let prefix = message.prefix.as_str();
        match message.level {
            LogLevel::None => {}
            LogLevel::Fatal | LogLevel::Error => tracing::error!(target: "mpv", prefix, "{text}"),
            LogLevel::Warn => tracing::warn!(target: "mpv", prefix, "{text}"),
            LogLevel::Info => tracing::info!(target: "mpv", prefix, "{text}"),
            LogLevel::V | LogLevel::Debug => tracing::debug!(target: "mpv", prefix, "{text}"),
            LogLevel::Trace => tracing::trace!(target: "mpv", prefix, "{text}"),
        }
    }
}
