//! Full refresh of the transport UI from engine state.

use crate::app::SyncCore;
use crate::domain::{Node, Result, TrackLists};
use crate::engine::{Engine, EngineResultExt, ErrorCode, Format};
use crate::ui::{PlaylistModel, View};

/// Outcome of [`SyncCore::refresh_transport_ui`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Properties that could not be read and were left untouched in the UI.
    pub skipped: Vec<&'static str>,
    /// Tracks that could not be classified as audio, video or subtitle.
    pub unclassified_tracks: usize,
}

impl<E: Engine, V: View, P: PlaylistModel> SyncCore<E, V, P> {
    /// Pulls title, pause state, tracks, playlist position, chapters, volume
    /// and duration from the engine and pushes each into the UI.
    ///
    /// A property that cannot be read is skipped; the rest of the refresh
    /// still runs.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Fatal`](crate::SyncError::Fatal) if the engine
    /// rejects the pause state.
    pub fn refresh_transport_ui(&mut self) -> Result<RefreshReport> {
        let _span = tracing::debug_span!("refresh_transport_ui").entered();
        let mut report = RefreshReport::default();

        match self.read("media-title", Format::String, &mut report) {
            Some(Node::String(title)) => self.view.set_title(&title),
            Some(_) | None => {}
        }

        self.engine
            .set_property("pause", Node::Flag(self.state.paused))
            .fatal("set_property(pause)")?;

        if let Some(track_list) = self.read("track-list", Format::Node, &mut report) {
            let (tracks, skipped) = TrackLists::from_track_list(&track_list);
            report.unclassified_tracks = skipped;

            let aid = self.read_i64("aid");
            let sid = self.read_i64("sid");
            self.view.set_track_selection(aid, sid);
            self.view.set_track_lists(&tracks);
        }

        if let Some(position) = self
            .read("playlist-pos", Format::Int64, &mut report)
            .and_then(|node| node.as_i64())
        {
            self.playlist.set_indicator(usize::try_from(position).ok());
        }

        if let Some(chapters) = self
            .read("chapters", Format::Int64, &mut report)
            .and_then(|node| node.as_i64())
        {
            self.view.set_chapter_controls_enabled(chapters > 1);
        }

        if let Some(volume) = self
            .read("volume", Format::Double, &mut report)
            .and_then(|node| node.as_f64())
        {
            let _guard = self.volume_guard.guard();
            self.view.set_volume(volume / 100.0);
        }

        if let Some(duration) = self
            .read("duration", Format::Double, &mut report)
            .and_then(|node| node.as_f64())
        {
            self.view.set_duration(duration);
        }

        self.view.set_playing_state(!self.state.paused);

        if !report.skipped.is_empty() {
            tracing::debug!(skipped = ?report.skipped, "refresh skipped unavailable properties");
        }

        Ok(report)
    }

    fn read(&mut self, name: &'static str, format: Format, report: &mut RefreshReport) -> Option<Node> {
        match self.engine.get_property(name, format) {
            Ok(node) => Some(node),
            Err(code) => {
                Self::skip(name, code);
                report.skipped.push(name);
                None
            }
        }
    }

    fn read_i64(&mut self, name: &'static str) -> Option<i64> {
        self.engine
            .get_property(name, Format::Int64)
            .ok()
            .and_then(|node| node.as_i64())
    }

    fn skip(name: &str, code: ErrorCode) {
        let error = code.into_error(format!("get_property({name})"));
        tracing::trace!(%error, "property skipped");
    }
}
