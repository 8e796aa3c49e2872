//! Playlist mirroring (engine to UI) and playlist edits (UI to engine).
//!
//! The engine owns the playlist. After a file loads, [`SyncCore::resynchronize`]
//! diffs the engine's playlist against the UI rows by index and rewrites only
//! what changed. The other direction forwards user activation, drag-and-drop
//! moves and removals as engine commands.

use crate::app::SyncCore;
use crate::domain::playlist::snapshot_from_node;
use crate::domain::{Node, PlaylistEntry, Result};
use crate::engine::{Engine, EngineResultExt, Format};
use crate::ui::{PlaylistModel, View};

/// Row mutations performed by one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Existing rows whose name and/or uri were rewritten.
    pub updated: usize,
    pub appended: usize,
    pub removed: usize,
}

impl ReconcileReport {
    /// True when the pass touched no row.
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        self.updated == 0 && self.appended == 0 && self.removed == 0
    }
}

/// Makes `model` equal to `snapshot`, index for index.
///
/// Rows present in both are compared field by field and only differing fields
/// are written. Missing rows are appended in snapshot order and excess rows
/// are removed from the tail.
///
/// The caller is responsible for suppressing the model's change
/// notifications while this runs.
///
/// # Returns
///
/// Counts of updated, appended and removed rows.
pub fn reconcile(model: &mut impl PlaylistModel, snapshot: &[PlaylistEntry]) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let existing = model.len();

    for (index, entry) in snapshot.iter().enumerate() {
        if index >= existing {
            model.append(entry.clone());
            report.appended += 1;
            continue;
        }

        let (name_changed, uri_changed) = model
            .entry(index)
            .map_or((true, true), |row| (row.name != entry.name, row.uri != entry.uri));

        if name_changed {
            model.set_name(index, &entry.name);
        }
        if uri_changed {
            model.set_uri(index, &entry.uri);
        }
        if name_changed || uri_changed {
            report.updated += 1;
        }
    }

    for _ in snapshot.len()..existing {
        model.remove(snapshot.len());
        report.removed += 1;
    }

    report
}

impl<E: Engine, V: View, P: PlaylistModel> SyncCore<E, V, P> {
    /// Brings the UI playlist in line with the engine's playlist.
    ///
    /// Running it twice without an engine-side change performs no row
    /// mutation the second time.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::EngineCall`](crate::SyncError::EngineCall) if the
    /// engine playlist cannot be read; the UI rows are left untouched.
    pub fn resynchronize(&mut self) -> Result<ReconcileReport> {
        let node = self
            .engine
            .get_property("playlist", Format::Node)
            .call("get_property(playlist)")?;
        let snapshot = snapshot_from_node(&node);

        let _guard = self.playlist_guard.guard();
        let report = reconcile(&mut self.playlist, &snapshot);

        tracing::debug!(
            entries = snapshot.len(),
            updated = report.updated,
            appended = report.appended,
            removed = report.removed,
            "playlist resynchronized"
        );

        Ok(report)
    }

    /// Plays the row the user activated.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::EngineCall`](crate::SyncError::EngineCall) if the
    /// engine rejects the position.
    pub fn activate_row(&mut self, index: usize) -> Result<()> {
        let position = i64::try_from(index).unwrap_or(i64::MAX);
        self.engine
            .set_property("playlist-pos", Node::Int64(position))
            .call("set_property(playlist-pos)")
    }

    /// Row-inserted callback of the playlist model.
    ///
    /// A drag-and-drop reorder arrives as an insert at the destination
    /// followed by a delete at the source; the destination is remembered
    /// until the delete.
    pub fn row_inserted(&mut self, index: usize) {
        if self.playlist_guard.is_active() {
            return;
        }
        self.pending_move = Some(index);
    }

    /// Row-deleted callback of the playlist model.
    ///
    /// Completes a pending move by issuing `playlist_move`. The deleted index
    /// refers to the model after the insert, so a source below the
    /// destination is shifted up by one.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::EngineCall`](crate::SyncError::EngineCall) if the
    /// engine rejects the move.
    pub fn row_deleted(&mut self, index: usize) -> Result<()> {
        if self.playlist_guard.is_active() {
            return Ok(());
        }

        let Some(dest) = self.pending_move.take() else {
            return Ok(());
        };

        let src = if index > dest { index - 1 } else { index };
        tracing::debug!(src, dest, "moving playlist entry");

        let (src, dest) = (src.to_string(), dest.to_string());
        self.engine
            .command(&["playlist_move", &src, &dest])
            .call("command(playlist_move)")
    }

    /// Removes the row at `index` from the UI and, if media is loaded, from
    /// the engine playlist. Disables the transport controls once the playlist
    /// is empty.
    ///
    /// # Parameters
    ///
    /// * `index` - Row to remove; an index past the last row is ignored
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Fatal`](crate::SyncError::Fatal) if the engine
    /// rejects the removal.
    pub fn remove_selected(&mut self, index: usize) -> Result<()> {
        if index >= self.playlist.len() {
            tracing::debug!(index, rows = self.playlist.len(), "no row to remove");
            return Ok(());
        }

        let _guard = self.playlist_guard.guard();

        self.playlist.remove(index);

        if self.state.loaded {
            let index = index.to_string();
            self.engine
                .command(&["playlist_remove", &index])
                .fatal("command(playlist_remove)")?;
        }

        if self.playlist.is_empty() {
            self.view.set_controls_enabled(false);
        }

        Ok(())
    }

    /// Moves the now-playing marker back to the first row.
    pub fn reset_indicator(&mut self) {
        self.playlist.set_indicator(Some(0));
    }
}
