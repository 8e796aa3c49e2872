//! Track descriptors built from the engine's `track-list` property.
//!
//! The engine describes each track as an unordered key/value map. This module
//! turns one such map into a typed [`TrackDescriptor`] and groups descriptors
//! by kind for the track menus, preserving the order the engine reported.

use crate::domain::error::{Result, SyncError};
use crate::domain::Node;

/// Kind of media stream a track carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Audio,
    Video,
    Subtitle,
}

impl TrackKind {
    /// Maps the engine's `type` string to a kind.
    ///
    /// Returns `None` for anything other than `audio`, `video` and `sub`.
    #[must_use]
    pub fn from_engine_type(value: &str) -> Option<Self> {
        match value {
            "audio" => Some(Self::Audio),
            "video" => Some(Self::Video),
            "sub" => Some(Self::Subtitle),
            _ => None,
        }
    }
}

/// One audio, video or subtitle track of the current file.
///
/// Descriptors are rebuilt on every UI refresh and never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDescriptor {
    pub id: i64,
    pub kind: TrackKind,
    pub title: Option<String>,
    pub language: Option<String>,
}

impl TrackDescriptor {
    /// Builds a descriptor from one `track-list` entry.
    ///
    /// Recognized keys are `type`, `title`, `lang` and `id`; other keys are
    /// ignored. A missing `id` defaults to 0.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::UnclassifiedTrack`] when the node is not a map or
    /// its `type` is missing or unknown. The caller is expected to skip the
    /// track rather than abort the refresh.
    ///
    /// # Example
    ///
    /// ```
    /// use mpv_mirror::{Node, TrackDescriptor, TrackKind};
    ///
    /// let node = Node::Map(vec![
    ///     ("id".to_string(), Node::Int64(2)),
    ///     ("type".to_string(), Node::String("sub".to_string())),
    ///     ("lang".to_string(), Node::String("eng".to_string())),
    /// ]);
    /// let track = TrackDescriptor::from_node(&node).unwrap();
    /// assert_eq!(track.kind, TrackKind::Subtitle);
    /// assert_eq!(track.language.as_deref(), Some("eng"));
    /// ```
    pub fn from_node(node: &Node) -> Result<Self> {
        let Node::Map(pairs) = node else {
            return Err(SyncError::UnclassifiedTrack(format!("{node:?}")));
        };

        let mut kind = None;
        let mut raw_type = None;
        let mut title = None;
        let mut language = None;
        let mut id = 0;

        for (key, value) in pairs {
            match key.as_str() {
                "type" => {
                    raw_type = value.as_str().map(ToString::to_string);
                    kind = value.as_str().and_then(TrackKind::from_engine_type);
                }
                "title" => title = value.as_str().map(ToString::to_string),
                "lang" => language = value.as_str().map(ToString::to_string),
                "id" => id = value.as_i64().unwrap_or(0),
                _ => {}
            }
        }

        let kind = kind.ok_or_else(|| {
            SyncError::UnclassifiedTrack(raw_type.unwrap_or_else(|| "<missing>".to_string()))
        })?;

        Ok(Self {
            id,
            kind,
            title,
            language,
        })
    }

    /// Menu label: title and language when known, the id otherwise.
    #[must_use]
    pub fn label(&self) -> String {
        match (&self.title, &self.language) {
            (Some(title), Some(lang)) => format!("{title} ({lang})"),
            (Some(title), None) => title.clone(),
            (None, Some(lang)) => format!("{} ({lang})", self.id),
            (None, None) => self.id.to_string(),
        }
    }
}

/// Track descriptors grouped by kind, each group in engine order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackLists {
    pub audio: Vec<TrackDescriptor>,
    pub video: Vec<TrackDescriptor>,
    pub subtitle: Vec<TrackDescriptor>,
}

impl TrackLists {
    pub fn push(&mut self, track: TrackDescriptor) {
        match track.kind {
            TrackKind::Audio => self.audio.push(track),
            TrackKind::Video => self.video.push(track),
            TrackKind::Subtitle => self.subtitle.push(track),
        }
    }

    /// Builds grouped lists from a `track-list` node, skipping entries that
    /// fail to classify.
    ///
    /// Returns the lists and the number of skipped entries.
    #[must_use]
    pub fn from_track_list(node: &Node) -> (Self, usize) {
        let mut lists = Self::default();
        let mut skipped = 0;

        for entry in node.as_list().unwrap_or_default() {
            match TrackDescriptor::from_node(entry) {
                Ok(track) => lists.push(track),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping track");
                    skipped += 1;
                }
            }
        }

        (lists, skipped)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.audio.len() + self.video.len() + self.subtitle.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
