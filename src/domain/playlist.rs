//! Playlist entry model and the name/path helpers used by the mirror.

use crate::domain::Node;

/// One row of the playlist, as shown in the UI.
///
/// The engine owns the authoritative order; UI rows are index-addressed
/// copies of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    /// Display name: the engine title when present, otherwise the last path
    /// segment of `uri`.
    pub name: String,
    pub uri: String,
}

impl PlaylistEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
        }
    }

    /// Creates an entry whose name is derived from the uri.
    #[must_use]
    pub fn from_uri(uri: &str) -> Self {
        Self::new(name_from_path(uri), uri)
    }

    /// Converts one element of the engine's `playlist` property.
    ///
    /// Entries carry `filename` and an optional `title`. A missing filename
    /// yields an empty uri so the snapshot keeps its length.
    #[must_use]
    pub fn from_node(node: &Node) -> Self {
        let uri = node
            .get("filename")
            .and_then(Node::as_str)
            .unwrap_or_default();

        node.get("title")
            .and_then(Node::as_str)
            .map_or_else(|| Self::from_uri(uri), |title| Self::new(title, uri))
    }
}

/// Reads the engine's `playlist` node into an ordered snapshot.
#[must_use]
pub fn snapshot_from_node(node: &Node) -> Vec<PlaylistEntry> {
    node.as_list()
        .unwrap_or_default()
        .iter()
        .map(PlaylistEntry::from_node)
        .collect()
}

/// Returns the final path segment of a path or uri.
///
/// Trailing slashes are ignored; if nothing remains the input is returned
/// unchanged.
///
/// # Example
///
/// ```
/// use mpv_mirror::domain::playlist::name_from_path;
///
/// assert_eq!(name_from_path("file:///media/movies/big%20buck.mkv"), "big%20buck.mkv");
/// assert_eq!(name_from_path("https://example.org/live/"), "live");
/// assert_eq!(name_from_path("clip.webm"), "clip.webm");
/// ```
#[must_use]
pub fn name_from_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    trimmed
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(path)
        .to_string()
}

/// Converts a `file://` uri to a local path; other uris pass through.
#[must_use]
pub fn path_from_uri(uri: &str) -> &str {
    uri.strip_prefix("file://").unwrap_or(uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_overrides_derived_name() {
        let node = Node::Map(vec![
            ("filename".into(), Node::String("/a/b/c.mp4".into())),
            ("current".into(), Node::Flag(true)),
            ("playing".into(), Node::Flag(true)),
            ("title".into(), Node::String("Episode 1".into())),
        ]);
        assert_eq!(
            PlaylistEntry::from_node(&node),
            PlaylistEntry::new("Episode 1", "/a/b/c.mp4")
        );
    }

    #[test]
    fn name_falls_back_to_last_segment() {
        let node = Node::Map(vec![("filename".into(), Node::String("/a/b/c.mp4".into()))]);
        assert_eq!(PlaylistEntry::from_node(&node).name, "c.mp4");
    }

    #[test]
    fn file_uri_is_stripped() {
        assert_eq!(path_from_uri("file:///tmp/x.ogg"), "/tmp/x.ogg");
        assert_eq!(path_from_uri("https://h/x.ogg"), "https://h/x.ogg");
    }

    #[test]
    fn degenerate_paths() {
        assert_eq!(name_from_path("/"), "/");
        assert_eq!(name_from_path(""), "");
    }
}
