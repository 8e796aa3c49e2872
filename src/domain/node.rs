//! Structured engine values.
//!
//! The engine reports property values as a tagged union. [`Node`] mirrors that
//! union so property payloads can be consumed through exhaustive matching.

/// A value read from or written to the engine.
///
/// `Map` keeps the engine's key order, which is significant for some
/// properties (e.g. playlist entries).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    /// Absent payload (property unavailable or cleared).
    #[default]
    None,
    Flag(bool),
    Int64(i64),
    Double(f64),
    String(String),
    List(Vec<Node>),
    Map(Vec<(String, Node)>),
}

impl Node {
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    #[must_use]
    pub const fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view of the node. Doubles are not truncated.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Floating-point view of the node; integers are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            Self::Int64(i) => Some(*i as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up `key` in a `Map` node. Returns `None` for other variants.
    ///
    /// # Example
    ///
    /// ```
    /// use mpv_mirror::Node;
    ///
    /// let entry = Node::Map(vec![
    ///     ("filename".to_string(), Node::String("/media/a.mkv".to_string())),
    ///     ("current".to_string(), Node::Flag(true)),
    /// ]);
    /// assert_eq!(entry.get("filename").and_then(Node::as_str), Some("/media/a.mkv"));
    /// assert!(entry.get("title").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Self::Map(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
