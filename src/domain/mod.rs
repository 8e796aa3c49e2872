//! Domain layer: engine values, playlist and track models, errors.
//!
//! These types are independent of the engine binding and the GUI toolkit.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`node`]: Tagged engine value type
//! - [`playlist`]: Playlist entries and uri/name helpers
//! - [`track`]: Track descriptors and per-kind grouping

pub mod error;
pub mod node;
pub mod playlist;
pub mod track;

pub use error::{Result, SyncError};
pub use node::Node;
pub use playlist::PlaylistEntry;
pub use track::{TrackDescriptor, TrackKind, TrackLists};
