//! Application layer: the engine/UI synchronization core.
//!
//! This module sits between the engine binding and the GTK layer. It turns
//! engine events into UI updates and user actions into engine commands.
//!
//! # Architecture
//!
//! ```text
//!  engine thread ──wakeup──▶ UI loop ──drain()──▶ handle_event ──┬─▶ route_property ──▶ View
//!                                                                ├─▶ resynchronize ──▶ PlaylistModel
//!                                                                └─▶ Broadcaster ──▶ observers
//!
//!  widget callbacks ──(suppressor not active)──▶ load / seek / row_deleted / ... ──▶ Engine
//! ```
//!
//! # Modules
//!
//! - [`sync`]: [`SyncCore`] construction, initialization, load and user actions
//! - [`dispatcher`]: Event drain loop and lifecycle transitions
//! - [`router`]: Property-change reactions
//! - [`playlist`]: Playlist reconciliation and edit forwarding
//! - [`refresh`]: Transport UI refresh
//! - [`state`]: Playback lifecycle flags
//! - [`inhibit`]: Idle inhibition while playing

pub mod dispatcher;
pub mod inhibit;
pub mod playlist;
pub mod refresh;
pub mod router;
pub mod state;
pub mod sync;

pub use dispatcher::DrainSummary;
pub use inhibit::Inhibitor;
pub use playlist::{reconcile, ReconcileReport};
pub use refresh::RefreshReport;
pub use router::Reaction;
pub use state::PlaybackState;
pub use sync::{SyncCore, VideoOutput};
