//! Notifications the core broadcasts to observers.
//!
//! Observers (the window, a scripting layer, tests) register a callback with
//! [`Broadcaster::subscribe`] and receive every [`Notification`] in emission
//! order. Callbacks run synchronously on the UI thread and may subscribe or
//! unsubscribe while being notified.

use crate::engine::EventKind;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Something observers may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// The engine finished initializing.
    EngineReady,
    /// A user-visible, already translated error message.
    EngineError(String),
    /// Playback resumed after a seek or file start.
    PlaybackRestarted,
    /// An observed engine property changed.
    PropertyChanged(String),
    /// Any event drained from the engine queue.
    EventObserved(EventKind),
}

/// Handle returned by [`Broadcaster::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Rc<dyn Fn(&Notification)>;

/// Single-threaded publish/subscribe hub.
#[derive(Default)]
pub struct Broadcaster {
    subscribers: RefCell<Vec<(SubscriptionId, Callback)>>,
    next_id: Cell<u64>,
}

impl fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broadcaster")
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}

impl Broadcaster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, callback: impl Fn(&Notification) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(callback)));
        id
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    /// Delivers `notification` to every current subscriber.
    ///
    /// The subscriber list is snapshotted first, so callbacks added during
    /// delivery only see later notifications.
    pub fn emit(&self, notification: &Notification) {
        tracing::trace!(?notification, "broadcast");

        let snapshot: Vec<Callback> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect();

        for callback in snapshot {
            callback(notification);
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}
