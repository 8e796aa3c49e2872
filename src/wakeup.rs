//! Cross-thread wakeup from the engine to the UI thread.
//!
//! The engine invokes its wakeup callback from arbitrary internal threads. The
//! callback must not touch the core; it only calls [`Wakeup::wake`]. The UI
//! loop polls [`WakeupReceiver::take`] (or blocks in
//! [`WakeupReceiver::wait_timeout`] in headless use) and drains the engine
//! queue when it returns `true`.
//!
//! The channel has capacity one: any burst of wakeups posted before the UI
//! thread gets to run collapses into a single pending drain, which is enough
//! because a drain always runs until the queue is empty.

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use std::time::Duration;

/// Sending half, handed to the engine's wakeup callback.
#[derive(Debug, Clone)]
pub struct Wakeup {
    tx: Sender<()>,
}

impl Wakeup {
    /// Schedules a drain. Never blocks.
    pub fn wake(&self) {
        match self.tx.try_send(()) {
            Ok(()) | Err(TrySendError::Full(())) => {}
            Err(TrySendError::Disconnected(())) => {
                tracing::trace!("wakeup after receiver dropped");
            }
        }
    }
}

/// Receiving half, owned by the UI thread.
#[derive(Debug)]
pub struct WakeupReceiver {
    rx: Receiver<()>,
}

impl WakeupReceiver {
    /// Returns `true` if a drain was scheduled since the last call.
    #[must_use]
    pub fn take(&self) -> bool {
        self.rx.try_recv().is_ok()
    }

    /// Blocks up to `timeout` for a wakeup.
    ///
    /// Returns `false` on timeout or when every [`Wakeup`] has been dropped.
    #[must_use]
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => false,
        }
    }
}

/// Creates a connected wakeup pair.
#[must_use]
pub fn wakeup_channel() -> (Wakeup, WakeupReceiver) {
    let (tx, rx) = bounded(1);
    (Wakeup { tx }, WakeupReceiver { rx })
}
