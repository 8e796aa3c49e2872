//! Scoped suppression of UI change notifications.
//!
//! When the core writes engine state into a widget (volume slider, playlist
//! rows), the widget's own change callback would fire and send the same value
//! back to the engine as if the user had changed it. A [`Suppressor`] is
//! shared between the core and the widget callback: the core holds a
//! [`SignalGuard`] while it writes, and the callback returns early while
//! [`Suppressor::is_active`] is true.
//!
//! Guards nest and are released on drop, so early returns and `?` cannot leave
//! a widget muted.

use std::cell::Cell;
use std::rc::Rc;

/// Shared suppression flag for one widget's change notifications.
///
/// Cloning shares the same counter.
#[derive(Debug, Clone, Default)]
pub struct Suppressor {
    depth: Rc<Cell<u32>>,
}

impl Suppressor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses notifications until the returned guard is dropped.
    #[must_use = "notifications are only suppressed while the guard is alive"]
    pub fn guard(&self) -> SignalGuard {
        self.depth.set(self.depth.get() + 1);
        SignalGuard {
            depth: Rc::clone(&self.depth),
        }
    }

    /// Whether any guard is currently alive.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.depth.get() > 0
    }
}

/// Keeps notifications suppressed for as long as it lives.
#[derive(Debug)]
pub struct SignalGuard {
    depth: Rc<Cell<u32>>,
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}
