//! Idle inhibition while media is playing.

use crate::i18n::i18n;
use crate::ui::View;

/// Holds the session inhibit cookie between play and pause.
///
/// Repeated play or pause notifications are no-ops: the session is inhibited
/// at most once and released at most once.
#[derive(Debug, Default)]
pub struct Inhibitor {
    cookie: u32,
}

impl Inhibitor {
    /// Inhibits idling when `playing`, releases the inhibition otherwise.
    pub fn update(&mut self, view: &mut impl View, playing: bool) {
        if playing {
            if self.cookie == 0 {
                self.cookie = view.inhibit(&i18n("Playing"));
                tracing::debug!(cookie = self.cookie, "idle inhibited");
            }
        } else {
            let cookie = std::mem::take(&mut self.cookie);
            if cookie != 0 {
                view.uninhibit(cookie);
                tracing::debug!(cookie, "idle uninhibited");
            }
        }
    }
}
