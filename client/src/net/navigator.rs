//! Navigator that hands forced navigation to the router through signals.
//!
//! The Request Gate and Shell Controller run outside any component, so they
//! cannot call `use_navigate` directly. They write the target screen into a
//! signal instead; `NavigationBridge` inside `<Router>` performs the move.

use leptos::prelude::*;
use session::{Navigator, Screen};

#[derive(Clone, Copy, Debug)]
pub struct SignalNavigator {
    pub pending: RwSignal<Option<Screen>>,
    pub notice: RwSignal<Option<String>>,
}

impl SignalNavigator {
    pub fn new() -> Self {
        Self { pending: RwSignal::new(None), notice: RwSignal::new(None) }
    }
}

impl Default for SignalNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for SignalNavigator {
    fn navigate(&self, screen: Screen) {
        #[cfg(feature = "csr")]
        log::debug!("navigating to {}", screen.path());
        self.pending.set(Some(screen));
    }

    fn notify(&self, message: &str) {
        self.notice.set(Some(message.to_owned()));
    }
}
