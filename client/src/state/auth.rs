//! Auth-session wiring shared by every page through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds one `ClientSession` and provides it. The store stays the only
//! writer of session state; `current` is a read-only mirror refreshed from
//! store notifications so route guards and the shell re-render on every
//! sign-in, profile edit, logout and expiry.

use std::sync::Arc;

use leptos::prelude::*;
use session::{
    ApiConfig, Authenticator, KeyValueStore, Preferences, RequestGate, Session, SessionStore, ShellController,
    Transport,
};

use crate::net::navigator::SignalNavigator;
use crate::net::storage::LocalStorage;
use crate::net::transport::BrowserTransport;

#[derive(Clone)]
pub struct ClientSession {
    pub gate: Arc<RequestGate>,
    pub auth: Arc<Authenticator>,
    pub shell: Arc<ShellController>,
    pub preferences: Preferences,
    pub navigator: SignalNavigator,
    /// Latest session value; never written outside the store listener.
    pub current: RwSignal<Session>,
}

impl ClientSession {
    /// Rehydrate from `storage` and wire the core components together.
    pub fn new(config: ApiConfig, storage: Arc<dyn KeyValueStore>, transport: Arc<dyn Transport>) -> Self {
        let store = Arc::new(SessionStore::rehydrate(storage.clone()));
        let navigator = SignalNavigator::new();
        let gate = Arc::new(RequestGate::new(config, store.clone(), transport, Arc::new(navigator)));
        let shell = Arc::new(ShellController::new(gate.clone()));
        let current = RwSignal::new(store.get_session());
        shell.on_session_change(move |session| current.set(session.clone()));
        Self {
            auth: Arc::new(Authenticator::new(gate.clone())),
            gate,
            shell,
            preferences: Preferences::new(storage),
            navigator,
            current,
        }
    }

    /// Browser wiring: `localStorage`, `gloo-net`, base URL from the build env.
    pub fn browser() -> Self {
        let config = ApiConfig::from_build_env().unwrap_or_else(|e| {
            #[cfg(feature = "csr")]
            log::error!("invalid API configuration, using defaults: {e}");
            #[cfg(not(feature = "csr"))]
            let _ = e;
            ApiConfig::default()
        });
        let transport = Arc::new(BrowserTransport::new(config.request_timeout));
        Self::new(config, Arc::new(LocalStorage), transport)
    }

    /// Clear the session and fire the server-side sign-out in the background.
    pub fn logout(&self) {
        let Some(sign_out) = self.shell.logout() else {
            return;
        };
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(sign_out.send());
        #[cfg(not(feature = "csr"))]
        drop(sign_out);
    }
}
