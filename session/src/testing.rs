//! Shared fakes for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::ApiConfig;
use crate::gate::RequestGate;
use crate::model::{Role, User};
use crate::navigation::{Navigator, Screen};
use crate::storage::MemoryStore;
use crate::store::{SessionEvent, SessionStore};
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

pub(crate) fn member() -> User {
    User { id: "u-1".to_owned(), display_name: "Asha".to_owned(), email: "asha@example.com".to_owned(), role: Role::Member }
}

pub(crate) fn admin() -> User {
    User { id: "u-0".to_owned(), display_name: "Root".to_owned(), email: "admin@gmail.com".to_owned(), role: Role::Admin }
}

// =========================================================================
// ScriptedTransport
// =========================================================================

/// Replays queued responses, then `fallback`. Each call yields once before
/// answering so concurrent callers interleave like real I/O.
pub(crate) struct ScriptedTransport {
    queued: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    fallback: Mutex<Result<HttpResponse, TransportError>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(Ok(HttpResponse::new(200, "{}"))),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn respond(&self, status: u16, body: serde_json::Value) {
        self.queued.lock().unwrap().push_back(Ok(HttpResponse::new(status, body.to_string())));
    }

    pub(crate) fn fail(&self, err: TransportError) {
        self.queued.lock().unwrap().push_back(Err(err));
    }

    pub(crate) fn always(&self, status: u16, body: serde_json::Value) {
        *self.fallback.lock().unwrap() = Ok(HttpResponse::new(status, body.to_string()));
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        tokio::task::yield_now().await;
        let next = self.queued.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.lock().unwrap().clone())
    }
}

// =========================================================================
// RecordingNavigator
// =========================================================================

#[derive(Default)]
pub(crate) struct RecordingNavigator {
    screens: Mutex<Vec<Screen>>,
    notices: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub(crate) fn screens(&self) -> Vec<Screen> {
        self.screens.lock().unwrap().clone()
    }

    pub(crate) fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, screen: Screen) {
        self.screens.lock().unwrap().push(screen);
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_owned());
    }
}

// =========================================================================
// Harness
// =========================================================================

pub(crate) struct Harness {
    pub(crate) storage: Arc<MemoryStore>,
    pub(crate) store: Arc<SessionStore>,
    pub(crate) transport: Arc<ScriptedTransport>,
    pub(crate) navigator: Arc<RecordingNavigator>,
    pub(crate) gate: Arc<RequestGate>,
    pub(crate) events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl Harness {
    pub(crate) fn anonymous() -> Self {
        Self::with_storage(Arc::new(MemoryStore::new()))
    }

    pub(crate) fn signed_in(user: User) -> Self {
        let harness = Self::anonymous();
        harness.store.set_session("tok-1", user).unwrap();
        harness.events.lock().unwrap().clear();
        harness
    }

    pub(crate) fn with_storage(storage: Arc<MemoryStore>) -> Self {
        let store = Arc::new(SessionStore::rehydrate(storage.clone()));
        let transport = Arc::new(ScriptedTransport::new());
        let navigator = Arc::new(RecordingNavigator::default());
        let gate = Arc::new(RequestGate::new(
            ApiConfig::default(),
            store.clone(),
            transport.clone(),
            navigator.clone(),
        ));
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        Self { storage, store, transport, navigator, gate, events }
    }

    pub(crate) fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().unwrap().clone()
    }
}
