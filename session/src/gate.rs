//! Request Gate: the pre-flight and response guards around every call.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every outbound API call goes through `RequestGate::send` (callers that must
//! surface errors, such as auth forms) or `RequestGate::fetch` (background data
//! calls that substitute an empty result instead of failing).
//!
//! DESIGN
//! ======
//! Access is default-deny: only paths on the configured allow-list may leave
//! without a credential. A protected call records the session generation it
//! was issued under; an unauthorized response expires exactly that generation
//! through `SessionStore::expire`. Whichever concurrent response wins the
//! compare-and-clear runs the recovery cascade; the rest see a closed
//! generation and return quietly.
//!
//! ERROR HANDLING
//! ==============
//! Raw statuses never escape this module. Everything is normalized into
//! `GateError` before it reaches a form or page.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::endpoints::{Endpoint, Logout};
use crate::navigation::{Navigator, SESSION_EXPIRED_NOTICE, Screen};
use crate::store::{Generation, SessionStore};
use crate::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};

/// Normalized outcome of a failed call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    /// Protected call with no live session. Never shown to the user.
    #[error("not signed in")]
    Unauthenticated,
    /// Server rejected a credential the client believed valid.
    #[error("your session has expired")]
    SessionExpired,
    /// Server answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("network failure: {0}")]
    Network(String),
    /// Success status with a body that does not match the endpoint shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<TransportError> for GateError {
    fn from(err: TransportError) -> Self {
        Self::Network(err.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

/// Allow-list of endpoint patterns reachable without a credential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessPolicy {
    public: Vec<String>,
}

impl AccessPolicy {
    #[must_use]
    pub fn new(public: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { public: public.into_iter().map(Into::into).collect() }
    }

    /// Classify a request path. Query strings and trailing slashes are ignored.
    #[must_use]
    pub fn classify(&self, path: &str) -> Access {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        let public = self.public.iter().any(|pattern| match pattern.strip_suffix('*') {
            Some(prefix) => path.starts_with(prefix),
            None => path == pattern.trim_end_matches('/'),
        });
        if public { Access::Public } else { Access::Protected }
    }
}

/// One in-flight call, as seen by the response guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingRequest {
    pub method: Method,
    pub path: String,
    pub access: Access,
    /// Live session generation at issue time; `None` for public calls.
    pub generation: Option<Generation>,
}

pub struct RequestGate {
    config: ApiConfig,
    policy: AccessPolicy,
    store: Arc<SessionStore>,
    transport: Arc<dyn Transport>,
    navigator: Arc<dyn Navigator>,
}

impl RequestGate {
    pub fn new(
        config: ApiConfig,
        store: Arc<SessionStore>,
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let policy = AccessPolicy::new(config.public_endpoints.iter().cloned());
        Self { config, policy, store, transport, navigator }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Send a call and return its decoded body or a normalized error.
    ///
    /// # Errors
    ///
    /// - [`GateError::Unauthenticated`] if the endpoint is protected and no
    ///   session is live; no I/O happens.
    /// - [`GateError::SessionExpired`] if the server rejected the credential.
    /// - [`GateError::Rejected`], [`GateError::Network`], [`GateError::Decode`]
    ///   for the remaining failure classes.
    pub async fn send<E: Endpoint>(&self, endpoint: &E) -> Result<E::Output, GateError> {
        let path = endpoint.path();
        let (pending, bearer) = self.preflight(E::METHOD, path)?;
        let request = HttpRequest {
            method: pending.method,
            url: self.config.url_for(&pending.path),
            bearer,
            body: endpoint.body(),
        };
        let result = self.transport.execute(request).await;
        let response = self.inspect(&pending, result)?;
        decode(&response.body)
    }

    /// Background data call: any failure resolves to the endpoint's safe empty
    /// substitute so the caller keeps rendering while recovery runs.
    pub async fn fetch<E>(&self, endpoint: &E) -> E::Output
    where
        E: Endpoint,
        E::Output: Default,
    {
        match self.send(endpoint).await {
            Ok(output) => output,
            Err(GateError::Unauthenticated | GateError::SessionExpired) => E::Output::default(),
            Err(e) => {
                tracing::warn!(path = %endpoint.path(), error = %e, "background call failed; using empty result");
                E::Output::default()
            }
        }
    }

    /// Best-effort server-side sign-out with a credential captured before the
    /// local session was cleared. Failures are logged and otherwise ignored.
    pub async fn revoke(&self, token: String) {
        let request = HttpRequest {
            method: Logout::METHOD,
            url: self.config.url_for(&Logout.path()),
            bearer: Some(token),
            body: None,
        };
        match self.transport.execute(request).await {
            Ok(response) if response.is_success() => tracing::debug!("server sign-out acknowledged"),
            Ok(response) => tracing::debug!(status = response.status, "server sign-out rejected"),
            Err(e) => tracing::debug!(error = %e, "server sign-out failed"),
        }
    }

    fn preflight(&self, method: Method, path: String) -> Result<(PendingRequest, Option<String>), GateError> {
        let access = self.policy.classify(&path);
        if access == Access::Public {
            return Ok((PendingRequest { method, path, access, generation: None }, None));
        }
        let Some((token, generation)) = self.store.credential() else {
            tracing::debug!(method = method.as_str(), %path, "blocked protected call without session");
            return Err(GateError::Unauthenticated);
        };
        Ok((PendingRequest { method, path, access, generation: Some(generation) }, Some(token)))
    }

    fn inspect(
        &self,
        pending: &PendingRequest,
        result: Result<HttpResponse, TransportError>,
    ) -> Result<HttpResponse, GateError> {
        let response = result.map_err(|e| {
            tracing::debug!(path = %pending.path, error = %e, "transport failure");
            GateError::from(e)
        })?;
        if response.is_success() {
            return Ok(response);
        }
        if response.is_unauthorized() && pending.access == Access::Protected {
            return Err(self.on_unauthorized(pending));
        }
        Err(GateError::Rejected { status: response.status, message: rejection_message(&response) })
    }

    fn on_unauthorized(&self, pending: &PendingRequest) -> GateError {
        let Some(generation) = pending.generation else {
            return GateError::Unauthenticated;
        };
        if self.store.expire(generation) {
            tracing::warn!(path = %pending.path, "credential rejected; running session recovery");
            self.navigator.notify(SESSION_EXPIRED_NOTICE);
            self.navigator.navigate(Screen::Entry);
        } else {
            tracing::debug!(path = %pending.path, "ignoring unauthorized response for closed session");
        }
        GateError::SessionExpired
    }
}

/// Human-readable message from an error body: `message`, then `error`, then a
/// status-based fallback.
pub(crate) fn rejection_message(response: &HttpResponse) -> String {
    let from_body = serde_json::from_str::<serde_json::Value>(&response.body).ok().and_then(|body| {
        ["message", "error"]
            .iter()
            .find_map(|key| body.get(key).and_then(serde_json::Value::as_str).filter(|m| !m.trim().is_empty()))
            .map(str::to_owned)
    });
    match from_body {
        Some(message) => message,
        None if response.status >= 500 => "The server ran into a problem. Please try again.".to_owned(),
        None => format!("Request failed with status {}", response.status),
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, GateError> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| GateError::Decode(e.to_string()))
}
