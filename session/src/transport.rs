//! HTTP transport seam.
//!
//! The Request Gate builds fully-resolved `HttpRequest`s and hands them to a
//! `Transport`. The web client implements it with `gloo-net`, the CLI with
//! `reqwest`. Futures are `?Send` because browser fetch futures are.

use async_trait::async_trait;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// One outbound call, already stamped by the pre-flight guard.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL (base URL + endpoint path).
    pub url: String,
    /// Bearer credential for the `Authorization` header, if any.
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl HttpRequest {
    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|token| format!("Bearer {token}"))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Transport-level failure: the request never produced an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("request timed out")]
    Timeout,
    #[error("transport unavailable: {0}")]
    Unavailable(&'static str),
}

#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    /// Perform one HTTP exchange.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no response status was received.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}
