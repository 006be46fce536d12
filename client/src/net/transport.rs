//! HTTP transport for the browser.
//!
//! Browser (csr): real calls via `gloo-net`, raced against a
//! `gloo-timers` timeout when one is configured.
//! Native builds: every call fails with `Unavailable`; the gate turns that
//! into a network failure and background fetches render their empty state.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::time::Duration;

use async_trait::async_trait;
use session::{HttpRequest, HttpResponse, Transport, TransportError};

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport {
    timeout: Option<Duration>,
}

impl BrowserTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

/// Millisecond budget for `gloo_timers::future::TimeoutFuture`, clamped to `u32`.
#[cfg(any(test, feature = "csr"))]
fn timeout_millis(timeout: Duration) -> u32 {
    u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(feature = "csr")]
async fn execute_browser(request: HttpRequest) -> Result<HttpResponse, TransportError> {
    use gloo_net::http::{Method as HttpMethod, RequestBuilder};
    use session::Method;

    let method = match request.method {
        Method::Get => HttpMethod::GET,
        Method::Post => HttpMethod::POST,
        Method::Put => HttpMethod::PUT,
        Method::Delete => HttpMethod::DELETE,
    };
    let mut builder = RequestBuilder::new(&request.url).method(method);
    if let Some(auth) = request.authorization() {
        builder = builder.header("Authorization", &auth);
    }
    let outgoing = match &request.body {
        Some(body) => builder.json(body),
        None => builder.build(),
    }
    .map_err(|e| TransportError::Request(e.to_string()))?;

    let response = outgoing.send().await.map_err(|e| TransportError::Request(e.to_string()))?;
    let status = response.status();
    let body = response.text().await.map_err(|e| TransportError::Request(e.to_string()))?;
    Ok(HttpResponse::new(status, body))
}

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        #[cfg(feature = "csr")]
        {
            use futures::future::{Either, select};

            let Some(timeout) = self.timeout else {
                return execute_browser(request).await;
            };
            let call = Box::pin(execute_browser(request));
            let timer = gloo_timers::future::TimeoutFuture::new(timeout_millis(timeout));
            match select(call, timer).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => Err(TransportError::Timeout),
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (request, self.timeout);
            Err(TransportError::Unavailable("browser transport is only available in the browser"))
        }
    }
}
