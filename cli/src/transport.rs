//! `reqwest`-backed transport for the terminal client.

use std::time::Duration;

use async_trait::async_trait;
use session::{HttpRequest, HttpResponse, Method, Transport, TransportError};

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client; `timeout` bounds each whole request.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error if the TLS backend fails to
    /// initialize.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self { client: builder.build()? })
    }
}

fn method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn transport_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() { TransportError::Timeout } else { TransportError::Request(err.to_string()) }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut outgoing = self.client.request(method(request.method), &request.url);
        if let Some(token) = &request.bearer {
            outgoing = outgoing.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            outgoing = outgoing.json(body);
        }
        let response = outgoing.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        Ok(HttpResponse::new(status, body))
    }
}
