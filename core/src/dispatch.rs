//! Request dispatch: one request in, one raw response out.
//!
//! # Design
//! `Dispatcher` owns the resolved `Origin` and a `Transport`. For every call
//! it forms the target as `origin + path` with no normalization and performs
//! exactly one transfer. It never looks at the status code or the body, never
//! retries and sets no timeout of its own. Anything that stops the exchange
//! from completing is returned as a single `TransportError`.
//!
//! The transport is a trait so the HTTP stack can be swapped out, e.g. for a
//! recording transport in tests or a host that resolves same-origin targets
//! itself.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::origin::Origin;

/// Performs a single network exchange against an absolute or host-relative
/// target.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, target: &str, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `reqwest`-backed transport with the client's default settings: no
/// overall timeout, default redirect policy.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, target: &str, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(to_reqwest_method(request.method), target);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        // A body that cannot be read to the end is a failed transfer.
        let body = response.text().await?;

        Ok(HttpResponse { status, headers, body })
    }
}

/// Sends request descriptors to the configured origin.
pub struct Dispatcher<T = HttpTransport> {
    origin: Origin,
    transport: T,
}

impl Dispatcher<HttpTransport> {
    pub fn new(origin: Origin) -> Self {
        Self::with_transport(origin, HttpTransport::new())
    }
}

impl<T: Transport> Dispatcher<T> {
    pub fn with_transport(origin: Origin, transport: T) -> Self {
        Self { origin, transport }
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The location a request with this path is sent to.
    pub fn target(&self, path: &str) -> String {
        self.origin.join(path)
    }

    /// Issue `request` once and return whatever the service answered.
    pub async fn dispatch(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let target = self.target(&request.path);
        debug!(method = %request.method, target = %target, "dispatching request");

        match self.transport.send(&target, request).await {
            Ok(response) => {
                debug!(method = %request.method, target = %target, status = response.status, "response received");
                Ok(response)
            }
            Err(err) => {
                warn!(method = %request.method, target = %target, error = %err, "request failed");
                Err(err)
            }
        }
    }
}

impl<T> std::fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}
