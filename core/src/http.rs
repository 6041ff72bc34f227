//! HTTP request and response descriptors.
//!
//! # Design
//! Requests and responses are plain data. Builders in `client` produce an
//! `HttpRequest` carrying a path relative to the service origin; the
//! `Dispatcher` prefixes the origin and hands the request to a transport.
//! Responses come back as-is, with the body already read to text.
//!
//! Headers are an ordered list rather than a map so that whatever the caller
//! supplies reaches the wire in the same order.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ClientError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a method name is not one of GET, POST, PUT or DELETE.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(UnknownMethod(s.to_string())),
        }
    }
}

/// One outbound call described as plain data.
///
/// `path` is appended to the origin verbatim, so it should start with `/`
/// and have any caller-supplied segments already encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// A bodiless request with the default method (GET).
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::default(),
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path)
    }

    /// A request whose body is `payload` serialized as JSON, tagged with
    /// `content-type: application/json`.
    pub fn json<T: Serialize>(
        method: HttpMethod,
        path: impl Into<String>,
        payload: &T,
    ) -> Result<Self, ClientError> {
        let body = serde_json::to_string(payload).map_err(ClientError::Serialization)?;
        Ok(Self::new(path)
            .method(method)
            .header("content-type", "application/json")
            .body(body))
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// A completed HTTP exchange. Any status, including 4xx and 5xx, is a
/// normal response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// First header with the given name, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
