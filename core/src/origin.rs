//! Service origin resolution.
//!
//! The origin is read once at startup and then passed explicitly to the
//! `Dispatcher`. An empty origin means "same origin as the host", so every
//! target is just the request path.

use std::env;
use std::fmt;

/// Environment variable naming the service base URL.
pub const API_URL_ENV: &str = "GOSHOP_API_URL";

/// Base network location prefixed to every request path.
///
/// Stored verbatim: no trailing-slash trimming and no validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Origin(String);

impl Origin {
    pub fn new(base: impl Into<String>) -> Self {
        Self(base.into())
    }

    /// The empty origin.
    pub fn same_origin() -> Self {
        Self::default()
    }

    /// Resolve from `GOSHOP_API_URL`. A missing or non-unicode value falls
    /// back to the empty origin.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: FnOnce(&str) -> Option<String>,
    {
        Self(lookup(API_URL_ENV).unwrap_or_default())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_same_origin(&self) -> bool {
        self.0.is_empty()
    }

    /// `origin + path`, concatenated as-is.
    pub fn join(&self, path: &str) -> String {
        let mut target = String::with_capacity(self.0.len() + path.len());
        target.push_str(&self.0);
        target.push_str(path);
        target
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_lookup_resolves_to_same_origin() {
        let origin = Origin::from_lookup(|_| None);
        assert!(origin.is_same_origin());
        assert_eq!(origin.join("/api/v1/orders"), "/api/v1/orders");
    }

    #[test]
    fn lookup_reads_api_url_key() {
        let origin = Origin::from_lookup(|key| {
            assert_eq!(key, API_URL_ENV);
            Some("http://gateway:8080".to_string())
        });
        assert_eq!(origin.join("/api/v1/orders"), "http://gateway:8080/api/v1/orders");
    }

    #[test]
    fn join_does_not_normalize_slashes() {
        let origin = Origin::new("http://gateway:8080/");
        assert_eq!(origin.join("/api/v1/orders"), "http://gateway:8080//api/v1/orders");
        assert_eq!(origin.join("api"), "http://gateway:8080/api");
    }
}
