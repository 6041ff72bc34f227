//! Error types for the goshop client.
//!
//! # Design
//! Only two things can go wrong: a JSON body fails to serialize while a
//! request is being built, or the transfer itself does not complete. An HTTP
//! error status is neither; it arrives as an ordinary `HttpResponse`.
//! Transport failures are deliberately not split into sub-kinds.

use std::error::Error as StdError;

/// Any failure to complete a network exchange.
#[derive(Debug, thiserror::Error)]
#[error("transport failure: {source}")]
pub struct TransportError {
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl TransportError {
    pub fn new(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err)
    }
}

/// Errors returned by `GoshopClient` operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The request did not complete.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_keeps_its_cause() {
        let err = TransportError::new("connection reset");
        assert_eq!(err.to_string(), "transport failure: connection reset");
        assert!(err.source().is_some());
    }

    #[test]
    fn client_error_is_transparent_over_transport() {
        let err = ClientError::from(TransportError::new("dns lookup failed"));
        assert_eq!(err.to_string(), "transport failure: dns lookup failed");
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
