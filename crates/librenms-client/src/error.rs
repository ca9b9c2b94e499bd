//! LibreNMS client errors

use thiserror::Error;

/// Boxed error produced by a [`Transport`](crate::Transport) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LibreNmsError>;

/// Errors that can occur when interacting with the LibreNMS API
#[derive(Debug, Error)]
pub enum LibreNmsError {
    /// The base URL could not be parsed or carries a path other than `/`
    #[error("invalid base URL format '{url}', expected 'http[s]://<host>[:port]/': {reason}")]
    InvalidBaseUrl {
        /// The URL as supplied by the caller
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The request never produced an HTTP response (connection refused,
    /// timeout, TLS or DNS failure)
    #[error("{method} {url} failed: {source}")]
    Transport {
        /// HTTP method of the failed request
        method: String,
        /// Full request URL
        url: String,
        /// Error reported by the transport
        #[source]
        source: BoxError,
    },

    /// LibreNMS answered with a status outside 2xx
    #[error("{status} {status_text} {url}{}", display_message(.message))]
    Api {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status code
        status_text: String,
        /// Full request URL
        url: String,
        /// `status` field of the error envelope, when the body carried one
        api_status: Option<String>,
        /// Error message; the raw body when it was not an error envelope,
        /// the status line when the body was empty
        message: String,
    },

    /// A non-empty success body did not match the expected shape
    #[error("failure decoding response ({context}): {source}")]
    Decode {
        /// Which call produced the body
        context: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The default HTTP client could not be built
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid request (e.g., missing required fields)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl LibreNmsError {
    /// HTTP status of an [`LibreNmsError::Api`] error
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether LibreNMS answered 404
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

fn display_message(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {message}")
    }
}
