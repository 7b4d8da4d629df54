//! Client layer for the remote Link API
//!
//! The editor talks to the API through the [`LinkTransport`] trait so tests
//! can drive it with an in-memory implementation.
//!
//! ```text
//! LinkEditor → LinkTransport ──→ HttpTransport (ureq, blocking pool)
//!                              └→ any other implementation
//! ```

mod http;

pub use http::HttpTransport;

use std::fmt;

use async_trait::async_trait;

use crate::errors::LinkcraftError;
use crate::models::{ApiErrorBody, Link, LinkPayload};

// ============ ClientError ============

/// Errors from the client layer
#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The API answered with a non-success status
    Remote { status: u16, body: ApiErrorBody },
    /// The request never produced a response (connect, TLS, timeout)
    Network(String),
    /// A success response whose body was not a link record
    Decode(String),
}

impl ClientError {
    pub fn remote(status: u16, error: impl Into<String>) -> Self {
        ClientError::Remote {
            status,
            body: ApiErrorBody {
                error: error.into(),
                variant_index: None,
            },
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Remote { status, body } => write!(f, "HTTP {}: {}", status, body.error),
            ClientError::Network(msg) => write!(f, "Network error: {}", msg),
            ClientError::Decode(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ClientError> for LinkcraftError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Remote { body, .. } => LinkcraftError::remote(body.error),
            ClientError::Network(msg) => LinkcraftError::transport(msg),
            ClientError::Decode(msg) => LinkcraftError::serialization(msg),
        }
    }
}

// ============ LinkTransport ============

/// Create/update calls of the Link API
#[async_trait]
pub trait LinkTransport: Send + Sync {
    /// `POST /api/links`
    async fn create_link(&self, payload: &LinkPayload) -> Result<Link, ClientError>;

    /// `PUT /api/links/{short_code}`
    async fn update_link(
        &self,
        short_code: &str,
        payload: &LinkPayload,
    ) -> Result<Link, ClientError>;

    /// Transport name (for logs)
    fn name(&self) -> &'static str;
}
