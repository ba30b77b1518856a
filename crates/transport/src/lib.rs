//! Transport abstraction for identity-service requests
//!
//! Defines the `Transport` trait that decouples session logic from the HTTP
//! client. `ReqwestTransport` is the production implementation; tests in the
//! session crate substitute a scripted in-memory transport.
//!
//! Every call resolves exactly once, either to the decoded JSON body or to a
//! `TransportError` whose `Display` is the failure message handed to callers.

pub mod http;

pub use http::{AUTH_TOKEN_HEADER, DEFAULT_TIMEOUT, ReqwestTransport};

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Failures reported by a transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the response could not be read
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The identity service answered with a non-2xx status
    #[error("identity service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// A 2xx response whose body is not valid JSON
    #[error("invalid response body: {0}")]
    InvalidBody(String),

    /// The per-request deadline expired before a response arrived
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

impl TransportError {
    /// Whether the identity service rejected the credentials (401/403).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, TransportError::Status { status: 401 | 403, .. })
    }
}

/// Result alias for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Boxed future returned by transport calls.
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<serde_json::Value>> + Send + 'a>>;

/// Abstraction over the HTTP client used to reach the identity service.
///
/// Uses `Pin<Box<dyn Future>>` return types for dyn-compatibility (`Arc<dyn Transport>`).
pub trait Transport: Send + Sync {
    /// POST `body` as JSON to `url`.
    ///
    /// `auth_token`, when present, authorizes the request. Token issuance
    /// itself is unauthenticated and passes `None`.
    fn post<'a>(
        &'a self,
        url: &'a str,
        body: &'a serde_json::Value,
        auth_token: Option<&'a str>,
    ) -> TransportFuture<'a>;

    /// GET `url`, authorized by `auth_token` when present.
    fn get<'a>(&'a self, url: &'a str, auth_token: Option<&'a str>) -> TransportFuture<'a>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn post<'a>(
        &'a self,
        url: &'a str,
        body: &'a serde_json::Value,
        auth_token: Option<&'a str>,
    ) -> TransportFuture<'a> {
        (**self).post(url, body, auth_token)
    }

    fn get<'a>(&'a self, url: &'a str, auth_token: Option<&'a str>) -> TransportFuture<'a> {
        (**self).get(url, auth_token)
    }
}
