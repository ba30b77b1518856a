//! Error types for Keystone session operations

use crate::state::SessionStatus;

/// Errors from session operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Catalog and tenant lookups require an authenticated session
    #[error("not authenticated: session is {}", .0.label())]
    NotAuthenticated(SessionStatus),

    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Failure reported by the transport, message passed through verbatim
    #[error(transparent)]
    Transport(#[from] transport::TransportError),

    /// A 2xx response that does not have the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, Error>;
