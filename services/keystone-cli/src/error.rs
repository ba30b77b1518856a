//! Command-line usage errors

use thiserror::Error;

/// Errors in how the binary was invoked. Runtime failures (config,
/// authentication, transport) propagate through `anyhow` instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("missing command (expected one of: authenticate, catalog <name>, tenants)")]
    MissingCommand,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{0} requires an argument")]
    MissingArgument(&'static str),

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

/// Result alias using usage Error
pub type Result<T> = std::result::Result<T, Error>;
