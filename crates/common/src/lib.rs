//! Types shared by the Keystone client crates

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
