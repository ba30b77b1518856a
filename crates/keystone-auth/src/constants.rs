//! Identity service paths
//!
//! Appended verbatim to the configured endpoint URL, which is expected to
//! name the API version root (e.g. `http://host:5000/v2.0/`).

/// Token issuance (POST, unauthenticated)
pub const TOKENS_PATH: &str = "tokens";

/// Tenants visible to the current token (GET, authenticated)
pub const TENANTS_PATH: &str = "tenants";
