//! Session metrics
//!
//! - `keystone_authentications_total` (counter): label `outcome`
//! - `keystone_tenant_requests_total` (counter): label `outcome`
//!
//! Nothing is exported from here; the embedding process installs a recorder.

/// Outcome label values
pub const SUCCESS: &str = "success";
pub const FAILURE: &str = "failure";
pub const REJECTED: &str = "rejected";
pub const SUPERSEDED: &str = "superseded";

/// Record a finished authentication attempt.
pub fn record_authentication(outcome: &'static str) {
    metrics::counter!("keystone_authentications_total", "outcome" => outcome).increment(1);
}

/// Record a tenant listing request, including ones refused locally.
pub fn record_tenant_request(outcome: &'static str) {
    metrics::counter!("keystone_tenant_requests_total", "outcome" => outcome).increment(1);
}
