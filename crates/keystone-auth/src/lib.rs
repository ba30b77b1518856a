//! Keystone session client
//!
//! Authenticates against an OpenStack Keystone-style identity service and
//! exposes the resulting token, service catalog and tenant list. The HTTP
//! layer is injected through `transport::Transport`, so the session logic
//! can be driven by any client (or a scripted one in tests).
//!
//! Session flow:
//! 1. Caller creates a `Session` for the identity endpoint (or calls `init`)
//! 2. `Session::authenticate()` posts `Credentials` to `tokens`
//! 3. On success the access data (token + catalog) becomes current
//! 4. `Session::service()` looks up catalog entries by name
//! 5. `Session::tenants()` lists tenants visible to the token

pub mod access;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod metrics;
pub mod session;
pub mod state;
pub mod tenants;

pub use access::{AccessData, Endpoint, Interface, Role, ServiceEntry, TenantRef, Token, User};
pub use constants::*;
pub use credentials::{AuthMethod, Credentials};
pub use error::{Error, Result};
pub use session::Session;
pub use state::{SessionState, SessionStatus};
pub use tenants::{Link, Tenant, TenantList};
