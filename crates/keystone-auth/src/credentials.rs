//! Authentication request construction
//!
//! A request authenticates either with a username/password pair or with an
//! existing token, optionally scoped to a tenant. Credentials are built per
//! call and never retained by the session.
//!
//! Wire shape:
//!
//! ```json
//! {"auth": {"passwordCredentials": {"username": "...", "password": "..."}, "tenantId": "..."}}
//! {"auth": {"token": {"id": "..."}, "tenantId": "..."}}
//! ```

use common::Secret;
use serde_json::json;

use crate::error::{Error, Result};

/// How the caller proves its identity. The two modes are mutually exclusive.
#[derive(Debug, Clone)]
pub enum AuthMethod {
    Password {
        username: String,
        password: Secret<String>,
    },
    Token(Secret<String>),
}

impl AuthMethod {
    pub fn password(username: impl Into<String>, password: impl Into<Secret<String>>) -> Self {
        AuthMethod::Password {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn token(id: impl Into<Secret<String>>) -> Self {
        AuthMethod::Token(id.into())
    }

    /// Select the mode from loosely supplied parts.
    ///
    /// A token always wins; username and password are ignored when one is
    /// given. Without a token both username and password are required.
    pub fn from_parts(
        username: Option<String>,
        password: Option<Secret<String>>,
        token: Option<Secret<String>>,
    ) -> Result<Self> {
        if let Some(token) = token {
            return Ok(AuthMethod::Token(token));
        }
        match (username, password) {
            (Some(username), Some(password)) => Ok(AuthMethod::Password { username, password }),
            (None, _) => Err(Error::InvalidCredentials(
                "username is required when no token is given".into(),
            )),
            (Some(_), None) => Err(Error::InvalidCredentials(
                "password is required when no token is given".into(),
            )),
        }
    }

    /// Short label for logs (`password` or `token`).
    pub fn kind(&self) -> &'static str {
        match self {
            AuthMethod::Password { .. } => "password",
            AuthMethod::Token(_) => "token",
        }
    }
}

/// One authentication attempt's credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub method: AuthMethod,
    pub tenant_id: Option<String>,
}

impl Credentials {
    pub fn new(method: AuthMethod) -> Self {
        Self {
            method,
            tenant_id: None,
        }
    }

    /// Scope the resulting token to `tenant_id`.
    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Render the `POST tokens` request body.
    pub fn to_request_body(&self) -> serde_json::Value {
        let mut auth = match &self.method {
            AuthMethod::Password { username, password } => json!({
                "passwordCredentials": {"username": username, "password": password.expose()}
            }),
            AuthMethod::Token(id) => json!({"token": {"id": id.expose()}}),
        };
        if let Some(tenant_id) = &self.tenant_id {
            auth["tenantId"] = json!(tenant_id);
        }
        json!({"auth": auth})
    }
}
