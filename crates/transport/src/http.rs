//! reqwest-backed transport
//!
//! Sends JSON to the identity service and decodes JSON responses. Every
//! request runs under a deadline; expiry is reported as
//! `TransportError::Timeout` so a stalled service cannot leave a session
//! authenticating forever.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderValue};
use tracing::{debug, warn};

use crate::{Result, Transport, TransportError, TransportFuture};

/// Header carrying the session token on authorized requests
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Default per-request deadline
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Production transport over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Per-request deadline applied to every call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<serde_json::Value> {
        let response = tokio::time::timeout(self.timeout, async {
            let response = request
                .header(ACCEPT, HeaderValue::from_static("application/json"))
                .send()
                .await
                .map_err(|e| TransportError::Http(e.to_string()))?;

            let status = response.status();
            let body = response
                .text()
                .await
                .map_err(|e| TransportError::Http(format!("reading response body: {e}")))?;
            Ok::<_, TransportError>((status, body))
        })
        .await
        .map_err(|_| TransportError::Timeout(self.timeout))?;

        let (status, body) = response?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::InvalidBody(e.to_string()))
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new(reqwest::Client::new(), DEFAULT_TIMEOUT)
    }
}

fn authorize(request: reqwest::RequestBuilder, auth_token: Option<&str>) -> reqwest::RequestBuilder {
    match auth_token {
        Some(token) => request.header(AUTH_TOKEN_HEADER, token),
        None => request,
    }
}

impl Transport for ReqwestTransport {
    fn post<'a>(
        &'a self,
        url: &'a str,
        body: &'a serde_json::Value,
        auth_token: Option<&'a str>,
    ) -> TransportFuture<'a> {
        Box::pin(async move {
            // Request bodies may hold passwords; only the URL is logged.
            debug!(url, authorized = auth_token.is_some(), "POST");
            let request = authorize(self.client.post(url).json(body), auth_token);
            self.send(request).await.inspect_err(|e| {
                warn!(url, error = %e, "POST failed");
            })
        })
    }

    fn get<'a>(&'a self, url: &'a str, auth_token: Option<&'a str>) -> TransportFuture<'a> {
        Box::pin(async move {
            debug!(url, authorized = auth_token.is_some(), "GET");
            let request = authorize(self.client.get(url), auth_token);
            self.send(request).await.inspect_err(|e| {
                warn!(url, error = %e, "GET failed");
            })
        })
    }
}
