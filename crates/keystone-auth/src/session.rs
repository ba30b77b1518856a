//! Authenticated session against one identity endpoint
//!
//! `Session` owns the state machine from `state.rs` behind a single
//! `RwLock`, so status, access data and token are always observed together.
//! Operations take `&self` and the session can be shared across tasks.
//!
//! Overlapping `authenticate` calls are sequenced by generation: each
//! attempt (and each `init`) bumps a counter, and a completion whose
//! generation is no longer current is returned to its caller without
//! touching session state. The most recently issued attempt decides the
//! final state, and `init` always wins over attempts still in flight.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use transport::Transport;

use crate::access::{AccessData, Interface, ServiceEntry};
use crate::constants::{TENANTS_PATH, TOKENS_PATH};
use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::metrics;
use crate::state::{SessionEvent, SessionState, SessionStatus, transition};

struct Inner {
    endpoint: String,
    state: SessionState,
    generation: u64,
}

impl Inner {
    fn apply(&mut self, event: SessionEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = transition(state, event);
    }
}

pub struct Session<T> {
    transport: T,
    inner: RwLock<Inner>,
}

impl<T: Transport> Session<T> {
    /// Create a disconnected session for `endpoint_url`.
    ///
    /// The URL names the API root, e.g. `http://host:5000/v2.0/`. A trailing
    /// `/` is added when missing.
    pub fn new(endpoint_url: impl Into<String>, transport: T) -> Self {
        Self {
            transport,
            inner: RwLock::new(Inner {
                endpoint: normalize_endpoint(endpoint_url.into()),
                state: SessionState::Disconnected,
                generation: 0,
            }),
        }
    }

    /// Point the session at `endpoint_url` and forget all session data.
    ///
    /// Allowed in every state. Attempts still in flight will not apply
    /// their results.
    pub async fn init(&self, endpoint_url: impl Into<String>) {
        let mut inner = self.inner.write().await;
        inner.endpoint = normalize_endpoint(endpoint_url.into());
        inner.generation += 1;
        inner.apply(SessionEvent::Reset);
        info!(endpoint = %inner.endpoint, "session reset");
    }

    /// Request a token and, on success, make its access data current.
    ///
    /// The session is `Authenticating` from the first poll of the returned
    /// future until the transport completes. Returns the identity service's
    /// response unmodified. On failure the session moves to
    /// `AuthenticationError` and the transport's message is returned as is;
    /// access data from an earlier success stays retained (see
    /// [`Session::last_access`]).
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<serde_json::Value> {
        let body = credentials.to_request_body();

        let (url, generation) = {
            let mut inner = self.inner.write().await;
            inner.generation += 1;
            inner.apply(SessionEvent::AttemptStarted);
            (format!("{}{TOKENS_PATH}", inner.endpoint), inner.generation)
        };
        info!(
            method = credentials.method.kind(),
            tenant = credentials.tenant_id.as_deref(),
            generation,
            "authenticating"
        );

        let outcome = match self.transport.post(&url, &body, None).await {
            Ok(response) => AccessData::from_response(&response).map(|access| (response, access)),
            Err(e) => Err(Error::Transport(e)),
        };

        let mut inner = self.inner.write().await;
        if inner.generation != generation {
            warn!(
                generation,
                current = inner.generation,
                "discarding superseded authentication result"
            );
            metrics::record_authentication(metrics::SUPERSEDED);
            return outcome.map(|(response, _)| response);
        }

        match outcome {
            Ok((response, access)) => {
                info!(
                    tenant = access.token.tenant.as_ref().map(|t| t.name.as_str()),
                    expires = access.token.expires.as_deref(),
                    services = access.service_catalog.len(),
                    "authenticated"
                );
                inner.apply(SessionEvent::Succeeded(Arc::new(access)));
                metrics::record_authentication(metrics::SUCCESS);
                Ok(response)
            }
            Err(e) => {
                warn!(error = %e, "authentication failed");
                inner.apply(SessionEvent::Failed);
                metrics::record_authentication(metrics::FAILURE);
                Err(e)
            }
        }
    }

    /// Look up a service in the catalog by exact name; first match wins.
    ///
    /// Fails with `NotAuthenticated` unless the session is authenticated.
    pub async fn service(&self, name: &str) -> Result<Option<ServiceEntry>> {
        let inner = self.inner.read().await;
        let access = inner
            .state
            .access()
            .ok_or_else(|| Error::NotAuthenticated(inner.state.status()))?;
        Ok(access.service(name).cloned())
    }

    /// URL of `interface` for the named service, optionally in `region`.
    pub async fn service_url(
        &self,
        name: &str,
        interface: Interface,
        region: Option<&str>,
    ) -> Result<Option<String>> {
        let service = self.service(name).await?;
        Ok(service.and_then(|s| s.url(interface, region).map(str::to_owned)))
    }

    /// Fetch the tenants visible to the current token.
    ///
    /// Returns the response unmodified; see
    /// [`TenantList`](crate::tenants::TenantList) for typed access. No
    /// request is issued unless the session is authenticated.
    pub async fn tenants(&self) -> Result<serde_json::Value> {
        let (url, token) = {
            let inner = self.inner.read().await;
            match inner.state.token() {
                Some(token) => (format!("{}{TENANTS_PATH}", inner.endpoint), token.to_owned()),
                None => {
                    let status = inner.state.status();
                    debug!(status = status.label(), "tenant listing refused");
                    metrics::record_tenant_request(metrics::REJECTED);
                    return Err(Error::NotAuthenticated(status));
                }
            }
        };

        match self.transport.get(&url, Some(&token)).await {
            Ok(response) => {
                metrics::record_tenant_request(metrics::SUCCESS);
                Ok(response)
            }
            Err(e) => {
                warn!(error = %e, "tenant listing failed");
                metrics::record_tenant_request(metrics::FAILURE);
                Err(e.into())
            }
        }
    }

    pub async fn status(&self) -> SessionStatus {
        self.inner.read().await.state.status()
    }

    /// Current token id; `None` unless authenticated.
    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.state.token().map(str::to_owned)
    }

    /// Current access data; `None` unless authenticated.
    pub async fn access(&self) -> Option<Arc<AccessData>> {
        self.inner.read().await.state.access().cloned()
    }

    /// Access data from the latest success since the last `init`, also
    /// while re-authenticating or after a failed re-authentication.
    pub async fn last_access(&self) -> Option<Arc<AccessData>> {
        self.inner.read().await.state.last_access().cloned()
    }

    pub async fn endpoint(&self) -> String {
        self.inner.read().await.endpoint.clone()
    }
}

fn normalize_endpoint(mut url: String) -> String {
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
