//! Access data returned by a successful authentication
//!
//! Parsed once from the `access` member of the token response and never
//! mutated afterwards; a new authentication replaces it wholesale. Field
//! names follow the identity service's JSON.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// Only `token.id` is required; everything else is read leniently.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AccessData {
    pub token: Token,
    #[serde(rename = "serviceCatalog", default, deserialize_with = "null_as_empty")]
    pub service_catalog: Vec<ServiceEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl AccessData {
    /// Extract the `access` object from a raw token response.
    pub fn from_response(response: &serde_json::Value) -> Result<Self> {
        let access = response
            .get("access")
            .ok_or_else(|| Error::MalformedResponse("response has no `access` member".into()))?;
        serde_json::from_value(access.clone()).map_err(|e| Error::MalformedResponse(e.to_string()))
    }

    /// First catalog entry named exactly `name`, in catalog order.
    pub fn service(&self, name: &str) -> Option<&ServiceEntry> {
        self.service_catalog.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Token {
    pub id: String,
    /// Expiry as sent by the service, e.g. `2012-03-10T15:41:58.905480`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<TenantRef>,
}

/// Tenant the token is scoped to.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TenantRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServiceEntry {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub service_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub endpoints: Vec<Endpoint>,
}

impl ServiceEntry {
    /// URL of the first endpoint exposing `interface`, restricted to
    /// `region` when given.
    pub fn url(&self, interface: Interface, region: Option<&str>) -> Option<&str> {
        self.endpoints
            .iter()
            .filter(|e| region.is_none_or(|r| e.region.as_deref() == Some(r)))
            .find_map(|e| e.url(interface))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Endpoint {
    #[serde(rename = "publicURL", default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    #[serde(rename = "internalURL", default, skip_serializing_if = "Option::is_none")]
    pub internal_url: Option<String>,
    #[serde(rename = "adminURL", default, skip_serializing_if = "Option::is_none")]
    pub admin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Endpoint {
    pub fn url(&self, interface: Interface) -> Option<&str> {
        match interface {
            Interface::Public => self.public_url.as_deref(),
            Interface::Internal => self.internal_url.as_deref(),
            Interface::Admin => self.admin_url.as_deref(),
        }
    }
}

/// Which of an endpoint's URLs to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interface {
    #[default]
    Public,
    Internal,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub roles: Vec<Role>,
}

/// Role descriptor; `tenantId` is present for tenant-scoped grants.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Role {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "tenantId", default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

/// Treat an explicit `null` list like a missing one.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
