//! Tenant list payloads
//!
//! The session hands back the tenant response unmodified. `TenantList`
//! gives typed access to it and accepts the shapes identity services use:
//!
//! - `{"tenants": {"links": [...], "values": [...]}}`
//! - `{"links": [...], "values": [...]}`
//! - `{"tenants": [...], "tenants_links": [...]}`

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct TenantList {
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub values: Vec<Tenant>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Link {
    pub href: String,
    #[serde(default)]
    pub rel: String,
}

impl TenantList {
    pub fn from_response(response: &serde_json::Value) -> Result<Self> {
        let parse = |value: &serde_json::Value| -> Result<Self> {
            serde_json::from_value(value.clone())
                .map_err(|e| Error::MalformedResponse(format!("invalid tenant list: {e}")))
        };

        match response.get("tenants") {
            Some(serde_json::Value::Array(values)) => {
                let values = serde_json::from_value(serde_json::Value::Array(values.clone()))
                    .map_err(|e| Error::MalformedResponse(format!("invalid tenant list: {e}")))?;
                let links = match response.get("tenants_links") {
                    Some(links) => serde_json::from_value(links.clone()).map_err(|e| {
                        Error::MalformedResponse(format!("invalid tenant links: {e}"))
                    })?,
                    None => Vec::new(),
                };
                Ok(Self { links, values })
            }
            Some(wrapped) => parse(wrapped),
            None => parse(response),
        }
    }

    pub fn find(&self, name: &str) -> Option<&Tenant> {
        self.values.iter().find(|t| t.name == name)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub fn tenants_response() -> serde_json::Value {
        serde_json::json!({
            "tenants": {
                "links": [{"href": "http://host.name:5000/tenants", "rel": "prev"}],
                "values": [
                    {"description": "test", "enabled": true, "id": "3", "name": "test"},
                    {"description": "None", "enabled": true, "id": "2", "name": "demo"},
                    {"description": "None", "enabled": true, "id": "1", "name": "admin"}
                ]
            }
        })
    }
}
