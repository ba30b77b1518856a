//! Configuration types and loading
//!
//! Config precedence: CLI args > env vars > config file > defaults.
//! The password is loaded from KEYSTONE_PASSWORD or password_file and the
//! token only from KEYSTONE_TOKEN; neither is ever read from the TOML
//! itself to avoid leaking secrets.

use common::Secret;
use keystone_auth::{AuthMethod, Credentials};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const PASSWORD_ENV: &str = "KEYSTONE_PASSWORD";
pub const TOKEN_ENV: &str = "KEYSTONE_TOKEN";
pub const CONFIG_PATH_ENV: &str = "KEYSTONE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "keystone.toml";

/// Root configuration
#[derive(Debug, Deserialize)]
pub struct Config {
    pub keystone: KeystoneConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

/// Identity service location
#[derive(Debug, Deserialize)]
pub struct KeystoneConfig {
    /// API root, e.g. `http://host:5000/v2.0/`
    pub url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Who to authenticate as
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(skip)]
    pub password: Option<Secret<String>>,
    /// Path to a file containing the password (alternative to KEYSTONE_PASSWORD)
    #[serde(default)]
    pub password_file: Option<PathBuf>,
    #[serde(skip)]
    pub token: Option<Secret<String>>,
    /// Tenant id to scope the token to
    #[serde(default)]
    pub tenant: Option<String>,
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Load configuration from a TOML file, then overlay environment variables.
    ///
    /// Password resolution order:
    /// 1. KEYSTONE_PASSWORD env var
    /// 2. password_file path from config
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;

        if !config.keystone.url.starts_with("http://")
            && !config.keystone.url.starts_with("https://")
        {
            return Err(common::Error::Config(format!(
                "keystone url must start with http:// or https://, got: {}",
                config.keystone.url
            )));
        }

        if config.keystone.timeout_secs == 0 {
            return Err(common::Error::Config(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if let Ok(password) = std::env::var(PASSWORD_ENV) {
            config.credentials.password = Some(Secret::new(password));
        } else if let Some(ref password_file) = config.credentials.password_file {
            let password = std::fs::read_to_string(password_file).map_err(|e| {
                common::Error::Config(format!(
                    "failed to read password_file {}: {e}",
                    password_file.display()
                ))
            })?;
            let password = password.trim().to_owned();
            if !password.is_empty() {
                config.credentials.password = Some(Secret::new(password));
            }
        }

        if let Ok(token) = std::env::var(TOKEN_ENV) {
            let token = token.trim().to_owned();
            if !token.is_empty() {
                config.credentials.token = Some(Secret::new(token));
            }
        }

        Ok(config)
    }

    /// Resolve config file path from CLI arg or KEYSTONE_CONFIG env var.
    pub fn resolve_path(cli_path: Option<&str>) -> PathBuf {
        if let Some(p) = cli_path {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var(CONFIG_PATH_ENV) {
            return PathBuf::from(p);
        }
        PathBuf::from(DEFAULT_CONFIG_PATH)
    }

    /// Build request credentials; a token takes precedence over the password.
    pub fn credentials(&self) -> keystone_auth::Result<Credentials> {
        let creds = &self.credentials;
        let method = AuthMethod::from_parts(
            creds.username.clone(),
            creds.password.clone(),
            creds.token.clone(),
        )?;
        let mut credentials = Credentials::new(method);
        credentials.tenant_id = creds.tenant.clone();
        Ok(credentials)
    }
}
