//! Keystone command-line client
//!
//! Single-binary front end for the session library:
//! 1. Loads the TOML config (plus secret env vars)
//! 2. Authenticates against the configured identity service
//! 3. Prints the token summary, a catalog entry, or the tenant list as JSON

mod config;
mod error;

use anyhow::{Context, Result};
use keystone_auth::{Credentials, Session};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use transport::{ReqwestTransport, Transport};

use crate::config::Config;

/// What to print once authenticated
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Authenticate,
    Catalog(String),
    Tenants,
}

#[derive(Debug, PartialEq, Eq)]
struct Cli {
    config_path: Option<String>,
    command: Command,
}

/// Parse `[--config PATH] <authenticate | catalog NAME | tenants>`.
fn parse_args<I>(args: I) -> error::Result<Cli>
where
    I: IntoIterator<Item = String>,
{
    let mut config_path = None;
    let mut positional = Vec::new();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--config" {
            config_path = Some(args.next().ok_or(error::Error::MissingArgument("--config"))?);
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        None => return Err(error::Error::MissingCommand),
        Some("authenticate") => Command::Authenticate,
        Some("tenants") => Command::Tenants,
        Some("catalog") => Command::Catalog(
            positional
                .next()
                .ok_or(error::Error::MissingArgument("catalog"))?,
        ),
        Some(other) => return Err(error::Error::UnknownCommand(other.to_owned())),
    };
    if let Some(extra) = positional.next() {
        return Err(error::Error::UnexpectedArgument(extra));
    }

    Ok(Cli {
        config_path,
        command,
    })
}

/// Authenticate, then produce the JSON document for `command`.
async fn run<T: Transport>(
    session: &Session<T>,
    credentials: &Credentials,
    command: &Command,
) -> Result<serde_json::Value> {
    session
        .authenticate(credentials)
        .await
        .context("authentication failed")?;

    match command {
        Command::Authenticate => {
            let access = session
                .access()
                .await
                .context("session lost its access data")?;
            Ok(serde_json::json!({
                "token": access.token.id,
                "expires": access.token.expires,
                "tenant": access.token.tenant,
            }))
        }
        Command::Catalog(name) => {
            let service = session
                .service(name)
                .await?
                .with_context(|| format!("service {name} not found in catalog"))?;
            Ok(serde_json::to_value(service)?)
        }
        Command::Tenants => session.tenants().await.context("listing tenants failed"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .init();

    let cli = parse_args(std::env::args().skip(1))?;

    let config_path = Config::resolve_path(cli.config_path.as_deref());
    info!(path = %config_path.display(), "loading configuration");
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    let credentials = config.credentials().context("incomplete credentials")?;

    info!(
        url = %config.keystone.url,
        timeout_secs = config.keystone.timeout_secs,
        command = ?cli.command,
        "configuration loaded"
    );

    let transport = ReqwestTransport::new(
        reqwest::Client::new(),
        Duration::from_secs(config.keystone.timeout_secs),
    );
    let session = Session::new(config.keystone.url.clone(), transport);

    let output = run(&session, &credentials, &cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
