//! Shared command-line surface of the `people` and `pokemon` binaries.

use std::path::PathBuf;

use clap::Parser;
use tracing::error;

use crate::config::{Config, ServiceConfig};
use crate::error::Error;
use crate::router::Router;
use crate::server::Server;

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// TOML config file with `[people]` and `[pokemon]` sections.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Listen address; overrides the config file.
    #[arg(short, long)]
    pub addr: Option<String>,
}

/// Installs the `tracing` subscriber. `RUST_LOG` wins; otherwise `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Loads config, builds the router for one service, and serves it until
/// shutdown. Errors are logged before they are returned.
pub async fn run<S>(
    args: Args,
    default_addr: &str,
    section: impl FnOnce(Config) -> ServiceConfig,
    routes: impl FnOnce(&ServiceConfig) -> Router<S>,
) -> Result<(), Error>
where
    S: Clone + Send + Sync + 'static,
{
    let result: Result<(), Error> = async move {
        let service = section(Config::load(args.config.as_deref())?);
        let addr = args.addr.as_deref().unwrap_or(service.addr_or(default_addr));
        Server::bind(addr)?.serve(routes(&service)).await
    }
    .await;

    if let Err(e) = &result {
        error!("{e}");
    }
    result
}
