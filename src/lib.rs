pub mod api;
pub mod cli;
pub mod config;
pub mod document;
pub mod export;
pub mod gate;
pub mod models;
pub mod notify;
pub mod render;
pub mod session;
pub mod validation;
pub mod views;

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;

use crate::cli::Cli;
use crate::gate::RouteLog;
use crate::notify::ConsoleNotifier;
use crate::views::{PortalContext, ViewError};

pub async fn run() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // View errors have already been shown by the notifier.
            if e.downcast_ref::<ViewError>().is_none() {
                eprintln!("error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config().context("invalid configuration")?;
    log::debug!(
        "Using backend {} with sessions in {}",
        config.api_url,
        config.session_dir.display()
    );

    let routes = Arc::new(RouteLog::new());
    let ctx = PortalContext::from_config(&config, routes.clone(), Arc::new(ConsoleNotifier))
        .context("failed to set up the HTTP client")?;

    let result = cli::run(cli.command, ctx).await;
    if let Some(route) = routes.last() {
        log::debug!("Finished at {}", route);
    }
    result?;
    Ok(())
}
