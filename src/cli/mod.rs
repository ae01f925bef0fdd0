//! `portal` command tree.
//!
//! Each subcommand performs one user action against a freshly mounted view.

pub mod admin;
pub mod employee;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ConfigError, PortalConfig};
use crate::views::{PortalContext, ViewError};

#[derive(Parser, Debug)]
#[command(name = "portal")]
#[command(version, about = "Employee self-service portal", long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides PORTAL_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory holding session files (overrides PORTAL_SESSION_DIR)
    #[arg(long, global = true)]
    pub session_dir: Option<PathBuf>,

    /// Directory receiving downloaded PDFs (overrides PORTAL_DOWNLOAD_DIR)
    #[arg(long, global = true)]
    pub download_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Administrator actions
    #[command(subcommand)]
    Admin(admin::AdminCommand),

    /// Employee self-service actions
    #[command(subcommand)]
    Employee(employee::EmployeeCommand),
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> Result<PortalConfig, ConfigError> {
        let mut config = PortalConfig::from_env()?;
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url)?;
        }
        if let Some(dir) = &self.session_dir {
            config.session_dir = dir.clone();
        }
        if let Some(dir) = &self.download_dir {
            config.download_dir = dir.clone();
        }
        Ok(config)
    }
}

pub async fn run(command: Command, ctx: PortalContext) -> Result<(), ViewError> {
    match command {
        Command::Admin(cmd) => admin::run(cmd, ctx).await,
        Command::Employee(cmd) => employee::run(cmd, ctx).await,
    }
}
