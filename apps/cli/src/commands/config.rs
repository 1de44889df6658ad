//! # Config Commands
//!
//! `ventas config show` prints the effective configuration (file, then
//! environment) and fails on a config file that does not parse or validate.
//! `ventas config init` writes the defaults to the config file.

use clap::Subcommand;
use std::path::{Path, PathBuf};
use tracing::info;
use ventas_gateway::{AppConfig, GatewayError};

use crate::error::{CliError, ErrorCode};
use crate::notify::Notifier;

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(action: ConfigAction, path: Option<PathBuf>, notifier: &dyn Notifier) -> bool {
    let path = path.or_else(AppConfig::default_config_path);
    match action {
        ConfigAction::Show => match show(path.as_deref()) {
            Ok(text) => {
                print!("{}", text);
                true
            }
            Err(e) => {
                notifier.failure("Could not show configuration", &e);
                false
            }
        },
        ConfigAction::Init { force } => match init(path, force) {
            Ok(written) => {
                notifier.success(format!("Configuration written to {}", written.display()));
                true
            }
            Err(e) => {
                notifier.failure("Could not write configuration", &e);
                false
            }
        },
    }
}

fn show(path: Option<&Path>) -> Result<String, CliError> {
    let config = AppConfig::load(path.map(Path::to_path_buf))?;
    render(&config, path)
}

fn render(config: &AppConfig, path: Option<&Path>) -> Result<String, CliError> {
    let body = toml::to_string_pretty(config)
        .map_err(|e| CliError::from(GatewayError::from(e)))?;
    let source = match path {
        Some(p) if p.exists() => p.display().to_string(),
        Some(p) => format!("{} (not found, defaults)", p.display()),
        None => "defaults".to_string(),
    };
    Ok(format!("# {}\n{}", source, body))
}

fn init(path: Option<PathBuf>, force: bool) -> Result<PathBuf, CliError> {
    if let Some(p) = path.as_ref() {
        if p.exists() && !force {
            return Err(CliError::new(
                ErrorCode::Configuration,
                format!("{} already exists (use --force to overwrite)", p.display()),
            ));
        }
    }

    let written = AppConfig::new().save(path)?;
    info!(path = ?written, "Configuration initialised");
    Ok(written)
}
