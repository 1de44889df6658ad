//! # Ventas CLI Library
//!
//! The `ventas` command line client: list views for customers and products,
//! the sale composer, and the configuration commands, all talking to the
//! REST gateway.
//!
//! ## Module Organization
//! ```text
//! ventas_cli/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── state/
//! │   ├── mod.rs      ◄─── View exports
//! │   ├── entity_list.rs ◄─ Customer / product list + editor
//! │   ├── sales.rs    ◄─── Sales list + composer
//! │   └── config.rs   ◄─── Currency display settings
//! ├── commands/
//! │   ├── mod.rs      ◄─── clap definitions, Context
//! │   ├── customers.rs, products.rs, sales.rs, home.rs, config.rs
//! │   └── table.rs    ◄─── Plain-text tables
//! ├── notify.rs       ◄─── Success / error notifications
//! ├── confirm.rs      ◄─── Delete confirmation prompt
//! └── error.rs        ◄─── CliError for user-facing messages
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: warn, info for ventas crates; RUST_LOG overrides         │
//! │                                                                         │
//! │  2. Load Configuration ───────────────────────────────────────────────► │
//! │     • ventas.toml in the platform config directory (or --config)        │
//! │     • VENTAS_* environment overrides, then --gateway                    │
//! │                                                                         │
//! │  3. Build Context ────────────────────────────────────────────────────► │
//! │     • Gateway (reqwest client with timeout)                             │
//! │     • Console notifier, stdin or automatic confirmation                 │
//! │                                                                         │
//! │  4. Dispatch ─────────────────────────────────────────────────────────► │
//! │     • Section command runs, notifies its outcome                        │
//! │     • Exit code 0 on success, 1 when the action failed                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod confirm;
pub mod error;
pub mod notify;
pub mod state;

use anyhow::Context as _;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use ventas_gateway::AppConfig;

use commands::{Cli, Command, Context};
use notify::ConsoleNotifier;

/// Runs one command line invocation.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    debug!(?cli, "Parsed command line");
    let Cli {
        config: config_path,
        gateway,
        yes,
        command,
    } = cli;

    let ok = match command {
        Command::Config { action } => commands::config::run(action, config_path, &ConsoleNotifier),
        section => {
            let config = load_config(config_path, gateway.as_deref())?;
            info!(gateway = %config.gateway.base_url, "Configuration loaded");

            let ctx = Context::new(&config, yes).context("Could not set up the gateway client")?;
            run_section(&ctx, section).await
        }
    };

    Ok(exit_code(ok))
}

async fn run_section(ctx: &Context, command: Command) -> bool {
    match command {
        Command::Home => commands::home::run(ctx.gateway.base_url()),
        Command::Customers { action } => commands::customers::run(ctx, action).await,
        Command::Products { action } => commands::products::run(ctx, action).await,
        Command::Sales { action } => commands::sales::run(ctx, action).await,
        Command::Config { .. } => false,
    }
}

/// File and environment first, then the `--gateway` flag.
fn load_config(path: Option<PathBuf>, gateway: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load(path).context("Could not load configuration")?;

    if let Some(url) = gateway {
        config.gateway.base_url = url.to_string();
        config
            .validate()
            .with_context(|| format!("Invalid --gateway value '{}'", url))?;
    }

    Ok(config)
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=ventas=trace` - Show trace for the ventas crates only
/// - Default: WARN, INFO for the ventas crates
///
/// Logs go to stderr so tables on stdout can be piped.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,ventas=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sale_edit() {
        let cli = Cli::try_parse_from([
            "ventas", "--yes", "ventas", "edit", "12", "--add", "7", "--add", "7",
            "--remove", "2", "--quantity", "9=3",
        ])
        .unwrap();

        assert!(cli.yes);
        match cli.command {
            Command::Sales {
                action: commands::sales::SaleAction::Edit { id, changes },
            } => {
                assert_eq!(id, 12);
                assert_eq!(changes.add, vec![7, 7]);
                assert_eq!(changes.remove, vec![2]);
                assert_eq!(changes.quantities, vec![(9, 3)]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_aliases_and_global_flags() {
        let cli = Cli::try_parse_from([
            "ventas", "customers", "list", "--search", "gómez", "--gateway", "http://gw:9000",
        ])
        .unwrap();
        assert_eq!(cli.gateway.as_deref(), Some("http://gw:9000"));
        assert!(matches!(cli.command, Command::Customers { .. }));
    }

    #[test]
    fn test_gateway_flag_overrides_and_is_validated() {
        let path = std::env::temp_dir().join(format!("ventas-missing-{}.toml", std::process::id()));

        let config = load_config(Some(path.clone()), Some("http://gw:9000")).unwrap();
        assert_eq!(config.gateway.base_url, "http://gw:9000");

        assert!(load_config(Some(path), Some("ftp://gw")).is_err());
    }

    #[test]
    fn test_bad_date_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["ventas", "ventas", "new", "--date", "05/03/2024"]);
        assert!(result.is_err());
    }
}
