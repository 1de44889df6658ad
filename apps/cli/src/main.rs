//! # Ventas Entry Point
//!
//! Parses the command line and hands over to [`ventas_cli::run`].
//!
//! ```text
//! $ ventas home
//! $ ventas clientes list --search gómez
//! $ ventas productos add --name Yerba --brand Playadito --cost 10.5 --quantity 8
//! $ ventas ventas new --customer 3 --product 7 --product 7
//! $ ventas config init
//! ```

use clap::Parser;
use std::process::ExitCode;
use ventas_cli::commands::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    ventas_cli::init_tracing();
    let cli = Cli::parse();
    ventas_cli::run(cli).await
}
