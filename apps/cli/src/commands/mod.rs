//! # Commands Module
//!
//! The `ventas` command line: one subcommand per section of the app.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (clap definitions, Context)
//! ├── home.rs       ◄─── Landing overview and clock
//! ├── customers.rs  ◄─── ventas clientes list|add|edit|delete
//! ├── products.rs   ◄─── ventas productos list|add|edit|delete
//! ├── sales.rs      ◄─── ventas ventas list|new|edit|delete
//! ├── config.rs     ◄─── ventas config show|init
//! └── table.rs      ◄─── Plain-text table rendering
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ ventas clientes edit 4 --dni 30444555                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  clap parses Cli ──► Context (gateway, display, notifier, confirm)     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  customers::run ──► EntityListView::load / begin_edit / save           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Notifier prints the outcome; the command returns success or failure   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod customers;
pub mod home;
pub mod products;
pub mod sales;
pub mod table;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use ventas_core::{Customer, Product, Sale};
use ventas_gateway::{AppConfig, Gateway, GatewayResult, HttpRepository, Repository};

use crate::confirm::{AutoConfirm, Confirm, StdinConfirm};
use crate::notify::{ConsoleNotifier, Notifier};
use crate::state::{DisplayConfig, EntityListView, Listable, SalesView};
use table::{Table, TableRow};

// =============================================================================
// Command Line
// =============================================================================

/// Sales management client for the Ventas REST gateway.
#[derive(Debug, Parser)]
#[command(name = "ventas", version, about)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Gateway base URL, overriding the configuration
    #[arg(long, global = true, value_name = "URL")]
    pub gateway: Option<String>,

    /// Answer yes to every delete confirmation
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Overview of the sections and the current time
    Home,

    /// Manage customers
    #[command(name = "clientes", alias = "customers")]
    Customers {
        #[command(subcommand)]
        action: customers::CustomerAction,
    },

    /// Manage the product catalog
    #[command(name = "productos", alias = "products")]
    Products {
        #[command(subcommand)]
        action: products::ProductAction,
    },

    /// Manage sales
    #[command(name = "ventas", alias = "sales")]
    Sales {
        #[command(subcommand)]
        action: sales::SaleAction,
    },

    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        action: config::ConfigAction,
    },
}

// =============================================================================
// Context
// =============================================================================

/// What every section command needs.
pub struct Context {
    pub gateway: Gateway,
    pub display: DisplayConfig,
    pub notifier: Arc<dyn Notifier>,
    pub confirm: Box<dyn Confirm>,
}

impl Context {
    /// Console context: prints notifications, prompts before deletes unless
    /// `yes` is set.
    pub fn new(config: &AppConfig, yes: bool) -> GatewayResult<Self> {
        let confirm: Box<dyn Confirm> = if yes {
            Box::new(AutoConfirm(true))
        } else {
            Box::new(StdinConfirm)
        };

        Ok(Context {
            gateway: Gateway::from_config(config)?,
            display: DisplayConfig::from(&config.display),
            notifier: Arc::new(ConsoleNotifier),
            confirm,
        })
    }

    pub fn customers(&self) -> EntityListView<Customer, HttpRepository<Customer>> {
        EntityListView::new(self.gateway.customers(), self.notifier.clone())
    }

    pub fn products(&self) -> EntityListView<Product, HttpRepository<Product>> {
        EntityListView::new(self.gateway.products(), self.notifier.clone())
    }

    pub fn sales(
        &self,
    ) -> SalesView<HttpRepository<Customer>, HttpRepository<Product>, HttpRepository<Sale>> {
        SalesView::new(
            self.gateway.customers(),
            self.gateway.products(),
            self.gateway.sales(),
            self.notifier.clone(),
        )
    }
}

// =============================================================================
// Shared list
// =============================================================================

/// Loads the collection and prints the rows matching `search`.
pub(crate) async fn list_entities<E, R>(mut view: EntityListView<E, R>, search: Option<&str>) -> bool
where
    E: Listable + TableRow,
    R: Repository<E>,
{
    if !view.load().await {
        return false;
    }

    let matches = view.filter(search.unwrap_or(""));
    print_table(&Table::from_rows(matches), E::PLURAL);
    true
}

pub(crate) fn print_table(table: &Table, plural: &str) {
    if table.is_empty() {
        println!("No {} found.", plural);
    } else {
        print!("{}", table.render());
    }
}
