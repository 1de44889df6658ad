//! # ventas-core: Pure Domain Logic for Ventas
//!
//! Everything the sales client decides without talking to the gateway:
//! entity shapes, money, list filtering, the entity editor and the sale
//! composer.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ventas Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    ventas CLI (apps/cli)                        │   │
//! │  │    clientes ──► productos ──► ventas ──► home / config          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ventas-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  composer │  │  search   │  │   │
//! │  │   │ Customer  │  │   Money   │  │ SaleDraft │  │  editor   │  │   │
//! │  │   │ Product   │  │           │  │ LineItem  │  │ validation│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ventas-gateway (HTTP repositories)                │   │
//! │  │        /clientes  /productos  /ventas  on the REST gateway      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Customer, Product, Sale and their wire names
//! - [`money`] - Integer-cent money used for sale totals
//! - [`error`] - Domain error types
//! - [`validation`] - Required-field checks
//! - [`search`] - Case-insensitive list filtering
//! - [`editor`] - Create/edit state for customers and products
//! - [`composer`] - The sale draft and its state machine
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ventas_core::{Product, SaleComposer};
//!
//! let catalog = vec![Product { id: Some(7), ..Product::new("Yerba", "Playadito", 20.0, 3) }];
//!
//! let mut composer = SaleComposer::new();
//! composer.begin_new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap();
//! composer.add_line_item(7, &catalog).unwrap();
//!
//! assert_eq!(composer.draft().unwrap().total.to_decimal(), 20.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod composer;
pub mod editor;
pub mod error;
pub mod money;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use composer::{ComposerState, LineItem, PricedLine, SaleComposer, SaleDraft, SubmitRequest};
pub use editor::{EditMode, Editor, SaveRequest};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use search::Searchable;
pub use types::*;
pub use validation::Validate;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum units of a single product in one sale.
///
/// Guards against typing 1000 instead of 10 when setting a quantity.
pub const MAX_ITEM_QUANTITY: u32 = 999;
