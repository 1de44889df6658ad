//! # State Module
//!
//! The read-models behind each section of the CLI. Each view owns its
//! repositories, a cached copy of what the gateway last returned, and the
//! editor for its form.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │ EntityListView   │ │ EntityListView   │ │     SalesView        │   │
//! │  │   <Customer>     │ │   <Product>      │ │                      │   │
//! │  │                  │ │                  │ │  customers, products │   │
//! │  │  items           │ │  items           │ │  sales               │   │
//! │  │  Editor<T>       │ │  Editor<T>       │ │  SaleComposer        │   │
//! │  └────────┬─────────┘ └────────┬─────────┘ └──────────┬───────────┘   │
//! │           │                    │                      │                │
//! │           └──────────── Repository<E> ────────────────┘                │
//! │                                                                         │
//! │  DisplayConfig: read-only after startup                                │
//! │  Notifier: one message per action outcome                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Views are generic over the repository so tests run them against
//! `testing::InMemoryRepository` and the binary against `HttpRepository`.

mod config;
mod entity_list;
mod sales;

#[cfg(test)]
pub mod testing;

pub use config::DisplayConfig;
pub use entity_list::{EntityListView, Listable};
pub use sales::{LoadStatus, SalesView};
