//! # ventas-gateway: REST Gateway Client
//!
//! Typed access to the remote sales gateway plus the application
//! configuration that says where it lives.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   View ──► Repository<E> ──► HttpRepository<E> ──► reqwest ──► Gateway  │
//! │                                     │                                   │
//! │                                     ├── Resource::write_body (encode)   │
//! │                                     └── serde_json (strict decode)      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`config`] - TOML file, environment overrides, validation
//! - [`error`] - `GatewayError` and `DecodeError`
//! - [`repository`] - The `Repository` trait
//! - [`resource`] - Entity to resource-group binding and request bodies
//! - [`http`] - reqwest implementation

pub mod config;
pub mod error;
pub mod http;
pub mod repository;
pub mod resource;

pub use config::{AppConfig, DisplaySettings, GatewaySettings, DEFAULT_BASE_URL};
pub use error::{DecodeError, GatewayError, GatewayResult};
pub use http::{Gateway, HttpRepository};
pub use repository::Repository;
pub use resource::Resource;
