//! # Domain Types
//!
//! The three entities kept on the sales gateway.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Customer     │   │    Product      │   │       Sale          │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id_cliente?    │   │  codigo_producto│   │  codigo_venta?      │   │
//! │  │  nombre         │   │  cantidad_disp. │   │  fecha_venta        │   │
//! │  │  apellido       │   │  costo (f64)    │   │  total (f64)        │   │
//! │  │  dni            │   │  nombre, marca  │   │  listaProductos ────┼─┐ │
//! │  └────────▲────────┘   └────────▲────────┘   │  unCliente ─────┐   │ │ │
//! │           │                     │            └─────────────────┼───┘ │ │
//! │           └─────────────────────┼──────────────────────────────┘     │ │
//! │                                 └──── ProductRef { codigo_producto } ◄┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Identifiers are integers assigned by the gateway. They are `None` on a
//! value that has not been persisted yet, which is also how the create
//! bodies leave them out.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Server-assigned identifier shared by all entities.
pub type EntityId = i64;

/// Common surface of the entities the gateway stores.
pub trait Entity: Clone {
    /// Human-readable kind, used in log fields and messages.
    const KIND: &'static str;

    /// The server-assigned identifier, if persisted.
    fn id(&self) -> Option<EntityId>;
}

// =============================================================================
// Customer
// =============================================================================

/// A customer of the business.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    /// Server-assigned identifier.
    #[serde(rename = "id_cliente", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    #[serde(rename = "nombre")]
    pub first_name: String,

    #[serde(rename = "apellido")]
    pub last_name: String,

    /// National identity document number.
    ///
    /// Customers nested inside a sale may arrive without it.
    #[serde(rename = "dni", default)]
    pub national_id: String,
}

impl Customer {
    /// Creates an unsaved customer.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        national_id: impl Into<String>,
    ) -> Self {
        Customer {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            national_id: national_id.into(),
        }
    }

    /// "First Last", as shown in the sales table.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Customer {
    const KIND: &'static str = "Customer";

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Server-assigned identifier.
    #[serde(rename = "codigo_producto", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    /// Units in stock. Expected to be non-negative; not enforced.
    #[serde(rename = "cantidad_disponible", default)]
    pub available_quantity: i64,

    /// Unit cost as sent by the gateway.
    #[serde(rename = "costo")]
    pub unit_cost: f64,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "marca", default)]
    pub brand: String,
}

impl Product {
    /// Creates an unsaved product.
    pub fn new(
        name: impl Into<String>,
        brand: impl Into<String>,
        unit_cost: f64,
        available_quantity: i64,
    ) -> Self {
        Product {
            id: None,
            available_quantity,
            unit_cost,
            name: name.into(),
            brand: brand.into(),
        }
    }

    /// Unit cost as Money. A cost that is not a finite number counts as zero.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_decimal(self.unit_cost).unwrap_or_default()
    }
}

impl Entity for Product {
    const KIND: &'static str = "Product";

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

// =============================================================================
// Sale
// =============================================================================

/// Reference from a sale to a product, as carried in `listaProductos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductRef {
    #[serde(rename = "codigo_producto")]
    pub product_id: EntityId,
}

impl ProductRef {
    pub const fn new(product_id: EntityId) -> Self {
        ProductRef { product_id }
    }
}

/// A sale as stored on the gateway.
///
/// The same product may be referenced several times in `items`; each
/// reference is one unit of that product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    /// Server-assigned identifier.
    #[serde(rename = "codigo_venta", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    /// Calendar date, encoded as `YYYY-MM-DD`.
    #[serde(rename = "fecha_venta")]
    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Total as last computed by the client that saved the sale.
    pub total: f64,

    #[serde(rename = "listaProductos", default)]
    pub items: Vec<ProductRef>,

    #[serde(rename = "unCliente", default)]
    pub customer: Option<Customer>,
}

impl Sale {
    /// Customer name for display, empty when no customer is attached.
    pub fn customer_name(&self) -> String {
        self.customer
            .as_ref()
            .map(Customer::full_name)
            .unwrap_or_default()
    }
}

impl Entity for Sale {
    const KIND: &'static str = "Sale";

    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
