//! Binding between entity types and the gateway's resource groups.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use ventas_core::{Customer, Entity, Product, Sale};

/// An entity stored under its own resource group on the gateway.
pub trait Resource: Entity + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Path segment of the group, e.g. `clientes`.
    const COLLECTION: &'static str;

    /// JSON body for create and edit calls.
    fn write_body(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Resource for Customer {
    const COLLECTION: &'static str = "clientes";
}

impl Resource for Product {
    const COLLECTION: &'static str = "productos";

    /// Products are addressed by the URL only; the body never carries
    /// `codigo_producto`.
    fn write_body(&self) -> Result<Value, serde_json::Error> {
        let mut body = serde_json::to_value(self)?;
        if let Value::Object(fields) = &mut body {
            fields.remove("codigo_producto");
        }
        Ok(body)
    }
}

impl Resource for Sale {
    const COLLECTION: &'static str = "ventas";
}
