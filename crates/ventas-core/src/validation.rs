//! # Validation Module
//!
//! The only validation this client performs is checking that required text
//! fields are filled in before a save, plus parsing the few values typed on
//! the command line. Everything else is the gateway's business.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: CLI argument parsing (clap)                                   │
//! │  ├── Types: integers, floats                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Required fields (customer name, DNI, product name, brand)          │
//! │  └── Date and quantity formats                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Gateway                                                       │
//! │  └── Whatever the server enforces (reported as a status failure)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{Customer, Product};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Entities whose editor form can be checked before saving.
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

// =============================================================================
// String Validators
// =============================================================================

/// Fails when `value` is empty or whitespace only.
///
/// ## Example
/// ```rust
/// use ventas_core::validation::validate_required;
///
/// assert!(validate_required("nombre", "Ana").is_ok());
/// assert!(validate_required("nombre", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Parses a sale date in the `YYYY-MM-DD` form the gateway stores.
pub fn parse_sale_date(value: &str) -> ValidationResult<NaiveDate> {
    let value = value.trim();
    validate_required("fecha_venta", value)?;

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| ValidationError::InvalidFormat {
        field: "fecha_venta".to_string(),
        reason: format!("expected YYYY-MM-DD ({})", e),
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

impl Validate for Customer {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("nombre", &self.first_name)?;
        validate_required("apellido", &self.last_name)?;
        validate_required("dni", &self.national_id)
    }
}

impl Validate for Product {
    fn validate(&self) -> ValidationResult<()> {
        validate_required("nombre", &self.name)?;
        validate_required("marca", &self.brand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required() {
        assert!(validate_required("dni", "30111222").is_ok());
        assert_eq!(
            validate_required("dni", ""),
            Err(ValidationError::Required {
                field: "dni".to_string()
            })
        );
        assert!(validate_required("dni", " \t").is_err());
    }

    #[test]
    fn test_customer_requires_every_text_field() {
        assert!(Customer::new("Ana", "Gómez", "1").validate().is_ok());
        assert!(Customer::new("", "Gómez", "1").validate().is_err());
        assert!(Customer::new("Ana", "", "1").validate().is_err());
        assert!(Customer::new("Ana", "Gómez", "").validate().is_err());
        assert!(Customer::default().validate().is_err());
    }

    #[test]
    fn test_product_requires_name_and_brand() {
        assert!(Product::new("Yerba", "Playadito", 0.0, 0).validate().is_ok());
        assert!(Product::new("", "Playadito", 1.0, 1).validate().is_err());
        assert!(Product::new("Yerba", "", 1.0, 1).validate().is_err());
    }

    #[test]
    fn test_parse_sale_date() {
        assert_eq!(
            parse_sale_date("2024-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert!(parse_sale_date("01/01/2024").is_err());
        assert!(parse_sale_date("").is_err());
        assert!(parse_sale_date("2024-02-30").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(1000).is_err());
    }
}
