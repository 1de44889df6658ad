//! # Error Types
//!
//! Domain-specific error types for ventas-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ventas-core errors (this file)                                        │
//! │  ├── CoreError        - Editor / composer precondition failures        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  ventas-gateway errors (separate crate)                                │
//! │  └── GatewayError     - Transport, status and decode failures          │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │                        GatewayError ─┴─► CliError → Notification       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::EntityId;

// =============================================================================
// Core Error
// =============================================================================

/// Precondition failures raised by the editing state machines.
///
/// None of these ever reach the gateway: they are detected locally and the
/// view reports them the same way it reports a failed request.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    /// An operation needs an open composer or editor.
    #[error("Nothing is being edited")]
    NotEditing,

    /// A submission is already waiting for the gateway.
    ///
    /// ## When This Occurs
    /// ```text
    /// submit() ──► Submitting ──► (request in flight)
    ///                  │
    ///                  └── submit() again ──► SubmissionInFlight
    /// ```
    #[error("A submission is already in progress")]
    SubmissionInFlight,

    /// A sale cannot be submitted without a customer.
    #[error("A customer must be selected before saving the sale")]
    CustomerRequired,

    /// Editing or deleting needs the server-assigned identifier.
    #[error("{entity} has no identifier")]
    MissingIdentifier { entity: &'static str },

    /// The draft holds no line for the product.
    #[error("Product {0} is not part of the sale")]
    LineItemNotFound(EntityId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
