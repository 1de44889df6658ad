//! # CLI Error Type
//!
//! What the user is told when an action fails.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Ventas                                 │
//! │                                                                         │
//! │  View action (load / save / delete / submit)                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Gateway error? ─── GatewayError::Transport / Status / Decode ──┐      │
//! │         │                                                        │      │
//! │         ▼                                                        ▼      │
//! │  Local precondition? ─── CoreError::CustomerRequired ─────── CliError  │
//! │         │                                                        │      │
//! │         ▼                                                        ▼      │
//! │  Success ─────────────────────────────────────────────────► Notifier   │
//! │                                                                         │
//! │  Every failure becomes one error notification; the view keeps its      │
//! │  pre-action state and nothing is retried.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use ventas_core::{CoreError, ValidationError};
use ventas_gateway::GatewayError;

/// An action failure, ready to show.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes, one per failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// The gateway could not be reached
    Unreachable,

    /// The gateway answered with a non-success status
    Rejected,

    /// The gateway answered with a malformed payload
    MalformedResponse,

    /// A required field is missing or a value is invalid
    ValidationError,

    /// The action is not allowed in the current state
    Precondition,

    /// The requested record is not in the loaded list
    NotFound,

    /// Configuration could not be loaded, saved or validated
    Configuration,
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: i64) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} {} not found", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }
}

impl From<GatewayError> for CliError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Transport(e) => {
                tracing::error!("Gateway unreachable: {}", e);
                CliError::new(ErrorCode::Unreachable, "Could not connect to the server")
            }
            GatewayError::Status { status, .. } => CliError::new(
                ErrorCode::Rejected,
                format!("The server rejected the request (status {})", status),
            ),
            GatewayError::Decode(e) => {
                tracing::error!("Malformed gateway payload: {}", e);
                CliError::new(
                    ErrorCode::MalformedResponse,
                    format!("The server sent malformed {} data", e.entity.to_lowercase()),
                )
            }
            GatewayError::Encode(e) => {
                tracing::error!("Request encoding failed: {}", e);
                CliError::new(ErrorCode::ValidationError, "Could not encode the request")
            }
            other @ (GatewayError::InvalidConfig(_)
            | GatewayError::InvalidUrl(_)
            | GatewayError::ConfigLoadFailed(_)
            | GatewayError::ConfigSaveFailed(_)) => {
                CliError::new(ErrorCode::Configuration, other.to_string())
            }
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => CliError::from(e),
            CoreError::LineItemNotFound(id) => CliError::not_found("Sale line for product", id),
            other @ (CoreError::NotEditing
            | CoreError::SubmissionInFlight
            | CoreError::CustomerRequired
            | CoreError::MissingIdentifier { .. }) => {
                CliError::new(ErrorCode::Precondition, other.to_string())
            }
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}
