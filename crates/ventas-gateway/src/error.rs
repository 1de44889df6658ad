//! # Gateway Error Types
//!
//! Error types for gateway calls and configuration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Gateway Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  Status (non-2xx)       │ │
//! │  │  InvalidUrl     │  │  (unreachable,  │  │  Decode (malformed      │ │
//! │  │  ConfigLoad/    │  │   timeout,      │  │   payload)              │ │
//! │  │  SaveFailed     │  │   reset)        │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these is retried automatically. A failed call is reported once
//! and the user decides whether to try again.

use thiserror::Error;

/// Result type alias for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// A response body that does not match the expected entity shape.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Malformed {entity} payload: {message}")]
pub struct DecodeError {
    /// Entity kind that was being decoded.
    pub entity: &'static str,

    /// Decoder message, including line and column.
    pub message: String,
}

impl DecodeError {
    pub fn new(entity: &'static str, err: serde_json::Error) -> Self {
        DecodeError {
            entity,
            message: err.to_string(),
        }
    }
}

/// Gateway error type covering every failure of a call or of the config.
#[derive(Debug, Error)]
pub enum GatewayError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid gateway configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid gateway URL.
    #[error("Invalid gateway URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Call Errors
    // =========================================================================
    /// The request never got a response.
    #[error("Could not reach the gateway: {0}")]
    Transport(String),

    /// The gateway answered with a non-success status.
    #[error("Gateway rejected {method} {path} with status {status}")]
    Status {
        method: &'static str,
        path: String,
        status: u16,
    },

    /// The gateway answered with a body that is not the expected shape.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A request body could not be encoded.
    #[error("Could not encode request body: {0}")]
    Encode(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}

impl From<url::ParseError> for GatewayError {
    fn from(err: url::ParseError) -> Self {
        GatewayError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        GatewayError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for GatewayError {
    fn from(err: toml::de::Error) -> Self {
        GatewayError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for GatewayError {
    fn from(err: toml::ser::Error) -> Self {
        GatewayError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl GatewayError {
    /// Returns true if the gateway could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport(_))
    }

    /// Returns the HTTP status of a rejected call.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the response body could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, GatewayError::Decode(_))
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            GatewayError::InvalidConfig(_)
                | GatewayError::InvalidUrl(_)
                | GatewayError::ConfigLoadFailed(_)
                | GatewayError::ConfigSaveFailed(_)
        )
    }
}
