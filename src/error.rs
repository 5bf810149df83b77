//! Custom error types for the budget ledger
//!
//! This module defines the error hierarchy for the library using thiserror.
//! Validation, not-found and conflict errors are kept as distinct variants so
//! a transport layer can map them to its own status codes.

use thiserror::Error;

use crate::engine::GraphError;
use crate::models::money::MoneyParseError;
use crate::models::validate::ValidationError;

/// The main error type for ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid user input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Malformed amount text
    #[error("Invalid amount: {0}")]
    Money(#[from] MoneyParseError),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Structural conflicts (spend type cycles, types still in use)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    fn not_found(entity_type: &'static str, identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            identifier: identifier.to_string(),
        }
    }

    pub fn month_not_found(identifier: impl ToString) -> Self {
        Self::not_found("Month", identifier)
    }

    pub fn day_not_found(identifier: impl ToString) -> Self {
        Self::not_found("Day", identifier)
    }

    pub fn income_not_found(identifier: impl ToString) -> Self {
        Self::not_found("Income", identifier)
    }

    pub fn monthly_payment_not_found(identifier: impl ToString) -> Self {
        Self::not_found("Monthly Payment", identifier)
    }

    pub fn spend_not_found(identifier: impl ToString) -> Self {
        Self::not_found("Spend", identifier)
    }

    pub fn spend_type_not_found(identifier: impl ToString) -> Self {
        Self::not_found("Spend Type", identifier)
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error (including malformed amounts)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Money(_))
    }

    /// Check if this is a structural conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<GraphError> for LedgerError {
    fn from(err: GraphError) -> Self {
        Self::Conflict(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
