//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the calculator, the edit session and the configuration
//! loader can report. Transport failures live in [`crate::client::ClientError`]
//! and are wrapped here when they surface through an edit session.

use thiserror::Error;

use crate::client::ClientError;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use site_payroll::error::EngineError;
///
/// let error = EngineError::UnknownField {
///     field: "bonus".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown payroll field: bonus");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A field name did not match any editable payroll field.
    #[error("Unknown payroll field: {field}")]
    UnknownField {
        /// The name that was not recognised.
        field: String,
    },

    /// A category name did not match any insurance category.
    #[error("Unknown insurance category: {name}")]
    UnknownCategory {
        /// The name that was not recognised.
        name: String,
    },

    /// Input for a numeric field could not be parsed and the active policy
    /// rejects it.
    #[error("Invalid input for '{field}': {value:?} is not a number")]
    InvalidInput {
        /// The wire name of the field.
        field: String,
        /// The raw input.
        value: String,
    },

    /// Input for a monetary field parsed, but its magnitude exceeds
    /// [`crate::models::money::MAX_AMOUNT`].
    #[error("Amount for '{field}' is out of range: {value:?}")]
    AmountOutOfRange {
        /// The wire name of the field.
        field: String,
        /// The raw input.
        value: String,
    },

    /// An edit session operation was attempted in the wrong state.
    #[error("Cannot {operation} while {state}")]
    InvalidTransition {
        /// The attempted operation.
        operation: &'static str,
        /// The state the session was in.
        state: &'static str,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The remote payroll store failed a fetch or save.
    #[error("Payroll store error: {0}")]
    Store(#[from] ClientError),
}

impl EngineError {
    /// Returns true when the remote store rejected the bearer token.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, EngineError::Store(ClientError::AuthExpired { .. }))
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
