//! Error types for the salary engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during salary decomposition,
//! payroll calculation, and amount formatting.

use thiserror::Error;

/// The main error type for the salary engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/policies.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/policies.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// An input value was non-numeric, negative, or out of range.
    ///
    /// The engine rejects invalid inputs at the function boundary rather
    /// than coercing them to zero and letting the error propagate through
    /// the arithmetic.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A compensation policy is internally inconsistent.
    ///
    /// Raised when a policy's fixed and percentage components would force
    /// the balancing component negative, when a policy carries more than
    /// one balancing component, or when a percent-of-basic rule exists
    /// without a basic component.
    #[error("Policy '{policy}' is misconfigured: {message}")]
    PolicyConfiguration {
        /// The name of the offending policy.
        policy: String,
        /// A description of the configuration problem.
        message: String,
    },

    /// No policy is registered for the requested document type.
    #[error("No policy registered for document type '{document_type}'")]
    PolicyNotFound {
        /// The document type that has no policy.
        document_type: String,
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

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    Calculation {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
