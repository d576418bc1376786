//! Error types for the tax calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Ordinary arithmetic edge cases (negative income, zero divisors) never
//! error; they clamp to zero. Errors are reserved for configuration
//! problems: missing or malformed tables, unsupported states, and inputs
//! that reference entries the loaded tables do not contain.

use thiserror::Error;

/// The main error type for the tax calculation engine.
///
/// All fallible operations in the engine return this error type.
///
/// # Example
///
/// ```
/// use traveltax_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A bracket table in the configuration violates its ordering invariants.
    #[error("Invalid bracket table '{table}': {message}")]
    InvalidBracketTable {
        /// Which table is malformed (e.g. "federal", "CA").
        table: String,
        /// A description of the violated invariant.
        message: String,
    },

    /// The state code is neither a no-income-tax state nor present in the
    /// bracket tables.
    #[error("State not supported: {state}")]
    StateNotSupported {
        /// The state code that was not found.
        state: String,
    },

    /// A checklist status referenced an item id the compliance configuration
    /// does not define.
    #[error("Checklist item not found: {id}")]
    ChecklistItemNotFound {
        /// The unknown checklist item id.
        id: String,
    },

    /// No standard mileage rate is configured for the given year.
    #[error("Mileage rate not found for year {year}")]
    MileageRateNotFound {
        /// The year for which a rate was requested.
        year: i32,
    },

    /// The tax year is outside the representable calendar range.
    #[error("Invalid tax year: {year}")]
    InvalidTaxYear {
        /// The rejected year.
        year: i32,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
