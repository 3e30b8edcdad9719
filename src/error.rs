//! Error types for the Profit-Sharing Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading rules or
//! calculating distributions.

use thiserror::Error;

/// The main error type for the Profit-Sharing Engine.
///
/// A share of zero is never an error: "no profit this period" and "minimum
/// not reached" are ordinary results. Errors are reserved for data that
/// cannot be interpreted at all.
///
/// # Example
///
/// ```
/// use profit_sharing_engine::error::EngineError;
///
/// let error = EngineError::UnknownFormulaType {
///     project_id: "prj_001".to_string(),
///     formula_type: "BOGUS".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Unknown formula type 'BOGUS' for project 'prj_001'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The rules reference a formula type that has no registered strategy.
    #[error("Unknown formula type '{formula_type}' for project '{project_id}'")]
    UnknownFormulaType {
        /// The project whose rules carry the formula type.
        project_id: String,
        /// The formula type identifier as stored.
        formula_type: String,
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

    /// No rules are configured for the requested project.
    #[error("No profit-sharing rules configured for project: {project_id}")]
    RulesNotFound {
        /// The project identifier that was looked up.
        project_id: String,
    },

    /// An amount fell outside the range of a 96-bit decimal.
    #[error("Amount out of range while calculating project '{project_id}'")]
    AmountOverflow {
        /// The project whose figures overflowed.
        project_id: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
