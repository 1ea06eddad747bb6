//! Error types for the Child Care Subsidy engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! The engine distinguishes two classes of failure:
//!
//! - **Configuration errors**: the rate schedule or regional fee table is
//!   missing, malformed or lacks a key a calculation needs. These indicate
//!   stale or incomplete reference data.
//! - **Invalid arguments**: a caller passed a value outside the documented
//!   domain (e.g. six care days per week). These indicate a bug in the
//!   calling layer.

use thiserror::Error;

use crate::models::{CareType, RateCapAgeGroup, State};

/// The main error type for the Child Care Subsidy engine.
///
/// # Example
///
/// ```
/// use ccs_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/ccs.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/ccs.yaml");
/// assert!(error.is_configuration_error());
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

    /// Configuration parsed but is structurally unusable.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// A description of the inconsistency.
        message: String,
    },

    /// No hourly rate cap exists for the care type and age group.
    #[error("Hourly rate cap not found for care type '{care_type}' and age group '{age_group}'")]
    MissingRateCap {
        /// The care type that was looked up.
        care_type: CareType,
        /// The age group that was looked up.
        age_group: RateCapAgeGroup,
    },

    /// No regional average fee exists for the state and care type.
    #[error("Regional average fee not found for state '{state}' and care type '{care_type}'")]
    MissingRegionalAverage {
        /// The state or territory that was looked up.
        state: State,
        /// The care type that was looked up.
        care_type: CareType,
    },

    /// A value was outside the documented domain of an operation.
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument {
        /// The argument that was invalid.
        field: String,
        /// A description of what made the argument invalid.
        message: String,
    },
}

impl EngineError {
    /// Creates an [`EngineError::InvalidArgument`].
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if the error stems from bad or incomplete reference data
    /// rather than from the caller's input.
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::InvalidArgument { .. })
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
