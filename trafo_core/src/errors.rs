//! # Error Types
//!
//! Structured error types for trafo_core. These errors are designed to be
//! informative for both humans and programs, providing enough context to
//! understand and fix issues without parsing message strings.
//!
//! There are two failure classes:
//!
//! - [`CalcError::InvalidInput`] - a precondition was violated; no stage ran.
//! - [`CalcError::DesignInfeasible`] - every stage ran, but the design is not
//!   buildable. The complete numeric result travels with the error so the
//!   caller can inspect intermediate values.
//!
//! Advisory verdicts (window fill, elevated temperature) are never errors;
//! they are fields of [`DesignResult`].
//!
//! ## Example
//!
//! ```rust
//! use trafo_core::errors::{CalcError, CalcResult};
//!
//! fn validate_frequency(frequency_hz: f64) -> CalcResult<()> {
//!     if frequency_hz <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "frequency_hz",
//!             frequency_hz.to_string(),
//!             "Frequency must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_frequency(-50.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::design::DesignResult;
use crate::calculations::winding::InfeasibilityIssue;

/// Result type alias for trafo_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for design operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive, out of range, unknown option)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The pipeline completed but at least one winding is not practical to build
    #[error("Design infeasible: {}", summarize(.issues))]
    DesignInfeasible {
        issues: Vec<InfeasibilityIssue>,
        result: Box<DesignResult>,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

fn summarize(issues: &[InfeasibilityIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DesignInfeasible error carrying the full numeric result
    pub fn design_infeasible(issues: Vec<InfeasibilityIssue>, result: DesignResult) -> Self {
        CalcError::DesignInfeasible {
            issues,
            result: Box::new(result),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// The numeric result attached to an infeasible design, if any
    pub fn partial_result(&self) -> Option<&DesignResult> {
        match self {
            CalcError::DesignInfeasible { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DesignInfeasible { .. } => "DESIGN_INFEASIBLE",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("input_voltage_v", "-5", "Voltage must be positive");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::serialization("bad").error_code(), "SERIALIZATION_ERROR");
        assert_eq!(
            CalcError::invalid_input("fill_factor", "0", "x").error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_invalid_input_message_names_field() {
        let error = CalcError::invalid_input("frequency_hz", "0", "Frequency must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid input for 'frequency_hz': 0 - Frequency must be positive"
        );
        assert!(error.partial_result().is_none());
    }

    #[test]
    fn test_json_error_conversion() {
        let err: CalcError = serde_json::from_str::<f64>("not a number").unwrap_err().into();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
