//! Error taxonomy for the prediction pipeline
//!
//! Four failure kinds cross the predictor boundary: numeric validation,
//! categorical encoding, model/encoder absence, and inference faults.
//! None of them become transport errors; handlers format each into a
//! stable user-facing string (see `format`) and log per severity.

use thiserror::Error;

use crate::registry::Domain;

/// Numeric input rejected before any encoding or inference runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is not a number (got {value:?})")]
    NotNumeric { field: &'static str, value: String },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl ValidationError {
    /// Wire-contract name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NotNumeric { field, .. } => field,
            ValidationError::OutOfRange { field, .. } => field,
        }
    }
}

/// Categorical input not present in the encoder's trained vocabulary.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown {feature} value {value:?}")]
pub struct EncodingError {
    pub feature: String,
    pub value: String,
}

impl EncodingError {
    pub fn new(feature: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            feature: feature.into(),
            value: value.into(),
        }
    }
}

/// Everything a predictor can report back to a handler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("{domain} model unavailable")]
    ModelUnavailable { domain: Domain },

    #[error("{domain} inference failed: {reason}")]
    Inference { domain: Domain, reason: String },
}

impl PredictError {
    pub fn unavailable(domain: Domain) -> Self {
        PredictError::ModelUnavailable { domain }
    }

    pub fn inference(domain: Domain, reason: impl ToString) -> Self {
        PredictError::Inference {
            domain,
            reason: reason.to_string(),
        }
    }

    /// Machine-readable code for the JSON API.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::Validation(_) => "validation",
            PredictError::Encoding(_) => "encoding",
            PredictError::ModelUnavailable { .. } => "unavailable",
            PredictError::Inference { .. } => "inference",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
