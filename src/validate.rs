//! Numeric range validation
//!
//! Inclusive per-domain range tables, checked before any encoding or
//! inference. Table rows are listed in wire-contract field order so
//! predictors can zip them against parsed values and fail fast on the
//! first offending field.

use crate::error::ValidationError;

/// One validated field: wire name plus inclusive bounds.
#[derive(Debug, Clone, Copy)]
pub struct FieldRange {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    pub fn check(&self, value: f64) -> Result<(), ValidationError> {
        check(self.field, value, self.min, self.max)
    }
}

/// Check one value against inclusive bounds.
///
/// Boundary values pass. Non-finite values (NaN, infinities) never pass;
/// `f64::from_str` accepts "NaN" so this must be guarded here rather than
/// at the parse step.
pub fn check(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

// ============================================================================
// Range tables
// ============================================================================

/// Crop recommendation inputs: [n, p, k, temperature, humidity, ph, rainfall].
pub static CROP_RANGES: &[FieldRange] = &[
    FieldRange { field: "n", min: 0.0, max: 140.0 },
    FieldRange { field: "p", min: 5.0, max: 145.0 },
    FieldRange { field: "k", min: 5.0, max: 205.0 },
    FieldRange { field: "temperature", min: 0.0, max: 50.0 },
    FieldRange { field: "humidity", min: 0.0, max: 100.0 },
    FieldRange { field: "ph", min: 0.0, max: 14.0 },
    FieldRange { field: "rainfall", min: 0.0, max: 5000.0 },
];

/// Fertilizer recommendation numeric inputs:
/// [temperature, humidity, moisture, n, p, k].
pub static FERTILIZER_RANGES: &[FieldRange] = &[
    FieldRange { field: "temperature", min: 0.0, max: 60.0 },
    FieldRange { field: "humidity", min: 0.0, max: 100.0 },
    FieldRange { field: "moisture", min: 0.0, max: 100.0 },
    FieldRange { field: "n", min: 0.0, max: 200.0 },
    FieldRange { field: "p", min: 0.0, max: 200.0 },
    FieldRange { field: "k", min: 0.0, max: 200.0 },
];

/// Yield estimation numeric inputs:
/// [Rainfall_mm, Temperature_Celsius, Days_to_Harvest].
pub static YIELD_RANGES: &[FieldRange] = &[
    FieldRange { field: "Rainfall_mm", min: 0.0, max: 5000.0 },
    FieldRange { field: "Temperature_Celsius", min: 0.0, max: 60.0 },
    FieldRange { field: "Days_to_Harvest", min: 1.0, max: 365.0 },
];

// ============================================================================
// Tests
// ============================================================================
