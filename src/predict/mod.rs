//! Predictors
//!
//! One module per prediction operation. Each predictor borrows the registry
//! for the duration of a single request and runs the same pipeline:
//! availability check, range validation, categorical encoding, feature
//! assembly in trained column order, inference, formatting.

pub mod crop;
pub mod fertilizer;
pub mod yield_estimate;

pub use crop::{CropPrediction, CropPredictor};
pub use fertilizer::{FertilizerPrediction, FertilizerPredictor};
pub use yield_estimate::{YieldPrediction, YieldPredictor, YieldSource};
