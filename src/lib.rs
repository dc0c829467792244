//! Farm Advisor Rust Implementation
//!
//! Web-facing inference gateway for farm planning: crop recommendation,
//! fertilizer recommendation and yield estimation served over HTML forms
//! and a JSON API.
//!
//! Module layout:
//! - `registry`: models and encoders loaded once at startup, absence as data
//! - `artifact` / `encoder`: JSON decision-tree and vocabulary artifacts
//! - `validate` / `request`: range tables and typed wire parsing
//! - `predict`: the three prediction pipelines (yield with a heuristic
//!   fallback)
//! - `format`: stable user-facing strings
//! - `api_server` / `web`: Axum router, form and JSON handlers, Askama pages

pub mod api_server;
pub mod artifact;
pub mod encoder;
pub mod error;
pub mod format;
pub mod predict;
pub mod registry;
pub mod request;
pub mod validate;
pub mod web;

// Re-export commonly used types
pub use api_server::{create_router, AppState};
pub use artifact::{ClassOutput, CropModel, DecisionTree, FertilizerModel, TreeNode, YieldModel};
pub use encoder::CategoryEncoder;
pub use error::{EncodingError, PredictError, ValidationError};
pub use format::FormattedResult;
pub use predict::{CropPredictor, FertilizerPredictor, YieldPredictor, YieldSource};
pub use registry::{Domain, EncoderSlot, ModelHandle, ModelRegistry};
pub use request::{CropForm, FertilizerForm, Flag, YieldForm};
