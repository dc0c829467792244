//! Crop recommendation
//!
//! Feature order `[n, p, k, temperature, humidity, ph, rainfall]`, matching
//! both the wire contract and the trained model.

use crate::error::PredictError;
use crate::format;
use crate::registry::{Domain, ModelRegistry};
use crate::request::CropRequest;
use crate::validate::CROP_RANGES;

#[derive(Debug, Clone, PartialEq)]
pub struct CropPrediction {
    /// Display-cased crop label ("Rice", not "rice").
    pub label: String,
}

pub struct CropPredictor<'a> {
    registry: &'a ModelRegistry,
}

impl<'a> CropPredictor<'a> {
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self { registry }
    }

    /// Absence dominates: an absent crop model answers unavailable no matter
    /// what the inputs look like. Valid inputs then fail fast on the first
    /// out-of-range field.
    pub fn predict(&self, request: &CropRequest) -> Result<CropPrediction, PredictError> {
        let model = self
            .registry
            .crop
            .as_present()
            .ok_or_else(|| PredictError::unavailable(Domain::Crop))?;

        let features = [
            request.n,
            request.p,
            request.k,
            request.temperature,
            request.humidity,
            request.ph,
            request.rainfall,
        ];
        for (range, value) in CROP_RANGES.iter().zip(features) {
            range.check(value)?;
        }

        let label = model
            .predict(&features)
            .map_err(|err| PredictError::inference(Domain::Crop, err))?;
        Ok(CropPrediction {
            label: format::capitalize_first(&label),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{CropModel, DecisionTree, TreeNode};
    use crate::registry::ModelHandle;

    fn crop_feature_names() -> Vec<String> {
        ["n", "p", "k", "temperature", "humidity", "ph", "rainfall"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Splits on rainfall at 150: dry side maize, wet side rice.
    fn demo_model() -> CropModel {
        CropModel::new(
            crop_feature_names(),
            None,
            vec!["maize".to_string(), "rice".to_string()],
            DecisionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 6,
                        threshold: 150.0,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf { value: 0.0 },
                    TreeNode::Leaf { value: 1.0 },
                ],
            },
        )
    }

    fn demo_registry() -> ModelRegistry {
        let mut registry = ModelRegistry::all_absent("not loaded in test");
        registry.crop = ModelHandle::Present(demo_model());
        registry
    }

    fn valid_request() -> CropRequest {
        CropRequest {
            n: 90.0,
            p: 42.0,
            k: 43.0,
            temperature: 20.8,
            humidity: 82.0,
            ph: 6.5,
            rainfall: 202.9,
        }
    }

    #[test]
    fn test_predict_returns_display_cased_label() {
        let registry = demo_registry();
        let predictor = CropPredictor::new(&registry);
        let prediction = predictor.predict(&valid_request()).unwrap();
        assert_eq!(prediction.label, "Rice", "wet side should recommend rice");

        let mut dry = valid_request();
        dry.rainfall = 80.0;
        assert_eq!(predictor.predict(&dry).unwrap().label, "Maize");
    }

    #[test]
    fn test_absent_model_dominates_even_invalid_input() {
        let registry = ModelRegistry::all_absent("never loaded");
        let predictor = CropPredictor::new(&registry);

        let mut request = valid_request();
        request.ph = 99.0; // invalid on its own
        let err = predictor.predict(&request).unwrap_err();
        assert_eq!(err, PredictError::unavailable(Domain::Crop));
    }

    #[test]
    fn test_out_of_range_field_fails_fast() {
        let registry = demo_registry();
        let predictor = CropPredictor::new(&registry);

        let mut request = valid_request();
        request.n = 141.0;
        request.ph = 15.0; // later field, should not be reached
        match predictor.predict(&request).unwrap_err() {
            PredictError::Validation(inner) => assert_eq!(inner.field(), "n"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_inference_fault_maps_to_inference_error() {
        // Leaf indexes a class that does not exist.
        let broken = CropModel::new(
            crop_feature_names(),
            None,
            vec!["maize".to_string()],
            DecisionTree {
                nodes: vec![TreeNode::Leaf { value: 9.0 }],
            },
        );
        let mut registry = ModelRegistry::all_absent("not loaded in test");
        registry.crop = ModelHandle::Present(broken);

        let predictor = CropPredictor::new(&registry);
        let err = predictor.predict(&valid_request()).unwrap_err();
        assert_eq!(err.kind(), "inference");
    }
}
