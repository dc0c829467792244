//! Fertilizer recommendation
//!
//! The trained column order is `[temperature, humidity, moisture, soil_code,
//! crop_code, n, k, p]` with potassium before phosphorus; the feature
//! assembly here preserves that ordering exactly.

use crate::error::PredictError;
use crate::format;
use crate::registry::{Domain, ModelRegistry};
use crate::request::FertilizerRequest;
use crate::validate::FERTILIZER_RANGES;

#[derive(Debug, Clone, PartialEq)]
pub struct FertilizerPrediction {
    /// Product name out of the fixed table, a decoded model label, or the
    /// `Fertilizer #<index>` degradation.
    pub label: String,
}

pub struct FertilizerPredictor<'a> {
    registry: &'a ModelRegistry,
}

impl<'a> FertilizerPredictor<'a> {
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self { registry }
    }

    /// Fail closed: the model and both paired encoders must be present
    /// before anything else runs. Raw category text is never substituted
    /// for a missing encoder's code.
    pub fn predict(
        &self,
        request: &FertilizerRequest,
    ) -> Result<FertilizerPrediction, PredictError> {
        let unavailable = || PredictError::unavailable(Domain::Fertilizer);
        let model = self.registry.fertilizer.as_present().ok_or_else(unavailable)?;
        let soil_encoder = self
            .registry
            .fertilizer_soil
            .as_present()
            .ok_or_else(unavailable)?;
        let crop_encoder = self
            .registry
            .fertilizer_crop
            .as_present()
            .ok_or_else(unavailable)?;

        let numeric = [
            request.temperature,
            request.humidity,
            request.moisture,
            request.n,
            request.p,
            request.k,
        ];
        for (range, value) in FERTILIZER_RANGES.iter().zip(numeric) {
            range.check(value)?;
        }

        let soil_code = soil_encoder.encode(&request.soil)?;
        let crop_code = crop_encoder.encode(&request.crop)?;

        // Trained column order; note k before p.
        let features = [
            request.temperature,
            request.humidity,
            request.moisture,
            soil_code as f64,
            crop_code as f64,
            request.n,
            request.k,
            request.p,
        ];
        let output = model
            .predict(&features)
            .map_err(|err| PredictError::inference(Domain::Fertilizer, err))?;
        Ok(FertilizerPrediction {
            label: format::fertilizer_label(&output),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{DecisionTree, FertilizerModel, TreeNode};
    use crate::encoder::CategoryEncoder;
    use crate::registry::ModelHandle;

    fn fertilizer_feature_names() -> Vec<String> {
        [
            "temperature",
            "humidity",
            "moisture",
            "soil_code",
            "crop_code",
            "n",
            "k",
            "p",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    /// Splits on nitrogen at 20: low side DAP (index 5), high side Urea
    /// (index 6).
    fn nitrogen_model() -> FertilizerModel {
        FertilizerModel::new(
            fertilizer_feature_names(),
            None,
            DecisionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 5,
                        threshold: 20.0,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf { value: 5.0 },
                    TreeNode::Leaf { value: 6.0 },
                ],
            },
        )
    }

    fn soil_encoder() -> CategoryEncoder {
        CategoryEncoder::new(
            "Soil_Type",
            vec!["Black".into(), "Clayey".into(), "Loamy".into(), "Sandy".into()],
        )
    }

    fn crop_encoder() -> CategoryEncoder {
        CategoryEncoder::new(
            "Crop_Type",
            vec!["Maize".into(), "Paddy".into(), "Wheat".into()],
        )
    }

    fn demo_registry() -> ModelRegistry {
        let mut registry = ModelRegistry::all_absent("not loaded in test");
        registry.fertilizer = ModelHandle::Present(nitrogen_model());
        registry.fertilizer_soil = ModelHandle::Present(soil_encoder());
        registry.fertilizer_crop = ModelHandle::Present(crop_encoder());
        registry
    }

    fn valid_request() -> FertilizerRequest {
        FertilizerRequest {
            temperature: 26.0,
            humidity: 52.0,
            moisture: 38.0,
            soil: "Sandy".to_string(),
            crop: "Maize".to_string(),
            n: 37.0,
            p: 0.0,
            k: 0.0,
        }
    }

    #[test]
    fn test_index_output_maps_through_product_table() {
        let registry = demo_registry();
        let predictor = FertilizerPredictor::new(&registry);

        let high_n = predictor.predict(&valid_request()).unwrap();
        assert_eq!(high_n.label, "Urea", "n=37 should take the high-nitrogen leaf");

        let mut low_n = valid_request();
        low_n.n = 5.0;
        assert_eq!(predictor.predict(&low_n).unwrap().label, "DAP");
    }

    #[test]
    fn test_potassium_comes_before_phosphorus_in_features() {
        // Split on column 6. With [.., n, k, p] that is potassium; a model
        // fed [.., n, p, k] would see phosphorus there and flip the answer.
        let model = FertilizerModel::new(
            fertilizer_feature_names(),
            None,
            DecisionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 6,
                        threshold: 50.0,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf { value: 5.0 },
                    TreeNode::Leaf { value: 6.0 },
                ],
            },
        );
        let mut registry = demo_registry();
        registry.fertilizer = ModelHandle::Present(model);

        let mut request = valid_request();
        request.k = 80.0;
        request.p = 10.0;
        let predictor = FertilizerPredictor::new(&registry);
        assert_eq!(
            predictor.predict(&request).unwrap().label,
            "Urea",
            "column 6 must carry potassium (80), not phosphorus (10)"
        );
    }

    #[test]
    fn test_absent_encoder_fails_closed() {
        let mut registry = demo_registry();
        registry.fertilizer_soil = ModelHandle::absent("encoder artifact missing");

        let predictor = FertilizerPredictor::new(&registry);
        let err = predictor.predict(&valid_request()).unwrap_err();
        assert_eq!(err, PredictError::unavailable(Domain::Fertilizer));
    }

    #[test]
    fn test_unknown_category_is_an_encoding_error() {
        let registry = demo_registry();
        let predictor = FertilizerPredictor::new(&registry);

        let mut request = valid_request();
        request.soil = "Peaty".to_string();
        let err = predictor.predict(&request).unwrap_err();
        assert_eq!(err.kind(), "encoding");
    }

    #[test]
    fn test_numeric_validation_runs_before_encoding() {
        let registry = demo_registry();
        let predictor = FertilizerPredictor::new(&registry);

        let mut request = valid_request();
        request.humidity = 101.0;
        request.soil = "Peaty".to_string(); // would also fail, later
        match predictor.predict(&request).unwrap_err() {
            PredictError::Validation(inner) => assert_eq!(inner.field(), "humidity"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_label_carrying_model_passes_through() {
        let model = FertilizerModel::new(
            fertilizer_feature_names(),
            Some(vec!["Compost Blend".to_string()]),
            DecisionTree {
                nodes: vec![TreeNode::Leaf { value: 0.0 }],
            },
        );
        let mut registry = demo_registry();
        registry.fertilizer = ModelHandle::Present(model);

        let predictor = FertilizerPredictor::new(&registry);
        assert_eq!(
            predictor.predict(&valid_request()).unwrap().label,
            "Compost Blend"
        );
    }
}
