//! Yield estimation
//!
//! The only predictor with a fallback: when the model path is unavailable
//! (absent model, absent paired encoder, or an out-of-vocabulary crop or
//! region) a deterministic heuristic answers instead, and the prediction
//! carries which source produced it. Validation failures are never
//! downgraded; a request with bad numerics fails outright.

use crate::error::PredictError;
use crate::format;
use crate::registry::{Domain, ModelRegistry};
use crate::request::YieldRequest;
use crate::validate::YIELD_RANGES;

const HEURISTIC_BASE_TONS: f64 = 3.5;
const FERTILIZER_BONUS_TONS: f64 = 0.8;
const IRRIGATION_BONUS_TONS: f64 = 0.5;
const RAINFALL_TONS_PER_METER: f64 = 0.3;

/// Which path produced a yield value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YieldSource {
    Model,
    Heuristic,
}

impl YieldSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            YieldSource::Model => "model",
            YieldSource::Heuristic => "heuristic",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YieldPrediction {
    /// Tons per hectare, rounded to two decimals.
    pub value: f64,
    pub source: YieldSource,
}

pub struct YieldPredictor<'a> {
    registry: &'a ModelRegistry,
}

impl<'a> YieldPredictor<'a> {
    pub fn new(registry: &'a ModelRegistry) -> Self {
        Self { registry }
    }

    pub fn predict(&self, request: &YieldRequest) -> Result<YieldPrediction, PredictError> {
        let numeric = [
            request.rainfall_mm,
            request.temperature_celsius,
            request.days_to_harvest as f64,
        ];
        for (range, value) in YIELD_RANGES.iter().zip(numeric) {
            range.check(value)?;
        }

        let handles = (
            self.registry.yield_model.as_present(),
            self.registry.yield_crop.as_present(),
            self.registry.yield_region.as_present(),
        );
        let (model, crop_encoder, region_encoder) = match handles {
            (Some(model), Some(crop), Some(region)) => (model, crop, region),
            _ => {
                tracing::info!("Yield model path unavailable, answering with heuristic");
                return Ok(self.heuristic(request));
            }
        };

        let crop_code = match crop_encoder.encode(&request.crop) {
            Ok(code) => code,
            Err(err) => {
                tracing::warn!("Yield encoding failed ({}), falling back to heuristic", err);
                return Ok(self.heuristic(request));
            }
        };
        let region_code = match region_encoder.encode(&request.region) {
            Ok(code) => code,
            Err(err) => {
                tracing::warn!("Yield encoding failed ({}), falling back to heuristic", err);
                return Ok(self.heuristic(request));
            }
        };

        let features = [
            crop_code as f64,
            region_code as f64,
            request.rainfall_mm,
            request.temperature_celsius,
            request.fertilizer_used.as_feature(),
            request.irrigation_used.as_feature(),
            request.days_to_harvest as f64,
        ];
        let value = model
            .predict(&features)
            .map_err(|err| PredictError::inference(Domain::Yield, err))?;
        Ok(YieldPrediction {
            value: format::round2(value),
            source: YieldSource::Model,
        })
    }

    /// Deterministic estimate used whenever the model path cannot answer:
    /// base tonnage plus fertilizer and irrigation bonuses plus a rainfall
    /// term per meter of rain.
    pub fn heuristic(&self, request: &YieldRequest) -> YieldPrediction {
        let value = HEURISTIC_BASE_TONS
            + FERTILIZER_BONUS_TONS * request.fertilizer_used.as_feature()
            + IRRIGATION_BONUS_TONS * request.irrigation_used.as_feature()
            + (request.rainfall_mm / 1000.0) * RAINFALL_TONS_PER_METER;
        YieldPrediction {
            value: format::round2(value),
            source: YieldSource::Heuristic,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
