//! Model registry
//!
//! Every model and encoder is loaded exactly once at startup. A load
//! failure of any kind (missing file, unreadable, corrupt) produces an
//! absent handle with a recorded reason; it never aborts startup and never
//! raises at request time. The registry is immutable after construction
//! and shared behind an `Arc`, so the request path needs no locks.

use std::fmt;
use std::path::Path;

use crate::artifact::{CropModel, FertilizerModel, YieldModel};
use crate::encoder::CategoryEncoder;

pub const CROP_MODEL_FILE: &str = "crop_model.json";
pub const FERTILIZER_MODEL_FILE: &str = "fertilizer_model.json";
pub const YIELD_MODEL_FILE: &str = "yield_model.json";

/// The three prediction operations the gateway serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Crop,
    Fertilizer,
    Yield,
}

impl Domain {
    pub fn display_name(&self) -> &'static str {
        match self {
            Domain::Crop => "crop",
            Domain::Fertilizer => "fertilizer",
            Domain::Yield => "yield",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A model or encoder slot: loaded, or absent with the reason it is not.
#[derive(Debug, Clone)]
pub enum ModelHandle<M> {
    Present(M),
    Absent { reason: String },
}

impl<M> ModelHandle<M> {
    pub fn absent(reason: impl Into<String>) -> Self {
        ModelHandle::Absent {
            reason: reason.into(),
        }
    }

    /// Run a loader against a path. Failures become `Absent` with the full
    /// error chain as the reason; this function itself never fails.
    pub fn load(
        label: &str,
        path: &Path,
        loader: impl FnOnce(&Path) -> anyhow::Result<M>,
    ) -> Self {
        match loader(path) {
            Ok(model) => {
                tracing::info!("Loaded {} from {}", label, path.display());
                ModelHandle::Present(model)
            }
            Err(err) => {
                let reason = format!("{:#}", err);
                tracing::warn!("{} unavailable: {}", label, reason);
                ModelHandle::Absent { reason }
            }
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, ModelHandle::Present(_))
    }

    pub fn as_present(&self) -> Option<&M> {
        match self {
            ModelHandle::Present(model) => Some(model),
            ModelHandle::Absent { .. } => None,
        }
    }

    pub fn absent_reason(&self) -> Option<&str> {
        match self {
            ModelHandle::Present(_) => None,
            ModelHandle::Absent { reason } => Some(reason),
        }
    }
}

pub type EncoderHandle = ModelHandle<CategoryEncoder>;

/// The four encoder slots the prediction paths consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncoderSlot {
    FertilizerSoil,
    FertilizerCrop,
    YieldCrop,
    YieldRegion,
}

impl EncoderSlot {
    pub const ALL: [EncoderSlot; 4] = [
        EncoderSlot::FertilizerSoil,
        EncoderSlot::FertilizerCrop,
        EncoderSlot::YieldCrop,
        EncoderSlot::YieldRegion,
    ];

    /// Feature name as the models were trained, used in encoding errors.
    pub fn feature_name(&self) -> &'static str {
        match self {
            EncoderSlot::FertilizerSoil => "Soil_Type",
            EncoderSlot::FertilizerCrop => "Crop_Type",
            EncoderSlot::YieldCrop => "Crop",
            EncoderSlot::YieldRegion => "Region",
        }
    }

    pub fn artifact_file(&self) -> &'static str {
        match self {
            EncoderSlot::FertilizerSoil => "soil_type_encoder.json",
            EncoderSlot::FertilizerCrop => "fertilizer_crop_encoder.json",
            EncoderSlot::YieldCrop => "yield_crop_encoder.json",
            EncoderSlot::YieldRegion => "region_encoder.json",
        }
    }
}

/// Load status of one registry slot, for diagnostics and the models endpoint.
#[derive(Debug, Clone)]
pub struct HandleStatus {
    pub name: &'static str,
    pub present: bool,
    pub reason: Option<String>,
}

/// All seven artifact slots. Constructed explicitly (no globals); handlers
/// share it via `Arc` and predictors borrow it per request.
#[derive(Debug)]
pub struct ModelRegistry {
    pub crop: ModelHandle<CropModel>,
    pub fertilizer: ModelHandle<FertilizerModel>,
    pub yield_model: ModelHandle<YieldModel>,
    pub fertilizer_soil: EncoderHandle,
    pub fertilizer_crop: EncoderHandle,
    pub yield_crop: EncoderHandle,
    pub yield_region: EncoderHandle,
}

impl ModelRegistry {
    /// Registry with every slot absent for the same reason. Useful as a
    /// construction base when slots are filled individually.
    pub fn all_absent(reason: &str) -> Self {
        Self {
            crop: ModelHandle::absent(reason),
            fertilizer: ModelHandle::absent(reason),
            yield_model: ModelHandle::absent(reason),
            fertilizer_soil: ModelHandle::absent(reason),
            fertilizer_crop: ModelHandle::absent(reason),
            yield_crop: ModelHandle::absent(reason),
            yield_region: ModelHandle::absent(reason),
        }
    }

    /// Load all artifacts from a directory. Always succeeds; whatever failed
    /// to load is absent with its reason.
    pub fn load(models_dir: &Path) -> Self {
        tracing::info!("Loading model registry from {}", models_dir.display());

        let crop = ModelHandle::load(
            "crop model",
            &models_dir.join(CROP_MODEL_FILE),
            CropModel::from_file,
        );
        let fertilizer = ModelHandle::load(
            "fertilizer model",
            &models_dir.join(FERTILIZER_MODEL_FILE),
            FertilizerModel::from_file,
        );
        let yield_model = ModelHandle::load(
            "yield model",
            &models_dir.join(YIELD_MODEL_FILE),
            YieldModel::from_file,
        );

        let load_encoder = |slot: EncoderSlot| {
            ModelHandle::load(
                &format!("{} encoder", slot.feature_name()),
                &models_dir.join(slot.artifact_file()),
                CategoryEncoder::from_file,
            )
        };

        let registry = Self {
            crop,
            fertilizer,
            yield_model,
            fertilizer_soil: load_encoder(EncoderSlot::FertilizerSoil),
            fertilizer_crop: load_encoder(EncoderSlot::FertilizerCrop),
            yield_crop: load_encoder(EncoderSlot::YieldCrop),
            yield_region: load_encoder(EncoderSlot::YieldRegion),
        };
        let (present, total) = registry.presence_counts();
        tracing::info!("Model registry ready: {}/{} artifacts present", present, total);
        registry
    }

    pub fn encoder(&self, slot: EncoderSlot) -> &EncoderHandle {
        match slot {
            EncoderSlot::FertilizerSoil => &self.fertilizer_soil,
            EncoderSlot::FertilizerCrop => &self.fertilizer_crop,
            EncoderSlot::YieldCrop => &self.yield_crop,
            EncoderSlot::YieldRegion => &self.yield_region,
        }
    }

    pub fn presence_counts(&self) -> (usize, usize) {
        let present = self.summary().iter().filter(|s| s.present).count();
        (present, 7)
    }

    pub fn summary(&self) -> Vec<HandleStatus> {
        fn status<M>(name: &'static str, handle: &ModelHandle<M>) -> HandleStatus {
            HandleStatus {
                name,
                present: handle.is_present(),
                reason: handle.absent_reason().map(str::to_string),
            }
        }
        vec![
            status("crop_model", &self.crop),
            status("fertilizer_model", &self.fertilizer),
            status("yield_model", &self.yield_model),
            status("soil_type_encoder", &self.fertilizer_soil),
            status("fertilizer_crop_encoder", &self.fertilizer_crop),
            status("yield_crop_encoder", &self.yield_crop),
            status("region_encoder", &self.yield_region),
        ]
    }
}

// ============================================================================
// Tests
// ============================================================================
