//! Model artifacts
//!
//! The gateway loads decision-tree models from its own JSON artifact format:
//! a flat node array walked iteratively from the root, plus optional feature
//! scaling and class lists. Artifacts are validated at load time so a corrupt
//! file surfaces as an absent handle at startup instead of a request-time
//! fault. Compatibility with pickle/ONNX serializations is out of scope.

use std::path::Path;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inference-time fault inside a model. Wrapped into `PredictError::Inference`
/// by the predictors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("expected {expected} features, got {got}")]
    FeatureCount { expected: usize, got: usize },

    #[error("decision tree has no nodes")]
    EmptyTree,

    #[error("tree node index {index} out of bounds")]
    NodeIndex { index: usize },

    #[error("tree split references feature {index} out of bounds")]
    FeatureIndex { index: usize },

    #[error("tree walk did not reach a leaf")]
    NoLeaf,

    #[error("leaf value {value} is not usable as an output")]
    BadLeaf { value: f64 },

    #[error("class index {index} outside class list of length {count}")]
    ClassIndex { index: i64, count: usize },
}

// ============================================================================
// Decision tree
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk from the root; `feature <= threshold` goes left.
    ///
    /// The step count is capped at the node count, so a malformed artifact
    /// with a cycle terminates with `NoLeaf` instead of spinning.
    pub fn decide(&self, features: &[f64]) -> Result<f64, ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::EmptyTree);
        }
        let mut current = 0usize;
        for _ in 0..self.nodes.len() {
            let node = self
                .nodes
                .get(current)
                .ok_or(ModelError::NodeIndex { index: current })?;
            match node {
                TreeNode::Leaf { value } => return Ok(*value),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = features
                        .get(*feature)
                        .ok_or(ModelError::FeatureIndex { index: *feature })?;
                    current = if *value <= *threshold { *left } else { *right };
                }
            }
        }
        Err(ModelError::NoLeaf)
    }

    /// Structural checks run at load time: child and feature indices in
    /// bounds, at least one node.
    pub fn validate(&self, feature_count: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::EmptyTree);
        }
        for node in &self.nodes {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= feature_count {
                    return Err(ModelError::FeatureIndex { index: *feature });
                }
                if *left >= self.nodes.len() {
                    return Err(ModelError::NodeIndex { index: *left });
                }
                if *right >= self.nodes.len() {
                    return Err(ModelError::NodeIndex { index: *right });
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Feature scaling
// ============================================================================

/// Standard scaling: `(x - mean) / scale`, element-wise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl FeatureScaler {
    pub fn transform(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        if self.mean.len() != features.len() || self.scale.len() != features.len() {
            return Err(ModelError::FeatureCount {
                expected: self.mean.len(),
                got: features.len(),
            });
        }
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }

    fn validate(&self, feature_count: usize) -> Result<(), ModelError> {
        if self.mean.len() != feature_count || self.scale.len() != feature_count {
            return Err(ModelError::FeatureCount {
                expected: feature_count,
                got: self.mean.len().min(self.scale.len()),
            });
        }
        if let Some(bad) = self.scale.iter().find(|s| !s.is_finite() || **s == 0.0) {
            return Err(ModelError::BadLeaf { value: *bad });
        }
        Ok(())
    }
}

// ============================================================================
// Models
// ============================================================================

/// Map a classifier leaf to an index into a class list.
fn class_index(leaf: f64, count: usize) -> Result<usize, ModelError> {
    if !leaf.is_finite() {
        return Err(ModelError::BadLeaf { value: leaf });
    }
    let index = leaf.round() as i64;
    if index < 0 || index as usize >= count {
        return Err(ModelError::ClassIndex { index, count });
    }
    Ok(index as usize)
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} artifact: {}", what, path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {} artifact: {}", what, path.display()))
}

/// Crop recommendation classifier. Feature order
/// `[n, p, k, temperature, humidity, ph, rainfall]`; optional standard
/// scaler applied before the tree walk; leaf values index `classes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropModel {
    feature_names: Vec<String>,
    #[serde(default)]
    scaler: Option<FeatureScaler>,
    classes: Vec<String>,
    tree: DecisionTree,
}

impl CropModel {
    pub fn new(
        feature_names: Vec<String>,
        scaler: Option<FeatureScaler>,
        classes: Vec<String>,
        tree: DecisionTree,
    ) -> Self {
        Self {
            feature_names,
            scaler,
            classes,
            tree,
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let model: Self = read_json(path, "crop model")?;
        model
            .validate()
            .with_context(|| format!("Invalid crop model artifact: {}", path.display()))?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.classes.is_empty() {
            return Err(ModelError::ClassIndex { index: 0, count: 0 });
        }
        if let Some(scaler) = &self.scaler {
            scaler.validate(self.feature_names.len())?;
        }
        self.tree.validate(self.feature_names.len())
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Predict a crop label (as trained, not display-cased).
    pub fn predict(&self, features: &[f64]) -> Result<String, ModelError> {
        if features.len() != self.feature_names.len() {
            return Err(ModelError::FeatureCount {
                expected: self.feature_names.len(),
                got: features.len(),
            });
        }
        let leaf = match &self.scaler {
            Some(scaler) => self.tree.decide(&scaler.transform(features)?)?,
            None => self.tree.decide(features)?,
        };
        let index = class_index(leaf, self.classes.len())?;
        Ok(self.classes[index].clone())
    }
}

/// What a fertilizer classifier yields: a raw class index when the artifact
/// carries no class list, or an already-decoded label when it does.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassOutput {
    Index(i64),
    Label(String),
}

/// Fertilizer recommendation classifier. Feature order
/// `[temperature, humidity, moisture, soil_code, crop_code, n, k, p]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FertilizerModel {
    feature_names: Vec<String>,
    #[serde(default)]
    classes: Option<Vec<String>>,
    tree: DecisionTree,
}

impl FertilizerModel {
    pub fn new(
        feature_names: Vec<String>,
        classes: Option<Vec<String>>,
        tree: DecisionTree,
    ) -> Self {
        Self {
            feature_names,
            classes,
            tree,
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let model: Self = read_json(path, "fertilizer model")?;
        model
            .validate()
            .with_context(|| format!("Invalid fertilizer model artifact: {}", path.display()))?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if let Some(classes) = &self.classes {
            if classes.is_empty() {
                return Err(ModelError::ClassIndex { index: 0, count: 0 });
            }
        }
        self.tree.validate(self.feature_names.len())
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    pub fn predict(&self, features: &[f64]) -> Result<ClassOutput, ModelError> {
        if features.len() != self.feature_names.len() {
            return Err(ModelError::FeatureCount {
                expected: self.feature_names.len(),
                got: features.len(),
            });
        }
        let leaf = self.tree.decide(features)?;
        match &self.classes {
            Some(classes) => {
                let index = class_index(leaf, classes.len())?;
                Ok(ClassOutput::Label(classes[index].clone()))
            }
            None => {
                if !leaf.is_finite() {
                    return Err(ModelError::BadLeaf { value: leaf });
                }
                Ok(ClassOutput::Index(leaf.round() as i64))
            }
        }
    }
}

/// Yield regression tree. Feature order `[crop_code, region_code, rainfall,
/// temperature, fertilizer_flag, irrigation_flag, days_to_harvest]`. Output
/// is tons per hectare, unrounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldModel {
    feature_names: Vec<String>,
    tree: DecisionTree,
}

impl YieldModel {
    pub fn new(feature_names: Vec<String>, tree: DecisionTree) -> Self {
        Self {
            feature_names,
            tree,
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let model: Self = read_json(path, "yield model")?;
        model
            .tree
            .validate(model.feature_names.len())
            .with_context(|| format!("Invalid yield model artifact: {}", path.display()))?;
        Ok(model)
    }

    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    pub fn predict(&self, features: &[f64]) -> Result<f64, ModelError> {
        if features.len() != self.feature_names.len() {
            return Err(ModelError::FeatureCount {
                expected: self.feature_names.len(),
                got: features.len(),
            });
        }
        let value = self.tree.decide(features)?;
        if !value.is_finite() {
            return Err(ModelError::BadLeaf { value });
        }
        Ok(value)
    }
}

// ============================================================================
// Tests
// ============================================================================
