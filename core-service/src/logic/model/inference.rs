//! Inference Engine - ONNX Runtime Integration
//!
//! Loads an exported URL classifier and runs it on single feature vectors.
//!
//! Expected graph (sklearn-onnx export with `zipmap=False`):
//! - input: float tensor `[1, FEATURE_COUNT]`
//! - output 0: int64 tensor of class indices
//! - output 1: float tensor `[1, n_classes]` of probabilities

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use ndarray::Array2;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Value;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::logic::features::{FeatureVector, LayoutInfo, FEATURE_COUNT};
use super::classifier::{Classifier, ClassifierError, ModelStatus};
use super::labels::LabelEncoder;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Model metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub sha256: String,
    pub size_bytes: usize,
    pub label_output: String,
    pub probability_output: String,
    pub loaded_at: DateTime<Utc>,
}

/// ONNX-backed classifier
///
/// `Session::run` needs `&mut`, so the session sits behind a mutex. Nothing
/// else about the model changes after `load`.
pub struct OnnxClassifier {
    session: Mutex<Session>,
    labels: LabelEncoder,
    metadata: ModelMetadata,
}

impl std::fmt::Debug for OnnxClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxClassifier")
            .field("labels", &self.labels)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// LOADING
// ============================================================================

/// Hex SHA-256 of a model artifact
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

impl OnnxClassifier {
    /// Load the model at `model_path`.
    ///
    /// With `expected_sha256` set, an artifact with any other digest is refused
    /// before it reaches the runtime.
    pub fn load(
        model_path: &Path,
        labels: LabelEncoder,
        expected_sha256: Option<&str>,
    ) -> Result<Self, ClassifierError> {
        log::info!("Loading ONNX model from: {}", model_path.display());

        if !model_path.exists() {
            return Err(ClassifierError::ModelNotFound(model_path.to_path_buf()));
        }

        let model_bytes = fs::read(model_path)
            .map_err(|e| ClassifierError::Load(format!("{}: {}", model_path.display(), e)))?;

        let sha256 = sha256_hex(&model_bytes);
        if let Some(expected) = expected_sha256 {
            if !expected.trim().eq_ignore_ascii_case(&sha256) {
                return Err(ClassifierError::ChecksumMismatch {
                    expected: expected.trim().to_lowercase(),
                    actual: sha256,
                });
            }
            log::info!("Model checksum verified ({})", sha256);
        }

        let session = Session::builder()
            .map_err(|e| ClassifierError::Load(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ClassifierError::Load(format!("Failed to set optimization: {}", e)))?
            .commit_from_memory(&model_bytes)
            .map_err(|e| ClassifierError::Load(format!("Failed to load model: {}", e)))?;

        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        let (label_output, probability_output) = resolve_outputs(&output_names)?;

        log::info!(
            "ONNX model loaded: {} bytes, outputs label='{}' probabilities='{}', {} classes",
            model_bytes.len(),
            label_output,
            probability_output,
            labels.len()
        );

        let metadata = ModelMetadata {
            model_path: model_path.display().to_string(),
            sha256,
            size_bytes: model_bytes.len(),
            label_output,
            probability_output,
            loaded_at: Utc::now(),
        };

        Ok(Self {
            session: Mutex::new(session),
            labels,
            metadata,
        })
    }

    fn run(&self, features: &FeatureVector) -> Result<(usize, Vec<f64>), ClassifierError> {
        features.validate()?;

        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.as_slice().to_vec())
            .map_err(|e| ClassifierError::Inference(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ClassifierError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session.run(ort::inputs![input_tensor])
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let label_value = outputs.get(&self.metadata.label_output)
            .ok_or_else(|| ClassifierError::OutputShape(format!("missing output '{}'", self.metadata.label_output)))?;
        let label_tensor = label_value.try_extract_tensor::<i64>()
            .map_err(|e| ClassifierError::OutputShape(format!("label output: {}", e)))?;
        let raw_index = label_tensor.1.first().copied()
            .ok_or_else(|| ClassifierError::OutputShape("empty label output".to_string()))?;

        let probability_value = outputs.get(&self.metadata.probability_output)
            .ok_or_else(|| ClassifierError::OutputShape(format!("missing output '{}'", self.metadata.probability_output)))?;
        let probability_tensor = probability_value.try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::OutputShape(format!("probability output: {}", e)))?;
        let probabilities: Vec<f64> = probability_tensor.1.iter().map(|&p| f64::from(p)).collect();

        if probabilities.len() != self.labels.len() {
            return Err(ClassifierError::OutputShape(format!(
                "{} probabilities for {} labels",
                probabilities.len(),
                self.labels.len()
            )));
        }

        let index = usize::try_from(raw_index)
            .map_err(|_| ClassifierError::OutputShape(format!("negative class index {}", raw_index)))?;

        Ok((index, probabilities))
    }
}

/// Pick label/probability outputs by name, falling back to position 0/1
fn resolve_outputs(names: &[String]) -> Result<(String, String), ClassifierError> {
    if names.len() < 2 {
        return Err(ClassifierError::Load(format!(
            "expected label and probability outputs, model has {:?}",
            names
        )));
    }

    let by_name = |needle: &str| names.iter().find(|n| n.to_lowercase().contains(needle)).cloned();

    let label = by_name("label").unwrap_or_else(|| names[0].clone());
    let probability = by_name("prob")
        .filter(|p| *p != label)
        .or_else(|| names.iter().find(|n| **n != label).cloned())
        .ok_or_else(|| ClassifierError::Load(format!("no probability output in {:?}", names)))?;

    Ok((label, probability))
}

// ============================================================================
// CLASSIFIER IMPL
// ============================================================================

impl Classifier for OnnxClassifier {
    fn method(&self) -> &'static str {
        "onnx"
    }

    fn labels(&self) -> &LabelEncoder {
        &self.labels
    }

    fn predict(&self, features: &FeatureVector) -> Result<usize, ClassifierError> {
        self.run(features).map(|(index, _)| index)
    }

    fn predict_probabilities(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        self.run(features).map(|(_, probabilities)| probabilities)
    }

    fn classify(&self, features: &FeatureVector) -> Result<(usize, Vec<f64>), ClassifierError> {
        let start_time = std::time::Instant::now();
        let result = self.run(features);
        log::debug!("ONNX inference took {}us", start_time.elapsed().as_micros());
        result
    }

    fn status(&self) -> ModelStatus {
        ModelStatus {
            engine: self.method().to_string(),
            loaded: true,
            model_path: Some(self.metadata.model_path.clone()),
            model_sha256: Some(self.metadata.sha256.clone()),
            loaded_at: Some(self.metadata.loaded_at),
            labels: self.labels.classes().to_vec(),
            layout: LayoutInfo::current(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
