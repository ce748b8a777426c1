//! Classifier Boundary
//!
//! The trained model is a capability, not a concrete type. Anything that can
//! map a `FeatureVector` to a class index and a probability per class can sit
//! behind this trait: the ONNX session, the heuristic fallback, a test stub.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::logic::features::{FeatureVector, LayoutInfo};
use crate::logic::features::layout::LayoutMismatchError;
use super::labels::LabelEncoder;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("Model not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("Model checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Failed to load model: {0}")]
    Load(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Unexpected model output: {0}")]
    OutputShape(String),

    #[error("Class index {index} has no label ({known} labels known)")]
    UnknownClass { index: usize, known: usize },

    #[error("Invalid label encoder: {0}")]
    Labels(String),

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),
}

// ============================================================================
// MODEL STATUS
// ============================================================================

/// Backend description for status endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub engine: String, // "onnx" | "heuristic"
    pub loaded: bool,
    pub model_path: Option<String>,
    pub model_sha256: Option<String>,
    pub loaded_at: Option<DateTime<Utc>>,
    pub labels: Vec<String>,
    pub layout: LayoutInfo,
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Read-only after construction; shared across request handlers.
pub trait Classifier: Send + Sync {
    /// Backend name, e.g. "onnx"
    fn method(&self) -> &'static str;

    /// Class index to label mapping, fixed at load time
    fn labels(&self) -> &LabelEncoder;

    /// Most likely class index
    fn predict(&self, features: &FeatureVector) -> Result<usize, ClassifierError>;

    /// One probability per class, in `labels()` order
    fn predict_probabilities(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError>;

    /// Both answers at once. Backends that produce them in a single pass
    /// should override this.
    fn classify(&self, features: &FeatureVector) -> Result<(usize, Vec<f64>), ClassifierError> {
        Ok((self.predict(features)?, self.predict_probabilities(features)?))
    }

    fn label_for_index(&self, index: usize) -> Result<&str, ClassifierError> {
        self.labels().inverse_transform(index)
    }

    fn status(&self) -> ModelStatus {
        ModelStatus {
            engine: self.method().to_string(),
            loaded: true,
            model_path: None,
            model_sha256: None,
            loaded_at: None,
            labels: self.labels().classes().to_vec(),
            layout: LayoutInfo::current(),
        }
    }
}

/// Zip probabilities with labels, rejecting a length mismatch
pub fn pair_with_labels(
    labels: &LabelEncoder,
    probabilities: &[f64],
) -> Result<Vec<(String, f64)>, ClassifierError> {
    if probabilities.len() != labels.len() {
        return Err(ClassifierError::OutputShape(format!(
            "{} probabilities for {} labels",
            probabilities.len(),
            labels.len()
        )));
    }

    Ok(labels
        .classes()
        .iter()
        .cloned()
        .zip(probabilities.iter().copied())
        .collect())
}

/// Index of the largest probability; ties resolve to the lowest index
pub fn argmax(probabilities: &[f64]) -> Option<usize> {
    probabilities
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &p)| match best {
            Some((_, top)) if p <= top => best,
            _ => Some((i, p)),
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[]), None);
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some(1));
        assert_eq!(argmax(&[0.5, 0.5]), Some(0));
    }

    #[test]
    fn test_pair_with_labels() {
        let labels = LabelEncoder::default();
        let pairs = pair_with_labels(&labels, &[0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_eq!(pairs[0], ("benign".to_string(), 0.1));
        assert_eq!(pairs[3], ("phishing".to_string(), 0.4));

        let err = pair_with_labels(&labels, &[1.0]).unwrap_err();
        assert!(matches!(err, ClassifierError::OutputShape(_)));
    }
}
