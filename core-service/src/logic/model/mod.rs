//! Model Module - URL Classifier Backends
//!
//! The classifier is a capability behind the `Classifier` trait.
//! Backends: ONNX session (`inference`), heuristic fallback (`fallback`).

pub mod classifier;
pub mod labels;
pub mod inference;
pub mod fallback;

use std::path::PathBuf;
use std::sync::Arc;

// Re-export common types
pub use classifier::{Classifier, ClassifierError, ModelStatus};
pub use labels::LabelEncoder;
pub use inference::{OnnxClassifier, ModelMetadata};
pub use fallback::HeuristicClassifier;

/// Where the classifier and its labels come from
#[derive(Debug, Clone, Default)]
pub struct ModelConfig {
    pub model_path: Option<PathBuf>,
    pub model_sha256: Option<String>,
    pub labels_path: Option<PathBuf>,
}

impl ModelConfig {
    /// `MODEL_PATH`, `MODEL_SHA256`, `LABELS_PATH`
    pub fn from_env() -> Self {
        Self {
            model_path: crate::constants::get_model_path(),
            model_sha256: crate::constants::get_model_sha256(),
            labels_path: crate::constants::get_labels_path(),
        }
    }
}

/// Build the process-wide classifier once at startup.
///
/// A configured model that fails to load is an error. No model configured
/// means the heuristic fallback.
pub fn load_classifier(config: &ModelConfig) -> Result<Arc<dyn Classifier>, ClassifierError> {
    let labels = match &config.labels_path {
        Some(path) => LabelEncoder::load(path)?,
        None => LabelEncoder::default(),
    };

    match &config.model_path {
        Some(path) => {
            let classifier = OnnxClassifier::load(path, labels, config.model_sha256.as_deref())?;
            Ok(Arc::new(classifier))
        }
        None => {
            log::warn!("No ONNX model configured - using fallback heuristics");
            Ok(Arc::new(HeuristicClassifier::new(labels)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_uses_heuristics() {
        let classifier = load_classifier(&ModelConfig::default()).unwrap();
        assert_eq!(classifier.method(), "heuristic");
        assert_eq!(classifier.labels().len(), 4);

        let status = classifier.status();
        assert!(status.loaded);
        assert_eq!(status.engine, "heuristic");
        assert!(status.model_path.is_none());
    }

    #[test]
    fn test_custom_labels_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["benign", "phishing"]"#).unwrap();

        let config = ModelConfig {
            labels_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let classifier = load_classifier(&config).unwrap();
        assert_eq!(classifier.labels().classes(), &["benign".to_string(), "phishing".to_string()]);
    }

    #[test]
    fn test_missing_model_is_an_error() {
        let config = ModelConfig {
            model_path: Some(PathBuf::from("/nonexistent/model.onnx")),
            ..Default::default()
        };
        assert!(matches!(load_classifier(&config), Err(ClassifierError::ModelNotFound(_))));
    }
}
