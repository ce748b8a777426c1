//! URL Threat DNA - Core Library
//!
//! Lexical URL feature extraction, threat DNA scoring and classification
//! dispatch. Shared by the `urldna` CLI and the HTTP server.

pub mod constants;
pub mod logic;

pub use logic::features::{extract_features, FeatureVector, UrlFeatures};
pub use logic::model::{load_classifier, Classifier, ClassifierError, ModelConfig};
pub use logic::scan::{predict_batch, predict_url, BatchReport, Prediction, ScanError};
pub use logic::threat::{compute_dna, ThreatDna};
