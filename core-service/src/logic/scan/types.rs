//! Scan Types
//!
//! Response shapes for single and batch predictions.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::logic::model::ClassifierError;
use crate::logic::threat::ThreatDna;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Blank URL or empty batch
    #[error("{0}")]
    InvalidInput(String),

    /// `got` is kept for logs; the message stays fixed for clients
    #[error("Max {max} URLs per batch")]
    BatchTooLarge { max: usize, got: usize },

    /// Backend failure, passed through untouched
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

// ============================================================================
// LABEL MAP
// ============================================================================

/// Label-keyed values in label-encoder order, serialized as a JSON object
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelMap<V>(pub Vec<(String, V)>);

impl<V> LabelMap<V> {
    pub fn get(&self, label: &str) -> Option<&V> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.0.iter().map(|(l, v)| (l.as_str(), v))
    }
}

impl<V: Serialize> Serialize for LabelMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, value) in &self.0 {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// Single-URL prediction
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Prediction {
    pub url: String,
    pub prediction: String,
    /// Rounded to 4 decimals
    pub probabilities: LabelMap<f64>,
    pub dna: ThreatDna,
    /// Percent, rounded to 1 decimal
    pub confidence: f64,
}

/// One entry of a batch; no DNA
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BatchItem {
    pub url: String,
    pub prediction: String,
    pub confidence: f64,
    pub probabilities: LabelMap<f64>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BatchReport {
    pub results: Vec<BatchItem>,
    /// Every known label, including those never predicted
    pub summary: LabelMap<usize>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_map_keeps_label_order() {
        let map = LabelMap(vec![("phishing".to_string(), 2), ("benign".to_string(), 1)]);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"phishing":2,"benign":1}"#);
        assert_eq!(map.get("benign"), Some(&1));
        assert_eq!(map.get("malware"), None);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ScanError::InvalidInput("No URL provided".into()).to_string(), "No URL provided");
        assert_eq!(
            ScanError::BatchTooLarge { max: 500, got: 501 }.to_string(),
            "Max 500 URLs per batch"
        );
    }
}
