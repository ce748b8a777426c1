//! Label Encoder
//!
//! Fixed mapping from class index to class label, established at startup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_LABELS;
use super::classifier::ClassifierError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

/// Accepted on-disk shapes: `{"classes": [...]}` or a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum LabelFile {
    Object { classes: Vec<String> },
    List(Vec<String>),
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self, ClassifierError> {
        if classes.is_empty() {
            return Err(ClassifierError::Labels("no classes".to_string()));
        }
        if let Some(blank) = classes.iter().position(|c| c.trim().is_empty()) {
            return Err(ClassifierError::Labels(format!("class {} is blank", blank)));
        }
        for (i, class) in classes.iter().enumerate() {
            if classes[..i].contains(class) {
                return Err(ClassifierError::Labels(format!("duplicate class '{}'", class)));
            }
        }
        Ok(Self { classes })
    }

    pub fn from_json_str(content: &str) -> Result<Self, ClassifierError> {
        let parsed: LabelFile = serde_json::from_str(content)
            .map_err(|e| ClassifierError::Labels(e.to_string()))?;
        let classes = match parsed {
            LabelFile::Object { classes } | LabelFile::List(classes) => classes,
        };
        Self::new(classes)
    }

    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ClassifierError::Labels(format!("{}: {}", path.display(), e)))?;
        let encoder = Self::from_json_str(&content)?;
        log::info!("Loaded {} class labels from {}", encoder.len(), path.display());
        Ok(encoder)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Class index → label
    pub fn inverse_transform(&self, index: usize) -> Result<&str, ClassifierError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(ClassifierError::UnknownClass { index, known: self.classes.len() })
    }
}

impl Default for LabelEncoder {
    fn default() -> Self {
        Self {
            classes: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
