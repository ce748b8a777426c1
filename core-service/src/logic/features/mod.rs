//! Features Module - URL Feature Extraction Engine
//!
//! Splits a raw URL string, counts its lexical features and packs them into
//! the versioned vector the classifier consumes.

pub mod layout;
pub mod parse;
pub mod extract;
pub mod vector;

#[cfg(test)]
mod tests;

// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, LayoutInfo, layout_hash};
pub use parse::ParsedUrl;
pub use extract::{extract_features, UrlFeatures, SUSPICIOUS_WORDS};
pub use vector::FeatureVector;
