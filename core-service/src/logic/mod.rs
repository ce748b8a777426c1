//! Logic Module - Business Logic & Engines
//!
//! - `features/` - URL parsing and lexical feature extraction
//! - `threat/` - Threat DNA radar scoring
//! - `model/` - Classifier trait and backends (ONNX, heuristic)
//! - `scan/` - Single and batch classification dispatch

pub mod features;
pub mod threat;
pub mod model;
pub mod scan;
