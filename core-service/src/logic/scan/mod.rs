//! Scan Module - Classification Dispatch
//!
//! Single and batch prediction on top of the extractor, the DNA scorer and a
//! `Classifier`. Stateless: every call builds its own records.

pub mod types;
pub mod dispatch;

pub use types::{BatchItem, BatchReport, LabelMap, Prediction, ScanError};
pub use dispatch::{predict_batch, predict_url, round_to};
