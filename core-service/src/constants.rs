//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.

/// Maximum URLs accepted by one batch prediction
pub const MAX_BATCH_URLS: usize = 500;

/// Class labels used when no label encoder file is configured.
/// Sorted, as a fitted label encoder stores them.
pub const DEFAULT_LABELS: &[&str] = &["benign", "defacement", "malware", "phishing"];

/// Decimal places kept for per-class probabilities
pub const PROBABILITY_DECIMALS: i32 = 4;

/// Decimal places kept for the confidence percentage
pub const CONFIDENCE_DECIMALS: i32 = 1;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "URL Threat DNA";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// ONNX model artifact path, if configured
pub fn get_model_path() -> Option<std::path::PathBuf> {
    non_empty_env("MODEL_PATH").map(std::path::PathBuf::from)
}

/// Expected SHA-256 of the model artifact, if pinned
pub fn get_model_sha256() -> Option<String> {
    non_empty_env("MODEL_SHA256")
}

/// Label encoder JSON path, if configured
pub fn get_labels_path() -> Option<std::path::PathBuf> {
    non_empty_env("LABELS_PATH").map(std::path::PathBuf::from)
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
