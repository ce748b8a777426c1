//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the classifier input schema**
//!
//! ## Rules:
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! The exported classifier was trained against exactly this column order.
//! A model artifact built for another layout must be rejected, not guessed at.

use crc32fast::Hasher;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Lengths (0-2) ===
    "url_length",          // 0
    "hostname_length",     // 1
    "path_length",         // 2

    // === Character counts (3-12) ===
    "num_dots",            // 3
    "num_hyphens",         // 4
    "num_underscores",     // 5
    "num_slashes",         // 6
    "num_at",              // 7
    "num_question",        // 8
    "num_equals",          // 9
    "num_ampersand",       // 10
    "num_percent",         // 11
    "num_digits",          // 12

    // === Flags (13-18) ===
    "has_ip",              // 13
    "has_https",           // 14
    "has_www",             // 15
    "has_at_sign",         // 16
    "has_double_slash",    // 17
    "has_hex_encoding",    // 18

    // === Structure / vocabulary (19-20) ===
    "num_subdomains",      // 19: may be negative
    "has_suspicious_word", // 20

    // === Ratios (21-23) ===
    "digit_ratio",         // 21
    "letter_ratio",        // 22
    "special_ratio",       // 23
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 24;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over the version byte and the NUL-terminated names
fn hash_of(version: u8, names: &[&str]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[version]);
    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}

static LAYOUT_HASH: Lazy<u32> = Lazy::new(|| hash_of(FEATURE_VERSION, FEATURE_LAYOUT));

/// Hash of the current layout, stamped on every `FeatureVector`
pub fn layout_hash() -> u32 {
    *LAYOUT_HASH
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for status endpoints and logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone, thiserror::Error)]
#[error(
    "Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), got v{actual_version} (hash: {actual_hash:08x})"
)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

// ============================================================================
// TESTS
// ============================================================================
