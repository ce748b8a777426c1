//! Threat DNA Scorer
//!
//! Input: raw URL + its feature record
//! Output: `ThreatDna`
//!
//! Reads the record, never rewrites it. `num_subdomains` is clamped here and
//! only here.

use crate::logic::features::UrlFeatures;

use super::rules::{
    DIGIT_RATIO_AMPLIFIER, HYPHEN_SATURATION, LENGTH_SATURATION, SPECIAL_RATIO_AMPLIFIER,
    SUBDOMAIN_SATURATION,
};
use super::types::ThreatDna;

/// Score the eight radar signals for `url`.
///
/// Length Risk is measured on `url` itself; every other signal comes from
/// `features`.
pub fn compute_dna(url: &str, features: &UrlFeatures) -> ThreatDna {
    let url_length = url.chars().count() as f64;
    let subdomains = features.num_subdomains.max(0) as f64;

    ThreatDna {
        length_risk: unit(url_length / LENGTH_SATURATION),
        special_chars: unit(features.special_ratio * SPECIAL_RATIO_AMPLIFIER),
        suspicious_keywords: unit(f64::from(features.has_suspicious_word)),
        ip_address: unit(f64::from(features.has_ip)),
        subdomain_depth: unit(subdomains / SUBDOMAIN_SATURATION),
        digit_density: unit(features.digit_ratio * DIGIT_RATIO_AMPLIFIER),
        hyphen_abuse: unit(features.num_hyphens as f64 / HYPHEN_SATURATION),
        encoding_tricks: unit(f64::from(features.has_hex_encoding)),
    }
}

/// Clamp to `[0, 1]`; NaN maps to 0
fn unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

// ============================================================================
// TESTS
// ============================================================================
