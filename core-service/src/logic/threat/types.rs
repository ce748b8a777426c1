//! Threat Types
//!
//! Data structures only, no scoring logic.

use serde::{Deserialize, Serialize};

/// Signal display names in radar-chart order
pub const DNA_SIGNALS: [&str; 8] = [
    "Length Risk",
    "Special Chars",
    "Suspicious KW",
    "IP Address",
    "Subdomain Depth",
    "Digit Density",
    "Hyphen Abuse",
    "Encoding Tricks",
];

// ============================================================================
// THREAT DNA
// ============================================================================

/// Eight normalized risk signals, each in `[0.0, 1.0]`.
///
/// Serialized with the display names as keys, in `DNA_SIGNALS` order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThreatDna {
    #[serde(rename = "Length Risk")]
    pub length_risk: f64,
    #[serde(rename = "Special Chars")]
    pub special_chars: f64,
    #[serde(rename = "Suspicious KW")]
    pub suspicious_keywords: f64,
    #[serde(rename = "IP Address")]
    pub ip_address: f64,
    #[serde(rename = "Subdomain Depth")]
    pub subdomain_depth: f64,
    #[serde(rename = "Digit Density")]
    pub digit_density: f64,
    #[serde(rename = "Hyphen Abuse")]
    pub hyphen_abuse: f64,
    #[serde(rename = "Encoding Tricks")]
    pub encoding_tricks: f64,
}

impl ThreatDna {
    /// `(name, score)` pairs in `DNA_SIGNALS` order
    pub fn signals(&self) -> [(&'static str, f64); 8] {
        let scores = [
            self.length_risk,
            self.special_chars,
            self.suspicious_keywords,
            self.ip_address,
            self.subdomain_depth,
            self.digit_density,
            self.hyphen_abuse,
            self.encoding_tricks,
        ];
        let mut out = [("", 0.0); 8];
        for (slot, (name, score)) in out.iter_mut().zip(DNA_SIGNALS.iter().zip(scores)) {
            *slot = (*name, score);
        }
        out
    }

    /// Strongest signal, or `None` when every score is zero
    pub fn dominant_signal(&self) -> Option<(&'static str, f64)> {
        self.signals()
            .into_iter()
            .filter(|(_, score)| *score > 0.0)
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}
