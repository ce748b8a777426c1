//! Threat DNA Scaling Rules
//!
//! Constants only. Each signal is `min(value / divisor, 1.0)` or
//! `min(ratio * amplifier, 1.0)`.

/// URL length at which Length Risk saturates
pub const LENGTH_SATURATION: f64 = 150.0;

/// Special-character ratio amplifier
pub const SPECIAL_RATIO_AMPLIFIER: f64 = 3.0;

/// Subdomain count at which Subdomain Depth saturates
pub const SUBDOMAIN_SATURATION: f64 = 4.0;

/// Digit ratio amplifier
pub const DIGIT_RATIO_AMPLIFIER: f64 = 4.0;

/// Hyphen count at which Hyphen Abuse saturates
pub const HYPHEN_SATURATION: f64 = 6.0;
