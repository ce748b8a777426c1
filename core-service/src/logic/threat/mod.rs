//! Threat Module
//!
//! Presentation-side threat scoring: the "threat DNA" radar signals derived
//! from a URL's feature record. Has no effect on classification.
//!
//! ## Structure
//! - `types`: `ThreatDna` and its signal names
//! - `rules`: scaling constants for each signal
//! - `dna`: scoring logic
//!
//! ## Usage
//! ```ignore
//! use urldna_core::logic::{features::extract_features, threat::compute_dna};
//!
//! let url = "http://paypal-secure.example.com/login";
//! let dna = compute_dna(url, &extract_features(url));
//! assert!(dna.suspicious_keywords > 0.0);
//! ```

pub mod types;
pub mod rules;
pub mod dna;

pub use types::{ThreatDna, DNA_SIGNALS};
pub use dna::compute_dna;
