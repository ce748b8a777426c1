//! URL Feature Extraction
//!
//! Turns an arbitrary URL string into the fixed lexical feature record the
//! classifier was trained on. Total: every input, however malformed,
//! produces a record.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT};
use super::parse::ParsedUrl;
use super::vector::FeatureVector;

/// Keywords common in credential-phishing URLs (matched case-insensitively)
pub const SUSPICIOUS_WORDS: &[&str] = &[
    "login", "secure", "account", "update", "bank", "verify",
    "confirm", "paypal", "signin", "ebay", "admin", "password",
];

/// Four dot-separated groups of 1-3 digits; shape only, not a valid address
static IPV4_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}").expect("IPv4 pattern is valid")
});

/// Decimal digits plus the Numeric_Type=Digit code points (superscripts,
/// circled and parenthesized digits, and similar)
static DIGIT_CHAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"[\p{Nd}\x{B2}\x{B3}\x{B9}\x{1369}-\x{1371}\x{19DA}\x{2070}\x{2074}-\x{2079}",
        r"\x{2080}-\x{2089}\x{2460}-\x{2468}\x{2474}-\x{247C}\x{2488}-\x{2490}\x{24EA}",
        r"\x{24F5}-\x{24FD}\x{24FF}\x{2776}-\x{277E}\x{2780}-\x{2788}\x{278A}-\x{2792}",
        r"\x{10A40}-\x{10A43}\x{10E60}-\x{10E68}\x{11052}-\x{1105A}\x{1F100}-\x{1F10A}]",
    ))
    .expect("digit class is valid")
});

/// Letters: general category L only, no marks or letter numbers
static LETTER_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{L}").expect("letter class is valid"));

/// Letters or any numeric category
static ALNUM_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{N}]").expect("alnum class is valid"));

/// `//` found at or after this character index counts as a redirect marker
const DOUBLE_SLASH_MIN_INDEX: usize = 7;

// ============================================================================
// FEATURE RECORD
// ============================================================================

/// Lexical features of one URL, in classifier column order.
///
/// Flags are stored as 0/1. `num_subdomains` is deliberately unclamped and
/// goes negative for single-label hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlFeatures {
    pub url_length: usize,
    pub hostname_length: usize,
    pub path_length: usize,
    pub num_dots: usize,
    pub num_hyphens: usize,
    pub num_underscores: usize,
    pub num_slashes: usize,
    pub num_at: usize,
    pub num_question: usize,
    pub num_equals: usize,
    pub num_ampersand: usize,
    pub num_percent: usize,
    pub num_digits: usize,
    pub has_ip: u8,
    pub has_https: u8,
    pub has_www: u8,
    pub has_at_sign: u8,
    pub has_double_slash: u8,
    pub has_hex_encoding: u8,
    pub num_subdomains: i64,
    pub has_suspicious_word: u8,
    pub digit_ratio: f64,
    pub letter_ratio: f64,
    pub special_ratio: f64,
}

impl UrlFeatures {
    /// Values in `FEATURE_LAYOUT` order
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.url_length as f64,
            self.hostname_length as f64,
            self.path_length as f64,
            self.num_dots as f64,
            self.num_hyphens as f64,
            self.num_underscores as f64,
            self.num_slashes as f64,
            self.num_at as f64,
            self.num_question as f64,
            self.num_equals as f64,
            self.num_ampersand as f64,
            self.num_percent as f64,
            self.num_digits as f64,
            f64::from(self.has_ip),
            f64::from(self.has_https),
            f64::from(self.has_www),
            f64::from(self.has_at_sign),
            f64::from(self.has_double_slash),
            f64::from(self.has_hex_encoding),
            self.num_subdomains as f64,
            f64::from(self.has_suspicious_word),
            self.digit_ratio,
            self.letter_ratio,
            self.special_ratio,
        ]
    }

    /// Classifier input
    pub fn to_vector(&self) -> FeatureVector {
        FeatureVector::from_values(self.values().map(|v| v as f32))
    }

    pub fn named_values(&self) -> Vec<(&'static str, f64)> {
        FEATURE_LAYOUT.iter().copied().zip(self.values()).collect()
    }
}

impl From<&UrlFeatures> for FeatureVector {
    fn from(features: &UrlFeatures) -> Self {
        features.to_vector()
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Extract the feature record for `url`.
///
/// Counts run over the string exactly as given (no trimming); lengths are in
/// characters.
pub fn extract_features(url: &str) -> UrlFeatures {
    let parsed = ParsedUrl::parse(url);

    let url_length = url.chars().count();
    let num_digits = DIGIT_CHAR.find_iter(url).count();
    let num_letters = LETTER_CHAR.find_iter(url).count();
    let num_special = url_length - ALNUM_CHAR.find_iter(url).count();

    let denominator = url_length.max(1) as f64;

    UrlFeatures {
        url_length,
        hostname_length: parsed.hostname.chars().count(),
        path_length: parsed.path.chars().count(),
        num_dots: count_char(url, '.'),
        num_hyphens: count_char(url, '-'),
        num_underscores: count_char(url, '_'),
        num_slashes: count_char(url, '/'),
        num_at: count_char(url, '@'),
        num_question: count_char(url, '?'),
        num_equals: count_char(url, '='),
        num_ampersand: count_char(url, '&'),
        num_percent: count_char(url, '%'),
        num_digits,
        has_ip: flag(IPV4_SHAPE.is_match(url)),
        has_https: flag(url.starts_with("https")),
        has_www: flag(url.contains("www.")),
        has_at_sign: flag(url.contains('@')),
        has_double_slash: flag(has_late_double_slash(url)),
        has_hex_encoding: flag(url.contains('%')),
        num_subdomains: subdomain_count(&parsed.hostname),
        has_suspicious_word: flag(has_suspicious_word(url)),
        digit_ratio: num_digits as f64 / denominator,
        letter_ratio: num_letters as f64 / denominator,
        special_ratio: num_special as f64 / denominator,
    }
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

fn count_char(url: &str, needle: char) -> usize {
    url.matches(needle).count()
}

/// Checked against the caller's string, not the `http://`-prefixed form
fn has_late_double_slash(url: &str) -> bool {
    url.char_indices()
        .nth(DOUBLE_SLASH_MIN_INDEX)
        .is_some_and(|(offset, _)| url[offset..].contains("//"))
}

fn subdomain_count(hostname: &str) -> i64 {
    if hostname.is_empty() {
        return 0;
    }
    hostname.split('.').count() as i64 - 2
}

pub fn has_suspicious_word(url: &str) -> bool {
    let lowered = url.to_lowercase();
    SUSPICIOUS_WORDS.iter().any(|word| lowered.contains(word))
}

// ============================================================================
// TESTS
// ============================================================================
