//! Fallback Heuristic Classifier (no model)
//!
//! Used when no ONNX artifact is configured. Scores each known label from
//! the same lexical features the trained model sees and normalizes the
//! scores into a probability distribution. Deterministic.

use crate::logic::features::FeatureVector;
use super::classifier::{argmax, Classifier, ClassifierError};
use super::labels::LabelEncoder;

/// Score every label keeps so no class is ever impossible
const SCORE_FLOOR: f64 = 0.02;

/// Lowest score for "benign" even when every risk signal fires
const BENIGN_FLOOR: f64 = 0.05;

// ============================================================================
// SIGNALS
// ============================================================================

/// Normalized `[0, 1]` inputs read back from the feature vector
#[derive(Debug, Clone, Copy, Default)]
struct Signals {
    suspicious_word: f64,
    ip: f64,
    hex_encoding: f64,
    at_sign: f64,
    double_slash: f64,
    hyphens: f64,
    subdomains: f64,
    digits: f64,
    length: f64,
    query: f64,
    https: f64,
}

impl Signals {
    fn read(features: &FeatureVector) -> Self {
        let get = |name: &str| f64::from(features.get_by_name(name).unwrap_or(0.0));
        let unit = |v: f64| v.clamp(0.0, 1.0);

        Self {
            suspicious_word: unit(get("has_suspicious_word")),
            ip: unit(get("has_ip")),
            hex_encoding: unit(get("has_hex_encoding")),
            at_sign: unit(get("has_at_sign")),
            double_slash: unit(get("has_double_slash")),
            hyphens: unit(get("num_hyphens") / 6.0),
            subdomains: unit(get("num_subdomains").max(0.0) / 4.0),
            digits: unit(get("digit_ratio") * 4.0),
            length: unit(get("url_length") / 150.0),
            query: unit((get("num_equals") + get("num_ampersand")) / 4.0),
            https: unit(get("has_https")),
        }
    }

    fn phishing(&self) -> f64 {
        0.35 * self.suspicious_word
            + 0.20 * self.at_sign
            + 0.15 * self.hyphens
            + 0.15 * self.subdomains
            + 0.15 * self.double_slash
    }

    fn malware(&self) -> f64 {
        0.40 * self.ip + 0.25 * self.digits + 0.20 * self.hex_encoding + 0.15 * self.length
    }

    fn defacement(&self) -> f64 {
        0.50 * self.query + 0.30 * self.length + 0.20 * (1.0 - self.https)
    }

    fn risk(&self) -> f64 {
        self.phishing().max(self.malware()).max(self.defacement())
    }
}

// ============================================================================
// CLASSIFIER
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct HeuristicClassifier {
    labels: LabelEncoder,
}

impl HeuristicClassifier {
    pub fn new(labels: LabelEncoder) -> Self {
        Self { labels }
    }

    fn label_score(label: &str, signals: &Signals) -> f64 {
        let score = match label.to_lowercase().as_str() {
            "benign" | "safe" | "legitimate" => (1.0 - signals.risk()).max(BENIGN_FLOOR),
            "phishing" => signals.phishing(),
            "malware" => signals.malware(),
            "defacement" => signals.defacement(),
            _ => 0.0,
        };
        score + SCORE_FLOOR
    }

    fn distribution(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        features.validate()?;

        let signals = Signals::read(features);
        let scores: Vec<f64> = self
            .labels
            .classes()
            .iter()
            .map(|label| Self::label_score(label, &signals))
            .collect();

        let total: f64 = scores.iter().sum();
        Ok(scores.into_iter().map(|s| s / total).collect())
    }
}

impl Classifier for HeuristicClassifier {
    fn method(&self) -> &'static str {
        "heuristic"
    }

    fn labels(&self) -> &LabelEncoder {
        &self.labels
    }

    fn predict(&self, features: &FeatureVector) -> Result<usize, ClassifierError> {
        let probabilities = self.distribution(features)?;
        argmax(&probabilities)
            .ok_or_else(|| ClassifierError::OutputShape("empty distribution".to_string()))
    }

    fn predict_probabilities(&self, features: &FeatureVector) -> Result<Vec<f64>, ClassifierError> {
        self.distribution(features)
    }

    fn classify(&self, features: &FeatureVector) -> Result<(usize, Vec<f64>), ClassifierError> {
        let probabilities = self.distribution(features)?;
        let index = argmax(&probabilities)
            .ok_or_else(|| ClassifierError::OutputShape("empty distribution".to_string()))?;
        Ok((index, probabilities))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::extract_features;

    fn predict_label(url: &str) -> String {
        let classifier = HeuristicClassifier::default();
        let vector = extract_features(url).to_vector();
        let index = classifier.predict(&vector).unwrap();
        classifier.label_for_index(index).unwrap().to_string()
    }

    #[test]
    fn test_benign_url() {
        assert_eq!(predict_label("https://www.google.com"), "benign");
        assert_eq!(predict_label("https://github.com/rust-lang/rust"), "benign");
    }

    #[test]
    fn test_raw_ip_payload_is_malware() {
        assert_eq!(predict_label("http://192.168.1.1/files/payload.exe"), "malware");
    }

    #[test]
    fn test_credential_lure_is_phishing() {
        assert_eq!(
            predict_label("http://secure-paypal.com.account-verify.info/login@signin"),
            "phishing"
        );
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let classifier = HeuristicClassifier::default();
        for url in ["", "a", "https://example.com", "http://1.2.3.4/%20?a=1&b=2"] {
            let probabilities = classifier.predict_probabilities(&extract_features(url).to_vector()).unwrap();
            assert_eq!(probabilities.len(), 4);
            assert!((probabilities.iter().sum::<f64>() - 1.0).abs() < 1e-9, "sum for {:?}", url);
            assert!(probabilities.iter().all(|&p| p > 0.0 && p < 1.0));
        }
    }

    #[test]
    fn test_custom_labels() {
        let labels = LabelEncoder::new(vec!["benign".into(), "spam".into()]).unwrap();
        let classifier = HeuristicClassifier::new(labels);
        let vector = extract_features("https://example.com").to_vector();

        let (index, probabilities) = classifier.classify(&vector).unwrap();
        assert_eq!(index, 0);
        assert_eq!(probabilities.len(), 2);
    }

    #[test]
    fn test_rejects_stale_layout() {
        let mut vector = extract_features("https://example.com").to_vector();
        vector.layout_hash ^= 1;
        let err = HeuristicClassifier::default().predict(&vector).unwrap_err();
        assert!(matches!(err, ClassifierError::Layout(_)));
    }
}
