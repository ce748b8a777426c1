//! Classification Dispatch
//!
//! Input: raw URL string(s) + shared classifier
//! Output: `Prediction` / `BatchReport`
//!
//! The only errors raised here are guard clauses on the input; anything the
//! classifier returns is propagated unchanged.

use crate::constants::{CONFIDENCE_DECIMALS, MAX_BATCH_URLS, PROBABILITY_DECIMALS};
use crate::logic::features::{extract_features, UrlFeatures};
use crate::logic::model::classifier::{pair_with_labels, Classifier};
use crate::logic::threat::compute_dna;

use super::types::{BatchItem, BatchReport, LabelMap, Prediction, ScanError};

/// Classifier answer for one URL, rounded for output
struct Scored {
    label: String,
    probabilities: LabelMap<f64>,
    confidence: f64,
}

/// Round to `decimals` places, resolving exact halves to the even neighbour.
///
/// A scaled value that lands on `.5` is only a true tie when the product was
/// exact; otherwise the product's rounding error says which side it is on.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;

    let rounded = if (scaled - scaled.trunc()).abs() == 0.5 {
        let error = value.mul_add(factor, -scaled);
        if error == 0.0 {
            scaled.round_ties_even()
        } else if error > 0.0 {
            scaled.ceil()
        } else {
            scaled.floor()
        }
    } else {
        scaled.round()
    };

    rounded / factor
}

fn score(classifier: &dyn Classifier, url: &str, features: &UrlFeatures) -> Result<Scored, ScanError> {
    let vector = features.to_vector();
    log::trace!("{} features: {}", url, vector.to_log_entry());

    let (index, probabilities) = classifier.classify(&vector)?;

    let label = classifier.label_for_index(index)?.to_string();
    let pairs = pair_with_labels(classifier.labels(), &probabilities)?;

    let top = probabilities.iter().copied().fold(0.0, f64::max);
    let confidence = round_to(top * 100.0, CONFIDENCE_DECIMALS);

    log::debug!("{} -> {} ({:.1}%, {})", url, label, confidence, classifier.method());

    Ok(Scored {
        label,
        probabilities: LabelMap(
            pairs
                .into_iter()
                .map(|(l, p)| (l, round_to(p, PROBABILITY_DECIMALS)))
                .collect(),
        ),
        confidence,
    })
}

// ============================================================================
// SINGLE
// ============================================================================

/// Classify one URL and score its threat DNA.
///
/// The input is trimmed; a blank input is `InvalidInput`.
pub fn predict_url(classifier: &dyn Classifier, raw_url: &str) -> Result<Prediction, ScanError> {
    let url = raw_url.trim();
    if url.is_empty() {
        return Err(ScanError::InvalidInput("No URL provided".to_string()));
    }

    let features = extract_features(url);
    let scored = score(classifier, url, &features)?;
    let dna = compute_dna(url, &features);

    Ok(Prediction {
        url: url.to_string(),
        prediction: scored.label,
        probabilities: scored.probabilities,
        dna,
        confidence: scored.confidence,
    })
}

// ============================================================================
// BATCH
// ============================================================================

/// Classify up to `MAX_BATCH_URLS` URLs in input order.
///
/// The size guard runs before any URL is touched. Blank entries are skipped
/// without being counted.
pub fn predict_batch<S: AsRef<str>>(
    classifier: &dyn Classifier,
    urls: &[S],
) -> Result<BatchReport, ScanError> {
    if urls.is_empty() {
        return Err(ScanError::InvalidInput("No URLs provided".to_string()));
    }
    if urls.len() > MAX_BATCH_URLS {
        log::warn!("Batch rejected: {} entries (max {})", urls.len(), MAX_BATCH_URLS);
        return Err(ScanError::BatchTooLarge {
            max: MAX_BATCH_URLS,
            got: urls.len(),
        });
    }

    let start_time = std::time::Instant::now();
    let mut results = Vec::with_capacity(urls.len());

    for raw_url in urls {
        let url = raw_url.as_ref().trim();
        if url.is_empty() {
            continue;
        }

        let features = extract_features(url);
        let scored = score(classifier, url, &features)?;

        results.push(BatchItem {
            url: url.to_string(),
            prediction: scored.label,
            confidence: scored.confidence,
            probabilities: scored.probabilities,
        });
    }

    let summary = LabelMap(
        classifier
            .labels()
            .classes()
            .iter()
            .map(|label| {
                let count = results.iter().filter(|r| &r.prediction == label).count();
                (label.clone(), count)
            })
            .collect(),
    );

    log::info!(
        "Batch scanned: {} of {} entries in {}ms",
        results.len(),
        urls.len(),
        start_time.elapsed().as_millis()
    );

    Ok(BatchReport {
        total: results.len(),
        results,
        summary,
    })
}

// ============================================================================
// TESTS
// ============================================================================
