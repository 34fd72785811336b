//! Key detection algorithm
//!
//! Correlates a chroma distribution against Krumhansl-Kessler templates to
//! detect the musical key of a track.
//!
//! # Reference
//!
//! Krumhansl, C. L., & Kessler, E. J. (1982). Tracing the Dynamic Changes in Perceived
//! Tonal Organization in a Spatial Representation of Musical Keys. *Psychological Review*,
//! 89(4), 334-368.

use super::{modes::ScaleMode, templates::KeyTemplates, KeyCandidate, KeyDetectionResult, Tonality};
use crate::analysis::result::{Key, PitchClass};
use crate::features::chroma::{normalize_by_max, resolve_chroma, Chroma};
use crate::io::FeatureVector;

/// Number of ranked candidates kept in `top_keys`
const TOP_N: usize = 3;

/// Detect musical key from a 12-bin chroma vector
///
/// Normalizes the chroma by its maximum, then computes the Pearson correlation
/// against each rotated major and minor template. Candidates are visited
/// tonic-ascending with major before minor, and only a strictly greater
/// correlation replaces the current best, so exact ties keep the earliest
/// candidate.
///
/// # Returns
///
/// Key detection result with:
/// - Detected key (C major if no template correlates, e.g. flat chroma)
/// - Confidence `(r + 1) / 2` clamped to [0, 1]
/// - Top 3 candidates by correlation
///
/// # Example
///
/// ```
/// use loopify_analysis::features::key::detect_key;
/// use loopify_analysis::analysis::result::{Key, PitchClass};
///
/// let chroma = [1.0, 0.2, 0.8, 0.2, 0.9, 0.7, 0.2, 0.9, 0.2, 0.7, 0.2, 0.3];
/// let result = detect_key(&chroma);
/// assert_eq!(result.key, Key::major(PitchClass::C));
/// assert!(result.confidence > 0.9);
/// ```
pub fn detect_key(chroma: &Chroma) -> KeyDetectionResult {
    detect_key_with_templates(chroma, KeyTemplates::shared())
}

/// Detect musical key against an explicit template set
pub fn detect_key_with_templates(chroma: &Chroma, templates: &KeyTemplates) -> KeyDetectionResult {
    let normalized = normalize_by_max(chroma);

    let mut best_key = Key::major(PitchClass::C);
    let mut best_correlation = -1.0f64;
    let mut scores: Vec<(Key, f64)> = Vec::with_capacity(24);

    for (tonic_idx, &tonic) in PitchClass::ALL.iter().enumerate() {
        let major_corr = pearson_correlation(&normalized, templates.get_major_template(tonic_idx));
        let minor_corr = pearson_correlation(&normalized, templates.get_minor_template(tonic_idx));

        // An undefined correlation (zero variance) never wins
        if let Some(r) = major_corr {
            scores.push((Key::major(tonic), r));
            if r > best_correlation {
                best_correlation = r;
                best_key = Key::major(tonic);
            }
        }
        if let Some(r) = minor_corr {
            scores.push((Key::minor(tonic), r));
            if r > best_correlation {
                best_correlation = r;
                best_key = Key::minor(tonic);
            }
        }
    }

    let confidence = ((best_correlation + 1.0) / 2.0).clamp(0.0, 1.0) as f32;

    // Stable sort keeps iteration order among equal correlations
    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let top_keys: Vec<(Key, f32)> = scores
        .into_iter()
        .take(TOP_N)
        .map(|(key, r)| (key, r as f32))
        .collect();

    log::debug!(
        "Detected key: {}, correlation: {:.4}, confidence: {:.4}",
        best_key.name(),
        best_correlation,
        confidence
    );

    KeyDetectionResult {
        key: best_key,
        correlation: best_correlation as f32,
        confidence,
        top_keys,
    }
}

/// Major/minor tonality of a feature vector
///
/// Missing or malformed chroma is replaced by the neutral profile first,
/// which yields C major with confidence 0.
pub fn analyze_tonality(features: &FeatureVector) -> Tonality {
    let (chroma, _) = resolve_chroma(features.chroma.as_deref());
    tonality_from_chroma(&chroma)
}

/// Major/minor tonality of an already-resolved chroma vector
pub fn tonality_from_chroma(chroma: &Chroma) -> Tonality {
    let detection = detect_key(chroma);
    let key = detection.key;
    let mode = ScaleMode::from(key.mode);

    Tonality {
        key: key.tonic,
        mode: key.mode,
        scale: key.scale_label(),
        confidence: detection.confidence,
        notes: super::modes::scale_notes(key.tonic, mode),
        intervals: mode.intervals().to_vec(),
        alternatives: detection
            .top_keys
            .iter()
            .filter(|(candidate, _)| *candidate != key)
            .map(|&(candidate, correlation)| KeyCandidate {
                key: candidate.tonic,
                mode: candidate.mode,
                correlation,
            })
            .collect(),
    }
}

/// Pearson correlation coefficient in f64, `None` when either input has zero
/// variance
fn pearson_correlation(a: &Chroma, b: &Chroma) -> Option<f64> {
    let n = a.len() as f64;
    let mean_a = a.iter().map(|&x| x as f64).sum::<f64>() / n;
    let mean_b = b.iter().map(|&y| y as f64).sum::<f64>() / n;

    let mut cov = 0.0f64;
    let mut var_a = 0.0f64;
    let mut var_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let dx = x as f64 - mean_a;
        let dy = y as f64 - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let denom = (var_a * var_b).sqrt();
    if denom <= f64::MIN_POSITIVE || !denom.is_finite() {
        return None;
    }
    Some(cov / denom)
}
