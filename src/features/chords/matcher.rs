//! Chord template matching
//!
//! Cosine similarity between a single chroma snapshot and every catalog
//! template.

use serde::{Deserialize, Serialize};

use super::catalog::templates;
use crate::features::chroma::{normalize_by_max, Chroma, CHROMA_BINS, EPSILON};

/// Best template match for a chroma snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordMatch {
    /// Chord symbol
    pub chord: String,
    /// Cosine similarity clamped to [0, 1]
    pub confidence: f32,
}

impl ChordMatch {
    fn fallback() -> Self {
        Self {
            chord: "C".to_string(),
            confidence: 0.0,
        }
    }
}

/// Match a chroma snapshot to the closest catalog chord
///
/// The snapshot must hold exactly 12 finite values; anything else yields
/// `("C", 0.0)`. Exact ties keep the chord declared first.
///
/// # Example
///
/// ```
/// use loopify_analysis::features::chords::match_chord_from_chroma;
///
/// let snapshot = [0.8, 0.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0];
/// let matched = match_chord_from_chroma(&snapshot);
/// assert_eq!(matched.chord, "Am");
/// assert!(matched.confidence > 0.99);
/// ```
pub fn match_chord_from_chroma(snapshot: &[f32]) -> ChordMatch {
    let chroma: Chroma = match <[f32; CHROMA_BINS]>::try_from(snapshot) {
        Ok(chroma) if snapshot.iter().all(|v| v.is_finite()) => chroma,
        _ => {
            log::warn!(
                "Chord snapshot rejected ({} values, expected {})",
                snapshot.len(),
                CHROMA_BINS
            );
            return ChordMatch::fallback();
        }
    };

    let normalized = normalize_by_max(&chroma);
    let norm = l2_norm(&normalized);

    let mut best_chord = "C";
    let mut best_score = -1.0f64;

    for (name, template) in templates() {
        let dot: f64 = normalized
            .iter()
            .zip(template.iter())
            .map(|(&a, &b)| a as f64 * b as f64)
            .sum();
        let score = dot / (norm * l2_norm(template) + EPSILON);
        if score > best_score {
            best_score = score;
            best_chord = name;
        }
    }

    log::debug!("Matched chord: {} (similarity {:.4})", best_chord, best_score);

    ChordMatch {
        chord: best_chord.to_string(),
        confidence: best_score.clamp(0.0, 1.0) as f32,
    }
}

fn l2_norm(v: &Chroma) -> f64 {
    v.iter().map(|&x| x as f64 * x as f64).sum::<f64>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::chords::catalog::lookup;

    #[test]
    fn test_exact_template_matches_itself() {
        for name in ["Am", "C", "G7", "Fmaj7", "Dsus4", "Bdim", "Caug"] {
            let template = lookup(name).unwrap().template.unwrap();
            let matched = match_chord_from_chroma(&template);
            assert_eq!(matched.chord, name);
            assert!((matched.confidence - 1.0).abs() < 1e-4, "{}", name);
        }
    }

    #[test]
    fn test_scaled_snapshot_is_scale_invariant() {
        let template = lookup("Em").unwrap().template.unwrap();
        let scaled: Vec<f32> = template.iter().map(|v| v * 0.25).collect();
        assert_eq!(match_chord_from_chroma(&scaled).chord, "Em");
    }

    #[test]
    fn test_shared_template_resolves_to_first_declared() {
        // G#m carries the same profile as G#, which is declared first
        let template = lookup("G#m").unwrap().template.unwrap();
        assert_eq!(match_chord_from_chroma(&template).chord, "G#");
    }

    #[test]
    fn test_wrong_length_falls_back() {
        assert_eq!(match_chord_from_chroma(&[]), ChordMatch::fallback());
        assert_eq!(match_chord_from_chroma(&[1.0; 11]), ChordMatch::fallback());
        assert_eq!(match_chord_from_chroma(&[1.0; 13]), ChordMatch::fallback());
    }

    #[test]
    fn test_non_finite_falls_back() {
        let mut snapshot = [0.5f32; 12];
        snapshot[3] = f32::NAN;
        assert_eq!(match_chord_from_chroma(&snapshot), ChordMatch::fallback());
    }

    #[test]
    fn test_silence_keeps_first_template() {
        // Every similarity is 0, so the first catalog chord wins
        let matched = match_chord_from_chroma(&[0.0; 12]);
        assert_eq!(matched.chord, "C");
        assert_eq!(matched.confidence, 0.0);
    }
}
