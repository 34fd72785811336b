//! Raga detection
//!
//! Sa is taken as the strongest chroma bin. Each template scores the energy on
//! its degrees, plus 0.8x the vadi and 0.5x the samvadi energy, minus 0.4x the
//! energy on degrees outside the raga.

use serde::{Deserialize, Serialize};

use super::templates::{Raga, RagaTemplate, RAGA_TEMPLATES};
use crate::analysis::result::PitchClass;
use crate::features::chroma::{argmax, normalize_by_max, resolve_chroma, rotate_to_tonic, Chroma};
use crate::features::key::ScaleMode;
use crate::io::FeatureVector;

const VADI_WEIGHT: f32 = 0.8;
const SAMVADI_WEIGHT: f32 = 0.5;
const OUT_OF_RAGA_PENALTY: f32 = 0.4;
const SCORE_SCALE: f32 = 10.0;

/// Lowest reportable raga confidence
///
/// Applied even when the raw score is near zero, so raga confidence is never
/// comparable to the unfloored key and mode confidences.
pub const CONFIDENCE_FLOOR: f32 = 0.2;

/// Raga detection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagaDetection {
    /// Best-matching raga (`Unknown` when nothing scored above zero)
    pub raga: Raga,
    /// Sa
    pub tonic: PitchClass,
    /// `score / 10` clamped to [0.2, 1.0]
    pub confidence: f32,
    /// Absolute pitch classes of the raga from Sa
    pub notes: Vec<PitchClass>,
    /// Absolute pitch of the vadi
    pub vadi: Option<PitchClass>,
    /// Absolute pitch of the samvadi
    pub samvadi: Option<PitchClass>,
    /// Closest western mode
    pub western_equivalent: Option<ScaleMode>,
}

/// Detect the raga of a 12-bin chroma vector
///
/// # Example
///
/// ```
/// use loopify_analysis::features::raga::{detect_raga_from_chroma, Raga};
///
/// let chroma = [1.0, 0.2, 0.8, 0.2, 0.9, 0.7, 0.2, 0.9, 0.2, 0.7, 0.2, 0.3];
/// let result = detect_raga_from_chroma(&chroma);
/// assert_eq!(result.raga, Raga::Shankarabharanam);
/// assert!(result.confidence >= 0.2 && result.confidence <= 1.0);
/// ```
pub fn detect_raga_from_chroma(chroma: &Chroma) -> RagaDetection {
    let normalized = normalize_by_max(chroma);
    let tonic_idx = argmax(&normalized);
    let tonic = PitchClass::from_index(tonic_idx);
    let shifted = rotate_to_tonic(&normalized, tonic_idx);

    let mut best: Option<&RagaTemplate> = None;
    let mut best_score = 0.0f32;

    for template in RAGA_TEMPLATES.iter() {
        let score = raga_score(&shifted, template);
        if score > best_score {
            best_score = score;
            best = Some(template);
        }
    }

    let confidence = (best_score / SCORE_SCALE).clamp(CONFIDENCE_FLOOR, 1.0);

    log::debug!(
        "Detected raga: {} (Sa = {}), score: {:.4}, confidence: {:.4}",
        best.map_or(Raga::Unknown, |t| t.raga).name(),
        tonic,
        best_score,
        confidence
    );

    match best {
        Some(template) => RagaDetection {
            raga: template.raga,
            tonic,
            confidence,
            notes: template
                .degrees
                .iter()
                .map(|&d| tonic.transpose(d as usize))
                .collect(),
            vadi: Some(tonic.transpose(template.vadi as usize)),
            samvadi: Some(tonic.transpose(template.samvadi as usize)),
            western_equivalent: template.western_equivalent,
        },
        None => RagaDetection {
            raga: Raga::Unknown,
            tonic,
            confidence,
            notes: Vec::new(),
            vadi: None,
            samvadi: None,
            western_equivalent: None,
        },
    }
}

/// Raga of a feature vector (neutral chroma on malformed input)
pub fn detect_raga(features: &FeatureVector) -> RagaDetection {
    let (chroma, _) = resolve_chroma(features.chroma.as_deref());
    detect_raga_from_chroma(&chroma)
}

fn raga_score(shifted: &Chroma, template: &RagaTemplate) -> f32 {
    let mut score = 0.0f32;
    for &degree in template.degrees {
        score += shifted[degree as usize];
    }
    score += shifted[template.vadi as usize] * VADI_WEIGHT;
    score += shifted[template.samvadi as usize] * SAMVADI_WEIGHT;
    for (degree, &energy) in shifted.iter().enumerate() {
        if !template.contains(degree) {
            score -= energy * OUT_OF_RAGA_PENALTY;
        }
    }
    score
}
