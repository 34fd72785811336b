//! Confidence scoring module
//!
//! Combines the per-category confidences of an analysis into an overall
//! trustworthiness score.
//!
//! # Confidence Components
//!
//! 1. **Scale Confidence**: Krumhansl-Kessler correlation mapped to [0, 1]
//! 2. **Raga Confidence**: Template score, floored at 0.2
//! 3. **Emotion / Genre Confidence**: Rule score plus the classifier boost
//! 4. **Overall Confidence**: Weighted combination of all components
//!
//! # Example
//!
//! ```
//! use loopify_analysis::{analyze_features, FeatureVector};
//!
//! let result = analyze_features(&FeatureVector::placeholder());
//! println!("Overall confidence: {:.2}", result.confidence.overall);
//! assert!(result.confidence.is_high_confidence());
//! ```

use serde::{Deserialize, Serialize};

use super::result::AnalysisFlag;
use crate::features::raga::CONFIDENCE_FLOOR;

const SCALE_WEIGHT: f32 = 0.4;
const RAGA_WEIGHT: f32 = 0.2;
const EMOTION_WEIGHT: f32 = 0.2;
const GENRE_WEIGHT: f32 = 0.2;

/// Scale confidence below this is flagged as weak tonality
pub const WEAK_TONALITY_THRESHOLD: f32 = 0.6;

/// Analysis confidence scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfidence {
    /// Key/scale confidence (0.0-1.0)
    pub scale: f32,

    /// Raga confidence (0.2-1.0)
    ///
    /// Never below the raga calibration floor, unlike the other components.
    pub raga: f32,

    /// Emotion confidence (0.0-1.0)
    pub emotion: f32,

    /// Genre confidence (0.0-1.0)
    pub genre: f32,

    /// Overall confidence (weighted average)
    ///
    /// - Scale: 40% weight
    /// - Raga, emotion, genre: 20% weight each
    pub overall: f32,

    /// Confidence flags indicating specific issues
    #[serde(default)]
    pub flags: Vec<AnalysisFlag>,
}

/// Fallbacks that were applied before scoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FallbackUsage {
    /// Neutral chroma replaced missing or malformed chroma
    pub chroma: bool,
    /// Default tempo replaced a missing or invalid tempo
    pub tempo: bool,
}

/// Compute confidence scores from the per-category confidences
///
/// # Algorithm
///
/// 1. Each component is clamped to [0, 1]
/// 2. **Overall Confidence**: `0.4 * scale + 0.2 * (raga + emotion + genre)`
/// 3. Flags: weak tonality (scale < 0.6), raga at its floor, and any
///    fallback that was applied to the input
pub fn compute_confidence(
    scale: f32,
    raga: f32,
    emotion: f32,
    genre: f32,
    fallbacks: FallbackUsage,
) -> AnalysisConfidence {
    let scale = scale.clamp(0.0, 1.0);
    let raga = raga.clamp(0.0, 1.0);
    let emotion = emotion.clamp(0.0, 1.0);
    let genre = genre.clamp(0.0, 1.0);

    let overall = (scale * SCALE_WEIGHT
        + raga * RAGA_WEIGHT
        + emotion * EMOTION_WEIGHT
        + genre * GENRE_WEIGHT)
        .clamp(0.0, 1.0);

    let mut flags = Vec::new();
    if scale < WEAK_TONALITY_THRESHOLD {
        flags.push(AnalysisFlag::WeakTonality);
    }
    if raga <= CONFIDENCE_FLOOR {
        flags.push(AnalysisFlag::RagaAtFloor);
    }
    if fallbacks.chroma {
        flags.push(AnalysisFlag::NeutralChroma);
    }
    if fallbacks.tempo {
        flags.push(AnalysisFlag::DefaultTempo);
    }

    log::debug!(
        "Confidence scores: Scale={:.3}, Raga={:.3}, Emotion={:.3}, Genre={:.3}, Overall={:.3}",
        scale,
        raga,
        emotion,
        genre,
        overall
    );

    AnalysisConfidence {
        scale,
        raga,
        emotion,
        genre,
        overall,
        flags,
    }
}

impl AnalysisConfidence {
    /// Check if overall confidence is high (>= 0.7)
    pub fn is_high_confidence(&self) -> bool {
        self.overall >= 0.7
    }

    /// Check if overall confidence is low (< 0.5)
    pub fn is_low_confidence(&self) -> bool {
        self.overall < 0.5
    }

    /// Check if overall confidence is medium (0.5-0.7)
    pub fn is_medium_confidence(&self) -> bool {
        self.overall >= 0.5 && self.overall < 0.7
    }

    /// Get a human-readable confidence level description
    ///
    /// # Returns
    ///
    /// String describing the confidence level: "High", "Medium", or "Low"
    pub fn confidence_level(&self) -> &'static str {
        if self.is_high_confidence() {
            "High"
        } else if self.is_low_confidence() {
            "Low"
        } else {
            "Medium"
        }
    }

    /// Whether a flag was raised
    pub fn has_flag(&self, flag: AnalysisFlag) -> bool {
        self.flags.contains(&flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_confidence_all_good() {
        let confidence = compute_confidence(0.9, 0.6, 1.0, 0.95, FallbackUsage::default());

        // Overall: 0.9*0.4 + 0.6*0.2 + 1.0*0.2 + 0.95*0.2 = 0.36 + 0.12 + 0.2 + 0.19 = 0.87
        assert!((confidence.overall - 0.87).abs() < 1e-4);
        assert!(confidence.flags.is_empty());
        assert!(confidence.is_high_confidence());
        assert_eq!(confidence.confidence_level(), "High");
    }

    #[test]
    fn test_neutral_chroma_analysis() {
        // Flat chroma: scale 0, raga floored
        let confidence = compute_confidence(
            0.0,
            0.63,
            1.0,
            0.95,
            FallbackUsage {
                chroma: true,
                tempo: true,
            },
        );

        // 0.126 + 0.2 + 0.19 = 0.516
        assert!((confidence.overall - 0.516).abs() < 1e-4);
        assert!(confidence.is_medium_confidence());
        assert_eq!(confidence.confidence_level(), "Medium");
        assert!(confidence.has_flag(AnalysisFlag::WeakTonality));
        assert!(confidence.has_flag(AnalysisFlag::NeutralChroma));
        assert!(confidence.has_flag(AnalysisFlag::DefaultTempo));
        assert!(!confidence.has_flag(AnalysisFlag::RagaAtFloor));
    }

    #[test]
    fn test_raga_floor_flag() {
        let confidence = compute_confidence(0.2, 0.2, 0.3, 0.4, FallbackUsage::default());
        assert!(confidence.has_flag(AnalysisFlag::RagaAtFloor));
        assert!(confidence.is_low_confidence());
        assert_eq!(confidence.confidence_level(), "Low");
    }

    #[test]
    fn test_components_are_clamped() {
        let confidence = compute_confidence(1.5, -0.2, 2.0, f32::INFINITY, FallbackUsage::default());
        assert_eq!(confidence.scale, 1.0);
        assert_eq!(confidence.raga, 0.0);
        assert_eq!(confidence.genre, 1.0);
        assert!(confidence.overall <= 1.0);
    }
}
