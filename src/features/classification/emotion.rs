//! Emotion classification
//!
//! Rule-based: each profile has a tempo range plus expected brightness and
//! energy. Tempo inside the range scores 0.4, tempo within 20 BPM of either
//! bound scores 0.2, and each matching predicate scores 0.3.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::descriptors::TimbreDescriptors;
use crate::io::FeatureVector;

const TEMPO_MATCH_WEIGHT: f32 = 0.4;
const TEMPO_NEAR_WEIGHT: f32 = 0.2;
const TEMPO_NEAR_BPM: f32 = 20.0;
const SPECTRAL_WEIGHT: f32 = 0.3;
const ENERGY_WEIGHT: f32 = 0.3;
const CONFIDENCE_BOOST: f32 = 0.3;

/// Emotion labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Emotion {
    /// Bright, energetic, mid-fast
    Joyful,
    /// Bright, energetic, fast
    Energetic,
    /// Dark, quiet, slow
    Peaceful,
    /// Dark, quiet, slow to moderate
    Melancholic,
    /// Dark, quiet, moderate
    Romantic,
    /// Bright, energetic, wide tempo range
    Intense,
    /// Dark, quiet, moderate
    Dreamy,
    /// Bright, energetic, mid tempo
    Uplifting,
    /// No profile scored above zero
    #[default]
    Neutral,
}

impl Emotion {
    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Emotion::Joyful => "Joyful",
            Emotion::Energetic => "Energetic",
            Emotion::Peaceful => "Peaceful",
            Emotion::Melancholic => "Melancholic",
            Emotion::Romantic => "Romantic",
            Emotion::Intense => "Intense",
            Emotion::Dreamy => "Dreamy",
            Emotion::Uplifting => "Uplifting",
            Emotion::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expected tempo and timbre of one emotion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionProfile {
    /// Label
    pub emotion: Emotion,
    /// Inclusive tempo range in BPM
    pub tempo_range: (f32, f32),
    /// Expected brightness
    pub spectral_high: bool,
    /// Expected energy
    pub energy_high: bool,
}

const fn profile(emotion: Emotion, lo: f32, hi: f32, spectral_high: bool, energy_high: bool) -> EmotionProfile {
    EmotionProfile {
        emotion,
        tempo_range: (lo, hi),
        spectral_high,
        energy_high,
    }
}

/// Emotion profiles in match order
pub const EMOTION_PROFILES: [EmotionProfile; 8] = [
    profile(Emotion::Joyful, 100.0, 140.0, true, true),
    profile(Emotion::Energetic, 120.0, 180.0, true, true),
    profile(Emotion::Peaceful, 60.0, 90.0, false, false),
    profile(Emotion::Melancholic, 60.0, 100.0, false, false),
    profile(Emotion::Romantic, 70.0, 110.0, false, false),
    profile(Emotion::Intense, 100.0, 160.0, true, true),
    profile(Emotion::Dreamy, 70.0, 100.0, false, false),
    profile(Emotion::Uplifting, 100.0, 130.0, true, true),
];

impl EmotionProfile {
    /// Raw score against a set of descriptors
    pub fn score(&self, descriptors: &TimbreDescriptors) -> f32 {
        let (lo, hi) = self.tempo_range;
        let tempo = descriptors.tempo;

        let mut score = 0.0f32;
        if lo <= tempo && tempo <= hi {
            score += TEMPO_MATCH_WEIGHT;
        } else if (tempo - lo).abs() < TEMPO_NEAR_BPM || (tempo - hi).abs() < TEMPO_NEAR_BPM {
            score += TEMPO_NEAR_WEIGHT;
        }
        if self.spectral_high == descriptors.spectral_high {
            score += SPECTRAL_WEIGHT;
        }
        if self.energy_high == descriptors.energy_high {
            score += ENERGY_WEIGHT;
        }
        score
    }
}

/// Emotion classification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionClassification {
    /// Winning emotion
    pub emotion: Emotion,
    /// Winning score plus 0.3, capped at 1
    pub confidence: f32,
}

/// Classify the emotion of a feature vector
///
/// # Example
///
/// ```
/// use loopify_analysis::features::classification::{classify_emotion, Emotion};
/// use loopify_analysis::io::FeatureVector;
///
/// let features = FeatureVector {
///     tempo: Some(150.0),
///     spectral_centroid: Some(3200.0),
///     rms_energy: Some(0.3),
///     ..Default::default()
/// };
/// assert_eq!(classify_emotion(&features).emotion, Emotion::Energetic);
/// ```
pub fn classify_emotion(features: &FeatureVector) -> EmotionClassification {
    classify_emotion_from_descriptors(&TimbreDescriptors::from_features(features))
}

/// Classify emotion from precomputed descriptors
pub fn classify_emotion_from_descriptors(descriptors: &TimbreDescriptors) -> EmotionClassification {
    let mut best_emotion = Emotion::Neutral;
    let mut best_score = 0.0f32;

    for profile in EMOTION_PROFILES.iter() {
        let score = profile.score(descriptors);
        if score > best_score {
            best_score = score;
            best_emotion = profile.emotion;
        }
    }

    let confidence = (best_score + CONFIDENCE_BOOST).min(1.0);
    log::debug!("Emotion: {} (score {:.2}, confidence {:.2})", best_emotion, best_score, confidence);

    EmotionClassification {
        emotion: best_emotion,
        confidence,
    }
}
