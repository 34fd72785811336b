//! Genre classification
//!
//! Each genre pairs a tempo range with a timbre pattern. Tempo inside the
//! range scores 0.3 and a matching pattern scores 0.4; the `Balanced` and
//! `Mixed` patterns always contribute 0.2 and 0.25.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::descriptors::TimbreDescriptors;
use crate::io::FeatureVector;

const TEMPO_MATCH_WEIGHT: f32 = 0.3;
const PATTERN_MATCH_WEIGHT: f32 = 0.4;
const BALANCED_WEIGHT: f32 = 0.2;
const MIXED_WEIGHT: f32 = 0.25;
const CONFIDENCE_BOOST: f32 = 0.4;

/// Genre labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Genre {
    /// Default label
    #[default]
    Pop,
    /// Rock
    Rock,
    /// Classical
    Classical,
    /// Jazz
    Jazz,
    /// Electronic
    Electronic,
    /// Folk
    Folk,
    /// Hip-Hop
    #[serde(rename = "Hip-Hop")]
    HipHop,
    /// Fusion
    Fusion,
}

impl Genre {
    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Genre::Pop => "Pop",
            Genre::Rock => "Rock",
            Genre::Classical => "Classical",
            Genre::Jazz => "Jazz",
            Genre::Electronic => "Electronic",
            Genre::Folk => "Folk",
            Genre::HipHop => "Hip-Hop",
            Genre::Fusion => "Fusion",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Timbre pattern a genre expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimbrePattern {
    /// No particular timbre; always contributes
    Balanced,
    /// Loud
    HighEnergy,
    /// Wide bandwidth
    Complex,
    /// Bright with few zero crossings
    Synthetic,
    /// Noisy and loud
    Percussive,
    /// Dark and not synthetic
    Acoustic,
    /// Blend of styles; always contributes
    Mixed,
}

impl TimbrePattern {
    /// Score contribution of this pattern
    pub fn weight(self, descriptors: &TimbreDescriptors) -> f32 {
        let matched = match self {
            TimbrePattern::Balanced => return BALANCED_WEIGHT,
            TimbrePattern::Mixed => return MIXED_WEIGHT,
            TimbrePattern::HighEnergy => descriptors.high_energy,
            TimbrePattern::Complex => descriptors.complex,
            TimbrePattern::Synthetic => descriptors.synthetic,
            TimbrePattern::Percussive => descriptors.percussive,
            TimbrePattern::Acoustic => descriptors.acoustic,
        };
        if matched {
            PATTERN_MATCH_WEIGHT
        } else {
            0.0
        }
    }
}

/// Expected tempo and timbre of one genre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenreProfile {
    /// Label
    pub genre: Genre,
    /// Inclusive tempo range in BPM
    pub tempo_range: (f32, f32),
    /// Expected timbre
    pub pattern: TimbrePattern,
}

const fn profile(genre: Genre, lo: f32, hi: f32, pattern: TimbrePattern) -> GenreProfile {
    GenreProfile {
        genre,
        tempo_range: (lo, hi),
        pattern,
    }
}

/// Genre profiles in match order
pub const GENRE_PROFILES: [GenreProfile; 8] = [
    profile(Genre::Pop, 100.0, 130.0, TimbrePattern::Balanced),
    profile(Genre::Rock, 100.0, 140.0, TimbrePattern::HighEnergy),
    profile(Genre::Classical, 60.0, 120.0, TimbrePattern::Complex),
    profile(Genre::Jazz, 80.0, 140.0, TimbrePattern::Complex),
    profile(Genre::Electronic, 120.0, 150.0, TimbrePattern::Synthetic),
    profile(Genre::Folk, 80.0, 120.0, TimbrePattern::Acoustic),
    profile(Genre::HipHop, 80.0, 115.0, TimbrePattern::Percussive),
    profile(Genre::Fusion, 90.0, 130.0, TimbrePattern::Mixed),
];

impl GenreProfile {
    /// Raw score against a set of descriptors
    pub fn score(&self, descriptors: &TimbreDescriptors) -> f32 {
        let (lo, hi) = self.tempo_range;
        let mut score = 0.0f32;
        if lo <= descriptors.tempo && descriptors.tempo <= hi {
            score += TEMPO_MATCH_WEIGHT;
        }
        score + self.pattern.weight(descriptors)
    }
}

/// Genre classification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreClassification {
    /// Winning genre
    pub genre: Genre,
    /// Winning score plus 0.4, capped at 1
    pub confidence: f32,
}

/// Classify the genre of a feature vector
pub fn classify_genre(features: &FeatureVector) -> GenreClassification {
    classify_genre_from_descriptors(&TimbreDescriptors::from_features(features))
}

/// Classify genre from precomputed descriptors
pub fn classify_genre_from_descriptors(descriptors: &TimbreDescriptors) -> GenreClassification {
    let mut best_genre = Genre::Pop;
    let mut best_score = 0.0f32;

    for profile in GENRE_PROFILES.iter() {
        let score = profile.score(descriptors);
        if score > best_score {
            best_score = score;
            best_genre = profile.genre;
        }
    }

    let confidence = (best_score + CONFIDENCE_BOOST).min(1.0);
    log::debug!("Genre: {} (score {:.2}, confidence {:.2})", best_genre, best_score, confidence);

    GenreClassification {
        genre: best_genre,
        confidence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(tempo: f32, centroid: f32, bandwidth: f32, zcr: f32, rms: f32) -> FeatureVector {
        FeatureVector {
            tempo: Some(tempo),
            spectral_centroid: Some(centroid),
            spectral_bandwidth: Some(bandwidth),
            zero_crossing_rate: Some(zcr),
            rms_energy: Some(rms),
            ..Default::default()
        }
    }

    #[test]
    fn test_placeholder_is_fusion() {
        // Fusion: 0.3 + 0.25 beats Pop: 0.3 + 0.2
        let result = classify_genre(&FeatureVector::placeholder());
        assert_eq!(result.genre, Genre::Fusion);
        assert!((result.confidence - 0.95).abs() < 1e-5);
    }

    #[test]
    fn test_electronic() {
        let result = classify_genre(&features(128.0, 3500.0, 2000.0, 0.05, 0.15));
        assert_eq!(result.genre, Genre::Electronic);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_hip_hop() {
        let result = classify_genre(&features(90.0, 2200.0, 2000.0, 0.15, 0.22));
        assert_eq!(result.genre, Genre::HipHop);
        assert_eq!(serde_json::to_value(result.genre).unwrap(), "Hip-Hop");
    }

    #[test]
    fn test_classical_and_rock() {
        let result = classify_genre(&features(70.0, 1800.0, 3000.0, 0.05, 0.1));
        assert_eq!(result.genre, Genre::Classical);
        let result = classify_genre(&features(135.0, 2200.0, 2000.0, 0.05, 0.3));
        assert_eq!(result.genre, Genre::Rock);
    }

    #[test]
    fn test_unconditional_patterns() {
        let d = TimbreDescriptors::from_features(&FeatureVector::default());
        assert_eq!(TimbrePattern::Balanced.weight(&d), 0.2);
        assert_eq!(TimbrePattern::Mixed.weight(&d), 0.25);
        assert_eq!(TimbrePattern::Complex.weight(&d), 0.0);
    }

    #[test]
    fn test_out_of_range_tempo() {
        // 200 BPM misses every tempo range; Fusion still scores 0.25
        let result = classify_genre(&features(200.0, 2200.0, 2000.0, 0.08, 0.15));
        assert_eq!(result.genre, Genre::Fusion);
        assert!((result.confidence - 0.65).abs() < 1e-5);
    }
}
