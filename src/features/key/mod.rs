//! Key detection modules
//!
//! Detect musical key and mode using:
//! - Krumhansl-Kessler templates (24 keys)
//! - Pearson correlation matching
//! - Extended mode templates (church modes, pentatonic, blues)

pub mod detector;
pub mod modes;
pub mod templates;

pub use detector::{analyze_tonality, detect_key, detect_key_with_templates, tonality_from_chroma};
pub use modes::{detect_extended_mode, detect_mode, scale_notes, ModeDetection, ScaleMode};
pub use templates::KeyTemplates;

use serde::{Deserialize, Serialize};

use crate::analysis::result::{Key, KeyMode, PitchClass};

/// Key detection result
#[derive(Debug, Clone)]
pub struct KeyDetectionResult {
    /// Detected key (best match)
    pub key: Key,

    /// Pearson correlation of the best match (-1.0 when nothing correlated)
    pub correlation: f32,

    /// Confidence score (0.0-1.0)
    pub confidence: f32,

    /// Top N keys with correlations (default: top 3)
    /// Useful for ambiguous cases such as relative major/minor pairs
    pub top_keys: Vec<(Key, f32)>,
}

/// Major/minor tonality with its scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tonality {
    /// Tonic
    pub key: PitchClass,
    /// Major or minor
    pub mode: KeyMode,
    /// Label such as "C Major"
    pub scale: String,
    /// Correlation-derived confidence (0.0-1.0)
    pub confidence: f32,
    /// Scale notes from the tonic
    pub notes: Vec<PitchClass>,
    /// Semitone offsets of the scale
    pub intervals: Vec<u8>,
    /// Runner-up keys, best first
    #[serde(default)]
    pub alternatives: Vec<KeyCandidate>,
}

/// A ranked key candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyCandidate {
    /// Tonic
    pub key: PitchClass,
    /// Major or minor
    pub mode: KeyMode,
    /// Pearson correlation with the key's template
    pub correlation: f32,
}
