//! Chord modules
//!
//! Derive the harmonic backbone of a track from its key:
//! - Chord catalog (templates, notes, difficulty tiers)
//! - Cosine template matching for chroma snapshots
//! - Progression selection per key
//! - Tempo-driven timeline
//! - Difficulty rating

pub mod catalog;
pub mod difficulty;
pub mod matcher;
pub mod progression;
pub mod timeline;

pub use catalog::{
    chord_notes, difficulty_weight, get_chord_info, ChordDescriptor, ChordEntry, ChordInfo,
    ChordQuality, CHORDS,
};
pub use difficulty::{assess_difficulty, Difficulty};
pub use matcher::{match_chord_from_chroma, ChordMatch};
pub use progression::select_progression;
pub use timeline::{build_timeline, build_timeline_with_config};

use serde::{Deserialize, Serialize};

use crate::analysis::result::{ChordEvent, Key, KeyMode};
use crate::config::AnalysisConfig;
use crate::features::chroma::resolve_chroma;
use crate::features::key::detect_key;
use crate::io::FeatureVector;

/// Chord analysis of a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordAnalysis {
    /// Rank-0 progression for the detected key
    pub progression: Vec<String>,
    /// Progression laid out over the track
    pub timeline: Vec<ChordEvent>,
    /// Key in chord-symbol form ("C", "Am")
    pub key: String,
    /// Tempo the timeline was built with
    pub tempo: f32,
    /// Progression difficulty
    pub difficulty: Difficulty,
    /// Major or minor
    pub mode: KeyMode,
}

/// Progression, timeline and difficulty for a feature vector
///
/// Uses the default bar layout. Missing chroma, tempo and duration fall back
/// to the neutral chroma, 120 BPM and 120 s.
pub fn detect_chords(features: &FeatureVector) -> ChordAnalysis {
    detect_chords_with_config(features, &AnalysisConfig::default())
}

/// Chord analysis with an explicit bar layout and timeline cap
pub fn detect_chords_with_config(features: &FeatureVector, config: &AnalysisConfig) -> ChordAnalysis {
    let (chroma, _) = resolve_chroma(features.chroma.as_deref());
    let key = detect_key(&chroma).key;
    chords_for_key(key, features, config)
}

/// Chord analysis for an already-detected key
pub(crate) fn chords_for_key(key: Key, features: &FeatureVector, config: &AnalysisConfig) -> ChordAnalysis {
    let tempo = features.tempo_or_default();
    let duration = features.duration_or_default();

    let progression = select_progression(key.tonic, key.mode);
    let timeline = build_timeline_with_config(&progression, tempo, duration, config);
    let difficulty = assess_difficulty(&progression);

    log::debug!(
        "Chords for {}: {:?}, {} timeline events, {}",
        key.name(),
        progression,
        timeline.len(),
        difficulty
    );

    ChordAnalysis {
        progression,
        timeline,
        key: key.name(),
        tempo,
        difficulty,
        mode: key.mode,
    }
}
