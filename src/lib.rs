//! # Loopify Analysis
//!
//! A music-theory classification engine that turns a precomputed audio
//! feature vector into symbolic musical judgments: key, mode, raga, chord
//! progression and timeline, difficulty, emotion and genre.
//!
//! ## Features
//!
//! - **Key Detection**: Krumhansl-Kessler template correlation over 24 keys
//! - **Extended Modes**: Church modes, harmonic/melodic minor, pentatonic and blues
//! - **Raga Detection**: Carnatic/Hindustani templates with vadi/samvadi weighting
//! - **Chords**: Template matching, curated progressions, tempo-driven timeline, difficulty
//! - **Classification**: Rule-based emotion and genre labels
//!
//! ## Quick Start
//!
//! ```
//! use loopify_analysis::{analyze_features, FeatureVector};
//!
//! let features = FeatureVector::from_json(r#"{
//!     "chroma": [1.0, 0.2, 0.8, 0.2, 0.9, 0.7, 0.2, 0.9, 0.2, 0.7, 0.2, 0.3],
//!     "tempo": 120.0,
//!     "duration": 180.0
//! }"#)?;
//!
//! let result = analyze_features(&features);
//!
//! println!("Key: {} (confidence: {:.2})", result.scale, result.confidence.scale);
//! println!("Progression: {:?}", result.chords.progression);
//! assert_eq!(result.chords.progression, ["C", "G", "Am", "F"]);
//! # Ok::<(), loopify_analysis::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! The analysis pipeline follows this flow:
//!
//! ```text
//! Feature Vector → Chroma Fallback → Key / Mode / Raga → Progression → Timeline → Difficulty
//!                → Timbre Descriptors → Emotion / Genre
//!                → Confidence + Explanation → Output
//! ```
//!
//! Every stage is a pure function over read-only tables, so analyses can run
//! concurrently without coordination.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod io;

// Re-export main types
pub use analysis::confidence::AnalysisConfidence;
pub use analysis::metadata::AnalysisMetadata;
pub use analysis::result::{AnalysisFlag, AnalysisResult, ChordEvent, Key, KeyMode, PitchClass, TonalitySummary};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use features::chords::{detect_chords, get_chord_info, match_chord_from_chroma};
pub use features::classification::{classify_emotion, classify_genre};
pub use features::key::{analyze_tonality, detect_extended_mode};
pub use features::raga::detect_raga;
pub use io::FeatureVector;

use analysis::confidence::{compute_confidence, FallbackUsage};
use analysis::explanation::compose_explanation;
use analysis::result::FeatureEcho;
use features::chords::chords_for_key;
use features::chroma::resolve_chroma;
use features::classification::{classify_emotion_from_descriptors, classify_genre_from_descriptors, TimbreDescriptors};
use features::key::{detect_mode, tonality_from_chroma};
use features::raga::detect_raga_from_chroma;

/// RMS energy echoed when the feature vector has none
const ECHO_DEFAULT_RMS: f32 = 0.2;

/// Main analysis function
///
/// Runs every detector and classifier with the default configuration. Never
/// fails: missing or malformed inputs are replaced by documented defaults,
/// which are reported in the result's flags and metadata.
///
/// # Example
///
/// ```
/// use loopify_analysis::{analyze_features, FeatureVector, KeyMode, PitchClass};
///
/// let result = analyze_features(&FeatureVector::placeholder());
/// assert_eq!(result.key.tonic, PitchClass::C);
/// assert_eq!(result.key.mode, KeyMode::Major);
/// assert_eq!(result.chords.timeline[0].duration, 4.0);
/// ```
pub fn analyze_features(features: &FeatureVector) -> AnalysisResult {
    analyze(features, &AnalysisConfig::default())
}

/// Analysis with an explicit configuration
///
/// # Errors
///
/// Returns `AnalysisError::InvalidConfig` if `config` fails validation. The
/// feature vector itself never causes an error.
///
/// # Example
///
/// ```
/// use loopify_analysis::{analyze_features_with_config, AnalysisConfig, FeatureVector};
///
/// let config = AnalysisConfig {
///     bars_per_chord: 1,
///     ..AnalysisConfig::default()
/// };
/// let result = analyze_features_with_config(&FeatureVector::placeholder(), &config)?;
/// assert_eq!(result.chords.timeline[0].duration, 2.0);
/// # Ok::<(), loopify_analysis::AnalysisError>(())
/// ```
pub fn analyze_features_with_config(
    features: &FeatureVector,
    config: &AnalysisConfig,
) -> Result<AnalysisResult, AnalysisError> {
    config.validate()?;
    Ok(analyze(features, config))
}

/// Primary key, extended mode and raga in one call
///
/// The key comes from the Krumhansl-Kessler detector, the mode from the
/// extended detector, and the confidence is the larger of the two.
pub fn summarize_tonality(features: &FeatureVector) -> TonalitySummary {
    let (chroma, _) = resolve_chroma(features.chroma.as_deref());
    let primary = tonality_from_chroma(&chroma);
    let extended_mode = detect_mode(&chroma);
    let raga = detect_raga_from_chroma(&chroma);

    TonalitySummary {
        key: primary.key,
        mode: extended_mode.mode,
        confidence: primary.confidence.max(extended_mode.confidence),
        primary,
        extended_mode,
        raga,
    }
}

fn analyze(features: &FeatureVector, config: &AnalysisConfig) -> AnalysisResult {
    log::debug!("Starting feature analysis");

    let (chroma, chroma_fallback) = resolve_chroma(features.chroma.as_deref());
    let tempo_fallback = !features.has_valid_tempo();
    let tempo = features.tempo_or_default();
    if tempo_fallback {
        log::warn!("Tempo missing or invalid ({:?}); using {} BPM", features.tempo, tempo);
    }

    // Tonal stages share the resolved chroma
    let tonality = tonality_from_chroma(&chroma);
    let key = Key {
        tonic: tonality.key,
        mode: tonality.mode,
    };
    let extended_mode = detect_mode(&chroma);
    let raga = detect_raga_from_chroma(&chroma);

    // Timbre stages share one set of descriptors
    let descriptors = TimbreDescriptors::from_features(features);
    let emotion = classify_emotion_from_descriptors(&descriptors);
    let genre = classify_genre_from_descriptors(&descriptors);

    let chords = chords_for_key(key, features, config);

    let confidence = compute_confidence(
        tonality.confidence,
        raga.confidence,
        emotion.confidence,
        genre.confidence,
        FallbackUsage {
            chroma: chroma_fallback,
            tempo: tempo_fallback,
        },
    );

    let explanation = compose_explanation(
        &tonality.scale,
        tempo,
        &raga,
        &emotion,
        &genre,
        features.spectral_centroid_or_default(),
        config.raga_mention_threshold,
    );

    let mut warnings = Vec::new();
    if chroma_fallback {
        warnings.push("Chroma missing or malformed; neutral chroma used".to_string());
    }
    if tempo_fallback {
        warnings.push(format!("Tempo missing or invalid; {} BPM used", tempo));
    }

    let metadata = AnalysisMetadata {
        duration_seconds: features.duration_or_default(),
        sample_rate: features.sample_rate,
        chroma_fallback,
        tempo_fallback,
        warnings,
        ..AnalysisMetadata::default()
    };

    let features_echo = FeatureEcho {
        spectral_centroid: features.spectral_centroid_or_default(),
        zero_crossing_rate: features.zero_crossing_rate_or_default(),
        rms_energy: features
            .rms_energy
            .filter(|v| v.is_finite())
            .unwrap_or(ECHO_DEFAULT_RMS),
    };

    log::debug!(
        "Analysis complete: {} / {} / {} / {}, overall confidence {:.3}",
        tonality.scale,
        raga.raga.name(),
        emotion.emotion,
        genre.genre,
        confidence.overall
    );

    AnalysisResult {
        tempo,
        key,
        scale: tonality.scale.clone(),
        tonality,
        extended_mode,
        raga,
        emotion,
        genre,
        chords,
        confidence,
        features: features_echo,
        explanation,
        metadata,
    }
}
