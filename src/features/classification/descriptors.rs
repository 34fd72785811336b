//! Timbre descriptors
//!
//! Boolean predicates derived once from the spectral and energy features,
//! shared by the emotion and genre classifiers.

use serde::{Deserialize, Serialize};

use crate::io::FeatureVector;

/// Spectral centroid above which a track reads as bright (Hz)
pub const BRIGHT_CENTROID_HZ: f32 = 2500.0;

/// RMS energy above which a track reads as energetic
pub const HIGH_RMS: f32 = 0.2;

/// Bandwidth above which the spectrum reads as complex (Hz)
pub const COMPLEX_BANDWIDTH_HZ: f32 = 2500.0;

/// Tempo and timbre inputs of the rule-based classifiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimbreDescriptors {
    /// Tempo in BPM (after defaults)
    pub tempo: f32,
    /// Centroid > 2500 Hz
    pub spectral_high: bool,
    /// RMS > 0.2
    pub energy_high: bool,
    /// Bandwidth > 2500 Hz
    pub complex: bool,
    /// ZCR < 0.08 and centroid > 3000 Hz
    pub synthetic: bool,
    /// ZCR > 0.1 and RMS > 0.2
    pub percussive: bool,
    /// Centroid < 2000 Hz and not synthetic
    pub acoustic: bool,
    /// RMS > 0.25
    pub high_energy: bool,
}

impl TimbreDescriptors {
    /// Derive descriptors, substituting defaults for missing measurements
    pub fn from_features(features: &FeatureVector) -> Self {
        let tempo = features.tempo_or_default();
        let centroid = features.spectral_centroid_or_default();
        let bandwidth = features.spectral_bandwidth_or_default();
        let zcr = features.zero_crossing_rate_or_default();
        let rms = features.rms_energy_or_default();

        let synthetic = zcr < 0.08 && centroid > 3000.0;

        Self {
            tempo,
            spectral_high: centroid > BRIGHT_CENTROID_HZ,
            energy_high: rms > HIGH_RMS,
            complex: bandwidth > COMPLEX_BANDWIDTH_HZ,
            synthetic,
            percussive: zcr > 0.1 && rms > 0.2,
            acoustic: centroid < 2000.0 && !synthetic,
            high_energy: rms > 0.25,
        }
    }
}
