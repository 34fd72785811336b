//! Feature vector supplied by the audio front-end
//!
//! Every field is optional. Missing or non-finite measurements fall back to
//! fixed defaults at the point of use, so a partially filled vector still
//! produces a full analysis.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AnalysisError;

/// Tempo used when none (or a non-positive one) is supplied
pub const DEFAULT_TEMPO: f32 = 120.0;
/// Spectral centroid default (Hz)
pub const DEFAULT_SPECTRAL_CENTROID: f32 = 2000.0;
/// Spectral bandwidth default (Hz)
pub const DEFAULT_SPECTRAL_BANDWIDTH: f32 = 2000.0;
/// Zero-crossing rate default
pub const DEFAULT_ZERO_CROSSING_RATE: f32 = 0.1;
/// RMS energy default
pub const DEFAULT_RMS_ENERGY: f32 = 0.15;
/// Track duration default (seconds)
pub const DEFAULT_DURATION: f32 = 120.0;
/// Number of MFCC coefficients
pub const MFCC_COEFFICIENTS: usize = 13;

/// Acoustic measurements for one track
///
/// Field names follow camelCase on the wire; the front-end's snake_case
/// names (`chroma_mean`, `spectral_centroid`, ...) are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureVector {
    /// Mean energy per pitch class, index 0 = C
    #[serde(
        alias = "chroma_mean",
        alias = "chromaMean",
        deserialize_with = "deserialize_lenient_chroma"
    )]
    pub chroma: Option<Vec<f32>>,

    /// Beats per minute
    pub tempo: Option<f32>,

    /// Spectral centroid (Hz)
    #[serde(alias = "spectral_centroid")]
    pub spectral_centroid: Option<f32>,

    /// Spectral rolloff (Hz)
    #[serde(alias = "spectral_rolloff")]
    pub spectral_rolloff: Option<f32>,

    /// Spectral bandwidth (Hz)
    #[serde(alias = "spectral_bandwidth")]
    pub spectral_bandwidth: Option<f32>,

    /// Zero-crossing rate in [0, 1]
    #[serde(alias = "zero_crossing_rate")]
    pub zero_crossing_rate: Option<f32>,

    /// RMS amplitude
    #[serde(alias = "rms_energy")]
    pub rms_energy: Option<f32>,

    /// MFCC means (13 coefficients)
    #[serde(alias = "mfcc_mean")]
    pub mfcc_mean: Option<Vec<f32>>,

    /// MFCC standard deviations (13 coefficients)
    #[serde(alias = "mfcc_std")]
    pub mfcc_std: Option<Vec<f32>>,

    /// Mean detected pitch (Hz)
    #[serde(alias = "pitch_mean")]
    pub pitch_mean: Option<f32>,

    /// Mean onset strength
    #[serde(alias = "onset_strength")]
    pub onset_strength: Option<f32>,

    /// Track duration in seconds
    pub duration: Option<f32>,

    /// Sample rate of the analysed audio
    #[serde(alias = "sample_rate")]
    pub sample_rate: Option<u32>,
}

/// Accept any JSON for chroma; anything other than an array of numbers becomes `None`
fn deserialize_lenient_chroma<'de, D>(deserializer: D) -> Result<Option<Vec<f32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let values = match value.as_array() {
        Some(items) => items,
        None => return Ok(None),
    };
    let chroma: Option<Vec<f32>> = values
        .iter()
        .map(|v| v.as_f64().map(|x| x as f32))
        .collect();
    if chroma.is_none() {
        log::warn!("Chroma contains non-numeric entries; treating as absent");
    }
    Ok(chroma)
}

fn finite_or(value: Option<f32>, default: f32) -> f32 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => default,
    }
}

impl FeatureVector {
    /// Decode a feature vector from JSON
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::DecodingError` if the text is not a JSON object
    /// of the expected shape.
    ///
    /// # Example
    ///
    /// ```
    /// use loopify_analysis::FeatureVector;
    ///
    /// let fv = FeatureVector::from_json(r#"{"tempo": 96.0, "spectral_centroid": 1800.0}"#)?;
    /// assert_eq!(fv.tempo, Some(96.0));
    /// assert_eq!(fv.spectral_centroid, Some(1800.0));
    /// # Ok::<(), loopify_analysis::AnalysisError>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        let features: FeatureVector = serde_json::from_str(json)?;
        Ok(features)
    }

    /// Neutral placeholder the front-end supplies when it cannot measure audio
    ///
    /// Chroma is a C-major-shaped profile; the remaining values are mid-range
    /// measurements for a 3-minute track at 22.05 kHz.
    pub fn placeholder() -> Self {
        Self {
            chroma: Some(vec![1.0, 0.2, 0.8, 0.2, 0.9, 0.7, 0.2, 0.9, 0.2, 0.7, 0.2, 0.3]),
            tempo: Some(120.0),
            spectral_centroid: Some(2200.0),
            spectral_rolloff: Some(4500.0),
            spectral_bandwidth: Some(2000.0),
            zero_crossing_rate: Some(0.08),
            rms_energy: Some(0.15),
            mfcc_mean: Some(vec![0.0; MFCC_COEFFICIENTS]),
            mfcc_std: Some(vec![1.0; MFCC_COEFFICIENTS]),
            pitch_mean: Some(440.0),
            onset_strength: Some(0.5),
            duration: Some(180.0),
            sample_rate: Some(22050),
        }
    }

    /// Whether a usable tempo was supplied (finite and positive)
    pub fn has_valid_tempo(&self) -> bool {
        matches!(self.tempo, Some(t) if t.is_finite() && t > 0.0)
    }

    /// Tempo in BPM, or 120 when missing, non-finite or non-positive
    pub fn tempo_or_default(&self) -> f32 {
        match self.tempo {
            Some(t) if t.is_finite() && t > 0.0 => t,
            _ => DEFAULT_TEMPO,
        }
    }

    /// Spectral centroid, or 2000 Hz
    pub fn spectral_centroid_or_default(&self) -> f32 {
        finite_or(self.spectral_centroid, DEFAULT_SPECTRAL_CENTROID)
    }

    /// Spectral bandwidth, or 2000 Hz
    pub fn spectral_bandwidth_or_default(&self) -> f32 {
        finite_or(self.spectral_bandwidth, DEFAULT_SPECTRAL_BANDWIDTH)
    }

    /// Zero-crossing rate, or 0.1
    pub fn zero_crossing_rate_or_default(&self) -> f32 {
        finite_or(self.zero_crossing_rate, DEFAULT_ZERO_CROSSING_RATE)
    }

    /// RMS energy, or 0.15
    pub fn rms_energy_or_default(&self) -> f32 {
        finite_or(self.rms_energy, DEFAULT_RMS_ENERGY)
    }

    /// Duration in seconds, or 120
    pub fn duration_or_default(&self) -> f32 {
        finite_or(self.duration, DEFAULT_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_snake_case_aliases() {
        let json = r#"{
            "chroma_mean": [1.0, 0.0, 0.5, 0.0, 0.8, 0.4, 0.0, 0.9, 0.0, 0.6, 0.0, 0.2],
            "tempo": 128.0,
            "zero_crossing_rate": 0.05,
            "rms_energy": 0.3,
            "sample_rate": 22050
        }"#;
        let fv = FeatureVector::from_json(json).unwrap();
        assert_eq!(fv.chroma.as_ref().map(|c| c.len()), Some(12));
        assert_eq!(fv.tempo, Some(128.0));
        assert_eq!(fv.zero_crossing_rate, Some(0.05));
        assert_eq!(fv.rms_energy, Some(0.3));
        assert_eq!(fv.sample_rate, Some(22050));
        assert_eq!(fv.spectral_centroid, None);
    }

    #[test]
    fn test_from_json_camel_case() {
        let fv = FeatureVector::from_json(r#"{"spectralCentroid": 3100.0, "mfccMean": [0.0]}"#)
            .unwrap();
        assert_eq!(fv.spectral_centroid, Some(3100.0));
        assert_eq!(fv.mfcc_mean, Some(vec![0.0]));
    }

    #[test]
    fn test_non_numeric_chroma_is_absent() {
        let fv = FeatureVector::from_json(r#"{"chroma": ["a", "b"]}"#).unwrap();
        assert_eq!(fv.chroma, None);

        let fv = FeatureVector::from_json(r#"{"chroma": "loud"}"#).unwrap();
        assert_eq!(fv.chroma, None);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let result = FeatureVector::from_json("not json");
        assert!(matches!(result, Err(AnalysisError::DecodingError(_))));
    }

    #[test]
    fn test_defaults_at_point_of_use() {
        let fv = FeatureVector::default();
        assert_eq!(fv.tempo_or_default(), 120.0);
        assert_eq!(fv.spectral_centroid_or_default(), 2000.0);
        assert_eq!(fv.spectral_bandwidth_or_default(), 2000.0);
        assert_eq!(fv.zero_crossing_rate_or_default(), 0.1);
        assert_eq!(fv.rms_energy_or_default(), 0.15);
        assert_eq!(fv.duration_or_default(), 120.0);
    }

    #[test]
    fn test_invalid_tempo_falls_back() {
        for tempo in [0.0, -60.0, f32::NAN, f32::INFINITY] {
            let fv = FeatureVector {
                tempo: Some(tempo),
                ..Default::default()
            };
            assert!(!fv.has_valid_tempo());
            assert_eq!(fv.tempo_or_default(), 120.0);
        }
    }

    #[test]
    fn test_placeholder_chroma() {
        let fv = FeatureVector::placeholder();
        assert_eq!(
            fv.chroma.unwrap(),
            vec![1.0, 0.2, 0.8, 0.2, 0.9, 0.7, 0.2, 0.9, 0.2, 0.7, 0.2, 0.3]
        );
        assert_eq!(fv.duration, Some(180.0));
        assert_eq!(fv.sample_rate, Some(22050));
    }
}
