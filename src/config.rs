//! Configuration parameters for analysis

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Analysis configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    // Timeline
    /// Beats per bar used to size timeline events (default: 4)
    pub beats_per_bar: u32,

    /// Bars each chord is held on the timeline (default: 2)
    pub bars_per_chord: u32,

    /// Timeline cap in seconds regardless of track length (default: 300.0)
    pub max_timeline_seconds: f32,

    // Explanation
    /// Raga confidence the explanation must exceed before naming the raga (default: 0.5)
    pub raga_mention_threshold: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            beats_per_bar: 4,
            bars_per_chord: 2,
            max_timeline_seconds: 300.0,
            raga_mention_threshold: 0.5,
        }
    }
}

impl AnalysisConfig {
    /// Check that every parameter is usable
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.beats_per_bar == 0 {
            return Err(AnalysisError::InvalidConfig(
                "beats_per_bar must be greater than 0".to_string(),
            ));
        }
        if self.bars_per_chord == 0 {
            return Err(AnalysisError::InvalidConfig(
                "bars_per_chord must be greater than 0".to_string(),
            ));
        }
        if self.beats_per_bar.checked_mul(self.bars_per_chord).is_none() {
            return Err(AnalysisError::InvalidConfig(format!(
                "beats_per_bar * bars_per_chord overflows ({} * {})",
                self.beats_per_bar, self.bars_per_chord
            )));
        }
        if !self.max_timeline_seconds.is_finite() || self.max_timeline_seconds <= 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "max_timeline_seconds must be finite and positive, got {}",
                self.max_timeline_seconds
            )));
        }
        if !(0.0..=1.0).contains(&self.raga_mention_threshold) {
            return Err(AnalysisError::InvalidConfig(format!(
                "raga_mention_threshold must be within [0, 1], got {}",
                self.raga_mention_threshold
            )));
        }
        Ok(())
    }

    /// Beats spanned by one timeline event
    pub fn beats_per_chord(&self) -> f32 {
        self.beats_per_bar as f32 * self.bars_per_chord as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.beats_per_chord(), 8.0);
    }

    #[test]
    fn test_rejects_zero_bars() {
        let config = AnalysisConfig {
            bars_per_chord: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_overflowing_bar_layout() {
        let config = AnalysisConfig {
            beats_per_bar: u32::MAX,
            bars_per_chord: 2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::InvalidConfig(_))
        ));
        // Unvalidated configs still compute without overflow
        assert_eq!(config.beats_per_chord(), u32::MAX as f32 * 2.0);
    }

    #[test]
    fn test_rejects_non_finite_cap() {
        let config = AnalysisConfig {
            max_timeline_seconds: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_threshold_out_of_range() {
        let config = AnalysisConfig {
            raga_mention_threshold: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"bars_per_chord": 1}"#).unwrap();
        assert_eq!(config.bars_per_chord, 1);
        assert_eq!(config.beats_per_bar, 4);
        assert_eq!(config.max_timeline_seconds, 300.0);
    }
}
