//! Krumhansl-Kessler key templates
//!
//! Defines tonal profiles for 24 keys (12 major + 12 minor), each normalized
//! to sum to 1 and rotated so index 0 of the source profile sits on the tonic.

use std::sync::OnceLock;

use crate::features::chroma::{rotate_profile, Chroma, CHROMA_BINS};

/// Krumhansl-Kessler C major probe-tone ratings
pub const KK_MAJOR: Chroma = [
    6.35, 2.23, 3.48, 2.33, 4.38, 4.09, 2.52, 5.19, 2.39, 3.66, 2.29, 2.88,
];

/// Krumhansl-Kessler C minor probe-tone ratings
pub const KK_MINOR: Chroma = [
    6.33, 2.68, 3.52, 5.38, 2.60, 3.53, 2.54, 4.75, 3.98, 2.69, 3.34, 3.17,
];

/// Key templates for all 24 keys
#[derive(Debug, Clone)]
pub struct KeyTemplates {
    /// Major key templates (12 keys: C, C#, D, ..., B)
    pub major: [Chroma; 12],

    /// Minor key templates (12 keys: C, C#, D, ..., B)
    pub minor: [Chroma; 12],
}

impl KeyTemplates {
    /// Create new key templates with Krumhansl-Kessler profiles
    pub fn new() -> Self {
        let major_profile = normalize_sum(&KK_MAJOR);
        let minor_profile = normalize_sum(&KK_MINOR);

        let mut major = [[0.0f32; CHROMA_BINS]; 12];
        let mut minor = [[0.0f32; CHROMA_BINS]; 12];
        for tonic in 0..12 {
            major[tonic] = rotate_profile(&major_profile, tonic);
            minor[tonic] = rotate_profile(&minor_profile, tonic);
        }

        Self { major, minor }
    }

    /// Process-wide templates, built on first use and never mutated
    pub fn shared() -> &'static KeyTemplates {
        static TEMPLATES: OnceLock<KeyTemplates> = OnceLock::new();
        TEMPLATES.get_or_init(KeyTemplates::new)
    }

    /// Major template for tonic index (0 = C)
    pub fn get_major_template(&self, tonic: usize) -> &Chroma {
        &self.major[tonic % 12]
    }

    /// Minor template for tonic index (0 = C)
    pub fn get_minor_template(&self, tonic: usize) -> &Chroma {
        &self.minor[tonic % 12]
    }
}

impl Default for KeyTemplates {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_sum(profile: &Chroma) -> Chroma {
    let sum: f32 = profile.iter().sum();
    let mut out = *profile;
    for v in out.iter_mut() {
        *v /= sum;
    }
    out
}
