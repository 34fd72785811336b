//! Chroma handling
//!
//! Pitch-class distribution (12 semitones) shared by every detector:
//! - Fallback for missing/malformed input
//! - Max normalization
//! - Tonic rotation

pub mod normalization;

pub use normalization::{argmax, normalize_by_max, resolve_chroma, rotate_profile, rotate_to_tonic};

/// Number of pitch-class bins
pub const CHROMA_BINS: usize = 12;

/// Guard added to every divisor (applied in f64)
pub const EPSILON: f64 = 1e-8;

/// 12-bin pitch-class profile, index 0 = C
pub type Chroma = [f32; CHROMA_BINS];

/// Flat profile substituted for unusable input
pub const NEUTRAL_CHROMA: Chroma = [1.0; CHROMA_BINS];
