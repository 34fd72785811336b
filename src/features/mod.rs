//! Feature analysis modules
//!
//! This module contains every scoring stage:
//! - Chroma handling (fallback, normalization, rotation)
//! - Key detection (Krumhansl-Kessler) and extended modes
//! - Raga detection
//! - Chord matching, progressions, timeline and difficulty
//! - Emotion and genre classification

pub mod chords;
pub mod chroma;
pub mod classification;
pub mod key;
pub mod raga;
