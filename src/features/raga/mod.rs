//! Raga detection modules
//!
//! Match chroma against Carnatic (and one Hindustani) raga templates using
//! vadi/samvadi emphasis.

pub mod detector;
pub mod templates;

pub use detector::{detect_raga, detect_raga_from_chroma, RagaDetection, CONFIDENCE_FLOOR};
pub use templates::{Raga, RagaTemplate, RAGA_TEMPLATES};
