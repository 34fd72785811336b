//! Analysis metadata structures

use serde::{Deserialize, Serialize};

/// Analysis metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    /// Algorithm version
    pub algorithm_version: String,

    /// Track duration in seconds the timeline was built for
    pub duration_seconds: f32,

    /// Sample rate reported by the front-end, if any
    pub sample_rate: Option<u32>,

    /// Neutral chroma replaced missing or malformed chroma
    pub chroma_fallback: bool,

    /// Default tempo replaced a missing or invalid tempo
    pub tempo_fallback: bool,

    /// Human-readable notes about substituted inputs
    pub warnings: Vec<String>,
}

impl Default for AnalysisMetadata {
    fn default() -> Self {
        Self {
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            duration_seconds: 0.0,
            sample_rate: None,
            chroma_fallback: false,
            tempo_fallback: false,
            warnings: vec![],
        }
    }
}
