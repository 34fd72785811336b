//! Progression difficulty
//!
//! Averages the tier (1-5) of each chord; unrated chords count as tier 3.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::catalog::{difficulty_weight, DEFAULT_DIFFICULTY_WEIGHT};

/// Difficulty label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Mean tier <= 1.5
    Beginner,
    /// Mean tier <= 2.5
    Intermediate,
    /// Mean tier <= 3.5
    Advanced,
    /// Anything harder
    Expert,
}

impl Difficulty {
    /// Label for a mean chord tier
    pub fn from_mean_weight(mean: f32) -> Self {
        if mean <= 1.5 {
            Difficulty::Beginner
        } else if mean <= 2.5 {
            Difficulty::Intermediate
        } else if mean <= 3.5 {
            Difficulty::Advanced
        } else {
            Difficulty::Expert
        }
    }

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rate a progression
///
/// An empty progression is rated as if it held one unrated chord.
///
/// # Example
///
/// ```
/// use loopify_analysis::features::chords::{assess_difficulty, Difficulty};
///
/// // (1 + 1 + 2 + 2) / 4 = 1.5
/// let progression: Vec<String> = ["C", "G", "Am", "F"].iter().map(|c| c.to_string()).collect();
/// assert_eq!(assess_difficulty(&progression), Difficulty::Beginner);
/// ```
pub fn assess_difficulty(progression: &[String]) -> Difficulty {
    let mean = if progression.is_empty() {
        DEFAULT_DIFFICULTY_WEIGHT as f32
    } else {
        let total: u32 = progression
            .iter()
            .map(|chord| difficulty_weight(chord) as u32)
            .sum();
        total as f32 / progression.len() as f32
    };
    Difficulty::from_mean_weight(mean)
}
