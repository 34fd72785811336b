//! Extended mode detection
//!
//! Matches tonic-relative chroma against seven-note, pentatonic and blues
//! interval sets. Notes inside the mode add their energy; notes outside it
//! subtract 0.3 of theirs.

use serde::{Deserialize, Serialize};

use crate::analysis::result::{KeyMode, PitchClass};
use crate::features::chroma::{argmax, normalize_by_max, resolve_chroma, rotate_to_tonic, Chroma};
use crate::io::FeatureVector;

/// Penalty applied to energy outside the mode
const OUT_OF_MODE_PENALTY: f32 = 0.3;

/// Score that maps to full confidence (a seven-note mode fully present)
const FULL_SCORE: f32 = 7.0;

/// Scale modes, in match order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// Ionian
    Major,
    /// Aeolian (natural minor)
    Minor,
    /// Minor with raised 6th
    Dorian,
    /// Minor with flat 2nd
    Phrygian,
    /// Major with raised 4th
    Lydian,
    /// Major with flat 7th
    Mixolydian,
    /// Diminished 5th
    Locrian,
    /// Natural minor with raised 7th
    HarmonicMinor,
    /// Minor with raised 6th and 7th
    MelodicMinor,
    /// Five-note major
    PentatonicMajor,
    /// Five-note minor
    PentatonicMinor,
    /// Minor pentatonic plus flat 5th
    Blues,
}

impl ScaleMode {
    /// All modes in match order; earlier modes win ties
    pub const ALL: [ScaleMode; 12] = [
        ScaleMode::Major,
        ScaleMode::Minor,
        ScaleMode::Dorian,
        ScaleMode::Phrygian,
        ScaleMode::Lydian,
        ScaleMode::Mixolydian,
        ScaleMode::Locrian,
        ScaleMode::HarmonicMinor,
        ScaleMode::MelodicMinor,
        ScaleMode::PentatonicMajor,
        ScaleMode::PentatonicMinor,
        ScaleMode::Blues,
    ];

    /// Semitone offsets from the tonic
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ScaleMode::Major => &[0, 2, 4, 5, 7, 9, 11],
            ScaleMode::Minor => &[0, 2, 3, 5, 7, 8, 10],
            ScaleMode::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            ScaleMode::Phrygian => &[0, 1, 3, 5, 7, 8, 10],
            ScaleMode::Lydian => &[0, 2, 4, 6, 7, 9, 11],
            ScaleMode::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            ScaleMode::Locrian => &[0, 1, 3, 5, 6, 8, 10],
            ScaleMode::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            ScaleMode::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
            ScaleMode::PentatonicMajor => &[0, 2, 4, 7, 9],
            ScaleMode::PentatonicMinor => &[0, 3, 5, 7, 10],
            ScaleMode::Blues => &[0, 3, 5, 6, 7, 10],
        }
    }

    /// Snake-case identifier (e.g., "harmonic_minor")
    pub fn name(self) -> &'static str {
        match self {
            ScaleMode::Major => "major",
            ScaleMode::Minor => "minor",
            ScaleMode::Dorian => "dorian",
            ScaleMode::Phrygian => "phrygian",
            ScaleMode::Lydian => "lydian",
            ScaleMode::Mixolydian => "mixolydian",
            ScaleMode::Locrian => "locrian",
            ScaleMode::HarmonicMinor => "harmonic_minor",
            ScaleMode::MelodicMinor => "melodic_minor",
            ScaleMode::PentatonicMajor => "pentatonic_major",
            ScaleMode::PentatonicMinor => "pentatonic_minor",
            ScaleMode::Blues => "blues",
        }
    }

    /// Title-case label (e.g., "Harmonic Minor")
    pub fn title(self) -> &'static str {
        match self {
            ScaleMode::Major => "Major",
            ScaleMode::Minor => "Minor",
            ScaleMode::Dorian => "Dorian",
            ScaleMode::Phrygian => "Phrygian",
            ScaleMode::Lydian => "Lydian",
            ScaleMode::Mixolydian => "Mixolydian",
            ScaleMode::Locrian => "Locrian",
            ScaleMode::HarmonicMinor => "Harmonic Minor",
            ScaleMode::MelodicMinor => "Melodic Minor",
            ScaleMode::PentatonicMajor => "Pentatonic Major",
            ScaleMode::PentatonicMinor => "Pentatonic Minor",
            ScaleMode::Blues => "Blues",
        }
    }

    /// 12-bin membership mask
    pub fn mask(self) -> [bool; 12] {
        let mut mask = [false; 12];
        for &interval in self.intervals() {
            mask[interval as usize] = true;
        }
        mask
    }
}

impl From<KeyMode> for ScaleMode {
    fn from(mode: KeyMode) -> Self {
        match mode {
            KeyMode::Major => ScaleMode::Major,
            KeyMode::Minor => ScaleMode::Minor,
        }
    }
}

/// Pitch classes of `mode` built on `tonic`
///
/// # Example
///
/// ```
/// use loopify_analysis::analysis::result::PitchClass;
/// use loopify_analysis::features::key::{scale_notes, ScaleMode};
///
/// let notes = scale_notes(PitchClass::A, ScaleMode::PentatonicMinor);
/// let names: Vec<&str> = notes.iter().map(|n| n.name()).collect();
/// assert_eq!(names, ["A", "C", "D", "E", "G"]);
/// ```
pub fn scale_notes(tonic: PitchClass, mode: ScaleMode) -> Vec<PitchClass> {
    mode.intervals()
        .iter()
        .map(|&interval| tonic.transpose(interval as usize))
        .collect()
}

/// Extended mode detection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeDetection {
    /// Tonic (strongest chroma bin)
    pub tonic: PitchClass,
    /// Best-matching mode
    pub mode: ScaleMode,
    /// Label such as "D Dorian"
    pub scale: String,
    /// `min(1, score / 7)`
    pub confidence: f32,
}

/// Detect the extended mode of a 12-bin chroma vector
///
/// The tonic is the strongest bin. If no mode scores above zero the result is
/// major with confidence 0.
pub fn detect_mode(chroma: &Chroma) -> ModeDetection {
    let normalized = normalize_by_max(chroma);
    let tonic_idx = argmax(&normalized);
    let tonic = PitchClass::from_index(tonic_idx);
    let shifted = rotate_to_tonic(&normalized, tonic_idx);

    let mut best_mode = ScaleMode::Major;
    let mut best_score = 0.0f32;

    for mode in ScaleMode::ALL {
        let score = mode_score(&shifted, mode);
        if score > best_score {
            best_score = score;
            best_mode = mode;
        }
    }

    let confidence = (best_score / FULL_SCORE).min(1.0);

    log::debug!(
        "Detected mode: {} {}, score: {:.4}, confidence: {:.4}",
        tonic,
        best_mode.name(),
        best_score,
        confidence
    );

    ModeDetection {
        tonic,
        mode: best_mode,
        scale: format!("{} {}", tonic.name(), best_mode.title()),
        confidence,
    }
}

/// Extended mode of a feature vector (neutral chroma on malformed input)
pub fn detect_extended_mode(features: &FeatureVector) -> ModeDetection {
    let (chroma, _) = resolve_chroma(features.chroma.as_deref());
    detect_mode(&chroma)
}

fn mode_score(shifted: &Chroma, mode: ScaleMode) -> f32 {
    let mask = mode.mask();
    let mut inside = 0.0f32;
    let mut outside = 0.0f32;
    for (&energy, &in_mode) in shifted.iter().zip(mask.iter()) {
        if in_mode {
            inside += energy;
        } else {
            outside += energy;
        }
    }
    inside - OUT_OF_MODE_PENALTY * outside
}
