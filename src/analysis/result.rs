//! Analysis result types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::analysis::confidence::AnalysisConfidence;
use crate::analysis::metadata::AnalysisMetadata;
use crate::error::AnalysisError;
use crate::features::chords::ChordAnalysis;
use crate::features::classification::{EmotionClassification, GenreClassification};
use crate::features::key::{ModeDetection, ScaleMode, Tonality};
use crate::features::raga::RagaDetection;

/// One of the twelve pitch classes, C = 0 ascending chromatically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchClass {
    /// C
    #[serde(rename = "C")]
    C,
    /// C sharp / D flat
    #[serde(rename = "C#")]
    CSharp,
    /// D
    #[serde(rename = "D")]
    D,
    /// D sharp / E flat
    #[serde(rename = "D#")]
    DSharp,
    /// E
    #[serde(rename = "E")]
    E,
    /// F
    #[serde(rename = "F")]
    F,
    /// F sharp / G flat
    #[serde(rename = "F#")]
    FSharp,
    /// G
    #[serde(rename = "G")]
    G,
    /// G sharp / A flat
    #[serde(rename = "G#")]
    GSharp,
    /// A
    #[serde(rename = "A")]
    A,
    /// A sharp / B flat
    #[serde(rename = "A#")]
    ASharp,
    /// B
    #[serde(rename = "B")]
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order starting at C
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Pitch class for a chroma index (wraps modulo 12)
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    /// Chroma index (0 = C, 11 = B)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Pitch class `semitones` above this one
    pub fn transpose(self, semitones: usize) -> Self {
        Self::from_index(self.index() + semitones)
    }

    /// Sharp-spelled display name (e.g., "C#")
    ///
    /// # Example
    ///
    /// ```
    /// use loopify_analysis::analysis::result::PitchClass;
    ///
    /// assert_eq!(PitchClass::FSharp.name(), "F#");
    /// assert_eq!(PitchClass::from_index(14).name(), "D");
    /// ```
    pub fn name(self) -> &'static str {
        const NAMES: [&str; 12] = [
            "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
        ];
        NAMES[self.index()]
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = AnalysisError;

    /// Parses sharp and flat spellings ("C#", "Db", "Bb")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let natural = match chars.next() {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => {
                return Err(AnalysisError::InvalidInput(format!(
                    "Unknown pitch class: {:?}",
                    s
                )))
            }
        };
        let index = match chars.as_str() {
            "" => natural,
            "#" => natural + 1,
            "b" => natural + 11,
            _ => {
                return Err(AnalysisError::InvalidInput(format!(
                    "Unknown pitch class: {:?}",
                    s
                )))
            }
        };
        Ok(Self::from_index(index))
    }
}

/// Major/minor tonality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    /// Major (Ionian)
    Major,
    /// Natural minor (Aeolian)
    Minor,
}

impl KeyMode {
    /// Lowercase name ("major" / "minor")
    pub fn name(self) -> &'static str {
        match self {
            KeyMode::Major => "major",
            KeyMode::Minor => "minor",
        }
    }

    /// Capitalized name for labels ("Major" / "Minor")
    pub fn title(self) -> &'static str {
        match self {
            KeyMode::Major => "Major",
            KeyMode::Minor => "Minor",
        }
    }
}

/// Musical key: tonic plus major/minor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    /// Tonic pitch class
    pub tonic: PitchClass,
    /// Major or minor
    pub mode: KeyMode,
}

impl Key {
    /// Major key on `tonic`
    pub const fn major(tonic: PitchClass) -> Self {
        Self {
            tonic,
            mode: KeyMode::Major,
        }
    }

    /// Minor key on `tonic`
    pub const fn minor(tonic: PitchClass) -> Self {
        Self {
            tonic,
            mode: KeyMode::Minor,
        }
    }

    /// Get key name in chord-symbol notation (e.g., "C", "Am", "F#", "D#m")
    ///
    /// # Example
    ///
    /// ```
    /// use loopify_analysis::analysis::result::{Key, PitchClass};
    ///
    /// assert_eq!(Key::major(PitchClass::C).name(), "C");
    /// assert_eq!(Key::minor(PitchClass::A).name(), "Am");
    /// assert_eq!(Key::minor(PitchClass::CSharp).name(), "C#m");
    /// ```
    pub fn name(&self) -> String {
        match self.mode {
            KeyMode::Major => self.tonic.name().to_string(),
            KeyMode::Minor => format!("{}m", self.tonic.name()),
        }
    }

    /// Scale label (e.g., "C Major", "A Minor")
    pub fn scale_label(&self) -> String {
        format!("{} {}", self.tonic.name(), self.mode.title())
    }
}

/// A chord placed on the time axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordEvent {
    /// Chord symbol (e.g., "Am")
    pub chord: String,
    /// Start time in seconds (2 decimal places)
    pub start_time: f32,
    /// Duration in seconds (2 decimal places)
    pub duration: f32,
    /// Notes of the chord
    pub notes: Vec<String>,
}

/// Analysis flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisFlag {
    /// Key correlation too weak to trust
    WeakTonality,
    /// Raga confidence sits on the 0.2 calibration floor
    RagaAtFloor,
    /// Chroma was missing or malformed; neutral chroma was used
    NeutralChroma,
    /// Tempo was missing or invalid; default tempo was used
    DefaultTempo,
}

/// Feature values echoed back to callers alongside the labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureEcho {
    /// Spectral centroid in Hz
    pub spectral_centroid: f32,
    /// Zero-crossing rate
    pub zero_crossing_rate: f32,
    /// RMS energy
    pub rms_energy: f32,
}

/// Primary key, extended mode and raga combined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TonalitySummary {
    /// Krumhansl-Kessler major/minor result
    pub primary: Tonality,
    /// Extended (modal) result
    pub extended_mode: ModeDetection,
    /// Raga result
    pub raga: RagaDetection,
    /// Tonic of the primary key
    pub key: PitchClass,
    /// Mode from the extended detector
    pub mode: ScaleMode,
    /// Larger of primary and extended confidences
    pub confidence: f32,
}

/// Complete analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Tempo in BPM (after defaults)
    pub tempo: f32,

    /// Detected key
    pub key: Key,

    /// Scale label (e.g., "C Major")
    pub scale: String,

    /// Primary tonality (key, mode, scale notes)
    pub tonality: Tonality,

    /// Extended mode (Dorian, Lydian, pentatonic, ...)
    pub extended_mode: ModeDetection,

    /// Raga match
    pub raga: RagaDetection,

    /// Emotion label
    pub emotion: EmotionClassification,

    /// Genre label
    pub genre: GenreClassification,

    /// Chord progression, timeline and difficulty
    pub chords: ChordAnalysis,

    /// Per-category and overall confidence
    pub confidence: AnalysisConfidence,

    /// Echo of the features the labels were derived from
    pub features: FeatureEcho,

    /// Natural-language summary
    pub explanation: String,

    /// Analysis metadata
    pub metadata: AnalysisMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_name_major() {
        assert_eq!(Key::major(PitchClass::C).name(), "C");
        assert_eq!(Key::major(PitchClass::CSharp).name(), "C#");
        assert_eq!(Key::major(PitchClass::FSharp).name(), "F#");
        assert_eq!(Key::major(PitchClass::B).name(), "B");
    }

    #[test]
    fn test_key_name_minor() {
        assert_eq!(Key::minor(PitchClass::C).name(), "Cm");
        assert_eq!(Key::minor(PitchClass::A).name(), "Am");
        assert_eq!(Key::minor(PitchClass::B).name(), "Bm");
    }

    #[test]
    fn test_scale_label() {
        assert_eq!(Key::major(PitchClass::C).scale_label(), "C Major");
        assert_eq!(Key::minor(PitchClass::DSharp).scale_label(), "D# Minor");
    }

    #[test]
    fn test_pitch_class_index_wraps() {
        for (i, pc) in PitchClass::ALL.iter().enumerate() {
            assert_eq!(pc.index(), i);
            assert_eq!(PitchClass::from_index(i + 12), *pc);
        }
        assert_eq!(PitchClass::A.transpose(3), PitchClass::C);
    }

    #[test]
    fn test_pitch_class_from_str() {
        assert_eq!("C".parse::<PitchClass>(), Ok(PitchClass::C));
        assert_eq!("F#".parse::<PitchClass>(), Ok(PitchClass::FSharp));
        assert_eq!("Bb".parse::<PitchClass>(), Ok(PitchClass::ASharp));
        assert_eq!("Cb".parse::<PitchClass>(), Ok(PitchClass::B));
        assert!("H".parse::<PitchClass>().is_err());
        assert!("C##".parse::<PitchClass>().is_err());
        assert!("".parse::<PitchClass>().is_err());
    }

    #[test]
    fn test_chord_event_serializes_camel_case() {
        let event = ChordEvent {
            chord: "C".to_string(),
            start_time: 0.0,
            duration: 4.0,
            notes: vec!["C".to_string(), "E".to_string(), "G".to_string()],
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["startTime"], 0.0);
        assert_eq!(json["duration"], 4.0);
        assert_eq!(json["notes"][1], "E");
    }

    #[test]
    fn test_pitch_class_serializes_as_name() {
        let json = serde_json::to_string(&PitchClass::GSharp).unwrap();
        assert_eq!(json, "\"G#\"");
    }
}
