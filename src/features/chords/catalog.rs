//! Chord catalog
//!
//! Template profiles, note spellings and difficulty tiers for every chord the
//! analyzer can name. Entries carrying a template take part in chroma
//! matching; the catalog order is the match order.

use serde::{Deserialize, Serialize};

use crate::analysis::result::PitchClass;
use crate::features::chroma::{Chroma, CHROMA_BINS};

/// Notes used when a chord name is not in the catalog
pub const DEFAULT_TRIAD: [&str; 3] = ["C", "E", "G"];

/// Difficulty weight used when a chord name has no tier
pub const DEFAULT_DIFFICULTY_WEIGHT: u8 = 3;

/// Chord quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    /// Major triad
    Major,
    /// Minor triad
    Minor,
    /// Dominant seventh
    Dominant7,
    /// Minor seventh
    Minor7,
    /// Major seventh
    Major7,
    /// Suspended second
    Suspended2,
    /// Suspended fourth
    Suspended4,
    /// Diminished triad
    Diminished,
    /// Augmented triad
    Augmented,
}

impl ChordQuality {
    const SUFFIXES: [(&'static str, ChordQuality); 9] = [
        ("", ChordQuality::Major),
        ("m", ChordQuality::Minor),
        ("7", ChordQuality::Dominant7),
        ("m7", ChordQuality::Minor7),
        ("maj7", ChordQuality::Major7),
        ("sus2", ChordQuality::Suspended2),
        ("sus4", ChordQuality::Suspended4),
        ("dim", ChordQuality::Diminished),
        ("aug", ChordQuality::Augmented),
    ];

    /// Quality for a chord-symbol suffix ("", "m", "maj7", ...)
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::SUFFIXES
            .iter()
            .find(|(s, _)| *s == suffix)
            .map(|&(_, quality)| quality)
    }

    /// Chord-symbol suffix
    pub fn suffix(self) -> &'static str {
        Self::SUFFIXES
            .iter()
            .find(|(_, q)| *q == self)
            .map_or("", |&(s, _)| s)
    }

    /// Coarse type name reported by chord info ("major", "minor7", "suspended", ...)
    pub fn type_name(self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Dominant7 => "dominant7",
            ChordQuality::Minor7 => "minor7",
            ChordQuality::Major7 => "major7",
            ChordQuality::Suspended2 | ChordQuality::Suspended4 => "suspended",
            ChordQuality::Diminished => "diminished",
            ChordQuality::Augmented => "augmented",
        }
    }
}

/// Structured form of a chord symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChordDescriptor {
    /// Root pitch class
    pub root: PitchClass,
    /// Quality
    pub quality: ChordQuality,
}

impl ChordDescriptor {
    /// Parse a chord symbol such as "C", "F#m", "Bbm", "Cmaj7" or "Dsus4"
    ///
    /// Returns `None` for anything that is not a root (with optional `#` or
    /// `b`) followed by a known suffix.
    ///
    /// # Example
    ///
    /// ```
    /// use loopify_analysis::analysis::result::PitchClass;
    /// use loopify_analysis::features::chords::{ChordDescriptor, ChordQuality};
    ///
    /// let chord = ChordDescriptor::parse("Bbm").unwrap();
    /// assert_eq!(chord.root, PitchClass::ASharp);
    /// assert_eq!(chord.quality, ChordQuality::Minor);
    /// assert!(ChordDescriptor::parse("Xm").is_none());
    /// ```
    pub fn parse(name: &str) -> Option<Self> {
        let root_len = match name.as_bytes() {
            [_, b'#' | b'b', ..] => 2,
            [_, ..] => 1,
            [] => return None,
        };
        let root = name.get(..root_len)?.parse::<PitchClass>().ok()?;
        let quality = ChordQuality::from_suffix(name.get(root_len..)?)?;
        Some(Self { root, quality })
    }
}

/// One catalog chord
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChordEntry {
    /// Chord symbol
    pub name: &'static str,
    /// Root pitch class
    pub root: PitchClass,
    /// Quality
    pub quality: ChordQuality,
    /// Note spelling
    pub notes: &'static [&'static str],
    /// Weighted chroma template (root 1.0, then third/fifth/seventh)
    pub template: Option<Chroma>,
    /// Difficulty tier 1-5, when rated
    pub difficulty: Option<u8>,
}

const fn entry(
    name: &'static str,
    root: PitchClass,
    quality: ChordQuality,
    notes: &'static [&'static str],
    template: Option<Chroma>,
    difficulty: Option<u8>,
) -> ChordEntry {
    ChordEntry {
        name,
        root,
        quality,
        notes,
        template,
        difficulty,
    }
}

/// Every known chord; template chords first, in match order
pub const CHORDS: [ChordEntry; 50] = [
    entry("C", PitchClass::C, ChordQuality::Major, &["C", "E", "G"], Some([1.0, 0.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.0]), Some(1)),
    entry("C#", PitchClass::CSharp, ChordQuality::Major, &["C#", "F", "G#"], Some([0.0, 1.0, 0.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0]), None),
    entry("D", PitchClass::D, ChordQuality::Major, &["D", "F#", "A"], Some([0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.8, 0.0, 0.0]), Some(1)),
    entry("D#", PitchClass::DSharp, ChordQuality::Major, &["D#", "G", "A#"], Some([0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.8, 0.0]), None),
    entry("E", PitchClass::E, ChordQuality::Major, &["E", "G#", "B"], Some([0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.8]), Some(1)),
    entry("F", PitchClass::F, ChordQuality::Major, &["F", "A", "C"], Some([0.8, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.9, 0.0, 0.0]), Some(2)),
    entry("F#", PitchClass::FSharp, ChordQuality::Major, &["F#", "A#", "C#"], Some([0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.9, 0.0]), None),
    entry("G", PitchClass::G, ChordQuality::Major, &["G", "B", "D"], Some([0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.9]), Some(1)),
    entry("G#", PitchClass::GSharp, ChordQuality::Major, &["G#", "C", "D#"], Some([0.9, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]), None),
    entry("A", PitchClass::A, ChordQuality::Major, &["A", "C#", "E"], Some([0.0, 0.9, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]), Some(1)),
    entry("A#", PitchClass::ASharp, ChordQuality::Major, &["A#", "D", "F"], Some([0.0, 0.0, 0.9, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0]), None),
    entry("B", PitchClass::B, ChordQuality::Major, &["B", "D#", "F#"], Some([0.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 1.0]), None),
    entry("Cm", PitchClass::C, ChordQuality::Minor, &["C", "Eb", "G"], Some([1.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.0]), None),
    entry("C#m", PitchClass::CSharp, ChordQuality::Minor, &["C#", "E", "G#"], Some([0.0, 1.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0]), Some(4)),
    entry("Dm", PitchClass::D, ChordQuality::Minor, &["D", "F", "A"], Some([0.0, 0.0, 1.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.0, 0.8, 0.0, 0.0]), Some(2)),
    entry("D#m", PitchClass::DSharp, ChordQuality::Minor, &["D#", "F#", "A#"], Some([0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.0, 0.8, 0.0]), None),
    entry("Em", PitchClass::E, ChordQuality::Minor, &["E", "G", "B"], Some([0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.0, 0.8]), Some(2)),
    entry("Fm", PitchClass::F, ChordQuality::Minor, &["F", "Ab", "C"], Some([0.8, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.0]), Some(2)),
    entry("F#m", PitchClass::FSharp, ChordQuality::Minor, &["F#", "A", "C#"], Some([0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.9, 0.0, 0.0]), Some(4)),
    entry("Gm", PitchClass::G, ChordQuality::Minor, &["G", "Bb", "D"], Some([0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.9, 0.0]), None),
    entry("G#m", PitchClass::GSharp, ChordQuality::Minor, &["G#", "B", "D#"], Some([0.9, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]), None),
    entry("Am", PitchClass::A, ChordQuality::Minor, &["A", "C", "E"], Some([0.8, 0.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]), Some(2)),
    entry("A#m", PitchClass::ASharp, ChordQuality::Minor, &["A#", "C#", "F"], Some([0.0, 0.8, 0.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0]), None),
    entry("Bm", PitchClass::B, ChordQuality::Minor, &["B", "D", "F#"], Some([0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.9, 0.0, 0.0, 0.0, 0.0, 1.0]), Some(2)),
    entry("C7", PitchClass::C, ChordQuality::Dominant7, &["C", "E", "G", "Bb"], Some([1.0, 0.0, 0.0, 0.0, 0.85, 0.0, 0.0, 0.75, 0.0, 0.0, 0.7, 0.0]), Some(3)),
    entry("D7", PitchClass::D, ChordQuality::Dominant7, &["D", "F#", "A", "C"], Some([0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.85, 0.0, 0.0, 0.75, 0.0, 0.0]), Some(3)),
    entry("E7", PitchClass::E, ChordQuality::Dominant7, &["E", "G#", "B", "D"], Some([0.0, 0.0, 0.7, 0.0, 1.0, 0.0, 0.0, 0.0, 0.85, 0.0, 0.0, 0.75]), Some(3)),
    entry("G7", PitchClass::G, ChordQuality::Dominant7, &["G", "B", "D", "F"], Some([0.0, 0.0, 0.75, 0.0, 0.0, 0.7, 0.0, 1.0, 0.0, 0.0, 0.0, 0.85]), Some(3)),
    entry("A7", PitchClass::A, ChordQuality::Dominant7, &["A", "C#", "E", "G"], Some([0.0, 0.85, 0.0, 0.0, 0.75, 0.0, 0.0, 0.7, 0.0, 1.0, 0.0, 0.0]), Some(3)),
    entry("Am7", PitchClass::A, ChordQuality::Minor7, &["A", "C", "E", "G"], Some([0.75, 0.0, 0.0, 0.0, 0.85, 0.0, 0.0, 0.7, 0.0, 1.0, 0.0, 0.0]), Some(3)),
    entry("Dm7", PitchClass::D, ChordQuality::Minor7, &["D", "F", "A", "C"], Some([0.7, 0.0, 1.0, 0.0, 0.0, 0.85, 0.0, 0.0, 0.0, 0.75, 0.0, 0.0]), Some(3)),
    entry("Em7", PitchClass::E, ChordQuality::Minor7, &["E", "G", "B", "D"], Some([0.0, 0.0, 0.7, 0.0, 1.0, 0.0, 0.0, 0.85, 0.0, 0.0, 0.0, 0.75]), Some(3)),
    entry("Bm7", PitchClass::B, ChordQuality::Minor7, &["B", "D", "F#", "A"], Some([0.0, 0.0, 0.75, 0.0, 0.0, 0.0, 0.85, 0.0, 0.0, 0.7, 0.0, 1.0]), None),
    entry("Cmaj7", PitchClass::C, ChordQuality::Major7, &["C", "E", "G", "B"], Some([1.0, 0.0, 0.0, 0.0, 0.85, 0.0, 0.0, 0.75, 0.0, 0.0, 0.0, 0.7]), Some(3)),
    entry("Fmaj7", PitchClass::F, ChordQuality::Major7, &["F", "A", "C", "E"], Some([0.75, 0.0, 0.0, 0.0, 0.7, 1.0, 0.0, 0.0, 0.0, 0.85, 0.0, 0.0]), None),
    entry("Gmaj7", PitchClass::G, ChordQuality::Major7, &["G", "B", "D", "F#"], Some([0.0, 0.0, 0.75, 0.0, 0.0, 0.0, 0.7, 1.0, 0.0, 0.0, 0.0, 0.85]), None),
    entry("Dsus2", PitchClass::D, ChordQuality::Suspended2, &["D", "E", "A"], Some([0.0, 0.0, 1.0, 0.0, 0.85, 0.0, 0.0, 0.0, 0.0, 0.8, 0.0, 0.0]), Some(4)),
    entry("Dsus4", PitchClass::D, ChordQuality::Suspended4, &["D", "G", "A"], Some([0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.85, 0.0, 0.8, 0.0, 0.0]), Some(4)),
    entry("Asus2", PitchClass::A, ChordQuality::Suspended2, &["A", "B", "E"], Some([0.0, 0.0, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.85]), Some(4)),
    entry("Asus4", PitchClass::A, ChordQuality::Suspended4, &["A", "D", "E"], Some([0.0, 0.0, 0.85, 0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]), Some(4)),
    entry("Bdim", PitchClass::B, ChordQuality::Diminished, &["B", "D", "F"], Some([0.0, 0.0, 0.8, 0.0, 0.0, 0.85, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]), Some(5)),
    entry("Cdim", PitchClass::C, ChordQuality::Diminished, &["C", "Eb", "Gb"], Some([1.0, 0.0, 0.0, 0.85, 0.0, 0.0, 0.8, 0.0, 0.0, 0.0, 0.0, 0.0]), Some(5)),
    entry("Caug", PitchClass::C, ChordQuality::Augmented, &["C", "E", "G#"], Some([1.0, 0.0, 0.0, 0.0, 0.85, 0.0, 0.0, 0.0, 0.85, 0.0, 0.0, 0.0]), Some(5)),
    entry("Db", PitchClass::CSharp, ChordQuality::Major, &["Db", "F", "Ab"], None, None),
    entry("Eb", PitchClass::DSharp, ChordQuality::Major, &["Eb", "G", "Bb"], None, None),
    entry("Gb", PitchClass::FSharp, ChordQuality::Major, &["Gb", "Bb", "Db"], None, None),
    entry("Ab", PitchClass::GSharp, ChordQuality::Major, &["Ab", "C", "Eb"], None, None),
    entry("Bb", PitchClass::ASharp, ChordQuality::Major, &["Bb", "D", "F"], None, Some(4)),
    entry("Ebm", PitchClass::DSharp, ChordQuality::Minor, &["Eb", "Gb", "Bb"], None, None),
    entry("Bbm", PitchClass::ASharp, ChordQuality::Minor, &["Bb", "Db", "F"], None, None),
];

/// Catalog entry for an exact chord symbol
pub fn lookup(name: &str) -> Option<&'static ChordEntry> {
    CHORDS.iter().find(|chord| chord.name == name)
}

/// Entries with a matching template, in catalog order
pub fn templates() -> impl Iterator<Item = (&'static str, &'static Chroma)> {
    CHORDS
        .iter()
        .filter_map(|chord| chord.template.as_ref().map(|t| (chord.name, t)))
}

/// Notes of a chord, falling back to the C major triad for unknown names
pub fn chord_notes(name: &str) -> Vec<String> {
    match lookup(name) {
        Some(chord) => chord.notes.iter().map(|n| n.to_string()).collect(),
        None => DEFAULT_TRIAD.iter().map(|n| n.to_string()).collect(),
    }
}

/// Difficulty tier of a chord (3 when unrated)
pub fn difficulty_weight(name: &str) -> u8 {
    lookup(name)
        .and_then(|chord| chord.difficulty)
        .unwrap_or(DEFAULT_DIFFICULTY_WEIGHT)
}

/// Chord information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChordInfo {
    /// Chord symbol as requested
    pub name: String,
    /// Note spelling (empty for unknown chords)
    pub notes: Vec<String>,
    /// Coarse chord type
    #[serde(rename = "type")]
    pub chord_type: String,
    /// Chroma template (all zeros when the chord has none)
    pub template: Chroma,
}

/// Describe a chord by name
///
/// Unknown names yield empty notes and an all-zero template. The type comes
/// from the parsed symbol, or "major" when the symbol does not parse.
pub fn get_chord_info(name: &str) -> ChordInfo {
    let entry = lookup(name);
    let chord_type = ChordDescriptor::parse(name)
        .map_or(ChordQuality::Major, |d| d.quality)
        .type_name();

    ChordInfo {
        name: name.to_string(),
        notes: entry
            .map(|chord| chord.notes.iter().map(|n| n.to_string()).collect())
            .unwrap_or_default(),
        chord_type: chord_type.to_string(),
        template: entry
            .and_then(|chord| chord.template)
            .unwrap_or([0.0; CHROMA_BINS]),
    }
}
