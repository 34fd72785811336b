//! Progression selection
//!
//! Curated progressions per key, ranked by how common they are; rank 0 is
//! always the one selected.

use crate::analysis::result::{Key, KeyMode, PitchClass};

/// Progression used for major keys without a table entry (I-V-vi-IV in C)
pub const DEFAULT_MAJOR_PROGRESSION: [&str; 4] = ["C", "G", "Am", "F"];

/// Progression used for minor keys without a table entry (i-VI-III-VII in A minor)
pub const DEFAULT_MINOR_PROGRESSION: [&str; 4] = ["Am", "F", "C", "G"];

type Progression = &'static [&'static str];

/// Ranked progressions per key
pub const PROGRESSION_TABLE: [(Key, &[Progression]); 8] = [
    (
        Key::major(PitchClass::C),
        &[
            &["C", "G", "Am", "F"],
            &["C", "Am", "F", "G"],
            &["C", "F", "G", "C"],
            &["C", "G", "F", "G"],
            &["C", "Dm", "G", "C"],
        ],
    ),
    (
        Key::major(PitchClass::D),
        &[
            &["D", "A", "Bm", "G"],
            &["D", "G", "A", "D"],
            &["D", "Bm", "G", "A"],
        ],
    ),
    (
        Key::major(PitchClass::E),
        &[&["E", "B", "C#m", "A"], &["E", "A", "B", "E"]],
    ),
    (
        Key::major(PitchClass::G),
        &[
            &["G", "D", "Em", "C"],
            &["G", "C", "D", "G"],
            &["G", "Em", "C", "D"],
        ],
    ),
    (
        Key::major(PitchClass::A),
        &[&["A", "E", "F#m", "D"], &["A", "D", "E", "A"]],
    ),
    (
        Key::minor(PitchClass::A),
        &[
            &["Am", "F", "C", "G"],
            &["Am", "G", "F", "E"],
            &["Am", "Dm", "E", "Am"],
        ],
    ),
    (
        Key::minor(PitchClass::E),
        &[&["Em", "C", "G", "D"], &["Em", "Am", "B", "Em"]],
    ),
    (
        Key::minor(PitchClass::D),
        &[&["Dm", "Bb", "F", "C"], &["Dm", "Gm", "A", "Dm"]],
    ),
];

/// All ranked progressions for a key (empty when the key is not tabulated)
pub fn ranked_progressions(key: Key) -> &'static [Progression] {
    PROGRESSION_TABLE
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, progressions)| *progressions)
        .unwrap_or(&[])
}

/// Most common progression for a key
///
/// Keys missing from the table get the default major or minor progression.
///
/// # Example
///
/// ```
/// use loopify_analysis::analysis::result::{KeyMode, PitchClass};
/// use loopify_analysis::features::chords::select_progression;
///
/// assert_eq!(select_progression(PitchClass::G, KeyMode::Major), ["G", "D", "Em", "C"]);
/// assert_eq!(select_progression(PitchClass::B, KeyMode::Minor), ["Am", "F", "C", "G"]);
/// ```
pub fn select_progression(tonic: PitchClass, mode: KeyMode) -> Vec<String> {
    let key = Key { tonic, mode };
    let progression: Progression = match ranked_progressions(key).first().copied() {
        Some(progression) => progression,
        None => {
            log::debug!("No progression for {}, using default", key.name());
            match mode {
                KeyMode::Major => &DEFAULT_MAJOR_PROGRESSION[..],
                KeyMode::Minor => &DEFAULT_MINOR_PROGRESSION[..],
            }
        }
    };
    progression.iter().map(|c| c.to_string()).collect()
}
