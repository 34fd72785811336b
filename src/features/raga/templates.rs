//! Raga templates
//!
//! Scale-degree sets (semitones above Sa) with vadi and samvadi emphasis.
//! Yaman is the Hindustani counterpart of Kalyani and shares its template;
//! Kalyani is declared first and therefore wins exact ties.

use serde::{Deserialize, Serialize};

use crate::features::key::ScaleMode;

/// Ragas known to the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Raga {
    /// Ionian-equivalent melakarta
    Shankarabharanam,
    /// Dorian-equivalent melakarta
    Kharaharapriya,
    /// Lydian-equivalent melakarta
    Kalyani,
    /// Major pentatonic
    Mohanam,
    /// S R2 G3 P N3
    Hamsadhwani,
    /// Hexatonic ascent of Shankarabharanam
    Bilahari,
    /// S R1 G3 M1 P D1 N3
    Mayamalavagowla,
    /// S R1 G2 M2 P D1 N3
    Todi,
    /// Phrygian-equivalent
    Bhairavi,
    /// Hindustani Kalyani
    Yaman,
    /// No raga scored above zero
    Unknown,
}

impl Raga {
    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Raga::Shankarabharanam => "Shankarabharanam",
            Raga::Kharaharapriya => "Kharaharapriya",
            Raga::Kalyani => "Kalyani",
            Raga::Mohanam => "Mohanam",
            Raga::Hamsadhwani => "Hamsadhwani",
            Raga::Bilahari => "Bilahari",
            Raga::Mayamalavagowla => "Mayamalavagowla",
            Raga::Todi => "Todi",
            Raga::Bhairavi => "Bhairavi",
            Raga::Yaman => "Yaman",
            Raga::Unknown => "Unknown",
        }
    }
}

/// One raga's matching template
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RagaTemplate {
    /// Raga
    pub raga: Raga,
    /// Scale degrees relative to Sa (0-11)
    pub degrees: &'static [u8],
    /// Dominant degree
    pub vadi: u8,
    /// Secondary-dominant degree
    pub samvadi: u8,
    /// Closest western mode, if any
    pub western_equivalent: Option<ScaleMode>,
}

impl RagaTemplate {
    /// Whether `degree` belongs to the raga
    pub fn contains(&self, degree: usize) -> bool {
        self.degrees.iter().any(|&d| d as usize == degree)
    }
}

/// Raga catalog in match order
pub const RAGA_TEMPLATES: [RagaTemplate; 10] = [
    RagaTemplate {
        raga: Raga::Shankarabharanam,
        degrees: &[0, 2, 4, 5, 7, 9, 11],
        vadi: 7,
        samvadi: 4,
        western_equivalent: Some(ScaleMode::Major),
    },
    RagaTemplate {
        raga: Raga::Kharaharapriya,
        degrees: &[0, 2, 3, 5, 7, 9, 10],
        vadi: 7,
        samvadi: 3,
        western_equivalent: Some(ScaleMode::Dorian),
    },
    RagaTemplate {
        raga: Raga::Kalyani,
        degrees: &[0, 2, 4, 6, 7, 9, 11],
        vadi: 4,
        samvadi: 11,
        western_equivalent: Some(ScaleMode::Lydian),
    },
    RagaTemplate {
        raga: Raga::Mohanam,
        degrees: &[0, 2, 4, 7, 9],
        vadi: 7,
        samvadi: 2,
        western_equivalent: Some(ScaleMode::PentatonicMajor),
    },
    RagaTemplate {
        raga: Raga::Hamsadhwani,
        degrees: &[0, 2, 4, 7, 11],
        vadi: 7,
        samvadi: 4,
        western_equivalent: None,
    },
    RagaTemplate {
        raga: Raga::Bilahari,
        degrees: &[0, 2, 4, 7, 9, 11],
        vadi: 7,
        samvadi: 4,
        western_equivalent: None,
    },
    RagaTemplate {
        raga: Raga::Mayamalavagowla,
        degrees: &[0, 1, 4, 5, 7, 8, 11],
        vadi: 4,
        samvadi: 7,
        western_equivalent: None,
    },
    RagaTemplate {
        raga: Raga::Todi,
        degrees: &[0, 1, 3, 6, 7, 8, 11],
        vadi: 3,
        samvadi: 8,
        western_equivalent: None,
    },
    RagaTemplate {
        raga: Raga::Bhairavi,
        degrees: &[0, 1, 3, 5, 7, 8, 10],
        vadi: 3,
        samvadi: 7,
        western_equivalent: Some(ScaleMode::Phrygian),
    },
    RagaTemplate {
        raga: Raga::Yaman,
        degrees: &[0, 2, 4, 6, 7, 9, 11],
        vadi: 4,
        samvadi: 11,
        western_equivalent: Some(ScaleMode::Lydian),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vadi_samvadi_belong_to_raga() {
        for template in RAGA_TEMPLATES.iter() {
            assert!(template.contains(template.vadi as usize), "{:?}", template.raga);
            assert!(template.contains(template.samvadi as usize), "{:?}", template.raga);
            assert!(template.contains(0), "{:?} must contain Sa", template.raga);
        }
    }

    #[test]
    fn test_western_equivalents_share_degrees() {
        for template in RAGA_TEMPLATES.iter() {
            if let Some(mode) = template.western_equivalent {
                assert_eq!(template.degrees, mode.intervals(), "{:?}", template.raga);
            }
        }
    }
}
