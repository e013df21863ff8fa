//! Note tokens and pitch resolution.
//!
//! A note is written as a pitch-class name followed by a single octave digit
//! ("F4", "Bb4", "C#5"), or as the word "rest". Frequencies use equal
//! temperament referenced to A4 = 440 Hz.

use crate::error::{Result, SynthError};
use std::fmt;
use std::str::FromStr;

/// Reference pitch for A4 in Hz.
pub const A4_FREQUENCY: f64 = 440.0;

/// Semitone offset of A from C within an octave.
const A_OFFSET: i32 = 9;

/// Pitch-class names and their semitone offset from C.
/// Enharmonic spellings share an offset.
const PITCH_CLASSES: [(&str, u8); 17] = [
    ("C", 0),
    ("C#", 1),
    ("Db", 1),
    ("D", 2),
    ("D#", 3),
    ("Eb", 3),
    ("E", 4),
    ("F", 5),
    ("F#", 6),
    ("Gb", 6),
    ("G", 7),
    ("G#", 8),
    ("Ab", 8),
    ("A", 9),
    ("A#", 10),
    ("Bb", 10),
    ("B", 11),
];

/// A pitch class independent of octave, e.g. "F" or "G#".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchClass {
    /// Spelling as written in the score.
    name: &'static str,
    /// Semitones above C (0-11).
    semitone: u8,
}

impl PitchClass {
    /// Looks up a pitch-class name in the fixed table.
    ///
    /// Returns None for names outside the table, e.g. "H" or "E#".
    pub fn lookup(name: &str) -> Option<Self> {
        PITCH_CLASSES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(name, semitone)| Self { name, semitone })
    }

    /// Semitones above C within the octave.
    pub fn semitone(&self) -> u8 {
        self.semitone
    }

    /// Spelling used in the score.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// A symbolic pitch or a rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Note {
    /// No sound for the event's duration.
    Rest,
    /// A pitch class in a given octave.
    Pitched { class: PitchClass, octave: u8 },
}

impl Note {
    /// Parses a note token.
    ///
    /// # Arguments
    ///
    /// * `token` - Note name like "F4", "Bb4", or "rest" (any case)
    ///
    /// # Errors
    ///
    /// Returns `SynthError::InvalidNote` if the pitch class is not in the
    /// table or the last character is not an octave digit.
    ///
    /// # Examples
    ///
    /// ```
    /// use scorend::composition::Note;
    ///
    /// let a4 = Note::parse("A4").unwrap();
    /// assert_eq!(a4.frequency(), Some(440.0));
    /// assert_eq!(Note::parse("REST").unwrap(), Note::Rest);
    /// ```
    pub fn parse(token: &str) -> Result<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("rest") {
            return Ok(Note::Rest);
        }

        let invalid = || SynthError::InvalidNote(token.to_string());

        let mut chars = token.chars();
        let octave = chars
            .next_back()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(invalid)? as u8;
        let class = PitchClass::lookup(chars.as_str()).ok_or_else(invalid)?;

        Ok(Note::Pitched { class, octave })
    }

    /// Returns true for a rest.
    pub fn is_rest(&self) -> bool {
        matches!(self, Note::Rest)
    }

    /// Returns the frequency in Hz, or None for a rest.
    pub fn frequency(&self) -> Option<f64> {
        match *self {
            Note::Rest => None,
            Note::Pitched { class, octave } => {
                let semis_from_a4 =
                    12 * (octave as i32 - 4) + class.semitone() as i32 - A_OFFSET;
                Some(A4_FREQUENCY * 2f64.powf(semis_from_a4 as f64 / 12.0))
            }
        }
    }
}

impl FromStr for Note {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        Note::parse(s)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Note::Rest => write!(f, "rest"),
            Note::Pitched { class, octave } => write!(f, "{}{}", class.name(), octave),
        }
    }
}

/// Resolves a note token straight to a frequency.
///
/// Returns `Ok(None)` for a rest so callers can skip synthesis.
pub fn note_to_frequency(token: &str) -> Result<Option<f64>> {
    Ok(Note::parse(token)?.frequency())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(token: &str) -> f64 {
        note_to_frequency(token).unwrap().unwrap()
    }

    #[test]
    fn test_a4_is_reference() {
        assert_eq!(freq("A4"), 440.0);
    }

    #[test]
    fn test_octave_doubles() {
        assert_eq!(freq("A5"), 2.0 * freq("A4"));
        assert!((freq("C5") / freq("C4") - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_enharmonics_match() {
        assert_eq!(freq("C#4"), freq("Db4"));
        assert_eq!(freq("G#4"), freq("Ab4"));
        assert_eq!(freq("A#3"), freq("Bb3"));
    }

    #[test]
    fn test_middle_c() {
        assert!((freq("C4") - 261.6256).abs() < 1e-3);
        assert!((freq("F4") - 349.2282).abs() < 1e-3);
    }

    #[test]
    fn test_rest_any_case() {
        for token in ["rest", "REST", "Rest"] {
            assert_eq!(note_to_frequency(token).unwrap(), None);
            assert!(Note::parse(token).unwrap().is_rest());
        }
    }

    #[test]
    fn test_invalid_notes() {
        for token in ["H4", "E#4", "F", "", "Fx", "snare"] {
            assert!(
                matches!(Note::parse(token), Err(SynthError::InvalidNote(_))),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Note::parse("Bb4").unwrap().to_string(), "Bb4");
        assert_eq!(Note::Rest.to_string(), "rest");
    }
}
