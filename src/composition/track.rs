//! Score tracks and one-off accents.
//!
//! A track is one instrument's part: a list of notes placed in beats so the
//! whole part follows the score's tempo. Accents are single hits layered on
//! top, such as a closing chord.

use serde::{Deserialize, Serialize};

/// One note of a track, positioned in quarter-note beats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackNote {
    /// Note token, e.g. "F4", "Bb4" or "rest".
    pub note: String,

    /// Start position in beats from the beginning of the piece.
    pub start_beats: f64,

    /// Duration in beats.
    pub duration_beats: f64,
}

impl TrackNote {
    /// Creates a track note.
    pub fn new(note: impl Into<String>, start_beats: f64, duration_beats: f64) -> Self {
        Self {
            note: note.into(),
            start_beats,
            duration_beats,
        }
    }

    /// Returns the end position in beats.
    pub fn end_beats(&self) -> f64 {
        self.start_beats + self.duration_beats
    }
}

/// An instrument's part in the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Instrument identifier, e.g. "flute" or "bd".
    /// Resolved when the score is turned into events.
    pub instrument: String,

    /// Linear gain for every note in this track.
    /// None uses the instrument's default volume.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,

    /// Notes in this track, kept sorted by start.
    notes: Vec<TrackNote>,
}

impl Track {
    /// Creates an empty track for the given instrument identifier.
    pub fn new(instrument: impl Into<String>) -> Self {
        Self {
            instrument: instrument.into(),
            volume: None,
            notes: Vec::new(),
        }
    }

    /// Sets the track volume.
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Adds a note, keeping the list sorted by start beat.
    pub fn add_note(&mut self, note: TrackNote) {
        let pos = self
            .notes
            .partition_point(|n| n.start_beats <= note.start_beats);
        self.notes.insert(pos, note);
    }

    /// Builder form of `add_note`.
    pub fn note(mut self, note: impl Into<String>, start_beats: f64, duration_beats: f64) -> Self {
        self.add_note(TrackNote::new(note, start_beats, duration_beats));
        self
    }

    /// Returns the notes in start order.
    pub fn notes(&self) -> &[TrackNote] {
        &self.notes
    }

    /// Returns the number of notes (rests included).
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Returns the end of the last note in beats.
    pub fn duration_beats(&self) -> f64 {
        self.notes
            .iter()
            .map(TrackNote::end_beats)
            .fold(0.0, f64::max)
    }
}

/// A one-off event layered over the tracks.
///
/// Multi-note accents are spread by `stagger_samples` per note so a chord
/// rolls slightly instead of striking every voice on the same sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accent {
    /// Instrument identifier.
    pub instrument: String,

    /// Note tokens, played in order.
    pub notes: Vec<String>,

    /// Start position in beats.
    pub start_beats: f64,

    /// Duration in seconds, independent of tempo.
    pub duration_seconds: f64,

    /// Linear gain for every note.
    pub volume: f64,

    /// Delay in samples between successive notes.
    #[serde(default)]
    pub stagger_samples: usize,
}
