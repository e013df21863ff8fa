//! Resolved note events.

use super::note::Note;
use crate::synth::Instrument;

/// One note to be synthesized and mixed.
///
/// Times are absolute seconds from the start of the piece. Events are built
/// from a score and consumed once by the mixer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub instrument: Instrument,
    pub note: Note,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Linear gain.
    pub volume: f64,
}

impl Event {
    /// Creates an event.
    pub fn new(instrument: Instrument, note: Note, start: f64, duration: f64, volume: f64) -> Self {
        Self {
            instrument,
            note,
            start,
            duration,
            volume,
        }
    }

    /// Returns the end time in seconds (start + duration).
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}
