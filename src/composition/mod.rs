//! Score data: notes, tracks, accents and the resolved events.
//!
//! Positions inside a score are in quarter-note beats and are converted to
//! seconds using the score's tempo when events are resolved.

mod builtin;
mod event;
mod note;
mod score;
mod track;

pub use event::Event;
pub use note::{note_to_frequency, Note, PitchClass, A4_FREQUENCY};
pub use score::Score;
pub use track::{Accent, Track, TrackNote};

/// Default tempo in beats per minute.
pub const DEFAULT_TEMPO: u32 = 80;

/// Default piece length in measures.
pub const DEFAULT_MEASURES: u32 = 4;

/// Quarter-note beats per measure (4/4 time).
pub const BEATS_PER_MEASURE: f64 = 4.0;

/// Silence appended after the last measure so decays can ring out.
pub const TAIL_SECONDS: f64 = 2.5;

/// Converts beats to seconds based on tempo.
///
/// # Arguments
///
/// * `beats` - Number of quarter-note beats
/// * `tempo` - Tempo in beats per minute
///
/// # Returns
///
/// Duration in seconds
pub fn beats_to_seconds(beats: f64, tempo: u32) -> f64 {
    beats * 60.0 / tempo.max(1) as f64
}
