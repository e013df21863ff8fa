//! Score container.
//!
//! A score is a complete piece: tempo, length in measures, instrument tracks
//! and accents. It is a plain value passed to the mixer, and can be saved to
//! and loaded from JSON.

use super::event::Event;
use super::note::Note;
use super::track::{Accent, Track};
use super::{beats_to_seconds, BEATS_PER_MEASURE, DEFAULT_MEASURES, DEFAULT_TEMPO, TAIL_SECONDS};
use crate::error::Result;
use crate::synth::Instrument;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// A complete piece ready to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Display name.
    pub name: String,

    /// Tempo in quarter-note beats per minute.
    pub tempo: u32,

    /// Number of 4/4 measures; sets the base buffer length.
    pub measures: u32,

    /// Instrument parts.
    #[serde(default)]
    tracks: Vec<Track>,

    /// One-off hits layered over the tracks.
    #[serde(default)]
    accents: Vec<Accent>,
}

impl Score {
    /// Creates an empty score at the default tempo and length.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tempo: DEFAULT_TEMPO,
            measures: DEFAULT_MEASURES,
            tracks: Vec::new(),
            accents: Vec::new(),
        }
    }

    /// Overrides the tempo. Zero is raised to one beat per minute.
    pub fn with_tempo(mut self, tempo: u32) -> Self {
        self.tempo = tempo.max(1);
        self
    }

    /// Overrides the measure count.
    pub fn with_measures(mut self, measures: u32) -> Self {
        self.measures = measures;
        self
    }

    /// Adds a track.
    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Adds an accent.
    pub fn add_accent(&mut self, accent: Accent) {
        self.accents.push(accent);
    }

    /// Returns all tracks.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Returns all accents.
    pub fn accents(&self) -> &[Accent] {
        &self.accents
    }

    /// Length of one quarter note in seconds.
    pub fn quarter_seconds(&self) -> f64 {
        beats_to_seconds(1.0, self.tempo)
    }

    /// Planned length in seconds: all measures plus a tail for decays.
    pub fn total_seconds(&self) -> f64 {
        let beats = self.measures as f64 * BEATS_PER_MEASURE;
        beats_to_seconds(beats, self.tempo) + TAIL_SECONDS
    }

    /// Planned length in samples at the given rate.
    pub fn total_samples(&self, sample_rate: u32) -> usize {
        (self.total_seconds() * sample_rate as f64).round() as usize
    }

    /// Resolves every track note and accent into timed events.
    ///
    /// Tracks or accents whose instrument is not recognized are skipped with
    /// a warning. Rests are kept as events; the mixer ignores them.
    ///
    /// # Arguments
    ///
    /// * `sample_rate` - Rate used to convert accent stagger to seconds
    ///
    /// # Errors
    ///
    /// Returns `SynthError::InvalidNote` for the first malformed note token.
    pub fn events(&self, sample_rate: u32) -> Result<Vec<Event>> {
        let mut events = Vec::new();

        for track in &self.tracks {
            let Some(instrument) = resolve_instrument(&track.instrument) else {
                continue;
            };
            let volume = track.volume.unwrap_or_else(|| instrument.default_volume());

            for entry in track.notes() {
                let note = Note::parse(&entry.note)?;
                events.push(Event::new(
                    instrument,
                    note,
                    beats_to_seconds(entry.start_beats, self.tempo),
                    beats_to_seconds(entry.duration_beats, self.tempo),
                    volume,
                ));
            }
        }

        for accent in &self.accents {
            let Some(instrument) = resolve_instrument(&accent.instrument) else {
                continue;
            };
            let start = beats_to_seconds(accent.start_beats, self.tempo);
            let stagger = accent.stagger_samples as f64 / sample_rate as f64;

            for (i, token) in accent.notes.iter().enumerate() {
                let note = Note::parse(token)?;
                events.push(Event::new(
                    instrument,
                    note,
                    start + i as f64 * stagger,
                    accent.duration_seconds,
                    accent.volume,
                ));
            }
        }

        Ok(events)
    }

    /// Serializes the score to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a score from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Saves the score to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file writing fails
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Loads a score from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if file reading or parsing fails
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Parses an instrument identifier, logging and returning None if unknown.
fn resolve_instrument(id: &str) -> Option<Instrument> {
    match id.parse() {
        Ok(instrument) => Some(instrument),
        Err(e) => {
            warn!("Skipping part: {}", e);
            None
        }
    }
}
