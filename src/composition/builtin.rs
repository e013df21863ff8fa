//! The built-in four-measure piece.
//!
//! A quiet minor-key figure in flute, clarinet, alto and trumpet over a soft
//! kick and snare, ending in a rolled high trumpet chord on a heavy kick.

use super::score::Score;
use super::track::{Accent, Track};

/// Kick and snare hits last 0.12 s at the built-in tempo.
const DRUM_HIT_BEATS: f64 = 0.16;

impl Score {
    /// Builds the "sneaky -> high boom" arrangement at 80 bpm, 4 measures.
    pub fn sneaky_boom() -> Self {
        let mut score = Score::new("Sneaky -> High Boom");

        score.add_track(
            Track::new("flute")
                .with_volume(0.36)
                .note("F4", 0.0, 1.0)
                .note("G4", 1.0, 0.5)
                .note("F4", 1.5, 0.5)
                .note("Ab4", 2.0, 1.0)
                .note("rest", 3.0, 1.0)
                .note("F4", 4.0, 1.0)
                .note("G4", 5.0, 0.5)
                .note("F4", 5.5, 0.5)
                .note("Bb4", 6.0, 1.0)
                .note("rest", 7.0, 1.0),
        );

        score.add_track(
            Track::new("clarinet")
                .with_volume(0.30)
                .note("D4", 0.0, 1.0)
                .note("rest", 1.0, 1.0)
                .note("E4", 2.0, 1.0)
                .note("D4", 3.0, 1.0)
                .note("E4", 4.0, 0.5)
                .note("D4", 4.5, 0.5)
                .note("G4", 5.0, 1.0)
                .note("D4", 6.0, 1.0)
                .note("F4", 7.0, 1.0),
        );

        score.add_track(
            Track::new("alto")
                .with_volume(0.28)
                .note("F4", 0.0, 2.0)
                .note("G4", 2.0, 2.0)
                .note("E4", 4.0, 2.0)
                .note("F4", 6.0, 2.0),
        );

        score.add_track(
            Track::new("trumpet")
                .with_volume(0.26)
                .note("F4", 1.0, 1.0)
                .note("C5", 2.0, 1.0)
                .note("Bb4", 3.0, 1.0),
        );

        let mut kick = Track::new("bass_drum").with_volume(0.18);
        let mut snare = Track::new("snare").with_volume(0.08);
        for beat in 0..4 {
            kick = kick.note("F2", beat as f64, DRUM_HIT_BEATS);
            snare = snare.note("D3", beat as f64, DRUM_HIT_BEATS);
        }
        score.add_track(kick);
        score.add_track(snare);

        score.add_accent(Accent {
            instrument: "trumpet".to_string(),
            notes: ["F5", "Ab5", "C6", "F5"].map(String::from).to_vec(),
            start_beats: 3.0,
            duration_seconds: 1.6,
            volume: 0.6,
            stagger_samples: 50,
        });
        score.add_accent(Accent {
            instrument: "bass_drum".to_string(),
            notes: vec!["F2".to_string()],
            start_beats: 3.0,
            duration_seconds: 1.0,
            volume: 0.9,
            stagger_samples: 0,
        });

        score
    }
}
