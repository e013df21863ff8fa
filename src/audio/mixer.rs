//! Event placement and mixing.
//!
//! Every event is synthesized and summed into one master buffer at its
//! start sample. Overlapping notes add together, so placement order does not
//! matter. The buffer grows when an event runs past its end.

use crate::composition::{Event, Score};
use crate::error::Result;
use crate::synth::{SynthConfig, Voice};
use tracing::{debug, info};

/// The mono mix, indexed by absolute sample number.
///
/// Length only ever grows. Writes are additive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasterBuffer {
    samples: Vec<f64>,
}

impl MasterBuffer {
    /// Creates a silent buffer of `len` samples.
    pub fn new(len: usize) -> Self {
        Self {
            samples: vec![0.0; len],
        }
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Grows the buffer with trailing silence until it holds at least `len`
    /// samples. Existing samples are kept.
    ///
    /// Capacity at least doubles on each reallocation, so repeated small
    /// extensions stay amortized O(1) per sample.
    pub fn ensure_len(&mut self, len: usize) {
        if len <= self.samples.len() {
            return;
        }
        if len > self.samples.capacity() {
            let target = len.max(self.samples.capacity() * 2);
            self.samples.reserve_exact(target - self.samples.len());
        }
        debug!(from = self.samples.len(), to = len, "Growing master buffer");
        self.samples.resize(len, 0.0);
    }

    /// Adds `wave` into the buffer starting at `start`, growing as needed.
    pub fn accumulate(&mut self, start: usize, wave: &[f64]) {
        let end = start + wave.len();
        self.ensure_len(end);
        for (dst, src) in self.samples[start..end].iter_mut().zip(wave) {
            *dst += src;
        }
    }

    /// Largest absolute sample value, or 0.0 for an empty buffer.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0, |peak, s| peak.max(s.abs()))
    }

    /// Consumes the buffer and returns the raw samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

impl From<Vec<f64>> for MasterBuffer {
    fn from(samples: Vec<f64>) -> Self {
        Self { samples }
    }
}

/// Places synthesized events into a master buffer.
pub struct Mixer<'a> {
    config: &'a SynthConfig,
    voice: Voice<'a>,
}

impl<'a> Mixer<'a> {
    /// Creates a mixer using the given synthesis parameters.
    pub fn new(config: &'a SynthConfig) -> Self {
        Self {
            config,
            voice: Voice::new(config),
        }
    }

    /// Synthesizes one event and adds it into `buffer`.
    ///
    /// Rests leave the buffer untouched. Percussion ignores the event's pitch.
    ///
    /// # Returns
    ///
    /// The sample range written, or None for a rest
    pub fn place(&mut self, buffer: &mut MasterBuffer, event: &Event) -> Option<(usize, usize)> {
        let start = self.config.samples_for(event.start);
        let wave = self.voice.render(event, start)?;
        let end = start + wave.len();

        debug!(
            instrument = %event.instrument,
            note = %event.note,
            start,
            end,
            "Placing event"
        );
        buffer.accumulate(start, &wave);
        Some((start, end))
    }

    /// Renders a whole score into a new master buffer.
    ///
    /// The buffer starts at the score's planned length and grows if any
    /// event rings past it. All notes are resolved before any synthesis, so
    /// a malformed note fails the render without partial work.
    ///
    /// # Errors
    ///
    /// Returns `SynthError::InvalidNote` if any note token is malformed
    pub fn render(&mut self, score: &Score) -> Result<MasterBuffer> {
        let events = score.events(self.config.sample_rate)?;
        let mut buffer = MasterBuffer::new(score.total_samples(self.config.sample_rate));

        info!(
            name = %score.name,
            tempo = score.tempo,
            events = events.len(),
            samples = buffer.len(),
            "Rendering score"
        );

        let placed = events
            .iter()
            .filter_map(|event| self.place(&mut buffer, event))
            .count();

        info!(placed, skipped = events.len() - placed, "Mix complete");
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::{Note, Track};
    use crate::error::SynthError;
    use crate::synth::Instrument;

    fn event(instrument: Instrument, note: &str, start: f64, duration: f64) -> Event {
        Event::new(instrument, Note::parse(note).unwrap(), start, duration, 0.5)
    }

    fn seeded() -> SynthConfig {
        SynthConfig {
            seed: Some(3),
            ..SynthConfig::default()
        }
    }

    #[test]
    fn test_rest_leaves_buffer_untouched() {
        let config = SynthConfig::default();
        let mut mixer = Mixer::new(&config);
        let mut buffer = MasterBuffer::new(100);
        mixer.place(&mut buffer, &event(Instrument::Flute, "C4", 0.0, 0.001));
        let before = buffer.clone();

        let written = mixer.place(&mut buffer, &event(Instrument::Flute, "rest", 0.0, 5.0));
        assert_eq!(written, None);
        assert_eq!(buffer, before);
        assert_eq!(buffer.len(), 100);
    }

    #[test]
    fn test_place_range() {
        let config = SynthConfig::default();
        let mut mixer = Mixer::new(&config);
        let mut buffer = MasterBuffer::new(0);

        let written = mixer.place(&mut buffer, &event(Instrument::Flute, "F4", 0.75, 0.75));
        assert_eq!(written, Some((33075, 66150)));
        assert_eq!(buffer.len(), 66150);
        assert!(buffer.samples()[..33075].iter().all(|&s| s == 0.0));
        assert!(buffer.samples()[33075..].iter().any(|&s| s != 0.0));
    }

    #[test]
    fn test_placement_is_commutative() {
        let config = SynthConfig::default();
        let a = event(Instrument::Clarinet, "D4", 0.0, 0.5);
        let b = event(Instrument::Trumpet, "Bb4", 0.25, 0.5);

        let mut first = MasterBuffer::new(0);
        let mut mixer = Mixer::new(&config);
        mixer.place(&mut first, &a);
        mixer.place(&mut first, &b);

        let mut second = MasterBuffer::new(0);
        let mut mixer = Mixer::new(&config);
        mixer.place(&mut second, &b);
        mixer.place(&mut second, &a);

        assert_eq!(first.len(), second.len());
        for (x, y) in first.samples().iter().zip(second.samples()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_seeded_percussion_is_order_independent() {
        let config = seeded();
        let snare = Event::new(Instrument::Snare, Note::parse("D3").unwrap(), 0.0, 0.12, 0.5);
        let kick = Event::new(Instrument::BassDrum, Note::parse("F2").unwrap(), 0.05, 0.2, 0.5);

        let mut first = MasterBuffer::new(0);
        let mut mixer = Mixer::new(&config);
        mixer.place(&mut first, &snare);
        mixer.place(&mut first, &kick);

        let mut second = MasterBuffer::new(0);
        let mut mixer = Mixer::new(&config);
        mixer.place(&mut second, &kick);
        mixer.place(&mut second, &snare);

        assert_eq!(first.len(), second.len());
        for (x, y) in first.samples().iter().zip(second.samples()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_growth_preserves_content() {
        let config = SynthConfig::default();
        let mut mixer = Mixer::new(&config);
        let mut buffer = MasterBuffer::new(0);

        let short = event(Instrument::Alto, "F4", 0.0, 1000.0 / 44100.0);
        assert_eq!(mixer.place(&mut buffer, &short), Some((0, 1000)));
        let snapshot = buffer.samples().to_vec();

        let long = event(Instrument::Alto, "G4", 3000.0 / 44100.0, 2000.0 / 44100.0);
        assert_eq!(mixer.place(&mut buffer, &long), Some((3000, 5000)));

        assert_eq!(buffer.len(), 5000);
        assert_eq!(&buffer.samples()[..1000], snapshot.as_slice());
        assert!(buffer.samples()[1000..3000].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_ensure_len_never_shrinks() {
        let mut buffer = MasterBuffer::from(vec![1.0, 2.0, 3.0]);
        buffer.ensure_len(2);
        assert_eq!(buffer.samples(), &[1.0, 2.0, 3.0]);

        buffer.ensure_len(5);
        assert_eq!(buffer.samples(), &[1.0, 2.0, 3.0, 0.0, 0.0]);
        assert!(buffer.samples.capacity() >= 6);
    }

    #[test]
    fn test_accumulate_adds() {
        let mut buffer = MasterBuffer::new(4);
        buffer.accumulate(1, &[1.0, 1.0]);
        buffer.accumulate(2, &[0.5, 0.5, 0.5]);
        assert_eq!(buffer.samples(), &[0.0, 1.0, 1.5, 0.5, 0.5]);
        assert_eq!(buffer.peak(), 1.5);
    }

    #[test]
    fn test_percussion_ignores_pitch() {
        let config = seeded();
        let mut mixer = Mixer::new(&config);
        let mut low = MasterBuffer::new(0);
        let mut high = MasterBuffer::new(0);
        mixer.place(&mut low, &event(Instrument::BassDrum, "F2", 0.0, 0.1));
        mixer.place(&mut high, &event(Instrument::BassDrum, "C6", 0.0, 0.1));
        assert_eq!(low, high);
    }

    #[test]
    fn test_render_score() {
        let config = seeded();
        let mut mixer = Mixer::new(&config);
        let buffer = mixer.render(&Score::sneaky_boom()).unwrap();

        assert_eq!(buffer.len(), 639_450);
        assert!(buffer.peak() > 0.5);
        // Two seconds into the tail everything has died away.
        assert!(buffer.samples()[600_000..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_render_grows_for_long_tail() {
        let config = SynthConfig::default();
        let mut score = Score::new("Long").with_measures(0);
        score.add_track(Track::new("flute").note("A4", 0.0, 8.0));

        let buffer = Mixer::new(&config).render(&score).unwrap();
        assert_eq!(buffer.len(), 264_600);
    }

    #[test]
    fn test_render_rejects_bad_note() {
        let config = SynthConfig::default();
        let mut score = Score::new("Bad");
        score.add_track(Track::new("flute").note("Q4", 0.0, 1.0));

        assert!(matches!(
            Mixer::new(&config).render(&score),
            Err(SynthError::InvalidNote(_))
        ));
    }
}
