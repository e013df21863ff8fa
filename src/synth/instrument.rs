//! Instrument voices.
//!
//! Pitched instruments are weighted sums of sine harmonics shaped by the
//! shared ADSR envelope. Percussion ignores pitch and is built from a decaying
//! sine and filtered noise.

use super::envelope::{exponential_decay, linear_decay};
use super::SynthConfig;
use crate::composition::Event;
use crate::error::SynthError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

/// The closed set of voices a score can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instrument {
    Flute,
    Clarinet,
    Alto,
    Trumpet,
    BassDrum,
    Snare,
}

impl Instrument {
    /// All instruments in track order.
    pub const ALL: [Instrument; 6] = [
        Instrument::Flute,
        Instrument::Clarinet,
        Instrument::Alto,
        Instrument::Trumpet,
        Instrument::BassDrum,
        Instrument::Snare,
    ];

    /// Harmonic multiples and weights that define the timbre.
    /// Empty for percussion.
    pub fn harmonics(&self) -> &'static [(f64, f64)] {
        match self {
            Instrument::Flute => &[(1.0, 1.0)],
            Instrument::Clarinet => &[(1.0, 0.9), (3.0, 0.2)],
            Instrument::Alto => &[(1.0, 0.6), (2.0, 0.18)],
            Instrument::Trumpet => &[(1.0, 0.7), (2.0, 0.35)],
            Instrument::BassDrum | Instrument::Snare => &[],
        }
    }

    /// Volume used when a score does not set one.
    pub fn default_volume(&self) -> f64 {
        match self {
            Instrument::Flute => 0.4,
            Instrument::Clarinet => 0.35,
            Instrument::Alto => 0.32,
            Instrument::Trumpet => 0.3,
            Instrument::BassDrum => 0.2,
            Instrument::Snare => 0.1,
        }
    }

    /// Returns true for voices that ignore pitch.
    pub fn is_percussion(&self) -> bool {
        matches!(self, Instrument::BassDrum | Instrument::Snare)
    }

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Instrument::Flute => "flute",
            Instrument::Clarinet => "clarinet",
            Instrument::Alto => "alto",
            Instrument::Trumpet => "trumpet",
            Instrument::BassDrum => "bass_drum",
            Instrument::Snare => "snare",
        }
    }
}

impl FromStr for Instrument {
    type Err = SynthError;

    /// Accepts canonical names and the short track ids ("clar", "trump",
    /// "bd", "sn"), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flute" => Ok(Instrument::Flute),
            "clarinet" | "clar" => Ok(Instrument::Clarinet),
            "alto" => Ok(Instrument::Alto),
            "trumpet" | "trump" => Ok(Instrument::Trumpet),
            "bass_drum" | "bassdrum" | "bd" => Ok(Instrument::BassDrum),
            "snare" | "sn" => Ok(Instrument::Snare),
            _ => Err(SynthError::UnknownInstrument(s.to_string())),
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders single notes for any instrument.
///
/// Percussion noise is drawn from a generator created per hit. With a fixed
/// seed, each hit's generator depends only on the seed, the instrument and the
/// hit's start sample, so a seeded render does not depend on placement order.
pub struct Voice<'a> {
    config: &'a SynthConfig,
}

impl<'a> Voice<'a> {
    /// Creates a voice renderer for the given parameters.
    pub fn new(config: &'a SynthConfig) -> Self {
        Self { config }
    }

    /// Synthesizes one event that starts at `start_sample`.
    ///
    /// Pitched instruments use the note's frequency; percussion ignores it.
    ///
    /// # Returns
    ///
    /// `round(duration x sample_rate)` samples, or None for a rest
    pub fn render(&self, event: &Event, start_sample: usize) -> Option<Vec<f64>> {
        let frequency = event.note.frequency()?;
        let wave = if event.instrument.is_percussion() {
            self.hit(event.instrument, event.duration, event.volume, start_sample)
        } else {
            self.tone(event.instrument, frequency, event.duration, event.volume)
        };
        Some(wave)
    }

    /// Harmonic stack times the ADSR envelope.
    ///
    /// Percussion instruments have no harmonics and render silence here.
    ///
    /// # Arguments
    ///
    /// * `instrument` - Pitched voice to use
    /// * `frequency` - Fundamental in Hz
    /// * `duration` - Length in seconds
    /// * `volume` - Linear gain applied to the whole waveform
    pub fn tone(
        &self,
        instrument: Instrument,
        frequency: f64,
        duration: f64,
        volume: f64,
    ) -> Vec<f64> {
        let harmonics = instrument.harmonics();
        let rate = self.config.sample_rate as f64;
        let len = self.config.samples_for(duration);
        let env = self.config.adsr.curve(len, self.config.sample_rate);

        (0..len)
            .zip(env)
            .map(|(i, gain)| {
                let t = i as f64 / rate;
                let wave: f64 = harmonics
                    .iter()
                    .map(|&(multiple, weight)| weight * (TAU * multiple * frequency * t).sin())
                    .sum();
                wave * gain * volume
            })
            .collect()
    }

    /// Percussion hit of `duration` seconds.
    ///
    /// `start_sample` only keys the noise generator; the returned waveform
    /// always begins at index 0. Pitched instruments render silence here.
    pub fn hit(
        &self,
        instrument: Instrument,
        duration: f64,
        volume: f64,
        start_sample: usize,
    ) -> Vec<f64> {
        let mut rng = self.hit_rng(instrument, start_sample);
        match instrument {
            Instrument::BassDrum => self.bass_drum(duration, volume, &mut rng),
            Instrument::Snare => self.snare(duration, volume, &mut rng),
            _ => vec![0.0; self.config.samples_for(duration)],
        }
    }

    fn hit_rng(&self, instrument: Instrument, start_sample: usize) -> StdRng {
        match self.config.seed {
            Some(seed) => {
                let key = (start_sample as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
                    ^ instrument as u64;
                StdRng::seed_from_u64(seed ^ key)
            }
            None => StdRng::from_os_rng(),
        }
    }

    /// Decaying low sine with a little noise on top.
    fn bass_drum(&self, duration: f64, volume: f64, rng: &mut StdRng) -> Vec<f64> {
        let rate = self.config.sample_rate as f64;
        let len = self.config.samples_for(duration);
        let freq = self.config.bass_drum_frequency;
        let noise = self.config.bass_drum_noise;

        exponential_decay(len, self.config.bass_drum_decay, self.config.sample_rate)
            .enumerate()
            .map(|(i, gain)| {
                let t = i as f64 / rate;
                let body = (TAU * freq * t).sin() * gain;
                (body + noise * white_noise(rng)) * volume
            })
            .collect()
    }

    /// Low-passed noise under a linear fade.
    fn snare(&self, duration: f64, volume: f64, rng: &mut StdRng) -> Vec<f64> {
        let len = self.config.samples_for(duration);
        let raw: Vec<f64> = (0..len).map(|_| white_noise(rng)).collect();

        moving_average(&raw, self.config.snare_window)
            .into_iter()
            .zip(linear_decay(len))
            .map(|(s, gain)| s * gain * volume)
            .collect()
    }
}

/// Gaussian white noise with zero mean and unit variance.
fn white_noise(rng: &mut StdRng) -> f64 {
    rng.sample(StandardNormal)
}

/// Centered boxcar filter with output the same length as the input.
///
/// Each output sample is the sum of the `window` inputs around it divided by
/// `window`; samples past either edge count as zero.
pub fn moving_average(input: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut prefix = Vec::with_capacity(input.len() + 1);
    prefix.push(0.0);
    for &x in input {
        prefix.push(prefix[prefix.len() - 1] + x);
    }

    // Window covers [i + lead + 1 - window, i + lead].
    let lead = (window - 1) / 2;
    (0..input.len())
        .map(|i| {
            let hi = (i + lead + 1).min(input.len());
            let lo = (i + lead + 1).saturating_sub(window);
            (prefix[hi] - prefix[lo]) / window as f64
        })
        .collect()
}
