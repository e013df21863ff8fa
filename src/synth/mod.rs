//! Waveform synthesis for the score's instruments.
//!
//! This module provides:
//! - ADSR and decay envelopes
//! - Harmonic-stack voices (flute, clarinet, alto, trumpet)
//! - Noise-based percussion (bass drum, snare)
//! - The per-run synthesis parameters

pub mod envelope;
pub mod instrument;

pub use envelope::Adsr;
pub use instrument::{Instrument, Voice};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Sample rate for synthesis (44.1 kHz standard).
pub const SAMPLE_RATE: u32 = 44100;

/// Synthesis parameters, fixed for one render.
///
/// Every field has a default, so a config file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Samples per second.
    pub sample_rate: u32,

    /// Envelope shared by every pitched voice.
    pub adsr: Adsr,

    /// Bass-drum oscillator frequency in Hz.
    pub bass_drum_frequency: f64,

    /// Bass-drum decay constant `k` in `e^(-k t)`.
    pub bass_drum_decay: f64,

    /// Amplitude of the noise layered over the bass drum.
    pub bass_drum_noise: f64,

    /// Width in samples of the snare's moving-average filter.
    pub snare_window: usize,

    /// Seed for percussion noise. None draws from the OS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            adsr: Adsr::default(),
            bass_drum_frequency: 60.0,
            bass_drum_decay: 6.0,
            bass_drum_noise: 0.02,
            snare_window: 32,
            seed: None,
        }
    }
}

impl SynthConfig {
    /// Converts seconds to a whole number of samples at this rate.
    pub fn samples_for(&self, seconds: f64) -> usize {
        (seconds.max(0.0) * self.sample_rate as f64).round() as usize
    }

    /// Loads a config from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not valid JSON
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
