//! Amplitude envelopes.
//!
//! Pitched voices use a four-phase ADSR curve. Percussion uses simple
//! exponential or linear decay curves instead.

use serde::{Deserialize, Serialize};

/// Attack-decay-sustain-release envelope parameters.
///
/// Times are in seconds; `sustain` is a gain level in 0.0..=1.0. Values read
/// from config files go through `Adsr::new`, so they are clamped the same way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "AdsrFields")]
pub struct Adsr {
    pub attack: f64,
    pub decay: f64,
    pub sustain: f64,
    pub release: f64,
}

/// Unchecked envelope fields as written in a config file.
#[derive(Deserialize)]
struct AdsrFields {
    attack: f64,
    decay: f64,
    sustain: f64,
    release: f64,
}

impl From<AdsrFields> for Adsr {
    fn from(f: AdsrFields) -> Self {
        Adsr::new(f.attack, f.decay, f.sustain, f.release)
    }
}

impl Default for Adsr {
    fn default() -> Self {
        Self {
            attack: 0.01,
            decay: 0.05,
            sustain: 0.9,
            release: 0.06,
        }
    }
}

impl Adsr {
    /// Creates an envelope from phase durations and a sustain level.
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack: attack.max(0.0),
            decay: decay.max(0.0),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(0.0),
        }
    }

    /// Builds a gain curve of `len` samples.
    ///
    /// A `len` of zero is treated as one sample. Attack always gets at least
    /// one sample; each later phase is clamped to the samples that remain.
    /// Release occupies the final samples, leaving any gap after decay at
    /// the sustain level.
    ///
    /// # Arguments
    ///
    /// * `len` - Curve length in samples
    /// * `sample_rate` - Samples per second, used to convert phase times
    pub fn curve(&self, len: usize, sample_rate: u32) -> Vec<f64> {
        let n = len.max(1);
        let rate = sample_rate as f64;

        let attack_n = n.min(((self.attack * rate) as usize).max(1));
        let decay_n = (n - attack_n).min((self.decay * rate) as usize);
        let release_n = (n - attack_n - decay_n).min((self.release * rate) as usize);
        let sustain_n = n - attack_n - decay_n - release_n;

        let mut env = Vec::with_capacity(n);
        env.extend(ramp(0.0, 1.0, attack_n));
        env.extend(ramp(1.0, self.sustain, decay_n));
        env.extend(std::iter::repeat_n(self.sustain, sustain_n));
        env.extend(ramp(self.sustain, 0.0, release_n));
        debug_assert_eq!(env.len(), n);
        env
    }
}

/// Linear ramp of `n` points from `from` to `to`, endpoints included.
///
/// A single point yields `from`.
pub fn ramp(from: f64, to: f64, n: usize) -> impl Iterator<Item = f64> {
    let span = n.saturating_sub(1).max(1) as f64;
    (0..n).map(move |i| from + (to - from) * (i as f64 / span))
}

/// Exponential decay `e^(-k t)` sampled at `sample_rate`, starting at 1.0.
pub fn exponential_decay(len: usize, k: f64, sample_rate: u32) -> impl Iterator<Item = f64> {
    let rate = sample_rate as f64;
    (0..len).map(move |i| (-k * i as f64 / rate).exp())
}

/// Linear decay from 1.0 to 0.0 over `len` samples.
pub fn linear_decay(len: usize) -> impl Iterator<Item = f64> {
    ramp(1.0, 0.0, len)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 44100;

    #[test]
    fn test_length_is_exact() {
        let adsr = Adsr::default();
        for len in [1, 2, 10, 441, 2646, 5292, 33075, 100_000] {
            assert_eq!(adsr.curve(len, RATE).len(), len);
        }
    }

    #[test]
    fn test_zero_length_floors_to_one() {
        let env = Adsr::default().curve(0, RATE);
        assert_eq!(env.len(), 1);
        assert!(env[0].is_finite());
    }

    #[test]
    fn test_single_sample_is_finite() {
        let env = Adsr::default().curve(1, RATE);
        assert_eq!(env, vec![0.0]);
    }

    #[test]
    fn test_shape_of_long_note() {
        let adsr = Adsr::default();
        let env = adsr.curve(33075, RATE);

        // attack = 441, decay = 2205, release = 2646
        assert_eq!(env[0], 0.0);
        assert!((env[440] - 1.0).abs() < 1e-12);
        assert!((env[441] - 1.0).abs() < 1e-12);
        assert!((env[441 + 2204] - 0.9).abs() < 1e-12);
        assert_eq!(env[20_000], 0.9);
        assert!((env[33075 - 2646] - 0.9).abs() < 1e-12);
        assert_eq!(*env.last().unwrap(), 0.0);
    }

    #[test]
    fn test_short_note_clamps_phases() {
        // Shorter than attack + decay: no room for release or sustain.
        let env = Adsr::default().curve(1000, RATE);
        assert_eq!(env.len(), 1000);
        assert_eq!(env[0], 0.0);
        assert!((env[440] - 1.0).abs() < 1e-12);
        assert!(env.iter().all(|g| (0.0..=1.0).contains(g)));
    }

    #[test]
    fn test_no_decay_or_release() {
        let adsr = Adsr::new(0.0, 0.0, 0.5, 0.0);
        let env = adsr.curve(10, RATE);
        assert_eq!(env[0], 0.0);
        assert!(env[1..].iter().all(|&g| g == 0.5));
    }

    #[test]
    fn test_json_values_are_clamped() {
        let adsr: Adsr = serde_json::from_str(
            r#"{ "attack": -0.5, "decay": 0.05, "sustain": 1.5, "release": -1.0 }"#,
        )
        .unwrap();
        assert_eq!(adsr, Adsr::new(0.0, 0.05, 1.0, 0.0));

        let env = adsr.curve(4410, RATE);
        assert!(env.iter().all(|g| (0.0..=1.0).contains(g)));
        assert_eq!(*env.last().unwrap(), 1.0);
    }

    #[test]
    fn test_ramp_endpoints() {
        let r: Vec<f64> = ramp(0.0, 1.0, 5).collect();
        assert_eq!(r, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(ramp(0.3, 1.0, 1).collect::<Vec<_>>(), vec![0.3]);
        assert_eq!(ramp(0.3, 1.0, 0).count(), 0);
    }

    #[test]
    fn test_percussion_curves() {
        let exp: Vec<f64> = exponential_decay(RATE as usize, 6.0, RATE).collect();
        assert_eq!(exp[0], 1.0);
        assert!((exp[RATE as usize - 1] - (-6.0f64).exp()).abs() < 1e-3);
        assert!(exp.windows(2).all(|w| w[1] < w[0]));

        let lin: Vec<f64> = linear_decay(3).collect();
        assert_eq!(lin, vec![1.0, 0.5, 0.0]);
    }
}
