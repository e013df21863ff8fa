//! scorend - renders a multi-instrument score to mono 16-bit PCM.
//!
//! Notes are synthesized with simple additive and noise-based voices, mixed
//! into one buffer, peak-normalized and quantized.

pub mod audio;
pub mod composition;
pub mod error;
pub mod synth;

// Re-export commonly used types
pub use audio::{normalize, play_blocking, write_wav, MasterBuffer, Mixer};
pub use composition::{Event, Note, Score, Track};
pub use error::{Result, SynthError};
pub use synth::{Instrument, SynthConfig, SAMPLE_RATE};

/// Renders a score all the way to normalized 16-bit PCM.
///
/// # Errors
///
/// Returns `SynthError::InvalidNote` if any note token is malformed
pub fn render_pcm(score: &Score, config: &SynthConfig) -> Result<Vec<i16>> {
    let buffer = Mixer::new(config).render(score)?;
    Ok(normalize(buffer))
}
