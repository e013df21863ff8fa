//! Blocking playback on the default audio device.

use crate::error::{Result, SynthError};
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, Sink};
use tracing::info;

/// Plays mono 16-bit PCM and returns once the device has drained it.
///
/// The output stream is opened for this call only and released on return.
///
/// # Errors
///
/// Returns `SynthError::Playback` if no output device can be opened
pub fn play_blocking(samples: &[i16], sample_rate: u32) -> Result<()> {
    let (_stream, handle) = OutputStream::try_default()
        .map_err(|e| SynthError::Playback(format!("Failed to open audio output: {e}")))?;
    let sink = Sink::try_new(&handle)
        .map_err(|e| SynthError::Playback(format!("Failed to create sink: {e}")))?;

    info!(
        samples = samples.len(),
        seconds = samples.len() as f64 / sample_rate as f64,
        "Starting playback"
    );
    sink.append(SamplesBuffer::new(1, sample_rate, samples.to_vec()));
    sink.sleep_until_end();
    info!("Playback finished");

    Ok(())
}
