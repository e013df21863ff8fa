//! Normalization and 16-bit quantization of the final mix.

use super::mixer::MasterBuffer;
use tracing::debug;

/// Full-scale value for 16-bit output.
pub const FULL_SCALE: f64 = i16::MAX as f64;

/// Scales the mix so its loudest sample hits full scale, then quantizes to
/// signed 16-bit PCM.
///
/// Consumes the buffer; nothing may mix into it afterwards. A silent buffer is
/// quantized as-is and yields all-zero PCM.
pub fn normalize(buffer: MasterBuffer) -> Vec<i16> {
    let peak = buffer.peak();
    let mut samples = buffer.into_samples();

    if peak > 0.0 {
        for s in &mut samples {
            *s /= peak;
        }
    } else {
        debug!("Silent buffer, skipping normalization");
    }

    samples.into_iter().map(quantize).collect()
}

/// Maps a sample in [-1.0, 1.0] to the nearest 16-bit value.
pub fn quantize(sample: f64) -> i16 {
    (sample * FULL_SCALE).round().clamp(-FULL_SCALE, FULL_SCALE) as i16
}
