//! WAV export.
//!
//! Writes rendered PCM to a mono 16-bit WAV file.

use crate::error::Result;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;
use tracing::info;

/// Writes mono 16-bit PCM to a WAV file.
///
/// # Arguments
///
/// * `path` - Path for the output WAV file
/// * `samples` - Quantized samples
/// * `sample_rate` - Rate written to the header
///
/// # Errors
///
/// Returns error if the file cannot be created or written
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[i16], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path.as_ref(), spec)?;

    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    info!(
        path = %path.as_ref().display(),
        samples = samples.len(),
        "Wrote WAV file"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{mixer::Mixer, postprocess::normalize};
    use crate::composition::Score;
    use crate::error::SynthError;
    use crate::synth::SynthConfig;
    use hound::WavReader;

    #[test]
    fn test_wav_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let samples = vec![0i16, 100, -100, i16::MAX, -i16::MAX];

        write_wav(&path, &samples, 44100).unwrap();

        let mut reader = WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, SampleFormat::Int);

        let read: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read, samples);
    }

    #[test]
    fn test_export_rendered_score() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score.wav");
        let config = SynthConfig {
            seed: Some(11),
            ..SynthConfig::default()
        };

        let buffer = Mixer::new(&config).render(&Score::sneaky_boom()).unwrap();
        let pcm = normalize(buffer);
        write_wav(&path, &pcm, config.sample_rate).unwrap();

        let reader = WavReader::open(&path).unwrap();
        assert_eq!(reader.duration() as usize, pcm.len());
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.wav");
        assert!(matches!(
            write_wav(&path, &[0], 44100),
            Err(SynthError::Wav(_))
        ));
    }
}
