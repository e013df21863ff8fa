//! scorend - renders a score to audio and plays it.
//!
//! Renders the built-in piece (or a JSON score file), optionally writes it to
//! a WAV file, and plays it on the default audio device.
//!
//! # Usage
//!
//! ```bash
//! cargo run                                  # Render and play the built-in piece
//! cargo run -- --tempo 96 --output out.wav   # Faster, also write a WAV file
//! cargo run -- --score song.json --no-play   # Render a score file silently
//! ```

use anyhow::{bail, Context, Result};
use scorend::{play_blocking, render_pcm, write_wav, Score, SynthConfig};
use std::path::PathBuf;
use tracing::info;

/// Command-line options for the application.
#[derive(Debug, Default)]
struct CliOptions {
    /// Tempo override in beats per minute.
    tempo: Option<u32>,
    /// Measure-count override.
    measures: Option<u32>,
    /// Path to write a WAV file to.
    output: Option<PathBuf>,
    /// Path to a JSON score file; the built-in piece is used otherwise.
    score: Option<PathBuf>,
    /// Path to a JSON synthesis config file.
    config: Option<PathBuf>,
    /// Seed for percussion noise.
    seed: Option<u64>,
    /// Skip playback.
    no_play: bool,
}

impl CliOptions {
    /// Parses command-line arguments.
    ///
    /// Supports:
    /// - `--tempo <bpm>` or `-t <bpm>`
    /// - `--measures <n>` or `-m <n>`
    /// - `--output <path>` or `-o <path>`
    /// - `--score <path>` or `-s <path>`
    /// - `--config <path>` or `-c <path>`
    /// - `--seed <n>`
    /// - `--no-play`
    /// - `--help` or `-h`: Print help and exit
    fn parse() -> Result<Self> {
        Self::parse_from(std::env::args().skip(1))
    }

    fn parse_from<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut opts = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .with_context(|| format!("{} requires a value", flag))
            };
            match arg.as_str() {
                "--tempo" | "-t" => {
                    let tempo: u32 = value(&arg)?.parse().context("Invalid tempo")?;
                    if tempo == 0 {
                        bail!("Tempo must be positive");
                    }
                    opts.tempo = Some(tempo);
                }
                "--measures" | "-m" => {
                    opts.measures = Some(value(&arg)?.parse().context("Invalid measure count")?);
                }
                "--output" | "-o" => opts.output = Some(PathBuf::from(value(&arg)?)),
                "--score" | "-s" => opts.score = Some(PathBuf::from(value(&arg)?)),
                "--config" | "-c" => opts.config = Some(PathBuf::from(value(&arg)?)),
                "--seed" => opts.seed = Some(value(&arg)?.parse().context("Invalid seed")?),
                "--no-play" => opts.no_play = true,
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                other => bail!("Unknown option: {} (use --help for usage)", other),
            }
        }

        Ok(opts)
    }
}

fn print_help() {
    eprintln!("scorend - render a multi-instrument score to audio");
    eprintln!();
    eprintln!("Usage: scorend [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -t, --tempo BPM        Override the score tempo");
    eprintln!("  -m, --measures N       Override the measure count");
    eprintln!("  -o, --output PATH      Write a mono 16-bit WAV file");
    eprintln!("  -s, --score PATH       Render a JSON score instead of the built-in piece");
    eprintln!("  -c, --config PATH      Load synthesis parameters from JSON");
    eprintln!("      --seed N           Seed percussion noise for a reproducible render");
    eprintln!("      --no-play          Do not play the result");
    eprintln!("  -h, --help             Print this help message");
}

/// Main entry point.
fn main() -> Result<()> {
    let cli = CliOptions::parse()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => SynthConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => SynthConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let mut score = match &cli.score {
        Some(path) => Score::load_from_file(path)
            .with_context(|| format!("Failed to load score: {}", path.display()))?,
        None => Score::sneaky_boom(),
    };
    if let Some(tempo) = cli.tempo {
        score = score.with_tempo(tempo);
    }
    if let Some(measures) = cli.measures {
        score = score.with_measures(measures);
    }

    let pcm = render_pcm(&score, &config).context("Failed to render score")?;

    if let Some(path) = &cli.output {
        write_wav(path, &pcm, config.sample_rate)
            .with_context(|| format!("Failed to write WAV file: {}", path.display()))?;
    }

    if !cli.no_play {
        eprintln!("Playing {}...", score.name);
        play_blocking(&pcm, config.sample_rate).context("Playback failed")?;
    }
    info!("Done");

    Ok(())
}
