//! Error types for score rendering.

use thiserror::Error;

/// Errors that can occur while resolving, rendering, or emitting a score.
#[derive(Debug, Error)]
pub enum SynthError {
    /// Note token could not be parsed into a pitch or rest.
    #[error("invalid note: {0:?}")]
    InvalidNote(String),

    /// Instrument identifier does not name a known voice.
    #[error("unknown instrument: {0:?}")]
    UnknownInstrument(String),

    /// File could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Score or config JSON was malformed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WAV encoding failed.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio device could not be opened or fed.
    #[error("playback error: {0}")]
    Playback(String),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, SynthError>;
