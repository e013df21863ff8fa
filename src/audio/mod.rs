//! Mixing, mastering and output.
//!
//! This module turns resolved events into sound:
//! - Additive placement of events into a growable master buffer
//! - Peak normalization and 16-bit quantization
//! - WAV export via hound
//! - Blocking playback via rodio

pub mod export;
pub mod mixer;
pub mod playback;
pub mod postprocess;

pub use export::write_wav;
pub use mixer::{MasterBuffer, Mixer};
pub use playback::play_blocking;
pub use postprocess::normalize;
