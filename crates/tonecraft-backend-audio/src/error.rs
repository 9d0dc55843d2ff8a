//! Error types for the tone synthesizer.

use thiserror::Error;
use tonecraft_spec::BackendError;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur during audio generation.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Bar count outside the renderable range.
    #[error("invalid bar count: {bars} (must be between 1 and {max})")]
    InvalidBars {
        /// The rejected bar count.
        bars: u32,
        /// The largest accepted bar count.
        max: u32,
    },

    /// Rendering stopped because the caller raised the cancel flag.
    #[error("generation cancelled after {rendered} of {total} samples")]
    Cancelled {
        /// Samples rendered before the flag was observed.
        rendered: usize,
        /// Samples the clip would have had.
        total: usize,
    },
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::InvalidBars { .. } => "AUDIO_001",
            AudioError::Cancelled { .. } => "AUDIO_002",
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}
