//! Tonecraft Audio Backend
//!
//! This crate implements the tone synthesizer behind tone suggestions: a
//! procedural generator that turns an instrument, style, mode and bar count
//! into a short mono 16-bit 44.1 kHz WAV clip.
//!
//! # Overview
//!
//! 1. [`properties`] maps instrument and style to a base frequency, harmonic
//!    series and rhythm gate.
//! 2. [`synthesis`] renders one of four generators (melody, chord, beat,
//!    continuation) sample by sample.
//! 3. [`envelope`] fades the clip in and out and applies style modulation.
//! 4. [`wav`] encodes the buffer as a canonical PCM WAV file.
//!
//! # Determinism
//!
//! Melody, chord and continuation output depends only on the parameters.
//! Beat mode adds snare noise drawn from a PCG32 stream seeded from the
//! caller's seed, so it is reproducible given the same seed.
//!
//! # Example
//!
//! ```
//! use tonecraft_backend_audio::generate;
//! use tonecraft_spec::{Instrument, Mode, Style, SynthParams};
//!
//! let params = SynthParams::new(Instrument::Piano, Style::Pop, Mode::Melody, 1);
//! let result = generate(&params, 42).unwrap();
//!
//! assert_eq!(&result.wav.wav_data[0..4], b"RIFF");
//! assert_eq!(result.wav.duration_seconds(), 2.0);
//! ```

pub mod envelope;
pub mod error;
pub mod generate;
pub mod properties;
pub mod rng;
pub mod synthesis;
pub mod wav;

// Re-export main types at crate root
pub use error::{AudioError, AudioResult};
pub use generate::{generate, generate_cancellable, render_samples, GenerateResult, MAX_BARS};
pub use properties::MusicalProperties;
pub use wav::WavResult;
