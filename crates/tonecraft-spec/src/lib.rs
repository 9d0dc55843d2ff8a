//! Tonecraft Request Library
//!
//! This crate provides the canonical types for tone-suggestion requests:
//! the musical vocabulary (instrument, style, mode), the wire-format request,
//! validation into synthesizer parameters, and the suggestion metadata that
//! is returned to callers.
//!
//! # Overview
//!
//! - **Vocabulary**: [`Instrument`], [`Style`] and [`Mode`] parse leniently.
//!   Unknown values fall back to `piano`, `pop` and `continue` instead of
//!   failing, so callers that forward unvalidated strings keep working.
//! - **Validation**: `bars` is the only field that can reject a request. It
//!   must be a positive integer within the active [`SynthBudget`].
//!
//! # Example
//!
//! ```
//! use tonecraft_spec::{validate_request, GenerationRequest, Instrument, SynthBudget};
//!
//! let request: GenerationRequest = serde_json::from_str(
//!     r#"{"instrument": "kazoo", "style": "lofi", "mode": "melody", "bars": 4}"#,
//! )
//! .unwrap();
//!
//! let params = validate_request(&request, &SynthBudget::default()).unwrap();
//! assert_eq!(params.instrument, Instrument::Piano);
//! assert_eq!(params.duration_seconds(), 8.0);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error codes, validation errors, and the backend error trait
//! - [`request`]: Vocabulary enums and the wire-format request
//! - [`budget`]: Resource limits applied during validation, capped at [`MAX_BARS`]
//! - [`validation`]: Request validation
//! - [`suggestion`]: Suggestion metadata, titles, and prompts

pub mod budget;
pub mod error;
pub mod request;
pub mod suggestion;
pub mod validation;

// Re-export commonly used types at the crate root
pub use budget::SynthBudget;
pub use error::{BackendError, ErrorCode, SpecError, ValidationError};
pub use request::{BarsValue, GenerationRequest, Instrument, Mode, Style, SynthParams};
pub use suggestion::{default_prompt, resolve_prompt, suggestion_title, Suggestion};
pub use validation::{parse_request, validate_request};

/// Sample rate of every rendered clip, in Hz.
pub const SAMPLE_RATE: u32 = 44100;

/// Seconds of audio rendered per bar.
pub const SECONDS_PER_BAR: u32 = 2;

/// Largest bar count the synthesizer renders. Budgets never exceed it.
pub const MAX_BARS: u32 = 64;
