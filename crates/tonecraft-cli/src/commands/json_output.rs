//! JSON output types for machine-readable CLI output.
//!
//! These types back the `--json` flag on the `generate` command so that
//! scripts can consume results without scraping colored text.

use serde::{Deserialize, Serialize};
use tonecraft_spec::ValidationError;

/// Error codes for CLI operations.
///
/// These codes are stable. Validation errors pass through their `E00x` code
/// and synthesis errors their `AUDIO_00x` code.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_002";
    /// Unknown budget profile
    pub const UNKNOWN_BUDGET: &str = "CLI_008";
    /// `--max-bars` outside `1..=MAX_BARS`
    pub const INVALID_MAX_BARS: &str = "CLI_011";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_009";
    /// Generation error (task failure)
    pub const GENERATION_ERROR: &str = "CLI_010";
    /// WebSocket message was not UTF-8
    pub const NON_UTF8_MESSAGE: &str = "CLI_014";
    /// Generation deadline exceeded
    pub const TIMEOUT: &str = "CLI_020";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// JSON path to the problematic field (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }
}

impl From<&ValidationError> for JsonError {
    fn from(err: &ValidationError) -> Self {
        Self {
            code: err.code.code().to_string(),
            message: err.message.clone(),
            path: err.path.clone(),
        }
    }
}

/// JSON output for the `generate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOutput {
    /// Whether generation succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Generation details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerateResult>,
}

impl GenerateOutput {
    /// Creates a successful generate output.
    pub fn success(result: GenerateResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed generate output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Details of a generated clip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateResult {
    /// Path the WAV file was written to
    pub path: String,
    /// Resolved instrument
    pub instrument: String,
    /// Resolved style
    pub style: String,
    /// Resolved mode
    pub mode: String,
    /// Number of bars
    pub bars: u32,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Base frequency in Hz after style scaling
    pub base_frequency: f64,
    /// RNG seed
    pub seed: u32,
    /// Size of the WAV file in bytes
    pub size_bytes: usize,
    /// BLAKE3 hash of the PCM data
    pub pcm_hash: String,
    /// Wall-clock generation time in milliseconds
    pub duration_ms: u64,
}
