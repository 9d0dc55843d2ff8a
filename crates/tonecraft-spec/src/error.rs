//! Error types for request validation and processing.

use thiserror::Error;

/// Error codes for request validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: `bars` is missing, null, fractional, or not a number
    InvalidBars,
    /// E002: `bars` is zero or negative
    NonPositiveBars,
    /// E003: `bars` exceeds the active budget
    BarsExceedBudget,
    /// E004: Request body could not be parsed
    MalformedRequest,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvalidBars => "E001",
            ErrorCode::NonPositiveBars => "E002",
            ErrorCode::BarsExceedBudget => "E003",
            ErrorCode::MalformedRequest => "E004",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "bars").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Top-level error type for request operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Request validation failed.
    #[error("request validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl SpecError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            SpecError::Validation(err) => err.code.code(),
            SpecError::JsonParse(_) => ErrorCode::MalformedRequest.code(),
        }
    }
}

/// Common trait for backend errors.
///
/// Backend error types implement this trait so that the service layer can
/// report failures with a stable code and category without depending on
/// the concrete error enum.
///
/// # Example
///
/// ```ignore
/// use tonecraft_spec::error::BackendError;
///
/// fn report<E: BackendError>(err: E) {
///     eprintln!("[{}] {}", err.code(), err.message());
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "AUDIO_001". These codes are stable.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}
