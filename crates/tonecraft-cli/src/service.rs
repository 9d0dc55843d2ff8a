//! Tone suggestion service.
//!
//! Wraps the synthesizer in the request/response contract used by the
//! project front-end: a JSON request naming instrument, style, mode and bars
//! in, and either a suggestion envelope or an error object out.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tonecraft_backend_audio::{generate_cancellable, AudioError};
use tonecraft_spec::{
    parse_request, resolve_prompt, suggestion_title, validate_request, BackendError, ErrorCode,
    GenerationRequest, SpecError, Suggestion, SynthBudget, SynthParams, ValidationError,
};

use crate::commands::json_output::error_codes;

/// Default deadline for a single generation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Top-level message of every error response.
pub const ERROR_MESSAGE: &str = "Failed to generate AI suggestion";

/// Service configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Limits applied to each request.
    pub budget: SynthBudget,
    /// Deadline for one generation when run through [`suggest_with_deadline`].
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            budget: SynthBudget::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    /// Always true.
    pub success: bool,
    pub suggestion: Suggestion,
    /// The caller's prompt, or one derived from the parameters.
    pub prompt: String,
}

/// Error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Generic failure message.
    pub error: String,
    /// What went wrong.
    pub details: String,
    /// Stable error code.
    pub code: String,
    /// HTTP-equivalent status code.
    pub status: u16,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, details: impl Into<String>, status: u16) -> Self {
        Self {
            error: ERROR_MESSAGE.to_string(),
            details: details.into(),
            code: code.into(),
            status,
        }
    }
}

/// Errors produced by the suggestion service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Request body could not be parsed.
    #[error("malformed request: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Request failed validation.
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    /// Synthesis failed.
    #[error("{0}")]
    Synthesis(#[from] AudioError),

    /// Generation did not finish before the deadline.
    #[error("generation exceeded the {} ms deadline", .0.as_millis())]
    Timeout(Duration),

    /// The generation task panicked or was cancelled.
    #[error("generation task failed: {0}")]
    Task(String),
}

impl From<SpecError> for ServiceError {
    fn from(err: SpecError) -> Self {
        match err {
            SpecError::Validation(err) => ServiceError::Invalid(err),
            SpecError::JsonParse(err) => ServiceError::Malformed(err),
        }
    }
}

impl ServiceError {
    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Malformed(_) => ErrorCode::MalformedRequest.code(),
            ServiceError::Invalid(err) => err.code.code(),
            ServiceError::Synthesis(err) => err.code(),
            ServiceError::Timeout(_) => error_codes::TIMEOUT,
            ServiceError::Task(_) => error_codes::GENERATION_ERROR,
        }
    }

    /// HTTP-equivalent status code.
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::Malformed(_) | ServiceError::Invalid(_) => 400,
            ServiceError::Synthesis(_) | ServiceError::Task(_) => 500,
            ServiceError::Timeout(_) => 504,
        }
    }

    /// Converts into the wire error object.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.code(), self.to_string(), self.status())
    }
}

/// Generates a suggestion for a parsed request.
pub fn suggest(
    request: &GenerationRequest,
    config: &ServiceConfig,
) -> Result<SuggestionResponse, ServiceError> {
    log_request(request);
    let params = validate_request(request, &config.budget).inspect_err(|err| {
        log::warn!("rejected suggestion request: {}", err);
    })?;
    render_suggestion(request, params, &AtomicBool::new(false))
}

/// Parses a JSON request body and generates a suggestion.
pub fn suggest_json(body: &str, config: &ServiceConfig) -> Result<SuggestionResponse, ServiceError> {
    suggest_json_cancellable(body, config, &AtomicBool::new(false))
}

fn suggest_json_cancellable(
    body: &str,
    config: &ServiceConfig,
    cancel: &AtomicBool,
) -> Result<SuggestionResponse, ServiceError> {
    let (request, params) = parse_request(body, &config.budget).inspect_err(|err| {
        log::warn!("rejected suggestion request: {}", err);
    })?;
    log_request(&request);
    render_suggestion(&request, params, cancel)
}

/// Runs [`suggest_json`] on the blocking pool under `config.timeout`.
///
/// When the deadline passes the render is told to stop, so an abandoned
/// request does not keep a blocking thread busy.
pub async fn suggest_with_deadline(
    body: String,
    config: ServiceConfig,
) -> Result<SuggestionResponse, ServiceError> {
    let timeout = config.timeout;
    let cancel = Arc::new(AtomicBool::new(false));
    let task_cancel = Arc::clone(&cancel);
    let task = tokio::task::spawn_blocking(move || {
        suggest_json_cancellable(&body, &config, &task_cancel)
    });

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => Err(ServiceError::Task(join_err.to_string())),
        Err(_) => {
            cancel.store(true, Ordering::Relaxed);
            log::warn!("suggestion generation timed out after {:?}", timeout);
            Err(ServiceError::Timeout(timeout))
        }
    }
}

fn log_request(request: &GenerationRequest) {
    log::info!(
        "generating suggestion: project={} instrument={} style={} mode={} bars={:?}",
        request.project_id.as_deref().unwrap_or("-"),
        request.instrument,
        request.style,
        request.mode,
        request.bars
    );
}

fn render_suggestion(
    request: &GenerationRequest,
    params: SynthParams,
    cancel: &AtomicBool,
) -> Result<SuggestionResponse, ServiceError> {
    let seed = request.seed.unwrap_or_else(rand::random);
    let result = generate_cancellable(&params, seed, cancel)?;

    let suggestion = Suggestion {
        id: uuid::Uuid::new_v4().to_string(),
        audio_url: result.wav.to_data_url(),
        title: suggestion_title(&request.style, &request.mode, &request.instrument),
        instrument: request.instrument.clone(),
        style: request.style.clone(),
        mode: request.mode.clone(),
        bars: params.bars,
        duration: params.duration_seconds() as u32,
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        seed,
        pcm_hash: result.wav.pcm_hash.clone(),
    };

    log::info!(
        "suggestion {} generated: \"{}\" ({} s, {} bytes)",
        suggestion.id,
        suggestion.title,
        suggestion.duration,
        result.wav.wav_data.len()
    );

    Ok(SuggestionResponse {
        success: true,
        prompt: resolve_prompt(request, &params),
        suggestion,
    })
}

/// Serializes a service result into the response JSON.
pub fn to_response_json(result: &Result<SuggestionResponse, ServiceError>) -> String {
    let serialized = match result {
        Ok(response) => serde_json::to_string(response),
        Err(err) => serde_json::to_string(&err.to_response()),
    };

    serialized.unwrap_or_else(|e| {
        let error = ErrorResponse::new(
            error_codes::JSON_SERIALIZE,
            format!("Failed to serialize response: {}", e),
            500,
        );
        serde_json::to_string(&error).unwrap_or_else(|_| {
            r#"{"error":"Failed to generate AI suggestion","details":"Failed to serialize response","code":"CLI_009","status":500}"#.to_string()
        })
    })
}
