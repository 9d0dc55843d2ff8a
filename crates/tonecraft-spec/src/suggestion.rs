//! Suggestion metadata returned alongside generated audio.

use serde::{Deserialize, Serialize};

use crate::request::{GenerationRequest, SynthParams};

/// A generated tone suggestion.
///
/// `instrument`, `style` and `mode` echo the caller's strings; `bars` and
/// `duration` reflect the validated request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Unique suggestion id.
    pub id: String,
    /// `data:audio/wav;base64,...` URL holding the clip.
    pub audio_url: String,
    /// Display title, e.g. "Lofi melody (piano)".
    pub title: String,
    pub instrument: String,
    pub style: String,
    pub mode: String,
    pub bars: u32,
    /// Clip length in seconds.
    pub duration: u32,
    /// RFC 3339 UTC timestamp.
    pub generated_at: String,
    /// Seed used for the beat generator's noise.
    pub seed: u32,
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: String,
}

/// Builds the display title: capitalized style, mode, and instrument in parentheses.
pub fn suggestion_title(style: &str, mode: &str, instrument: &str) -> String {
    let mut chars = style.chars();
    let style = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("{} {} ({})", style, mode, instrument)
}

/// Prompt describing what was generated, used when the caller gave none.
pub fn default_prompt(request: &GenerationRequest, params: &SynthParams) -> String {
    format!(
        "Generate a {} {} for {} with {} bars",
        request.style, request.mode, request.instrument, params.bars
    )
}

/// Returns the caller's prompt, or the default prompt if it is absent or blank.
pub fn resolve_prompt(request: &GenerationRequest, params: &SynthParams) -> String {
    match request.text_prompt.as_deref() {
        Some(prompt) if !prompt.trim().is_empty() => prompt.to_string(),
        _ => default_prompt(request, params),
    }
}
