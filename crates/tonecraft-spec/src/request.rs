//! Request vocabulary and the wire-format generation request.

use serde::{Deserialize, Serialize};

use crate::{SAMPLE_RATE, SECONDS_PER_BAR};

/// Instrument whose timbre the synthesizer imitates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Instrument {
    Piano,
    Guitar,
    Bass,
    Drums,
    Synth,
    Strings,
}

impl Instrument {
    /// All instruments, in table order.
    pub const ALL: [Instrument; 6] = [
        Instrument::Piano,
        Instrument::Guitar,
        Instrument::Bass,
        Instrument::Drums,
        Instrument::Synth,
        Instrument::Strings,
    ];

    /// Parses an instrument name, falling back to [`Instrument::Piano`].
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "guitar" => Instrument::Guitar,
            "bass" => Instrument::Bass,
            "drums" => Instrument::Drums,
            "synth" => Instrument::Synth,
            "strings" => Instrument::Strings,
            _ => Instrument::Piano,
        }
    }

    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Instrument::Piano => "piano",
            Instrument::Guitar => "guitar",
            Instrument::Bass => "bass",
            Instrument::Drums => "drums",
            Instrument::Synth => "synth",
            Instrument::Strings => "strings",
        }
    }
}

/// Musical style; shifts pitch, picks the rhythm gate, and colors the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Style {
    Lofi,
    Edm,
    Jazz,
    Rock,
    Pop,
    Classical,
}

impl Style {
    /// All styles, in table order.
    pub const ALL: [Style; 6] = [
        Style::Lofi,
        Style::Edm,
        Style::Jazz,
        Style::Rock,
        Style::Pop,
        Style::Classical,
    ];

    /// Parses a style name, falling back to [`Style::Pop`].
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "lofi" => Style::Lofi,
            "edm" => Style::Edm,
            "jazz" => Style::Jazz,
            "rock" => Style::Rock,
            "classical" => Style::Classical,
            _ => Style::Pop,
        }
    }

    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Lofi => "lofi",
            Style::Edm => "edm",
            Style::Jazz => "jazz",
            Style::Rock => "rock",
            Style::Pop => "pop",
            Style::Classical => "classical",
        }
    }
}

/// Generation algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mode {
    /// Stepped major-scale line with vibrato.
    Melody,
    /// Major triads over a four-chord root progression.
    Chord,
    /// Kick and snare transients gated by the style's rhythm pattern.
    Beat,
    /// Slowly drifting harmonic pad. Also the fallback for unknown modes.
    Continue,
}

impl Mode {
    /// All modes.
    pub const ALL: [Mode; 4] = [Mode::Melody, Mode::Chord, Mode::Beat, Mode::Continue];

    /// Parses a mode name, falling back to [`Mode::Continue`].
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "melody" => Mode::Melody,
            "chord" => Mode::Chord,
            "beat" => Mode::Beat,
            _ => Mode::Continue,
        }
    }

    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Melody => "melody",
            Mode::Chord => "chord",
            Mode::Beat => "beat",
            Mode::Continue => "continue",
        }
    }
}

macro_rules! impl_string_conversions {
    ($($ty:ty),*) => {
        $(
            impl From<String> for $ty {
                fn from(value: String) -> Self {
                    Self::parse_lenient(&value)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.as_str().to_string()
                }
            }

            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_string_conversions!(Instrument, Style, Mode);

/// Wire form of the `bars` field.
///
/// Front-ends send either a JSON number or the string they read from a
/// form control. Validation decides whether the value is usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BarsValue {
    /// An integral JSON number.
    Integer(i64),
    /// A JSON number with a fractional part or outside the i64 range.
    Float(f64),
    /// A string such as `"4"`.
    Text(String),
}

impl BarsValue {
    /// Returns the value as an integer if it represents one exactly.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            BarsValue::Integer(n) => Some(*n),
            BarsValue::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            BarsValue::Text(s) => s.trim().parse::<i64>().ok(),
        }
    }
}

impl From<u32> for BarsValue {
    fn from(value: u32) -> Self {
        BarsValue::Integer(value as i64)
    }
}

/// A tone-suggestion request as received from a caller.
///
/// Instrument, style and mode are kept as the caller sent them so that the
/// suggestion can echo them back verbatim; [`crate::validate_request`]
/// resolves them into [`SynthParams`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Instrument name (unknown values synthesize as piano).
    pub instrument: String,
    /// Style name (unknown values synthesize as pop).
    pub style: String,
    /// Mode name (unknown values synthesize as continue).
    pub mode: String,
    /// Number of bars; two seconds of audio per bar.
    #[serde(default)]
    pub bars: Option<BarsValue>,
    /// Free-text prompt. A prompt is derived from the parameters when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_prompt: Option<String>,
    /// Project the suggestion is generated for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// RNG seed. A fresh seed is drawn per call when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl GenerationRequest {
    /// Creates a request from its required fields.
    pub fn new(
        instrument: impl Into<String>,
        style: impl Into<String>,
        mode: impl Into<String>,
        bars: impl Into<BarsValue>,
    ) -> Self {
        Self {
            instrument: instrument.into(),
            style: style.into(),
            mode: mode.into(),
            bars: Some(bars.into()),
            text_prompt: None,
            project_id: None,
            seed: None,
        }
    }

    /// Sets the text prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.text_prompt = Some(prompt.into());
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Validated synthesizer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SynthParams {
    pub instrument: Instrument,
    pub style: Style,
    pub mode: Mode,
    /// Number of bars, at least 1.
    pub bars: u32,
}

impl SynthParams {
    /// Creates parameters directly. Callers are responsible for `bars >= 1`.
    pub fn new(instrument: Instrument, style: Style, mode: Mode, bars: u32) -> Self {
        Self {
            instrument,
            style,
            mode,
            bars,
        }
    }

    /// Clip duration in seconds (two seconds per bar).
    pub fn duration_seconds(&self) -> f64 {
        self.bars as f64 * SECONDS_PER_BAR as f64
    }

    /// Number of samples rendered at `sample_rate`.
    pub fn total_samples(&self, sample_rate: u32) -> usize {
        sample_rate as usize * self.bars as usize * SECONDS_PER_BAR as usize
    }

    /// Number of samples at the fixed output rate.
    pub fn num_samples(&self) -> usize {
        self.total_samples(SAMPLE_RATE)
    }
}
