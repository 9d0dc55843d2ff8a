//! Resource limits applied during validation.
//!
//! Rendering cost grows linearly with `bars`: every bar is two seconds of
//! 44.1 kHz audio held in memory as `f64` and again as PCM bytes. The budget
//! bounds that allocation before any synthesis runs.

use serde::{Deserialize, Serialize};

use crate::MAX_BARS;

/// Synthesis budget limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthBudget {
    /// Maximum number of bars per request. Values above [`MAX_BARS`] are
    /// treated as [`MAX_BARS`].
    pub max_bars: u32,
}

impl Default for SynthBudget {
    fn default() -> Self {
        Self {
            max_bars: Self::DEFAULT_MAX_BARS,
        }
    }
}

impl SynthBudget {
    /// Default maximum bars (128 seconds of audio).
    pub const DEFAULT_MAX_BARS: u32 = MAX_BARS;

    /// Largest bar count offered by the suggestion panel.
    pub const STRICT_MAX_BARS: u32 = 16;

    /// Budget limited to the bar counts the suggestion panel offers.
    pub fn strict() -> Self {
        Self {
            max_bars: Self::STRICT_MAX_BARS,
        }
    }

    /// Budget with a custom bar limit, clamped to `1..=MAX_BARS`.
    pub fn with_max_bars(max_bars: u32) -> Self {
        Self {
            max_bars: max_bars.clamp(1, MAX_BARS),
        }
    }

    /// Gets a budget profile by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "strict" => Some(Self::strict()),
            _ => None,
        }
    }

    /// The bar limit validation enforces.
    pub fn bar_limit(&self) -> u32 {
        self.max_bars.min(MAX_BARS)
    }
}
