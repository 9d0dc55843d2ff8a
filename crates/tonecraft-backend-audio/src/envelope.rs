//! Clip envelope.
//!
//! Applies a linear fade at both ends of the clip plus a style-dependent
//! amplitude modulation: tremolo for lofi and a pumping sidechain shape for
//! edm. Output is not clamped here; the WAV encoder clips.

use std::f64::consts::PI;

use tonecraft_spec::Style;

/// Longest fade in seconds.
pub const MAX_FADE_SECONDS: f64 = 0.1;
/// Fade length as a fraction of the clip duration, when shorter than the maximum.
pub const FADE_FRACTION: f64 = 0.05;

/// Per-sample envelope for one clip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeShaper {
    duration: f64,
    fade_time: f64,
    style: Style,
}

impl EnvelopeShaper {
    /// Creates an envelope for a clip of `duration` seconds.
    pub fn new(duration: f64, style: Style) -> Self {
        Self {
            duration,
            fade_time: MAX_FADE_SECONDS.min(duration * FADE_FRACTION),
            style,
        }
    }

    /// Fade length in seconds.
    pub fn fade_time(&self) -> f64 {
        self.fade_time
    }

    /// Fade-in/fade-out gain at time `t`.
    pub fn fade_gain(&self, t: f64) -> f64 {
        if self.fade_time <= 0.0 {
            return 1.0;
        }

        let mut gain = 1.0;
        if t < self.fade_time {
            gain *= t / self.fade_time;
        }
        if t > self.duration - self.fade_time {
            gain *= (self.duration - t) / self.fade_time;
        }
        gain
    }

    /// Style-dependent amplitude modulation at time `t`.
    pub fn style_gain(&self, t: f64) -> f64 {
        match self.style {
            Style::Lofi => 0.8 + 0.2 * (2.0 * PI * 0.5 * t).sin(),
            Style::Edm => 0.7 + 0.3 * (2.0 * PI * 2.0 * t).sin().abs(),
            _ => 1.0,
        }
    }

    /// Shapes a raw generator sample at time `t`.
    pub fn apply(&self, t: f64, raw: f64) -> f64 {
        raw * self.fade_gain(t) * self.style_gain(t)
    }
}
