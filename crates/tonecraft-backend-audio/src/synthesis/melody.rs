//! Melody generator.
//!
//! Walks a seven-step major-scale ratio sequence, one step per half second,
//! and renders each note additively with a 5 Hz vibrato.

use std::f64::consts::PI;

use rand_pcg::Pcg32;

use super::{harmonic_sum, ToneGenerator};
use crate::properties::MusicalProperties;

/// Scale-degree ratios, played in order and repeated.
pub const SCALE_RATIOS: [f64; 7] = [1.0, 1.125, 1.25, 1.5, 1.333, 1.125, 1.0];

/// Steps per second.
const STEP_RATE: f64 = 2.0;
const VIBRATO_RATE: f64 = 5.0;
const VIBRATO_DEPTH: f64 = 0.02;
const GAIN: f64 = 0.3;

/// Stepped major-scale melody.
#[derive(Debug, Clone)]
pub struct MelodyGenerator {
    base_frequency: f64,
    harmonics: &'static [f64],
}

impl MelodyGenerator {
    pub fn new(properties: &MusicalProperties) -> Self {
        Self {
            base_frequency: properties.base_frequency,
            harmonics: properties.harmonics,
        }
    }

    /// Index into [`SCALE_RATIOS`] at time `t`.
    pub fn step_at(t: f64) -> usize {
        ((t * STEP_RATE) % SCALE_RATIOS.len() as f64).floor() as usize
    }

    /// Instantaneous note frequency at time `t`.
    pub fn frequency_at(&self, t: f64) -> f64 {
        self.base_frequency * SCALE_RATIOS[Self::step_at(t)]
    }
}

impl ToneGenerator for MelodyGenerator {
    fn sample(&self, t: f64, _rng: &mut Pcg32) -> f64 {
        let freq = self.frequency_at(t);
        let vibrato = 1.0 + VIBRATO_DEPTH * (2.0 * PI * VIBRATO_RATE * t).sin();
        harmonic_sum(self.harmonics, freq, t) * vibrato * GAIN
    }
}
