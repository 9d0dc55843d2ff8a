//! Continuation generator, also used for unrecognized modes.
//!
//! Holds the harmonic series on the base frequency and lets every partial
//! drift with a shared 0.1 Hz frequency modulation.

use std::f64::consts::PI;

use rand_pcg::Pcg32;

use super::ToneGenerator;
use crate::properties::MusicalProperties;

const DRIFT_RATE: f64 = 0.1;
const DRIFT_DEPTH: f64 = 0.02;
const GAIN: f64 = 0.25;

/// Slowly drifting harmonic pad.
#[derive(Debug, Clone)]
pub struct ContinuationGenerator {
    base_frequency: f64,
    harmonics: &'static [f64],
}

impl ContinuationGenerator {
    pub fn new(properties: &MusicalProperties) -> Self {
        Self {
            base_frequency: properties.base_frequency,
            harmonics: properties.harmonics,
        }
    }
}

impl ToneGenerator for ContinuationGenerator {
    fn sample(&self, t: f64, _rng: &mut Pcg32) -> f64 {
        let drift = 1.0 + DRIFT_DEPTH * (2.0 * PI * DRIFT_RATE * t).sin();
        let sum: f64 = self
            .harmonics
            .iter()
            .enumerate()
            .map(|(i, amp)| {
                let freq = self.base_frequency * (i + 1) as f64 * drift;
                amp * (2.0 * PI * freq * t).sin()
            })
            .sum();
        sum * GAIN
    }
}
