//! Chord generator.
//!
//! Moves through a four-chord root progression, two seconds per chord, and
//! voices each root as a major triad.

use rand_pcg::Pcg32;

use super::{harmonic_sum, ToneGenerator};
use crate::properties::MusicalProperties;

/// Root ratios of the progression.
pub const ROOT_RATIOS: [f64; 4] = [1.0, 1.5, 1.333, 1.125];

/// Major triad above the root.
pub const TRIAD_RATIOS: [f64; 3] = [1.0, 1.25, 1.5];

/// Chords per second.
const CHORD_RATE: f64 = 0.5;
const TONE_WEIGHT: f64 = 0.33;
const GAIN: f64 = 0.2;

/// Major-triad chord progression.
#[derive(Debug, Clone)]
pub struct ChordGenerator {
    base_frequency: f64,
    harmonics: &'static [f64],
}

impl ChordGenerator {
    pub fn new(properties: &MusicalProperties) -> Self {
        Self {
            base_frequency: properties.base_frequency,
            harmonics: properties.harmonics,
        }
    }

    /// Index into [`ROOT_RATIOS`] at time `t`.
    pub fn step_at(t: f64) -> usize {
        ((t * CHORD_RATE) % ROOT_RATIOS.len() as f64).floor() as usize
    }

    /// Root frequency of the chord sounding at time `t`.
    pub fn root_at(&self, t: f64) -> f64 {
        self.base_frequency * ROOT_RATIOS[Self::step_at(t)]
    }
}

impl ToneGenerator for ChordGenerator {
    fn sample(&self, t: f64, _rng: &mut Pcg32) -> f64 {
        let root = self.root_at(t);
        let chord: f64 = TRIAD_RATIOS
            .iter()
            .map(|ratio| harmonic_sum(self.harmonics, root * ratio, t) * TONE_WEIGHT)
            .sum();
        chord * GAIN
    }
}
