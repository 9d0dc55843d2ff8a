//! Waveform generators, one per generation mode.
//!
//! - `melody` - Stepped major-scale line with vibrato
//! - `chord` - Major triads over a four-chord root progression
//! - `beat` - Gated kick and snare transients (drums only)
//! - `continuation` - Slowly drifting harmonic pad
//!
//! Generators are evaluated per sample at a continuous time offset and return
//! values in roughly [-1, 1] before envelope shaping.

pub mod beat;
pub mod chord;
pub mod continuation;
pub mod melody;

use std::f64::consts::PI;

use rand_pcg::Pcg32;
use tonecraft_spec::{Instrument, Mode};

use crate::properties::MusicalProperties;

pub use beat::BeatGenerator;
pub use chord::ChordGenerator;
pub use continuation::ContinuationGenerator;
pub use melody::MelodyGenerator;

/// Common trait for all generators.
pub trait ToneGenerator {
    /// Returns the raw sample value at time `t` seconds.
    ///
    /// # Arguments
    /// * `t` - Time offset from the start of the clip, in seconds
    /// * `rng` - Deterministic RNG for any randomness
    fn sample(&self, t: f64, rng: &mut Pcg32) -> f64;
}

/// Selects the generator for `mode`.
pub fn generator_for(
    mode: Mode,
    instrument: Instrument,
    properties: &MusicalProperties,
) -> Box<dyn ToneGenerator> {
    match mode {
        Mode::Melody => Box::new(MelodyGenerator::new(properties)),
        Mode::Chord => Box::new(ChordGenerator::new(properties)),
        Mode::Beat => Box::new(BeatGenerator::new(instrument, properties)),
        Mode::Continue => Box::new(ContinuationGenerator::new(properties)),
    }
}

/// Sums `harmonics[i] * sin(2π · freq · (i + 1) · t)`.
pub(crate) fn harmonic_sum(harmonics: &[f64], freq: f64, t: f64) -> f64 {
    harmonics
        .iter()
        .enumerate()
        .map(|(i, amp)| amp * (2.0 * PI * freq * (i + 1) as f64 * t).sin())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::resolve;
    use crate::rng::create_rng;
    use tonecraft_spec::Style;

    #[test]
    fn test_harmonic_sum_fundamental_only() {
        let t = 0.001;
        let expected = (2.0 * PI * 100.0 * t).sin();
        assert!((harmonic_sum(&[1.0], 100.0, t) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_harmonic_sum_is_zero_at_origin() {
        assert_eq!(harmonic_sum(&[1.0, 0.5, 0.25], 440.0, 0.0), 0.0);
    }

    #[test]
    fn test_generator_for_every_mode_produces_sound() {
        let props = resolve(Instrument::Drums, Style::Rock);
        let mut rng = create_rng(1);
        for mode in Mode::ALL {
            let generator = generator_for(mode, Instrument::Drums, &props);
            let energy: f64 = (0..4410)
                .map(|i| generator.sample(i as f64 / 44100.0, &mut rng).abs())
                .sum();
            assert!(energy > 0.0, "{} produced silence", mode);
        }
    }
}
