//! Beat generator.
//!
//! A two-second cycle is split into eight gate steps. Every half second a
//! kick fires during the first 100 ms if the current step is loud enough,
//! and a noise snare fires between 250 ms and 350 ms. Only the drum kit
//! produces sound; other instruments render silence in this mode.

use std::f64::consts::PI;

use rand::Rng;
use rand_pcg::Pcg32;
use tonecraft_spec::Instrument;

use super::ToneGenerator;
use crate::properties::{MusicalProperties, GATE_STEPS};

/// Length of one gate cycle in seconds.
pub const CYCLE_SECONDS: f64 = 2.0;
/// Kick/snare period in seconds.
pub const PULSE_SECONDS: f64 = 0.5;

const KICK_FREQUENCY: f64 = 60.0;
const KICK_WINDOW: f64 = 0.1;
const KICK_DECAY: f64 = 20.0;
const KICK_THRESHOLD: f64 = 0.5;

const SNARE_START: f64 = 0.25;
const SNARE_END: f64 = 0.35;
const SNARE_DECAY: f64 = 40.0;
const SNARE_THRESHOLD: f64 = 0.3;
const SNARE_GAIN: f64 = 0.5;

/// Gated kick and snare pattern.
#[derive(Debug, Clone)]
pub struct BeatGenerator {
    enabled: bool,
    gate: [f64; GATE_STEPS],
}

impl BeatGenerator {
    pub fn new(instrument: Instrument, properties: &MusicalProperties) -> Self {
        Self {
            enabled: instrument == Instrument::Drums,
            gate: properties.rhythm_gate,
        }
    }

    /// Gate step index at time `t`.
    pub fn beat_index(t: f64) -> usize {
        let index = ((t % CYCLE_SECONDS) / CYCLE_SECONDS * GATE_STEPS as f64).floor() as usize;
        index.min(GATE_STEPS - 1)
    }

    /// Position within the current half-second pulse.
    pub fn pulse_phase(t: f64) -> f64 {
        t % PULSE_SECONDS
    }

    /// Whether `t` falls inside a window where a transient may sound.
    pub fn in_transient_window(t: f64) -> bool {
        let phase = Self::pulse_phase(t);
        phase < KICK_WINDOW || (phase > SNARE_START && phase < SNARE_END)
    }
}

impl ToneGenerator for BeatGenerator {
    fn sample(&self, t: f64, rng: &mut Pcg32) -> f64 {
        if !self.enabled {
            return 0.0;
        }

        let intensity = self.gate[Self::beat_index(t)];
        let phase = Self::pulse_phase(t);
        let mut value = 0.0;

        if phase < KICK_WINDOW && intensity > KICK_THRESHOLD {
            value += (2.0 * PI * KICK_FREQUENCY * t).sin() * (-KICK_DECAY * phase).exp();
        }

        if phase > SNARE_START && phase < SNARE_END && intensity > SNARE_THRESHOLD {
            let noise: f64 = rng.gen::<f64>() - 0.5;
            value += SNARE_GAIN * noise * (-SNARE_DECAY * (phase - SNARE_START)).exp();
        }

        value
    }
}
