//! Main entry point for tone generation.
//!
//! Resolves musical properties, renders the mode's generator sample by
//! sample through the clip envelope, and encodes the buffer as WAV.


use std::sync::atomic::{AtomicBool, Ordering};

use tonecraft_spec::{SynthParams, SAMPLE_RATE};

use crate::envelope::EnvelopeShaper;
use crate::error::{AudioError, AudioResult};
use crate::properties::{self, MusicalProperties};
use crate::rng::create_component_rng;
use crate::synthesis::generator_for;
use crate::wav::WavResult;

pub use tonecraft_spec::MAX_BARS;

/// Samples rendered between checks of the cancel flag (one second of audio).
const CANCEL_CHECK_INTERVAL: usize = SAMPLE_RATE as usize;

/// Result of tone generation.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// WAV file data.
    pub wav: WavResult,
    /// Properties the clip was rendered from.
    pub properties: MusicalProperties,
    /// Parameters the clip was rendered from.
    pub params: SynthParams,
    /// Seed used for random components.
    pub seed: u32,
}

/// Renders the shaped sample buffer for `params`.
///
/// Samples are in [-1, 1] apart from generator overshoot, which the WAV
/// encoder clips.
pub fn render_samples(params: &SynthParams, seed: u32) -> AudioResult<Vec<f64>> {
    check_bars(params.bars)?;

    let props = properties::resolve(params.instrument, params.style);
    render_with_properties(params, &props, seed, &AtomicBool::new(false))
}

/// Generates a WAV clip for `params`.
///
/// # Arguments
/// * `params` - Validated synthesizer parameters
/// * `seed` - Seed for the beat generator's noise; other modes ignore it
///
/// # Errors
/// Returns [`AudioError::InvalidBars`] when `bars` is 0 or above [`MAX_BARS`].
pub fn generate(params: &SynthParams, seed: u32) -> AudioResult<GenerateResult> {
    generate_cancellable(params, seed, &AtomicBool::new(false))
}

/// Like [`generate`], but stops early once `cancel` is set.
///
/// The flag is polled once per second of rendered audio, so a cancelled
/// render stops within that much work.
///
/// # Errors
/// Returns [`AudioError::Cancelled`] when the flag was observed, and
/// [`AudioError::InvalidBars`] as for [`generate`].
pub fn generate_cancellable(
    params: &SynthParams,
    seed: u32,
    cancel: &AtomicBool,
) -> AudioResult<GenerateResult> {
    check_bars(params.bars)?;

    let props = properties::resolve(params.instrument, params.style);
    let samples = render_with_properties(params, &props, seed, cancel)?;
    let wav = WavResult::from_mono(&samples, SAMPLE_RATE);

    log::debug!(
        "rendered {} samples ({} s) for {}/{}/{}",
        wav.num_samples,
        params.duration_seconds(),
        params.instrument,
        params.style,
        params.mode
    );

    Ok(GenerateResult {
        wav,
        properties: props,
        params: *params,
        seed,
    })
}

fn check_bars(bars: u32) -> AudioResult<()> {
    if bars == 0 || bars > MAX_BARS {
        return Err(AudioError::InvalidBars {
            bars,
            max: MAX_BARS,
        });
    }
    Ok(())
}

fn render_with_properties(
    params: &SynthParams,
    props: &MusicalProperties,
    seed: u32,
    cancel: &AtomicBool,
) -> AudioResult<Vec<f64>> {
    let total_samples = params.num_samples();
    let sample_rate = SAMPLE_RATE as f64;

    let generator = generator_for(params.mode, params.instrument, props);
    let envelope = EnvelopeShaper::new(params.duration_seconds(), params.style);
    let mut rng = create_component_rng(seed, params.mode.as_str());

    let mut samples = Vec::with_capacity(total_samples);
    for i in 0..total_samples {
        if i % CANCEL_CHECK_INTERVAL == 0 && cancel.load(Ordering::Relaxed) {
            return Err(AudioError::Cancelled {
                rendered: i,
                total: total_samples,
            });
        }
        let t = i as f64 / sample_rate;
        let raw = generator.sample(t, &mut rng);
        samples.push(envelope.apply(t, raw));
    }
    Ok(samples)
}
