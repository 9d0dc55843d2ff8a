//! WAV generation result type.

use base64::Engine;

use super::format::WavFormat;
use super::writer::{samples_to_pcm16, write_wav_to_vec};

/// Prefix of the data URL that embeds a clip.
pub const DATA_URL_PREFIX: &str = "data:audio/wav;base64,";

/// Result of WAV file generation.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the PCM data only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of samples.
    pub num_samples: usize,
}

impl WavResult {
    /// Encodes mono samples.
    pub fn from_mono(samples: &[f64], sample_rate: u32) -> Self {
        let pcm = samples_to_pcm16(samples);
        let pcm_hash = blake3::hash(&pcm).to_hex().to_string();
        let wav_data = write_wav_to_vec(&WavFormat::mono(sample_rate), &pcm);

        Self {
            wav_data,
            pcm_hash,
            sample_rate,
            num_samples: samples.len(),
        }
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }

    /// Size of the `data` chunk in bytes.
    pub fn data_size(&self) -> usize {
        self.num_samples * 2
    }

    /// Standard base64 encoding of the WAV bytes.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.wav_data)
    }

    /// `data:audio/wav;base64,...` URL for embedding the clip.
    pub fn to_data_url(&self) -> String {
        format!("{}{}", DATA_URL_PREFIX, self.to_base64())
    }
}
