//! Tests for the WAV writer module.

use base64::Engine;

use super::format::{WavFormat, WAV_HEADER_SIZE};
use super::pcm::{compute_pcm_hash, decode_pcm16, extract_pcm_data};
use super::result::{WavResult, DATA_URL_PREFIX};
use super::writer::{samples_to_pcm16, write_wav, write_wav_to_vec};

fn read_u16(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

// =========================================================================
// Format tests
// =========================================================================

#[test]
fn test_wav_format_mono() {
    let format = WavFormat::mono(44100);
    assert_eq!(format.channels, 1);
    assert_eq!(format.sample_rate, 44100);
    assert_eq!(format.bits_per_sample, 16);
    assert_eq!(format.bytes_per_sample(), 2);
    assert_eq!(format.block_align(), 2);
    assert_eq!(format.byte_rate(), 88200);
}

// =========================================================================
// PCM conversion tests
// =========================================================================

#[test]
fn test_samples_to_pcm16_normal_range() {
    let pcm = samples_to_pcm16(&[0.0, 0.5, -0.5]);
    assert_eq!(pcm.len(), 6);
    assert_eq!(decode_pcm16(&pcm), vec![0, 16384, -16384]);
}

#[test]
fn test_samples_to_pcm16_boundaries_and_clipping() {
    let pcm = samples_to_pcm16(&[1.0, -1.0, 1.5, -7.0, f64::INFINITY, f64::NEG_INFINITY]);
    assert_eq!(
        decode_pcm16(&pcm),
        vec![32767, -32767, 32767, -32767, 32767, -32767]
    );
}

#[test]
fn test_samples_to_pcm16_nan_is_silence() {
    let pcm = samples_to_pcm16(&[f64::NAN]);
    assert_eq!(decode_pcm16(&pcm), vec![0]);
}

// =========================================================================
// Header tests
// =========================================================================

#[test]
fn test_header_layout() {
    let pcm = samples_to_pcm16(&[0.1; 100]);
    let wav = write_wav_to_vec(&WavFormat::mono(44100), &pcm);

    assert_eq!(wav.len(), WAV_HEADER_SIZE + 200);
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(read_u32(&wav, 4), 36 + 200);
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[12..16], b"fmt ");
    assert_eq!(read_u32(&wav, 16), 16);
    assert_eq!(read_u16(&wav, 20), 1);
    assert_eq!(read_u16(&wav, 22), 1);
    assert_eq!(read_u32(&wav, 24), 44100);
    assert_eq!(read_u32(&wav, 28), 88200);
    assert_eq!(read_u16(&wav, 32), 2);
    assert_eq!(read_u16(&wav, 34), 16);
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(read_u32(&wav, 40), 200);
}

#[test]
fn test_write_wav_matches_vec_writer() {
    let pcm = samples_to_pcm16(&[0.25, -0.25, 0.75]);
    let format = WavFormat::mono(22050);

    let mut streamed = Vec::new();
    write_wav(&mut streamed, &format, &pcm).unwrap();
    assert_eq!(streamed, write_wav_to_vec(&format, &pcm));
}

#[test]
fn test_empty_wav_is_header_only() {
    let wav = write_wav_to_vec(&WavFormat::mono(44100), &[]);
    assert_eq!(wav.len(), WAV_HEADER_SIZE);
    assert_eq!(read_u32(&wav, 40), 0);
}

// =========================================================================
// PCM extraction tests
// =========================================================================

#[test]
fn test_extract_pcm_data() {
    let pcm = samples_to_pcm16(&[0.5, -0.5]);
    let wav = write_wav_to_vec(&WavFormat::mono(44100), &pcm);
    assert_eq!(extract_pcm_data(&wav), Some(pcm.as_slice()));
}

#[test]
fn test_extract_pcm_data_rejects_non_wav() {
    assert_eq!(extract_pcm_data(b"not a wav file at all, really"), None);
    assert_eq!(extract_pcm_data(b"RIFF"), None);
}

#[test]
fn test_extract_pcm_data_truncated() {
    let pcm = samples_to_pcm16(&[0.5; 10]);
    let wav = write_wav_to_vec(&WavFormat::mono(44100), &pcm);
    assert_eq!(extract_pcm_data(&wav[..wav.len() - 4]), None);
}

#[test]
fn test_compute_pcm_hash_matches_result() {
    let samples: Vec<f64> = (0..441).map(|i| (i as f64 * 0.05).sin() * 0.5).collect();
    let result = WavResult::from_mono(&samples, 44100);
    assert_eq!(compute_pcm_hash(&result.wav_data), Some(result.pcm_hash.clone()));
    assert_eq!(result.pcm_hash.len(), 64);
}

// =========================================================================
// WavResult tests
// =========================================================================

#[test]
fn test_wav_result_duration() {
    let result = WavResult::from_mono(&vec![0.0; 88200], 44100);
    assert_eq!(result.num_samples, 88200);
    assert_eq!(result.duration_seconds(), 2.0);
    assert_eq!(result.data_size(), 176400);
}

#[test]
fn test_data_url_round_trip() {
    let result = WavResult::from_mono(&[0.1, 0.2, 0.3], 44100);
    let url = result.to_data_url();
    assert!(url.starts_with(DATA_URL_PREFIX));

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(&url[DATA_URL_PREFIX.len()..])
        .unwrap();
    assert_eq!(decoded, result.wav_data);
}

#[test]
fn test_identical_samples_identical_bytes() {
    let samples: Vec<f64> = (0..1000).map(|i| (i as f64 * 0.01).cos()).collect();
    let a = WavResult::from_mono(&samples, 44100);
    let b = WavResult::from_mono(&samples, 44100);
    assert_eq!(a.wav_data, b.wav_data);
    assert_eq!(a.pcm_hash, b.pcm_hash);
}
