//! Deterministic WAV writer.
//!
//! Writes canonical 44-byte-header 16-bit PCM WAV files with no timestamps or
//! optional chunks, so identical sample buffers always encode to identical
//! bytes. The BLAKE3 hash of the PCM payload identifies a clip.

mod format;
mod pcm;
mod result;
mod writer;

#[cfg(test)]
mod tests;

pub use format::{WavFormat, WAV_HEADER_SIZE};
pub use pcm::{compute_pcm_hash, decode_pcm16, extract_pcm_data};
pub use result::{WavResult, DATA_URL_PREFIX};
pub use writer::{samples_to_pcm16, write_wav, write_wav_to_vec};
