//! Deterministic 16-bit PCM WAV encoder.
//!
//! The container is always a 44-byte header (RIFF, a single 16-byte `fmt `
//! chunk, `data`) followed by interleaved little-endian `i16` samples. No
//! metadata chunks are written, so output depends only on the input audio.

mod container;
mod encoder;
mod format;
mod header;
mod pcm;
mod quantize;


// Re-export public API
pub use container::WavContainer;
pub use encoder::{encode, encode_with};
pub use format::WavFormat;
pub use header::HEADER_LEN;
pub use pcm::{compute_pcm_hash, extract_pcm_data};
pub use quantize::QuantizePolicy;
