//! speakscore WAV codec
//!
//! This crate turns decoded floating-point audio into the canonical container
//! the pronunciation-assessment service accepts: a 44-byte RIFF/WAVE header
//! followed by interleaved 16-bit little-endian PCM.
//!
//! # Overview
//!
//! - [`DecodedAudio`] - per-channel `f32` buffers plus a sample rate
//! - [`encode()`] - pure encoder producing a [`WavContainer`]
//! - [`QuantizePolicy`] - how out-of-range samples are mapped to `i16`
//! - [`inspect`] - header validation for arbitrary WAV buffers
//! - [`decode`] - reads WAV files of any common layout into [`DecodedAudio`]
//!
//! # Determinism
//!
//! Encoding has no I/O, no timestamps and no global state. The same input
//! always produces the same bytes, so the BLAKE3 hash of the data section can
//! be used to identify a recording.
//!
//! # Example
//!
//! ```
//! use speakscore_wav::{encode, DecodedAudio};
//!
//! let audio = DecodedAudio::new(16_000, vec![vec![0.5]]);
//! let wav = encode(&audio).unwrap();
//!
//! assert_eq!(wav.len(), 46);
//! assert_eq!(&wav.as_bytes()[44..46], &16384i16.to_le_bytes());
//! ```

pub mod audio;
pub mod decode;
pub mod error;
pub mod inspect;
pub mod wav;

pub use audio::DecodedAudio;
pub use error::{DecodeError, EncodeError, EncodeResult, FormatError, InvalidInput};
pub use inspect::{read_info, WavInfo};
pub use wav::{
    compute_pcm_hash, encode, encode_with, extract_pcm_data, QuantizePolicy, WavContainer,
    WavFormat, HEADER_LEN,
};
