//! Audio input loading.
//!
//! Every command that accepts audio funnels it through here: the source WAV is
//! decoded to floating point, optionally downmixed, then re-encoded into the
//! canonical 16-bit PCM container.

use std::path::Path;

use speakscore_wav::decode::{decode_wav_bytes, read_wav_file};
use speakscore_wav::{
    encode_with, DecodeError, DecodedAudio, EncodeError, QuantizePolicy, WavContainer,
};
use thiserror::Error;

use crate::commands::json_output::error_codes;

/// Failure while turning source audio into a canonical container.
#[derive(Debug, Error)]
pub enum InputError {
    /// The source could not be decoded.
    #[error("failed to decode audio: {0}")]
    Decode(#[from] DecodeError),

    /// The decoded audio could not be encoded.
    #[error("failed to encode audio: {0}")]
    Encode(#[from] EncodeError),
}

impl InputError {
    /// Stable error code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            InputError::Decode(_) => error_codes::DECODE,
            InputError::Encode(e) => e.code(),
        }
    }
}

/// How source audio is prepared before encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareOptions {
    /// Average all channels into one.
    pub mono: bool,
    /// Out-of-range sample handling.
    pub policy: QuantizePolicy,
}

impl PrepareOptions {
    pub fn new(mono: bool, policy: QuantizePolicy) -> Self {
        Self { mono, policy }
    }
}

/// Decodes a WAV file and re-encodes it canonically.
pub fn prepare_file(path: &Path, options: PrepareOptions) -> Result<WavContainer, InputError> {
    let audio = read_wav_file(path)?;
    prepare_audio(audio, options)
}

/// Decodes an in-memory WAV buffer and re-encodes it canonically.
pub fn prepare_bytes(bytes: &[u8], options: PrepareOptions) -> Result<WavContainer, InputError> {
    let audio = decode_wav_bytes(bytes)?;
    prepare_audio(audio, options)
}

fn prepare_audio(audio: DecodedAudio, options: PrepareOptions) -> Result<WavContainer, InputError> {
    let audio = if options.mono && audio.num_channels() > 1 {
        audio.downmix_to_mono()
    } else {
        audio
    };
    tracing::debug!(
        channels = audio.num_channels(),
        sample_rate = audio.sample_rate(),
        samples = audio.samples_per_channel(),
        policy = %options.policy,
        "encoding audio"
    );
    Ok(encode_with(&audio, options.policy)?)
}
