//! Error types for WAV encoding, decoding and inspection.

use std::fmt;

use thiserror::Error;

/// Result type for encoder operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors that can occur while encoding a [`crate::DecodedAudio`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The input cannot be represented as a canonical 16-bit PCM WAV.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

impl EncodeError {
    /// Stable error code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            EncodeError::InvalidInput(reason) => reason.code(),
        }
    }
}

/// Why an input was rejected by the encoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    /// The channel set is empty.
    #[error("audio has no channels")]
    NoChannels,

    /// A channel buffer differs in length from the first channel.
    #[error("channel {channel} has {actual} samples, expected {expected}")]
    MismatchedChannelLength {
        /// Index of the offending channel.
        channel: usize,
        /// Length of channel 0.
        expected: usize,
        /// Length of the offending channel.
        actual: usize,
    },

    /// The sample rate is zero.
    #[error("sample rate must be positive")]
    ZeroSampleRate,

    /// The channel count does not fit the 16-bit header field.
    #[error("{count} channels exceed the WAV header limit")]
    TooManyChannels {
        /// Number of channels supplied.
        count: usize,
    },

    /// The data section does not fit the 32-bit RIFF length fields.
    #[error("{bytes} bytes of sample data exceed the 32-bit RIFF size limit")]
    DataTooLarge {
        /// Size of the data section in bytes.
        bytes: u64,
    },

    /// `sample_rate * block_align` does not fit the 32-bit byte rate field.
    #[error("byte rate for {sample_rate} Hz x {channels} channels overflows 32 bits")]
    ByteRateOverflow {
        /// Sample rate in Hz.
        sample_rate: u32,
        /// Number of channels.
        channels: u16,
    },
}

impl InvalidInput {
    /// Stable error code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            InvalidInput::NoChannels => "WAV_001",
            InvalidInput::MismatchedChannelLength { .. } => "WAV_002",
            InvalidInput::ZeroSampleRate => "WAV_003",
            InvalidInput::TooManyChannels { .. } => "WAV_004",
            InvalidInput::DataTooLarge { .. } => "WAV_005",
            InvalidInput::ByteRateOverflow { .. } => "WAV_006",
        }
    }
}

/// A malformed or unsupported WAV buffer found by [`crate::inspect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    /// Human-readable description.
    pub message: String,
    /// Byte offset where the problem was detected, if known.
    pub offset: Option<usize>,
}

impl FormatError {
    /// Creates an error without a location.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset: None,
        }
    }

    /// Creates an error pointing at a byte offset.
    pub fn at_offset(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset: Some(offset),
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.offset {
            Some(offset) => write!(f, "{} (at byte {})", self.message, offset),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for FormatError {}

/// Errors raised while decoding a WAV file into [`crate::DecodedAudio`].
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The underlying WAV reader rejected the input.
    #[error("failed to read WAV: {0}")]
    Wav(#[from] hound::Error),

    /// The sample format is not one we can normalize.
    #[error("unsupported WAV layout: {sample_format} with {bits} bits per sample")]
    UnsupportedLayout {
        /// `int` or `float`.
        sample_format: &'static str,
        /// Bits per sample.
        bits: u16,
    },

    /// The data section ended in the middle of a frame.
    #[error("truncated frame: {samples} samples is not a multiple of {channels} channels")]
    TruncatedFrame {
        /// Total samples read.
        samples: usize,
        /// Channel count from the header.
        channels: u16,
    },
}
