//! WAV file format parameters.

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (always 16 for encoder output).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates a 16-bit PCM format with the given channel count.
    pub fn pcm16(channels: u16, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Creates a mono WAV format.
    pub fn mono(sample_rate: u32) -> Self {
        Self::pcm16(1, sample_rate)
    }

    /// Creates a stereo WAV format.
    pub fn stereo(sample_rate: u32) -> Self {
        Self::pcm16(2, sample_rate)
    }

    /// Calculates bytes per sample (per channel).
    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Calculates block align (bytes per sample frame).
    ///
    /// Returns `None` if the product does not fit in a `u16`.
    pub fn block_align(&self) -> Option<u16> {
        self.channels.checked_mul(self.bytes_per_sample())
    }

    /// Calculates byte rate (bytes per second).
    ///
    /// Returns `None` if the product does not fit in a `u32`.
    pub fn byte_rate(&self) -> Option<u32> {
        self.sample_rate
            .checked_mul(self.block_align()? as u32)
    }
}
