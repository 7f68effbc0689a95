//! Decoded multi-channel audio.

/// Decoded audio as delivered by an audio decoder.
///
/// Each channel is a buffer of `f32` samples nominally in `[-1.0, 1.0]`.
/// All channels are expected to have the same length; the encoder rejects
/// inputs where they do not.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl DecodedAudio {
    /// Creates decoded audio from per-channel buffers.
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Self {
        Self {
            sample_rate,
            channels,
        }
    }

    /// Creates single-channel audio.
    pub fn mono(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self::new(sample_rate, vec![samples])
    }

    /// Creates two-channel audio.
    pub fn stereo(sample_rate: u32, left: Vec<f32>, right: Vec<f32>) -> Self {
        Self::new(sample_rate, vec![left, right])
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Per-channel sample buffers.
    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of samples in the first channel (0 when there are no channels).
    pub fn samples_per_channel(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Duration in seconds, or 0.0 for a zero sample rate.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples_per_channel() as f64 / self.sample_rate as f64
    }

    /// Averages all channels into a single channel.
    ///
    /// Channels shorter than the first one contribute silence past their end.
    /// Audio that is already mono, or has no channels, is returned unchanged.
    pub fn downmix_to_mono(&self) -> DecodedAudio {
        if self.channels.len() <= 1 {
            return self.clone();
        }

        let count = self.channels.len() as f64;
        let mixed = (0..self.samples_per_channel())
            .map(|i| {
                let sum: f64 = self
                    .channels
                    .iter()
                    .map(|ch| ch.get(i).copied().unwrap_or(0.0) as f64)
                    .sum();
                (sum / count) as f32
            })
            .collect();

        DecodedAudio::mono(self.sample_rate, mixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let audio = DecodedAudio::stereo(48000, vec![0.1; 480], vec![0.2; 480]);
        assert_eq!(audio.sample_rate(), 48000);
        assert_eq!(audio.num_channels(), 2);
        assert_eq!(audio.samples_per_channel(), 480);
        assert!((audio.duration_seconds() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_empty_audio() {
        let audio = DecodedAudio::new(16000, Vec::new());
        assert_eq!(audio.num_channels(), 0);
        assert_eq!(audio.samples_per_channel(), 0);
        assert_eq!(audio.duration_seconds(), 0.0);
    }

    #[test]
    fn test_downmix_averages_channels() {
        let audio = DecodedAudio::stereo(16000, vec![1.0, 0.5, 0.0], vec![0.0, -0.5, 1.0]);
        let mono = audio.downmix_to_mono();

        assert_eq!(mono.num_channels(), 1);
        assert_eq!(mono.sample_rate(), 16000);
        assert_eq!(mono.channels()[0], vec![0.5, 0.0, 0.5]);
    }

    #[test]
    fn test_downmix_mono_is_identity() {
        let audio = DecodedAudio::mono(8000, vec![0.25, -0.25]);
        assert_eq!(audio.downmix_to_mono(), audio);
    }
}
