//! Decoded audio to WAV container.

use crate::audio::DecodedAudio;
use crate::error::{EncodeResult, InvalidInput};

use super::container::WavContainer;
use super::format::WavFormat;
use super::header::{HeaderFields, HEADER_LEN, RIFF_OVERHEAD};
use super::quantize::QuantizePolicy;

/// Encodes decoded audio as a canonical 16-bit PCM WAV, clamping
/// out-of-range samples.
///
/// Samples are interleaved frame by frame (`ch0[0], ch1[0], ..., ch0[1], ...`)
/// and quantized with `round(s * 32767)`.
///
/// # Errors
/// Returns [`crate::EncodeError::InvalidInput`] if there are no channels, the
/// channels differ in length, the sample rate is zero, or the result would not
/// fit the header's size fields. No partial output is produced.
pub fn encode(audio: &DecodedAudio) -> EncodeResult<WavContainer> {
    encode_with(audio, QuantizePolicy::default())
}

/// Encodes decoded audio with an explicit quantization policy.
pub fn encode_with(audio: &DecodedAudio, policy: QuantizePolicy) -> EncodeResult<WavContainer> {
    let fields = validate(audio)?;
    let frames = audio.samples_per_channel();
    let channels = audio.channels();

    let mut bytes = Vec::with_capacity(HEADER_LEN + fields.data_len as usize);
    bytes.extend_from_slice(&fields.to_bytes());

    for frame in 0..frames {
        for channel in channels {
            let value = policy.quantize(channel[frame]);
            bytes.extend_from_slice(&value.to_le_bytes());
        }
    }

    debug_assert_eq!(bytes.len(), HEADER_LEN + fields.data_len as usize);
    Ok(WavContainer::from_parts(bytes, fields.format))
}

/// Checks the preconditions and computes the variable header fields.
fn validate(audio: &DecodedAudio) -> EncodeResult<HeaderFields> {
    let channels = audio.channels();
    let first = channels.first().ok_or(InvalidInput::NoChannels)?;

    let expected = first.len();
    if let Some((channel, buffer)) = channels
        .iter()
        .enumerate()
        .find(|(_, buffer)| buffer.len() != expected)
    {
        return Err(InvalidInput::MismatchedChannelLength {
            channel,
            expected,
            actual: buffer.len(),
        }
        .into());
    }

    if audio.sample_rate() == 0 {
        return Err(InvalidInput::ZeroSampleRate.into());
    }

    let channel_count = u16::try_from(channels.len()).map_err(|_| InvalidInput::TooManyChannels {
        count: channels.len(),
    })?;
    let format = WavFormat::pcm16(channel_count, audio.sample_rate());

    let block_align = format.block_align().ok_or(InvalidInput::TooManyChannels {
        count: channels.len(),
    })?;
    let byte_rate = format.byte_rate().ok_or(InvalidInput::ByteRateOverflow {
        sample_rate: format.sample_rate,
        channels: channel_count,
    })?;

    let data_bytes = expected as u64 * block_align as u64;
    let data_len = u32::try_from(data_bytes)
        .ok()
        .filter(|len| len.checked_add(RIFF_OVERHEAD).is_some())
        .ok_or(InvalidInput::DataTooLarge { bytes: data_bytes })?;

    Ok(HeaderFields {
        format,
        byte_rate,
        block_align,
        data_len,
    })
}
