//! WAV decoding into [`DecodedAudio`].
//!
//! Reads integer PCM (8, 16, 24 or 32 bits) and 32-bit float WAV files,
//! normalizes samples to `[-1.0, 1.0]` and splits the interleaved frames into
//! per-channel buffers.
//!
//! Recordings whose data chunk size was never finalized (a streaming writer
//! that stopped early, or a size left at `0xFFFFFFFF`) are read up to the end
//! of the buffer, the same way [`crate::read_info`] reports them.

use std::borrow::Cow;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use crate::audio::DecodedAudio;
use crate::error::DecodeError;
use crate::inspect::read_info;

/// Decodes a WAV file from disk.
pub fn read_wav_file(path: impl AsRef<Path>) -> Result<DecodedAudio, DecodeError> {
    let bytes = fs::read(path).map_err(hound::Error::IoError)?;
    decode_wav_bytes(&bytes)
}

/// Decodes an in-memory WAV buffer.
pub fn decode_wav_bytes(bytes: &[u8]) -> Result<DecodedAudio, DecodeError> {
    let bytes = finalize_data_size(bytes);
    let reader = hound::WavReader::new(Cursor::new(bytes.as_ref()))?;
    decode_reader(reader)
}

/// Rewrites the RIFF and data sizes when the data chunk claims more bytes
/// than the buffer holds, dropping any trailing partial frame.
fn finalize_data_size(bytes: &[u8]) -> Cow<'_, [u8]> {
    let Ok(info) = read_info(bytes) else {
        return Cow::Borrowed(bytes);
    };

    let size_offset = info.data_offset - 4;
    let declared = u32::from_le_bytes([
        bytes[size_offset],
        bytes[size_offset + 1],
        bytes[size_offset + 2],
        bytes[size_offset + 3],
    ]) as usize;
    if declared <= info.data_len {
        return Cow::Borrowed(bytes);
    }

    let align = (info.block_align as usize).max(1);
    let data_len = info.data_len - info.data_len % align;
    let end = info.data_offset + data_len;
    let (Ok(data_size), Ok(riff_size)) = (u32::try_from(data_len), u32::try_from(end - 8)) else {
        return Cow::Borrowed(bytes);
    };

    let mut patched = bytes[..end].to_vec();
    patched[4..8].copy_from_slice(&riff_size.to_le_bytes());
    patched[size_offset..info.data_offset].copy_from_slice(&data_size.to_le_bytes());
    Cow::Owned(patched)
}

fn decode_reader<R: Read>(reader: hound::WavReader<R>) -> Result<DecodedAudio, DecodeError> {
    let spec = reader.spec();

    let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Int, bits @ (8 | 16 | 24 | 32)) => {
            let max_val = (1i64 << (bits - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| (v as f64 / max_val) as f32))
                .collect::<Result<_, _>>()?
        }
        (hound::SampleFormat::Float, 32) => {
            reader.into_samples::<f32>().collect::<Result<_, _>>()?
        }
        (format, bits) => {
            return Err(DecodeError::UnsupportedLayout {
                sample_format: match format {
                    hound::SampleFormat::Int => "int",
                    hound::SampleFormat::Float => "float",
                },
                bits,
            });
        }
    };

    let channels = deinterleave(&interleaved, spec.channels)?;
    Ok(DecodedAudio::new(spec.sample_rate, channels))
}

/// Splits interleaved frames into one buffer per channel.
fn deinterleave(samples: &[f32], channels: u16) -> Result<Vec<Vec<f32>>, DecodeError> {
    let count = channels as usize;
    if count == 0 || samples.len() % count != 0 {
        return Err(DecodeError::TruncatedFrame {
            samples: samples.len(),
            channels,
        });
    }

    let frames = samples.len() / count;
    let mut out = vec![Vec::with_capacity(frames); count];
    for frame in samples.chunks_exact(count) {
        for (buffer, &sample) in out.iter_mut().zip(frame) {
            buffer.push(sample);
        }
    }
    Ok(out)
}
