//! WAV header inspection.
//!
//! Parses the RIFF/WAVE chunk structure of an arbitrary buffer and reports
//! the format fields. Used to check containers before they are submitted for
//! assessment and to read the sample rate back out of an encoded file.

use crate::error::FormatError;
use crate::wav::HEADER_LEN;

/// Information extracted from a WAV file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 16000, 44100).
    pub sample_rate: u32,
    /// Bits per sample (e.g., 8, 16, 24, 32).
    pub bits_per_sample: u16,
    /// Total number of samples (per channel).
    pub num_samples: usize,
    /// Audio format code (1 = PCM, 3 = IEEE float).
    pub audio_format: u16,
    /// Byte rate as stored in the header.
    pub byte_rate: u32,
    /// Block alignment as stored in the header.
    pub block_align: u16,
    /// Offset of the first data byte.
    pub data_offset: usize,
    /// Length of the data chunk in bytes, clipped to the buffer.
    pub data_len: usize,
}

impl WavInfo {
    /// True for the exact layout the encoder produces: 16-bit PCM with the
    /// data chunk directly after a 16-byte `fmt ` chunk.
    pub fn is_canonical_pcm16(&self) -> bool {
        self.audio_format == 1
            && self.bits_per_sample == 16
            && self.data_offset == HEADER_LEN
            && self.block_align as u32 == self.channels as u32 * 2
            && self.byte_rate as u64 == self.sample_rate as u64 * self.block_align as u64
    }

    /// Duration in seconds, or 0.0 for a zero sample rate.
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_samples as f64 / self.sample_rate as f64
    }
}

/// Validates WAV file format and extracts header information.
///
/// Checks:
/// - RIFF chunk identifier
/// - WAVE format identifier
/// - fmt sub-chunk with audio parameters
/// - data sub-chunk presence, after fmt
///
/// A data chunk whose declared size runs past the end of the buffer is
/// accepted and clipped, as many recorders leave the size unpatched.
pub fn read_info(data: &[u8]) -> Result<WavInfo, FormatError> {
    if data.len() < HEADER_LEN {
        return Err(FormatError::new(format!(
            "File too short: {} bytes (minimum {} required)",
            data.len(),
            HEADER_LEN
        )));
    }

    if &data[0..4] != b"RIFF" {
        return Err(FormatError::at_offset(
            format!("Invalid RIFF header: expected 'RIFF', got {:?}", &data[0..4]),
            0,
        ));
    }

    if &data[8..12] != b"WAVE" {
        return Err(FormatError::at_offset(
            format!("Invalid WAVE format: expected 'WAVE', got {:?}", &data[8..12]),
            8,
        ));
    }

    let mut offset = 12;
    let mut fmt: Option<[u8; 16]> = None;

    while data.len().saturating_sub(offset) >= 8 {
        let chunk_id = &data[offset..offset + 4];
        let chunk_size = u32::from_le_bytes([
            data[offset + 4],
            data[offset + 5],
            data[offset + 6],
            data[offset + 7],
        ]) as usize;

        if chunk_id == b"fmt " {
            if chunk_size < 16 {
                return Err(FormatError::at_offset(
                    format!("fmt chunk too small: {} bytes", chunk_size),
                    offset,
                ));
            }
            let body = data
                .get(offset + 8..offset + 24)
                .ok_or_else(|| FormatError::at_offset("Truncated fmt chunk", offset))?;
            let mut fields = [0u8; 16];
            fields.copy_from_slice(body);
            fmt = Some(fields);
        }

        if chunk_id == b"data" {
            let fmt = fmt.ok_or_else(|| {
                FormatError::at_offset("data chunk found before fmt chunk", offset)
            })?;
            let data_offset = offset + 8;
            let data_len = chunk_size.min(data.len() - data_offset);
            return Ok(info_from_fmt(&fmt, data_offset, data_len));
        }

        // Move to next chunk (chunks are word-aligned)
        let next = chunk_size
            .checked_add(chunk_size & 1)
            .and_then(|padded| padded.checked_add(8))
            .and_then(|len| offset.checked_add(len));
        offset = match next {
            Some(next) => next,
            None => break,
        };
    }

    if fmt.is_none() {
        return Err(FormatError::new("Missing fmt chunk"));
    }

    Err(FormatError::new("Missing data chunk"))
}

fn info_from_fmt(fmt: &[u8; 16], data_offset: usize, data_len: usize) -> WavInfo {
    let audio_format = u16::from_le_bytes([fmt[0], fmt[1]]);
    let channels = u16::from_le_bytes([fmt[2], fmt[3]]);
    let sample_rate = u32::from_le_bytes([fmt[4], fmt[5], fmt[6], fmt[7]]);
    let byte_rate = u32::from_le_bytes([fmt[8], fmt[9], fmt[10], fmt[11]]);
    let block_align = u16::from_le_bytes([fmt[12], fmt[13]]);
    let bits_per_sample = u16::from_le_bytes([fmt[14], fmt[15]]);

    let num_samples = if block_align > 0 {
        data_len / block_align as usize
    } else {
        0
    };

    WavInfo {
        channels,
        sample_rate,
        bits_per_sample,
        num_samples,
        audio_format,
        byte_rate,
        block_align,
        data_offset,
        data_len,
    }
}
