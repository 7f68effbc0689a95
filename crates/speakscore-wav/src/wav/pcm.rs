//! PCM data extraction and hashing utilities.

use super::header::{read_u32, HEADER_LEN};

/// Extracts PCM data from a WAV file buffer.
///
/// Walks the chunk list after the `WAVE` identifier, so files with extra
/// chunks before `data` are handled too. A data chunk whose declared size
/// runs past the end of the buffer is clipped, matching [`crate::read_info`].
///
/// # Returns
/// PCM data if found, or None if the format is invalid
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < HEADER_LEN {
        return None;
    }

    // Verify RIFF header
    if &wav_data[0..4] != b"RIFF" || &wav_data[8..12] != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while wav_data.len().saturating_sub(pos) >= 8 {
        let chunk_id = &wav_data[pos..pos + 4];
        let chunk_size = read_u32(wav_data, pos + 4) as usize;

        if chunk_id == b"data" {
            let data_start = pos + 8;
            let data_end = data_start.saturating_add(chunk_size).min(wav_data.len());
            return wav_data.get(data_start..data_end);
        }

        // Chunks are word-aligned
        let padded_size = chunk_size.checked_add(chunk_size & 1)?;
        pos = pos.checked_add(padded_size)?.checked_add(8)?;
    }

    None
}

/// Computes the BLAKE3 hash (hex) of a WAV file's PCM data.
///
/// Returns None if the buffer has no readable `data` chunk.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
