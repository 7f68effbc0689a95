//! Canonical 44-byte RIFF/WAVE header layout.
//!
//! Every field lives at a fixed offset, so the header is written by direct
//! placement rather than by appending through a cursor.

use super::format::WavFormat;

/// Length of the canonical header in bytes.
pub const HEADER_LEN: usize = 44;

/// Size of the RIFF chunk minus the data section (header length - 8).
pub(crate) const RIFF_OVERHEAD: u32 = 36;

pub(crate) const RIFF_ID: usize = 0;
pub(crate) const RIFF_SIZE: usize = 4;
pub(crate) const WAVE_ID: usize = 8;
pub(crate) const FMT_ID: usize = 12;
pub(crate) const FMT_SIZE: usize = 16;
pub(crate) const AUDIO_FORMAT: usize = 20;
pub(crate) const CHANNELS: usize = 22;
pub(crate) const SAMPLE_RATE: usize = 24;
pub(crate) const BYTE_RATE: usize = 28;
pub(crate) const BLOCK_ALIGN: usize = 32;
pub(crate) const BITS_PER_SAMPLE: usize = 34;
pub(crate) const DATA_ID: usize = 36;
pub(crate) const DATA_SIZE: usize = 40;

/// `fmt ` chunk body size for plain PCM.
const PCM_FMT_CHUNK_SIZE: u32 = 16;
/// WAVE_FORMAT_PCM.
const PCM_FORMAT_CODE: u16 = 1;

/// Header values that are not constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HeaderFields {
    pub format: WavFormat,
    pub byte_rate: u32,
    pub block_align: u16,
    pub data_len: u32,
}

impl HeaderFields {
    /// Serializes the header.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut header = [0u8; HEADER_LEN];

        put(&mut header, RIFF_ID, b"RIFF");
        put(&mut header, RIFF_SIZE, &(RIFF_OVERHEAD + self.data_len).to_le_bytes());
        put(&mut header, WAVE_ID, b"WAVE");

        put(&mut header, FMT_ID, b"fmt ");
        put(&mut header, FMT_SIZE, &PCM_FMT_CHUNK_SIZE.to_le_bytes());
        put(&mut header, AUDIO_FORMAT, &PCM_FORMAT_CODE.to_le_bytes());
        put(&mut header, CHANNELS, &self.format.channels.to_le_bytes());
        put(&mut header, SAMPLE_RATE, &self.format.sample_rate.to_le_bytes());
        put(&mut header, BYTE_RATE, &self.byte_rate.to_le_bytes());
        put(&mut header, BLOCK_ALIGN, &self.block_align.to_le_bytes());
        put(&mut header, BITS_PER_SAMPLE, &self.format.bits_per_sample.to_le_bytes());

        put(&mut header, DATA_ID, b"data");
        put(&mut header, DATA_SIZE, &self.data_len.to_le_bytes());

        header
    }
}

fn put(header: &mut [u8; HEADER_LEN], offset: usize, bytes: &[u8]) {
    header[offset..offset + bytes.len()].copy_from_slice(bytes);
}

/// Reads a little-endian `u16` at a fixed header offset.
pub(crate) fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

/// Reads a little-endian `u32` at a fixed header offset.
pub(crate) fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header_layout() {
        let fields = HeaderFields {
            format: WavFormat::stereo(44100),
            byte_rate: 176_400,
            block_align: 4,
            data_len: 8,
        };
        let header = fields.to_bytes();

        assert_eq!(&header[0..4], b"RIFF");
        assert_eq!(read_u32(&header, RIFF_SIZE), 44);
        assert_eq!(&header[8..12], b"WAVE");
        assert_eq!(&header[12..16], b"fmt ");
        assert_eq!(read_u32(&header, FMT_SIZE), 16);
        assert_eq!(read_u16(&header, AUDIO_FORMAT), 1);
        assert_eq!(read_u16(&header, CHANNELS), 2);
        assert_eq!(read_u32(&header, SAMPLE_RATE), 44100);
        assert_eq!(read_u32(&header, BYTE_RATE), 176_400);
        assert_eq!(read_u16(&header, BLOCK_ALIGN), 4);
        assert_eq!(read_u16(&header, BITS_PER_SAMPLE), 16);
        assert_eq!(&header[36..40], b"data");
        assert_eq!(read_u32(&header, DATA_SIZE), 8);
    }

    #[test]
    fn test_offsets_tile_the_header() {
        // Each field ends where the next begins.
        let layout = [
            (RIFF_ID, 4),
            (RIFF_SIZE, 4),
            (WAVE_ID, 4),
            (FMT_ID, 4),
            (FMT_SIZE, 4),
            (AUDIO_FORMAT, 2),
            (CHANNELS, 2),
            (SAMPLE_RATE, 4),
            (BYTE_RATE, 4),
            (BLOCK_ALIGN, 2),
            (BITS_PER_SAMPLE, 2),
            (DATA_ID, 4),
            (DATA_SIZE, 4),
        ];
        let mut expected = 0;
        for (offset, width) in layout {
            assert_eq!(offset, expected);
            expected += width;
        }
        assert_eq!(expected, HEADER_LEN);
    }
}
