//! Encoded WAV container.

use std::io::{self, Write};

use super::format::WavFormat;
use super::header::HEADER_LEN;

/// A complete, immutable 16-bit PCM WAV file.
///
/// Only [`super::encode`] constructs containers, so the header always
/// matches the data section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavContainer {
    bytes: Vec<u8>,
    format: WavFormat,
}

impl WavContainer {
    pub(crate) fn from_parts(bytes: Vec<u8>, format: WavFormat) -> Self {
        Self { bytes, format }
    }

    /// Complete WAV file bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the container and returns the file bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Total length in bytes, header included.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: a container holds at least the header.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Format written to the header.
    pub fn format(&self) -> WavFormat {
        self.format
    }

    /// The interleaved PCM data section.
    pub fn data(&self) -> &[u8] {
        &self.bytes[HEADER_LEN..]
    }

    /// Number of sample frames (samples per channel).
    pub fn num_frames(&self) -> usize {
        match self.format.block_align() {
            Some(align) if align > 0 => self.data().len() / align as usize,
            _ => 0,
        }
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_frames() as f64 / self.format.sample_rate as f64
    }

    /// Interleaved samples decoded from the data section.
    pub fn samples(&self) -> impl Iterator<Item = i16> + '_ {
        self.data()
            .chunks_exact(2)
            .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
    }

    /// BLAKE3 hash of the data section (hex), independent of the header.
    pub fn pcm_hash(&self) -> String {
        blake3::hash(self.data()).to_hex().to_string()
    }

    /// Writes the complete file to a writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.bytes)
    }
}

impl AsRef<[u8]> for WavContainer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<WavContainer> for Vec<u8> {
    fn from(container: WavContainer) -> Self {
        container.bytes
    }
}
