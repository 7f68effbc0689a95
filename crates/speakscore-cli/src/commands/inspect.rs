//! Inspect command implementation
//!
//! Validates a WAV file's chunk structure and prints its header fields.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::process::ExitCode;

use speakscore_wav::{compute_pcm_hash, read_info};

use super::json_output::{error_codes, InspectOutput, InspectResult, JsonError};
use super::reporting::print_json;

/// Run the inspect command
///
/// # Arguments
/// * `input` - Path to the WAV file
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 for a valid WAV, 1 otherwise
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        let output = inspect_file(input);
        let success = output.success;
        print_json(&output)?;
        return Ok(if success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    let data = fs::read(input).with_context(|| format!("Failed to read file: {}", input))?;
    let result = inspect_bytes(input, &data).map_err(|e| anyhow::anyhow!(e.message))?;

    println!("{} {}", "Inspecting:".cyan().bold(), input);
    println!("  {} {}", "Format tag:".dimmed(), result.audio_format);
    println!("  {} {}", "Channels:".dimmed(), result.channels);
    println!("  {} {} Hz", "Sample rate:".dimmed(), result.sample_rate);
    println!("  {} {}", "Bits:".dimmed(), result.bits_per_sample);
    println!("  {} {}", "Byte rate:".dimmed(), result.byte_rate);
    println!("  {} {}", "Block align:".dimmed(), result.block_align);
    println!("  {} {}", "Samples:".dimmed(), result.num_samples);
    println!("  {} {:.3} s", "Duration:".dimmed(), result.duration_seconds);
    println!(
        "  {} {} bytes at offset {}",
        "Data:".dimmed(),
        result.data_length,
        result.data_offset
    );
    println!("  {} {}", "PCM hash:".dimmed(), result.pcm_hash);

    if result.canonical {
        println!("{}", "Canonical 16-bit PCM".green().bold());
    } else {
        println!("{}", "Not canonical; run `speakscore encode` to convert".yellow());
    }

    Ok(ExitCode::SUCCESS)
}

/// Inspect a file and wrap the outcome for JSON output.
pub fn inspect_file(input: &str) -> InspectOutput {
    let data = match fs::read(input) {
        Ok(d) => d,
        Err(e) => {
            let error =
                JsonError::new(error_codes::FILE_READ, format!("Failed to read file: {}", e))
                    .with_file(input);
            return InspectOutput::failure(vec![error]);
        }
    };

    match inspect_bytes(input, &data) {
        Ok(result) => InspectOutput::success(result),
        Err(e) => InspectOutput::failure(vec![e]),
    }
}

/// Parse the header of an in-memory WAV.
pub fn inspect_bytes(input: &str, data: &[u8]) -> Result<InspectResult, JsonError> {
    let info = read_info(data).map_err(|e| {
        JsonError::new(error_codes::INVALID_WAV, format!("Invalid WAV: {}", e)).with_file(input)
    })?;

    let pcm_hash = compute_pcm_hash(data).ok_or_else(|| {
        JsonError::new(error_codes::INVALID_WAV, "Invalid WAV: unreadable data chunk")
            .with_file(input)
    })?;
    let input_hash = blake3::hash(data).to_hex().to_string();

    Ok(InspectResult::from_info(input, input_hash, pcm_hash, &info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use speakscore_wav::{encode, DecodedAudio};

    #[test]
    fn test_inspect_bytes_canonical() {
        let wav = encode(&DecodedAudio::stereo(44100, vec![0.0; 441], vec![0.0; 441])).unwrap();
        let result = inspect_bytes("mem", wav.as_bytes()).unwrap();

        assert_eq!(result.channels, 2);
        assert_eq!(result.sample_rate, 44100);
        assert_eq!(result.bits_per_sample, 16);
        assert_eq!(result.num_samples, 441);
        assert_eq!(result.data_offset, 44);
        assert_eq!(result.data_length, 441 * 4);
        assert_eq!(result.pcm_hash, wav.pcm_hash());
        assert!(result.canonical);
    }

    #[test]
    fn test_inspect_bytes_unpatched_data_size() {
        let wav = encode(&DecodedAudio::mono(16000, vec![0.25; 10])).unwrap();
        let mut bytes = wav.as_bytes().to_vec();
        bytes[40..44].copy_from_slice(&u32::MAX.to_le_bytes());

        let result = inspect_bytes("stream.wav", &bytes).unwrap();
        assert_eq!(result.data_length, 20);
        assert_eq!(result.num_samples, 10);
        assert_eq!(result.pcm_hash, wav.pcm_hash());
    }

    #[test]
    fn test_inspect_bytes_rejects_garbage() {
        let err = inspect_bytes("junk.wav", b"RIFX0000WAVE").unwrap_err();
        assert_eq!(err.code, error_codes::INVALID_WAV);
        assert_eq!(err.file.as_deref(), Some("junk.wav"));
    }

    #[test]
    fn test_inspect_file_not_found() {
        let output = inspect_file("/nonexistent/file.wav");
        assert!(!output.success);
        assert_eq!(output.errors[0].code, error_codes::FILE_READ);
    }

    #[test]
    fn test_inspect_file_success() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("tone.wav");
        let wav = encode(&DecodedAudio::mono(16000, vec![0.25; 1600])).unwrap();
        fs::write(&path, wav.as_bytes()).unwrap();

        let output = inspect_file(&path.to_string_lossy());
        assert!(output.success);
        let result = output.result.unwrap();
        assert_eq!(result.duration_seconds, 0.1);
    }
}
