//! Encode command implementation
//!
//! Decodes a WAV file of any supported layout and writes it back out as the
//! canonical 16-bit PCM container.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use speakscore_wav::{QuantizePolicy, WavContainer};

use crate::input::{prepare_file, InputError, PrepareOptions};

use super::json_output::{error_codes, EncodeOutput, EncodeSummary, JsonError};
use super::reporting::print_json;

/// Run the encode command
///
/// # Arguments
/// * `input` - Source WAV path
/// * `output` - Destination path for the canonical WAV
/// * `options` - Downmix and quantization settings
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(
    input: &str,
    output: &str,
    options: PrepareOptions,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(input, output, options)
    } else {
        run_human(input, output, options)
    }
}

/// Run encode with human-readable (colored) output
fn run_human(input: &str, output: &str, options: PrepareOptions) -> Result<ExitCode> {
    println!("{} {}", "Encoding:".cyan().bold(), input);

    let wav = prepare_file(Path::new(input), options)
        .with_context(|| format!("Failed to encode {}", input))?;
    write_output(&wav, output)?;

    let format = wav.format();
    println!("  {} {}", "Channels:".dimmed(), format.channels);
    println!("  {} {} Hz", "Sample rate:".dimmed(), format.sample_rate);
    println!("  {} {}", "Samples:".dimmed(), wav.num_frames());
    println!("  {} {:.3} s", "Duration:".dimmed(), wav.duration_seconds());
    println!("  {} {} bytes", "Size:".dimmed(), wav.len());
    println!("  {} {}", "Policy:".dimmed(), options.policy);
    println!("  {} {}", "PCM hash:".dimmed(), wav.pcm_hash());
    println!("{} {}", "Wrote".green().bold(), output);

    Ok(ExitCode::SUCCESS)
}

/// Run encode with JSON output
fn run_json(input: &str, output: &str, options: PrepareOptions) -> Result<ExitCode> {
    let result = encode_file(input, output, options);
    let success = result.success;
    print_json(&result)?;

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Encode `input` into `output` and describe the result.
pub fn encode_file(input: &str, output: &str, options: PrepareOptions) -> EncodeOutput {
    let wav = match prepare_file(Path::new(input), options) {
        Ok(wav) => wav,
        Err(e) => return EncodeOutput::failure(vec![input_error(&e, input)]),
    };

    if let Err(e) = write_output(&wav, output) {
        let error = JsonError::new(error_codes::FILE_WRITE, format!("{:#}", e)).with_file(output);
        return EncodeOutput::failure(vec![error]);
    }

    let mut summary = EncodeSummary::from_container(input, &wav, options.policy);
    summary.output = Some(output.to_string());
    EncodeOutput::success(summary)
}

fn write_output(wav: &WavContainer, output: &str) -> Result<()> {
    let path = Path::new(output);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, wav.as_bytes()).with_context(|| format!("Failed to write file: {}", output))
}

fn input_error(err: &InputError, input: &str) -> JsonError {
    JsonError::new(err.code(), err.to_string()).with_file(input)
}

/// Parse a `--policy` value.
pub fn parse_policy(value: &str) -> Result<QuantizePolicy, String> {
    value.parse::<QuantizePolicy>()
}
