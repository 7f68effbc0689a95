//! JSON output types for machine-readable CLI output.
//!
//! These structures back the `--json` flag on `encode`, `inspect` and
//! `assess`, and are also the response bodies of the WebSocket server.

use serde::{Deserialize, Serialize};
use speakscore_assess::AssessmentScores;
use speakscore_wav::{QuantizePolicy, WavContainer, WavInfo};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
/// Library failures pass through their own codes (`WAV_xxx`, `ASSESS_xxx`).
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_002";
    /// Source audio could not be decoded
    pub const DECODE: &str = "CLI_003";
    /// WAV header is malformed
    pub const INVALID_WAV: &str = "CLI_004";
    /// Required request field is empty
    pub const MISSING_INPUT: &str = "CLI_005";
    /// Speech service credentials are not configured
    pub const NOT_CONFIGURED: &str = "CLI_006";
    /// Async runtime could not be started
    pub const RUNTIME: &str = "CLI_007";
    /// JSON serialization error
    pub const JSON_SERIALIZE: &str = "CLI_009";
    /// Binary WebSocket message is not UTF-8
    pub const BINARY_NOT_UTF8: &str = "CLI_014";
    /// Request JSON is malformed
    pub const INVALID_REQUEST: &str = "CLI_015";
    /// Request payload is not valid base64
    pub const INVALID_BASE64: &str = "CLI_016";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "WAV_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// JSON output for the `encode` command and `encode_data` requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeOutput {
    /// Whether encoding succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Encoding summary (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<EncodeSummary>,
}

impl EncodeOutput {
    pub fn success(result: EncodeSummary) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Summary of one canonical encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeSummary {
    /// Input path or label
    pub input: String,
    /// Output path (file mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Channel count
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Samples per channel
    pub samples_per_channel: usize,
    /// Total container length in bytes
    pub byte_length: usize,
    /// Duration in seconds
    pub duration_seconds: f64,
    /// Quantization policy used
    pub policy: String,
    /// BLAKE3 hash of the PCM data section
    pub pcm_hash: String,
    /// The canonical container as base64 (server responses only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl EncodeSummary {
    /// Summarizes an encoded container.
    pub fn from_container(
        input: impl Into<String>,
        wav: &WavContainer,
        policy: QuantizePolicy,
    ) -> Self {
        let format = wav.format();
        Self {
            input: input.into(),
            output: None,
            channels: format.channels,
            sample_rate: format.sample_rate,
            samples_per_channel: wav.num_frames(),
            byte_length: wav.len(),
            duration_seconds: wav.duration_seconds(),
            policy: policy.as_str().to_string(),
            pcm_hash: wav.pcm_hash(),
            data: None,
        }
    }
}

/// JSON output for the `inspect` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutput {
    /// Whether inspection succeeded
    pub success: bool,
    /// Errors encountered during inspection
    pub errors: Vec<JsonError>,
    /// Inspection result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InspectResult>,
}

impl InspectOutput {
    pub fn success(result: InspectResult) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Header fields of an inspected WAV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectResult {
    /// Input path
    pub input: String,
    /// BLAKE3 hash of the whole file
    pub input_hash: String,
    /// BLAKE3 hash of the data section
    pub pcm_hash: String,
    /// WAVE format tag (1 = PCM)
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub byte_rate: u32,
    pub block_align: u16,
    /// Samples per channel
    pub num_samples: usize,
    /// Offset of the first PCM byte
    pub data_offset: usize,
    /// Length of the data section in bytes
    pub data_length: usize,
    pub duration_seconds: f64,
    /// Whether the file has exactly the layout the encoder produces
    pub canonical: bool,
}

impl InspectResult {
    /// Builds the result from parsed header fields.
    pub fn from_info(
        input: impl Into<String>,
        input_hash: String,
        pcm_hash: String,
        info: &WavInfo,
    ) -> Self {
        Self {
            input: input.into(),
            input_hash,
            pcm_hash,
            audio_format: info.audio_format,
            channels: info.channels,
            sample_rate: info.sample_rate,
            bits_per_sample: info.bits_per_sample,
            byte_rate: info.byte_rate,
            block_align: info.block_align,
            num_samples: info.num_samples,
            data_offset: info.data_offset,
            data_length: info.data_len,
            duration_seconds: info.duration_seconds(),
            canonical: info.is_canonical_pcm16(),
        }
    }
}

/// JSON output for the `assess` command and `assess_data` requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessOutput {
    /// Whether assessment succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Assessment result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AssessReport>,
}

impl AssessOutput {
    pub fn success(result: AssessReport) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }
}

/// Scores for one recording together with what was submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessReport {
    /// Input path or label
    pub input: String,
    /// Reference sentence the recording was scored against
    pub reference_text: String,
    /// Sample rate of the submitted container
    pub sample_rate: u32,
    /// BLAKE3 hash of the submitted PCM data
    pub pcm_hash: String,
    /// Oracle scores
    #[serde(flatten)]
    pub scores: AssessmentScores,
}

#[cfg(test)]
mod tests {
    use super::*;
    use speakscore_wav::{encode, DecodedAudio};

    #[test]
    fn test_json_error_serialization() {
        let error = JsonError::new("CLI_001", "test error").with_file("in.wav");

        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"CLI_001\""));
        assert!(json.contains("\"file\":\"in.wav\""));
    }

    #[test]
    fn test_json_error_skips_missing_file() {
        let json = serde_json::to_string(&JsonError::new("CLI_005", "missing")).unwrap();
        assert!(!json.contains("file"));
    }

    #[test]
    fn test_encode_summary_from_container() {
        let wav = encode(&DecodedAudio::new(16000, vec![vec![0.5]])).unwrap();
        let summary = EncodeSummary::from_container("mic", &wav, QuantizePolicy::Clamp);

        assert_eq!(summary.channels, 1);
        assert_eq!(summary.sample_rate, 16000);
        assert_eq!(summary.samples_per_channel, 1);
        assert_eq!(summary.byte_length, 46);
        assert_eq!(summary.policy, "clamp");
        assert_eq!(summary.pcm_hash.len(), 64);
    }

    #[test]
    fn test_failure_output_has_no_result() {
        let output = EncodeOutput::failure(vec![JsonError::new("CLI_003", "bad")]);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("result").is_none());
        assert_eq!(json["errors"][0]["code"], "CLI_003");
    }

    #[test]
    fn test_assess_report_flattens_scores() {
        let report = AssessReport {
            input: "mic".to_string(),
            reference_text: "hello".to_string(),
            sample_rate: 16000,
            pcm_hash: "00".to_string(),
            scores: AssessmentScores {
                pronunciation_score: 80.0,
                accuracy_score: 85.0,
                fluency_score: 75.0,
                completeness_score: 100.0,
                prosody_score: None,
                recognized_text: None,
                words: Vec::new(),
            },
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["pronunciation_score"], 80.0);
        assert_eq!(json["reference_text"], "hello");
        assert!(json.get("prosody_score").is_none());
    }
}
