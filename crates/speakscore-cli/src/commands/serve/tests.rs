//! Tests for the WebSocket server.

use base64::Engine;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use speakscore_assess::{
    AssessResult, AssessmentError, AssessmentRequest, AssessmentScores, ErrorType,
    PronunciationOracle, WordAssessment,
};
use speakscore_wav::{encode, read_info, DecodedAudio};

use crate::commands::json_output::{error_codes, AssessOutput, EncodeOutput};

use super::handler::{assess_data, encode_data, handle_request, process_message};
use super::speech_config;
use super::types::ErrorResponse;
use tokio_tungstenite::tungstenite::Message;

/// Oracle that scores every word of the reference perfectly, or reports
/// silence when the reference is "silence".
#[derive(Default)]
struct MockOracle {
    calls: AtomicUsize,
}

impl PronunciationOracle for MockOracle {
    fn assess(
        &self,
        request: &AssessmentRequest,
    ) -> impl Future<Output = AssessResult<AssessmentScores>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let text = request.reference_text().to_string();
        async move {
            if text == "silence" {
                return Err(AssessmentError::RecognitionFailed {
                    status: "InitialSilenceTimeout".to_string(),
                    details: None,
                });
            }
            Ok(AssessmentScores {
                pronunciation_score: 100.0,
                accuracy_score: 100.0,
                fluency_score: 100.0,
                completeness_score: 100.0,
                prosody_score: None,
                recognized_text: Some(text.clone()),
                words: text
                    .split_whitespace()
                    .map(|w| WordAssessment {
                        word: w.to_string(),
                        accuracy_score: Some(100.0),
                        error_type: ErrorType::None,
                    })
                    .collect(),
            })
        }
    }
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

fn stereo_base64() -> String {
    let audio = DecodedAudio::stereo(48000, vec![0.5; 480], vec![-0.5; 480]);
    let wav = encode(&audio).unwrap();
    base64::engine::general_purpose::STANDARD.encode(wav.as_bytes())
}

// =========================================================================
// encode_data
// =========================================================================

#[test]
fn test_encode_data_success() {
    let output = encode_data(&stereo_base64(), false);
    assert!(output.success, "{:?}", output.errors);

    let summary = output.result.unwrap();
    assert_eq!(summary.channels, 2);
    assert_eq!(summary.sample_rate, 48000);
    assert_eq!(summary.samples_per_channel, 480);

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(summary.data.unwrap())
        .unwrap();
    assert_eq!(bytes.len(), summary.byte_length);
    assert!(read_info(&bytes).unwrap().is_canonical_pcm16());
}

#[test]
fn test_encode_data_mono() {
    let output = encode_data(&stereo_base64(), true);
    let summary = output.result.unwrap();
    assert_eq!(summary.channels, 1);
    assert_eq!(summary.byte_length, 44 + 480 * 2);
}

#[test]
fn test_encode_data_invalid_base64() {
    let output = encode_data("not valid base64!!!", false);
    assert!(!output.success);
    assert_eq!(output.errors[0].code, error_codes::INVALID_BASE64);
}

#[test]
fn test_encode_data_not_a_wav() {
    let data = base64::engine::general_purpose::STANDARD.encode(b"hello");
    let output = encode_data(&data, false);
    assert!(!output.success);
    assert_eq!(output.errors[0].code, error_codes::DECODE);
}

// =========================================================================
// assess_data
// =========================================================================

#[test]
fn test_assess_data_success() {
    let oracle = MockOracle::default();
    let output = block_on(assess_data(
        &stereo_base64(),
        "Today was a beautiful day.",
        true,
        Some(&oracle),
    ));

    assert!(output.success, "{:?}", output.errors);
    let report = output.result.unwrap();
    assert_eq!(report.sample_rate, 48000);
    assert_eq!(report.scores.words.len(), 5);
    assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_assess_data_missing_audio() {
    let oracle = MockOracle::default();
    let output = block_on(assess_data("", "hello", false, Some(&oracle)));
    assert!(!output.success);
    assert_eq!(output.errors[0].code, error_codes::MISSING_INPUT);
    assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_assess_data_missing_reference() {
    let oracle = MockOracle::default();
    let output = block_on(assess_data(&stereo_base64(), " ", false, Some(&oracle)));
    assert!(!output.success);
    assert_eq!(output.errors[0].code, error_codes::MISSING_INPUT);
    assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_assess_data_without_oracle() {
    let output = block_on(assess_data::<MockOracle>(&stereo_base64(), "hello", false, None));
    assert!(!output.success);
    assert_eq!(output.errors[0].code, error_codes::NOT_CONFIGURED);
}

#[test]
fn test_assess_data_recognition_failure() {
    let oracle = MockOracle::default();
    let output = block_on(assess_data(&stereo_base64(), "silence", false, Some(&oracle)));
    assert!(!output.success);
    assert_eq!(output.errors[0].code, "ASSESS_004");
    assert!(output.errors[0].message.contains("InitialSilenceTimeout"));
}

// =========================================================================
// Request dispatch
// =========================================================================

#[test]
fn test_speech_config_with_credentials() {
    let config = speech_config(
        Some("k".to_string()),
        Some("westeurope".to_string()),
        "de-DE".to_string(),
    )
    .unwrap();
    assert_eq!(config.region, "westeurope");
    assert_eq!(config.language, "de-DE");
}

#[test]
fn test_speech_config_missing_region_disables_assess() {
    let region = Some("eastus".to_string());
    assert!(speech_config(Some("k".to_string()), None, "en-US".to_string()).is_none());
    assert!(speech_config(Some(" ".to_string()), region, "en-US".to_string()).is_none());
}

#[test]
fn test_handle_request_encode() {
    let request = format!(r#"{{"type":"encode_data","data":"{}"}}"#, stereo_base64());
    let response = block_on(handle_request::<MockOracle>(&request, None));
    let output: EncodeOutput = serde_json::from_str(&response).unwrap();
    assert!(output.success);
}

#[test]
fn test_handle_request_assess() {
    let oracle = MockOracle::default();
    let request = format!(
        r#"{{"type":"assess_data","data":"{}","reference_text":"hello world"}}"#,
        stereo_base64()
    );
    let response = block_on(handle_request(&request, Some(&oracle)));
    let output: AssessOutput = serde_json::from_str(&response).unwrap();
    assert!(output.success);
    assert_eq!(output.result.unwrap().scores.words.len(), 2);
}

#[test]
fn test_handle_request_invalid_json() {
    let response = block_on(handle_request::<MockOracle>("not json", None));
    let output: ErrorResponse = serde_json::from_str(&response).unwrap();
    assert!(!output.success);
    assert_eq!(output.errors[0].code, error_codes::INVALID_REQUEST);
}

#[test]
fn test_handle_request_unknown_type() {
    let response = block_on(handle_request::<MockOracle>(r#"{"type":"analyze_path"}"#, None));
    let output: ErrorResponse = serde_json::from_str(&response).unwrap();
    assert_eq!(output.errors[0].code, error_codes::INVALID_REQUEST);
}

#[test]
fn test_process_message_binary_utf8() {
    let request = format!(r#"{{"type":"encode_data","data":"{}"}}"#, stereo_base64());
    let response = block_on(process_message::<MockOracle>(
        Message::Binary(request.into_bytes()),
        None,
    ));
    let output: EncodeOutput = serde_json::from_str(&response.unwrap()).unwrap();
    assert!(output.success);
}

#[test]
fn test_process_message_binary_not_utf8() {
    let response = block_on(process_message::<MockOracle>(
        Message::Binary(vec![0xff, 0xfe, 0x00]),
        None,
    ));
    let output: ErrorResponse = serde_json::from_str(&response.unwrap()).unwrap();
    assert_eq!(output.errors[0].code, error_codes::BINARY_NOT_UTF8);
}

#[test]
fn test_process_message_ping_ignored() {
    let response = block_on(process_message::<MockOracle>(Message::Ping(vec![1]), None));
    assert!(response.is_none());
}
