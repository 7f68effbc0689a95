//! Request handler logic for the WebSocket server.

use base64::Engine;
use serde::Serialize;
use tokio_tungstenite::tungstenite::Message;

use speakscore_assess::{AssessmentRequest, PronunciationOracle};
use speakscore_wav::QuantizePolicy;

use crate::commands::assess::assessment_error;
use crate::commands::json_output::{
    error_codes, AssessOutput, AssessReport, EncodeOutput, EncodeSummary, JsonError,
};
use crate::input::{prepare_bytes, PrepareOptions};

use super::types::{ErrorResponse, ServeRequest};

/// Label used as `input` for audio received over the socket.
const SOCKET_INPUT: &str = "<socket>";

/// Process a single WebSocket message and return a response.
pub async fn process_message<O: PronunciationOracle>(
    msg: Message,
    oracle: Option<&O>,
) -> Option<String> {
    match msg {
        Message::Text(text) => Some(handle_request(&text, oracle).await),
        Message::Binary(data) => match String::from_utf8(data) {
            Ok(text) => Some(handle_request(&text, oracle).await),
            Err(_) => Some(to_json(&ErrorResponse::new(
                error_codes::BINARY_NOT_UTF8,
                "Binary message must be valid UTF-8 JSON",
            ))),
        },
        // Ping/pong are answered by tungstenite; close and raw frames need no reply
        Message::Ping(_) | Message::Pong(_) | Message::Close(_) | Message::Frame(_) => None,
    }
}

/// Handle a JSON request and return a JSON response.
pub async fn handle_request<O: PronunciationOracle>(json_text: &str, oracle: Option<&O>) -> String {
    let request: ServeRequest = match serde_json::from_str(json_text) {
        Ok(req) => req,
        Err(e) => {
            tracing::debug!(error = %e, "rejecting malformed request");
            return to_json(&ErrorResponse::new(
                error_codes::INVALID_REQUEST,
                format!("Invalid request JSON: {}", e),
            ));
        }
    };

    match request {
        ServeRequest::EncodeData { data, mono } => to_json(&encode_data(&data, mono)),
        ServeRequest::AssessData {
            data,
            reference_text,
            mono,
        } => to_json(&assess_data(&data, &reference_text, mono, oracle).await),
    }
}

/// Re-encode base64 WAV data and return the canonical container as base64.
pub fn encode_data(base64_data: &str, mono: bool) -> EncodeOutput {
    let bytes = match decode_base64(base64_data) {
        Ok(b) => b,
        Err(e) => return EncodeOutput::failure(vec![e]),
    };

    let policy = QuantizePolicy::default();
    match prepare_bytes(&bytes, PrepareOptions::new(mono, policy)) {
        Ok(wav) => {
            let mut summary = EncodeSummary::from_container(SOCKET_INPUT, &wav, policy);
            summary.data = Some(base64::engine::general_purpose::STANDARD.encode(wav.as_bytes()));
            EncodeOutput::success(summary)
        }
        Err(e) => EncodeOutput::failure(vec![JsonError::new(e.code(), e.to_string())]),
    }
}

/// Encode base64 WAV data and score it with the oracle.
pub async fn assess_data<O: PronunciationOracle>(
    base64_data: &str,
    reference_text: &str,
    mono: bool,
    oracle: Option<&O>,
) -> AssessOutput {
    if base64_data.trim().is_empty() {
        return AssessOutput::failure(vec![JsonError::new(
            error_codes::MISSING_INPUT,
            "audio is required",
        )]);
    }
    if reference_text.trim().is_empty() {
        return AssessOutput::failure(vec![JsonError::new(
            error_codes::MISSING_INPUT,
            "reference text is required",
        )]);
    }
    let Some(oracle) = oracle else {
        return AssessOutput::failure(vec![JsonError::new(
            error_codes::NOT_CONFIGURED,
            "speech service credentials are not configured on this server",
        )]);
    };

    let bytes = match decode_base64(base64_data) {
        Ok(b) => b,
        Err(e) => return AssessOutput::failure(vec![e]),
    };
    let wav = match prepare_bytes(&bytes, PrepareOptions::new(mono, QuantizePolicy::default())) {
        Ok(wav) => wav,
        Err(e) => return AssessOutput::failure(vec![JsonError::new(e.code(), e.to_string())]),
    };

    let pcm_hash = wav.pcm_hash();
    let request = match AssessmentRequest::new(wav.into_bytes(), reference_text) {
        Ok(r) => r,
        Err(e) => return AssessOutput::failure(vec![assessment_error(&e)]),
    };

    match oracle.assess(&request).await {
        Ok(scores) => AssessOutput::success(AssessReport {
            input: SOCKET_INPUT.to_string(),
            reference_text: request.reference_text().to_string(),
            sample_rate: request.sample_rate(),
            pcm_hash,
            scores,
        }),
        Err(e) => {
            tracing::warn!(code = e.code(), error = %e, "assessment failed");
            AssessOutput::failure(vec![assessment_error(&e)])
        }
    }
}

fn decode_base64(data: &str) -> Result<Vec<u8>, JsonError> {
    base64::engine::general_purpose::STANDARD
        .decode(data.trim())
        .map_err(|e| {
            JsonError::new(error_codes::INVALID_BASE64, format!("Invalid base64 data: {}", e))
        })
}

const SERIALIZE_FALLBACK: &str = concat!(
    r#"{"success":false,"errors":[{"code":"CLI_009","#,
    r#""message":"Failed to serialize response"}]}"#,
);

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        let error = ErrorResponse::new(
            error_codes::JSON_SERIALIZE,
            format!("Failed to serialize response: {}", e),
        );
        serde_json::to_string(&error).unwrap_or_else(|_| SERIALIZE_FALLBACK.to_string())
    })
}
