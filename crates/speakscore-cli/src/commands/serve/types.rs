//! Request and response types for the WebSocket server.

use serde::{Deserialize, Serialize};

use crate::commands::json_output::JsonError;

/// Request types supported by the server.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServeRequest {
    /// Re-encode a WAV into the canonical container.
    EncodeData {
        /// Base64-encoded WAV data.
        data: String,
        /// Downmix to mono (optional, default false).
        #[serde(default)]
        mono: bool,
    },
    /// Encode a WAV and score it against a reference sentence.
    AssessData {
        /// Base64-encoded WAV data.
        #[serde(default)]
        data: String,
        /// Sentence the speaker was asked to read.
        #[serde(default)]
        reference_text: String,
        /// Downmix to mono (optional, default false).
        #[serde(default)]
        mono: bool,
    },
}

/// Error response for invalid requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Whether the request succeeded (always false for errors).
    pub success: bool,
    /// Error details.
    pub errors: Vec<JsonError>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            errors: vec![JsonError::new(code, message)],
        }
    }
}
