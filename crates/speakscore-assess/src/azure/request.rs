//! Request construction for the Azure Speech short-audio REST endpoint.

use base64::Engine;
use serde::Serialize;

use crate::config::{GradingSystem, Granularity, SpeechConfig};
use crate::error::{AssessResult, AssessmentError};

/// Path of the conversation recognition endpoint.
const RECOGNITION_PATH: &str = "/speech/recognition/conversation/cognitiveservices/v1";

/// Header carrying the base64-encoded assessment parameters.
pub const ASSESSMENT_HEADER: &str = "Pronunciation-Assessment";
/// Header carrying the subscription key.
pub const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// JSON body of the `Pronunciation-Assessment` header.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AssessmentParams<'a> {
    pub reference_text: &'a str,
    pub grading_system: GradingSystem,
    pub granularity: Granularity,
    pub dimension: &'static str,
    pub enable_miscue: bool,
    pub enable_prosody_assessment: bool,
}

impl<'a> AssessmentParams<'a> {
    pub fn new(config: &SpeechConfig, reference_text: &'a str) -> Self {
        Self {
            reference_text,
            grading_system: config.grading_system,
            granularity: config.granularity,
            dimension: "Comprehensive",
            enable_miscue: config.enable_miscue,
            enable_prosody_assessment: config.enable_prosody,
        }
    }

    /// Base64 of the JSON parameters, as the header expects.
    pub fn to_header_value(&self) -> AssessResult<String> {
        let json = serde_json::to_vec(self).map_err(|e| {
            AssessmentError::config(format!("cannot encode assessment parameters: {}", e))
        })?;
        Ok(base64::engine::general_purpose::STANDARD.encode(json))
    }
}

/// Full recognition URL including language and detailed output format.
pub(crate) fn recognition_url(config: &SpeechConfig) -> String {
    format!(
        "{}{}?language={}&format=detailed",
        config.base_url(),
        RECOGNITION_PATH,
        config.language
    )
}

/// `Content-Type` for a 16-bit PCM WAV at the given rate.
pub(crate) fn content_type(sample_rate: u32) -> String {
    format!("audio/wav; codecs=audio/pcm; samplerate={}", sample_rate)
}
