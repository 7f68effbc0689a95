//! Request and result types shared by all oracles.

use serde::{Deserialize, Serialize};
use speakscore_wav::read_info;

use crate::error::{AssessResult, AssessmentError};

/// A WAV recording paired with the sentence the speaker was asked to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentRequest {
    audio: Vec<u8>,
    reference_text: String,
    sample_rate: u32,
}

impl AssessmentRequest {
    /// Creates a request, checking that both inputs are present and that the
    /// audio is a readable WAV.
    pub fn new(audio: Vec<u8>, reference_text: impl Into<String>) -> AssessResult<Self> {
        if audio.is_empty() {
            return Err(AssessmentError::MissingInput { field: "audio" });
        }

        let reference_text = reference_text.into().trim().to_string();
        if reference_text.is_empty() {
            return Err(AssessmentError::MissingInput {
                field: "reference text",
            });
        }

        let info = read_info(&audio)?;

        Ok(Self {
            audio,
            reference_text,
            sample_rate: info.sample_rate,
        })
    }

    /// WAV file bytes.
    pub fn audio(&self) -> &[u8] {
        &self.audio
    }

    /// Reference sentence, trimmed.
    pub fn reference_text(&self) -> &str {
        &self.reference_text
    }

    /// Sample rate read from the WAV header.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

/// How a word in the recording differs from the reference text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorType {
    /// Pronounced as expected.
    None,
    /// Spoken but not in the reference text.
    Insertion,
    /// In the reference text but not spoken.
    Omission,
    /// Spoken with low accuracy.
    Mispronunciation,
    /// Pause inside a phrase.
    UnexpectedBreak,
    /// Missing pause at a phrase boundary.
    MissingBreak,
    /// Flat intonation.
    Monotone,
    /// Any value this crate does not know about, kept verbatim.
    Other(String),
}

impl ErrorType {
    /// The service's spelling of this value.
    pub fn as_str(&self) -> &str {
        match self {
            ErrorType::None => "None",
            ErrorType::Insertion => "Insertion",
            ErrorType::Omission => "Omission",
            ErrorType::Mispronunciation => "Mispronunciation",
            ErrorType::UnexpectedBreak => "UnexpectedBreak",
            ErrorType::MissingBreak => "MissingBreak",
            ErrorType::Monotone => "Monotone",
            ErrorType::Other(other) => other,
        }
    }
}

impl From<String> for ErrorType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "None" => ErrorType::None,
            "Insertion" => ErrorType::Insertion,
            "Omission" => ErrorType::Omission,
            "Mispronunciation" => ErrorType::Mispronunciation,
            "UnexpectedBreak" => ErrorType::UnexpectedBreak,
            "MissingBreak" => ErrorType::MissingBreak,
            "Monotone" => ErrorType::Monotone,
            _ => ErrorType::Other(value),
        }
    }
}

impl From<ErrorType> for String {
    fn from(value: ErrorType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assessment of a single word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordAssessment {
    /// The word as recognized (or as written, for omissions).
    pub word: String,
    /// Accuracy score; absent for omitted words.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_score: Option<f64>,
    /// Deviation from the reference text.
    pub error_type: ErrorType,
}

/// Scores returned by a pronunciation oracle, each in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentScores {
    /// Overall pronunciation score.
    pub pronunciation_score: f64,
    /// Phoneme-level accuracy.
    pub accuracy_score: f64,
    /// Smoothness and pacing.
    pub fluency_score: f64,
    /// Share of reference words spoken.
    pub completeness_score: f64,
    /// Stress, intonation and rhythm; absent when the language has no prosody model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prosody_score: Option<f64>,
    /// Text the service recognized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recognized_text: Option<String>,
    /// Per-word results, in spoken order.
    pub words: Vec<WordAssessment>,
}
