//! Error types for pronunciation assessment.

use speakscore_wav::FormatError;
use thiserror::Error;

/// Result type for assessment operations.
pub type AssessResult<T> = Result<T, AssessmentError>;

/// Errors that can occur while preparing or running an assessment.
#[derive(Debug, Error)]
pub enum AssessmentError {
    /// The request is missing its audio or reference text.
    #[error("missing {field}")]
    MissingInput {
        /// Which input is missing.
        field: &'static str,
    },

    /// The audio is not a readable WAV container.
    #[error("audio is not a valid WAV: {0}")]
    InvalidAudio(#[from] FormatError),

    /// Credentials or other settings are missing or malformed.
    #[error("configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// The service answered but could not recognize speech.
    #[error("speech recognition failed: {status}{}", display_suffix(.details))]
    RecognitionFailed {
        /// Recognition status reported by the service (e.g. `NoMatch`).
        status: String,
        /// Recognized text or error detail, if any.
        details: Option<String>,
    },

    /// The service returned a non-success HTTP status.
    #[error("speech service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("speech service request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("unexpected speech service response: {message}")]
    Parse {
        /// Error message.
        message: String,
    },
}

fn display_suffix(details: &Option<String>) -> String {
    match details {
        Some(d) if !d.is_empty() => format!(" - {}", d),
        _ => String::new(),
    }
}

impl AssessmentError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a response parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Stable error code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            AssessmentError::MissingInput { .. } => "ASSESS_001",
            AssessmentError::InvalidAudio(_) => "ASSESS_002",
            AssessmentError::Config { .. } => "ASSESS_003",
            AssessmentError::RecognitionFailed { .. } => "ASSESS_004",
            AssessmentError::Status { .. } => "ASSESS_005",
            AssessmentError::Http(_) => "ASSESS_006",
            AssessmentError::Parse { .. } => "ASSESS_007",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognition_failed_display() {
        let err = AssessmentError::RecognitionFailed {
            status: "NoMatch".to_string(),
            details: Some("no speech detected".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "speech recognition failed: NoMatch - no speech detected"
        );

        let err = AssessmentError::RecognitionFailed {
            status: "InitialSilenceTimeout".to_string(),
            details: None,
        };
        assert_eq!(
            err.to_string(),
            "speech recognition failed: InitialSilenceTimeout"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AssessmentError::MissingInput { field: "audio" }.code(), "ASSESS_001");
        assert_eq!(AssessmentError::config("no key").code(), "ASSESS_003");
        assert_eq!(AssessmentError::parse("bad json").code(), "ASSESS_007");
    }
}
