//! speakscore pronunciation assessment
//!
//! Scoring is delegated to an external speech service. This crate defines the
//! contract with that service and one implementation of it:
//!
//! - [`PronunciationOracle`] - submit a WAV plus reference text, get scores
//! - [`AssessmentRequest`] / [`AssessmentScores`] - the request and result types
//! - [`AzureSpeechClient`] - the Azure Speech REST implementation
//! - [`SpeechConfig`] - credentials, language and timeout
//!
//! There is no retry, batching or caching: each request is one HTTP call and
//! failures are returned to the caller as [`AssessmentError`].

pub mod azure;
pub mod config;
pub mod error;
pub mod oracle;
pub mod types;

pub use azure::AzureSpeechClient;
pub use config::{GradingSystem, Granularity, SpeechConfig};
pub use error::{AssessResult, AssessmentError};
pub use oracle::PronunciationOracle;
pub use types::{AssessmentRequest, AssessmentScores, ErrorType, WordAssessment};
