//! Azure Speech REST client.
//!
//! Posts a WAV recording to the short-audio recognition endpoint with a
//! `Pronunciation-Assessment` header and reads back the detailed result.
//! One HTTP request per assessment; no retries.

mod request;
mod response;


use std::future::Future;

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::config::SpeechConfig;
use crate::error::{AssessResult, AssessmentError};
use crate::oracle::PronunciationOracle;
use crate::types::{AssessmentRequest, AssessmentScores};

pub use request::{ASSESSMENT_HEADER, KEY_HEADER};

use request::{content_type, recognition_url, AssessmentParams};
use response::parse_response;

/// Pronunciation oracle backed by the Azure Speech service.
#[derive(Debug, Clone)]
pub struct AzureSpeechClient {
    config: SpeechConfig,
    client: reqwest::Client,
}

impl AzureSpeechClient {
    /// Creates a client; the configured timeout applies to each request.
    pub fn new(config: SpeechConfig) -> AssessResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    /// The active configuration.
    pub fn config(&self) -> &SpeechConfig {
        &self.config
    }

    /// Builds the HTTP request for an assessment without sending it.
    pub fn build_request(&self, request: &AssessmentRequest) -> AssessResult<reqwest::Request> {
        let params = AssessmentParams::new(&self.config, request.reference_text());

        let http_request = self
            .client
            .post(recognition_url(&self.config))
            .header(KEY_HEADER, &self.config.key)
            .header(CONTENT_TYPE, content_type(request.sample_rate()))
            .header(ACCEPT, "application/json")
            .header(ASSESSMENT_HEADER, params.to_header_value()?)
            .body(request.audio().to_vec())
            .build()?;

        Ok(http_request)
    }

    async fn submit(&self, request: &AssessmentRequest) -> AssessResult<AssessmentScores> {
        let http_request = self.build_request(request)?;
        tracing::debug!(
            url = %http_request.url(),
            bytes = request.audio().len(),
            sample_rate = request.sample_rate(),
            "submitting pronunciation assessment"
        );

        let response = self.client.execute(http_request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "speech service rejected request");
            return Err(AssessmentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let scores = parse_response(&body);
        match &scores {
            Ok(s) => tracing::info!(
                pronunciation = s.pronunciation_score,
                accuracy = s.accuracy_score,
                fluency = s.fluency_score,
                completeness = s.completeness_score,
                words = s.words.len(),
                "assessment complete"
            ),
            Err(e) => tracing::warn!(error = %e, "assessment failed"),
        }
        scores
    }
}

impl PronunciationOracle for AzureSpeechClient {
    fn assess(
        &self,
        request: &AssessmentRequest,
    ) -> impl Future<Output = AssessResult<AssessmentScores>> + Send {
        self.submit(request)
    }
}
