//! Speech service configuration.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::error::{AssessResult, AssessmentError};

/// Environment variable holding the subscription key.
pub const KEY_ENV: &str = "AZURE_SPEECH_KEY";
/// Environment variable holding the service region.
pub const REGION_ENV: &str = "AZURE_SPEECH_REGION";

/// Default recognition language.
pub const DEFAULT_LANGUAGE: &str = "en-US";
/// Default HTTP timeout for one assessment.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Score scale requested from the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum GradingSystem {
    /// Scores from 0 to 100.
    #[default]
    HundredMark,
    /// Scores from 0 to 5.
    FivePoint,
}

/// Level of detail requested from the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Granularity {
    /// Phoneme, syllable and word level.
    #[default]
    Phoneme,
    /// Word level only.
    Word,
    /// Full text only.
    FullText,
}

/// Connection and assessment settings for the Azure Speech service.
#[derive(Clone)]
pub struct SpeechConfig {
    /// Subscription key.
    pub key: String,
    /// Service region, e.g. `eastus`.
    pub region: String,
    /// Recognition language (BCP-47).
    pub language: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Score scale.
    pub grading_system: GradingSystem,
    /// Level of detail.
    pub granularity: Granularity,
    /// Report insertions and omissions against the reference text.
    pub enable_miscue: bool,
    /// Request a prosody score.
    pub enable_prosody: bool,
    /// Override for the service base URL (scheme and host, no path).
    pub endpoint: Option<String>,
}

impl SpeechConfig {
    /// Creates a configuration with default assessment settings.
    pub fn new(key: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            region: region.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            grading_system: GradingSystem::default(),
            granularity: Granularity::default(),
            enable_miscue: true,
            enable_prosody: true,
            endpoint: None,
        }
    }

    /// Reads the key and region from `AZURE_SPEECH_KEY` and `AZURE_SPEECH_REGION`.
    pub fn from_env() -> AssessResult<Self> {
        let key = std::env::var(KEY_ENV).ok();
        let region = std::env::var(REGION_ENV).ok();
        Self::from_parts(key, region)
    }

    /// Builds a configuration from optional parts, reporting which is missing.
    pub fn from_parts(key: Option<String>, region: Option<String>) -> AssessResult<Self> {
        let key = key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AssessmentError::config(format!("{} is not set", KEY_ENV)))?;
        let region = region
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| AssessmentError::config(format!("{} is not set", REGION_ENV)))?;
        Ok(Self::new(key.trim(), region.trim()))
    }

    /// Sets the recognition language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the service base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Base URL of the speech-to-text service.
    pub fn base_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://{}.stt.speech.microsoft.com", self.region),
        }
    }
}

impl fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechConfig")
            .field("key", &"<redacted>")
            .field("region", &self.region)
            .field("language", &self.language)
            .field("timeout", &self.timeout)
            .field("grading_system", &self.grading_system)
            .field("granularity", &self.granularity)
            .field("enable_miscue", &self.enable_miscue)
            .field("enable_prosody", &self.enable_prosody)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
