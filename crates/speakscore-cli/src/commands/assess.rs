//! Assess command implementation
//!
//! Encodes a recording canonically and submits it to the Azure Speech
//! pronunciation-assessment endpoint.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use speakscore_assess::{
    AssessmentError, AssessmentRequest, AzureSpeechClient, PronunciationOracle, SpeechConfig,
};

use crate::input::{prepare_file, PrepareOptions};

use super::json_output::{error_codes, AssessOutput, AssessReport, JsonError};
use super::reporting::{print_json, print_scores};

/// Arguments of the assess command.
#[derive(Debug, Clone)]
pub struct AssessArgs {
    /// Path to the recording
    pub input: String,
    /// Sentence the speaker was asked to read
    pub reference_text: String,
    /// Subscription key (falls back to `AZURE_SPEECH_KEY`)
    pub key: Option<String>,
    /// Service region (falls back to `AZURE_SPEECH_REGION`)
    pub region: Option<String>,
    /// Recognition language
    pub language: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Downmix to mono before submitting
    pub mono: bool,
}

impl AssessArgs {
    /// Resolve the service configuration from flags and environment.
    pub fn speech_config(&self) -> Result<SpeechConfig, AssessmentError> {
        Ok(SpeechConfig::from_parts(self.key.clone(), self.region.clone())?
            .with_language(self.language.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

/// Run the assess command
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(args: &AssessArgs, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(args)
    } else {
        run_human(args)
    }
}

/// Run assess with human-readable (colored) output
fn run_human(args: &AssessArgs) -> Result<ExitCode> {
    let config = args.speech_config()?;
    let client = AzureSpeechClient::new(config).context("Failed to create speech client")?;

    let options = PrepareOptions::new(args.mono, Default::default());
    let wav = prepare_file(Path::new(&args.input), options)
        .with_context(|| format!("Failed to encode {}", args.input))?;

    println!("{} {}", "Assessing:".cyan().bold(), args.input);
    println!("  {} {}", "Reference:".dimmed(), args.reference_text);
    println!(
        "  {} {} ch, {} Hz, {:.2} s",
        "Audio:".dimmed(),
        wav.format().channels,
        wav.format().sample_rate,
        wav.duration_seconds()
    );
    println!();

    let request = AssessmentRequest::new(wav.into_bytes(), args.reference_text.as_str())?;
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;
    let scores = rt.block_on(client.assess(&request))?;

    print_scores(&scores);
    Ok(ExitCode::SUCCESS)
}

/// Run assess with JSON output
fn run_json(args: &AssessArgs) -> Result<ExitCode> {
    let output = match args.speech_config().and_then(AzureSpeechClient::new) {
        Ok(client) => match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt.block_on(assess_file(&client, args)),
            Err(e) => AssessOutput::failure(vec![runtime_error(&e)]),
        },
        Err(e) => AssessOutput::failure(vec![assessment_error(&e)]),
    };

    let success = output.success;
    print_json(&output)?;
    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Encode `args.input` and score it with `oracle`.
pub async fn assess_file<O: PronunciationOracle>(oracle: &O, args: &AssessArgs) -> AssessOutput {
    let options = PrepareOptions::new(args.mono, Default::default());
    let wav = match prepare_file(Path::new(&args.input), options) {
        Ok(wav) => wav,
        Err(e) => {
            let error = JsonError::new(e.code(), e.to_string()).with_file(&args.input);
            return AssessOutput::failure(vec![error]);
        }
    };

    let pcm_hash = wav.pcm_hash();
    let request = match AssessmentRequest::new(wav.into_bytes(), args.reference_text.as_str()) {
        Ok(r) => r,
        Err(e) => return AssessOutput::failure(vec![assessment_error(&e)]),
    };

    match oracle.assess(&request).await {
        Ok(scores) => AssessOutput::success(AssessReport {
            input: args.input.clone(),
            reference_text: request.reference_text().to_string(),
            sample_rate: request.sample_rate(),
            pcm_hash,
            scores,
        }),
        Err(e) => AssessOutput::failure(vec![assessment_error(&e)]),
    }
}

fn runtime_error(err: &io::Error) -> JsonError {
    JsonError::new(
        error_codes::RUNTIME,
        format!("Failed to create tokio runtime: {}", err),
    )
}

/// Map an assessment failure to a JSON error, keeping the library's code.
pub(crate) fn assessment_error(err: &AssessmentError) -> JsonError {
    let code = match err {
        AssessmentError::MissingInput { .. } => error_codes::MISSING_INPUT,
        other => other.code(),
    };
    JsonError::new(code, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use speakscore_assess::{AssessResult, AssessmentScores};
    use speakscore_wav::{encode, DecodedAudio};
    use std::future::Future;

    struct FixedOracle;

    impl PronunciationOracle for FixedOracle {
        fn assess(
            &self,
            request: &AssessmentRequest,
        ) -> impl Future<Output = AssessResult<AssessmentScores>> + Send {
            let words = request.reference_text().split_whitespace().count();
            async move {
                Ok(AssessmentScores {
                    pronunciation_score: 91.0,
                    accuracy_score: 90.0,
                    fluency_score: 92.0,
                    completeness_score: 100.0,
                    prosody_score: Some(85.0),
                    recognized_text: None,
                    words: Vec::with_capacity(words),
                })
            }
        }
    }

    fn args(input: &str, text: &str) -> AssessArgs {
        AssessArgs {
            input: input.to_string(),
            reference_text: text.to_string(),
            key: Some("k".to_string()),
            region: Some("eastus".to_string()),
            language: "en-US".to_string(),
            timeout_secs: 5,
            mono: false,
        }
    }

    fn block_on<F: Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn test_speech_config_from_flags() {
        let config = args("in.wav", "hi").speech_config().unwrap();
        assert_eq!(config.region, "eastus");
        assert_eq!(config.language, "en-US");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_speech_config_rejects_blank_key() {
        let mut a = args("in.wav", "hi");
        a.key = Some("   ".to_string());
        let err = a.speech_config().unwrap_err();
        assert!(matches!(err, AssessmentError::Config { .. }));
    }

    #[test]
    fn test_runtime_failure_reported_as_json() {
        let err = io::Error::new(io::ErrorKind::Other, "too many open files");
        let output = AssessOutput::failure(vec![runtime_error(&err)]);

        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"][0]["code"], error_codes::RUNTIME);
        assert!(json["errors"][0]["message"]
            .as_str()
            .unwrap()
            .contains("too many open files"));
    }

    #[test]
    fn test_assess_file_success() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("take.wav");
        let wav = encode(&DecodedAudio::mono(16000, vec![0.2; 160])).unwrap();
        std::fs::write(&path, wav.as_bytes()).unwrap();

        let a = args(&path.to_string_lossy(), "Today was a beautiful day.");
        let output = block_on(assess_file(&FixedOracle, &a));

        assert!(output.success, "{:?}", output.errors);
        let report = output.result.unwrap();
        assert_eq!(report.sample_rate, 16000);
        assert_eq!(report.pcm_hash, wav.pcm_hash());
        assert_eq!(report.scores.pronunciation_score, 91.0);
    }

    #[test]
    fn test_assess_file_blank_reference() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("take.wav");
        let wav = encode(&DecodedAudio::mono(16000, vec![0.2; 160])).unwrap();
        std::fs::write(&path, wav.as_bytes()).unwrap();

        let output = block_on(assess_file(&FixedOracle, &args(&path.to_string_lossy(), "  ")));
        assert!(!output.success);
        assert_eq!(output.errors[0].code, error_codes::MISSING_INPUT);
    }

    #[test]
    fn test_assess_file_missing_audio() {
        let output = block_on(assess_file(&FixedOracle, &args("/nonexistent/take.wav", "hi")));
        assert!(!output.success);
        assert_eq!(output.errors[0].code, error_codes::DECODE);
    }
}
