//! Response parsing for the detailed recognition output.
//!
//! Depending on API version, scores are either fields of the `NBest` entry
//! itself or nested under `PronunciationAssessment`. Both shapes are read,
//! preferring the nested one.

use serde::Deserialize;

use crate::error::{AssessResult, AssessmentError};
use crate::types::{AssessmentScores, ErrorType, WordAssessment};

const SUCCESS: &str = "Success";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecognitionResponse {
    recognition_status: String,
    #[serde(default)]
    display_text: Option<String>,
    #[serde(default, rename = "NBest")]
    n_best: Vec<NBestEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ScoreFields {
    accuracy_score: Option<f64>,
    fluency_score: Option<f64>,
    completeness_score: Option<f64>,
    pron_score: Option<f64>,
    prosody_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct NBestEntry {
    #[serde(default)]
    display: Option<String>,
    #[serde(flatten)]
    scores: ScoreFields,
    #[serde(default)]
    pronunciation_assessment: Option<ScoreFields>,
    #[serde(default)]
    words: Vec<WordEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WordScores {
    accuracy_score: Option<f64>,
    error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WordEntry {
    word: String,
    #[serde(flatten)]
    scores: WordScores,
    #[serde(default)]
    pronunciation_assessment: Option<WordScores>,
}

/// Parses a detailed recognition response body into scores.
pub(crate) fn parse_response(body: &str) -> AssessResult<AssessmentScores> {
    let response: RecognitionResponse =
        serde_json::from_str(body).map_err(|e| AssessmentError::parse(e.to_string()))?;

    if response.recognition_status != SUCCESS {
        return Err(AssessmentError::RecognitionFailed {
            status: response.recognition_status,
            details: response.display_text.filter(|t| !t.is_empty()),
        });
    }

    let best = response
        .n_best
        .into_iter()
        .next()
        .ok_or_else(|| AssessmentError::parse("response has no NBest entries"))?;

    let nested = best.pronunciation_assessment.unwrap_or_default();
    let top = best.scores;
    let required = |name: &str, nested: Option<f64>, top: Option<f64>| {
        nested
            .or(top)
            .ok_or_else(|| AssessmentError::parse(format!("response is missing {}", name)))
    };

    let words = best
        .words
        .into_iter()
        .map(|entry| {
            let nested = entry.pronunciation_assessment.unwrap_or_default();
            WordAssessment {
                word: entry.word,
                accuracy_score: nested.accuracy_score.or(entry.scores.accuracy_score),
                error_type: nested
                    .error_type
                    .or(entry.scores.error_type)
                    .map(ErrorType::from)
                    .unwrap_or(ErrorType::None),
            }
        })
        .collect();

    Ok(AssessmentScores {
        pronunciation_score: required("PronScore", nested.pron_score, top.pron_score)?,
        accuracy_score: required("AccuracyScore", nested.accuracy_score, top.accuracy_score)?,
        fluency_score: required("FluencyScore", nested.fluency_score, top.fluency_score)?,
        completeness_score: required(
            "CompletenessScore",
            nested.completeness_score,
            top.completeness_score,
        )?,
        prosody_score: nested.prosody_score.or(top.prosody_score),
        recognized_text: best.display.or(response.display_text),
        words,
    })
}
