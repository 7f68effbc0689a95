//! The pronunciation-assessment oracle contract.

use std::future::Future;
use std::sync::Arc;

use crate::error::AssessResult;
use crate::types::{AssessmentRequest, AssessmentScores};

/// An external service that scores a recording against its reference text.
///
/// Implementations make exactly one attempt per call. Recognition failures
/// (silence, unintelligible speech) and transport failures are both reported
/// through the returned error.
pub trait PronunciationOracle: Send + Sync {
    /// Scores one recording.
    fn assess(
        &self,
        request: &AssessmentRequest,
    ) -> impl Future<Output = AssessResult<AssessmentScores>> + Send;
}

impl<O: PronunciationOracle> PronunciationOracle for Arc<O> {
    fn assess(
        &self,
        request: &AssessmentRequest,
    ) -> impl Future<Output = AssessResult<AssessmentScores>> + Send {
        (**self).assess(request)
    }
}
