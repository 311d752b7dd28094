use super::domain::{ExamMarks, SubjectId, SubjectWeights};
use crate::config::ScoringPolicy;

/// Lowest mark the external testing service issues.
pub const MIN_EXAM_MARK: u16 = 100;
/// Highest mark the external testing service issues.
pub const MAX_EXAM_MARK: u16 = 200;

/// Scoring failure. Both variants indicate bad input data, never a policy
/// decision, and abort the computation instead of substituting defaults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("no subject weight defined for {subject:?}")]
    MissingWeight { subject: SubjectId },
    #[error("mark {value} for {subject:?} outside the valid 100..=200 range")]
    MarkOutOfRange { subject: SubjectId, value: u16 },
}

/// Composite mark for one application:
/// `zno_weight * Σ(weight_s * mark_s) + att_weight * attestation_mark`.
///
/// Every marked subject must carry a weight in `weights`; a missing weight is
/// a data-integrity fault. Marks iterate in ascending subject id order, so the
/// accumulated sum is reproducible across runs.
pub fn compute_composite(
    policy: &ScoringPolicy,
    weights: &SubjectWeights,
    marks: &ExamMarks,
    attestation_mark: u16,
) -> Result<f64, ScoringError> {
    let mut weighted_sum = 0.0;
    for (subject, mark) in marks {
        let weight = weights
            .get(subject)
            .ok_or(ScoringError::MissingWeight { subject: *subject })?;
        weighted_sum += weight * f64::from(*mark);
    }

    Ok(policy.zno_weight * weighted_sum + policy.att_weight * f64::from(attestation_mark))
}

/// Range check applied at submission time, before anything is persisted.
pub fn validate_marks(marks: &ExamMarks) -> Result<(), ScoringError> {
    for (subject, mark) in marks {
        if !(MIN_EXAM_MARK..=MAX_EXAM_MARK).contains(mark) {
            return Err(ScoringError::MarkOutOfRange {
                subject: *subject,
                value: *mark,
            });
        }
    }
    Ok(())
}
