use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for exam subjects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub u32);

/// Identifier wrapper for registered applicants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub u32);

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub u32);

/// Identifier wrapper for specialities offered by a faculty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpecialityId(pub u32);

/// Per-speciality subject weight table. Keyed by subject so accumulation
/// runs in ascending subject id order.
pub type SubjectWeights = BTreeMap<SubjectId, f64>;

/// Exam marks attached to one application, keyed by subject.
pub type ExamMarks = BTreeMap<SubjectId, u16>;

/// Everything the core needs to (re)score one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub application_id: ApplicationId,
    pub applicant_id: ApplicantId,
    pub speciality_id: SpecialityId,
    pub exam_marks: ExamMarks,
    pub attestation_mark: u16,
}

/// Decision state of a rank record. Acceptance and a rejection message are
/// mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionState {
    Pending,
    Rejected(String),
    Accepted,
}

impl DecisionState {
    pub const fn accepted(&self) -> bool {
        matches!(self, DecisionState::Accepted)
    }

    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            DecisionState::Rejected(message) => Some(message),
            _ => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            DecisionState::Pending => "pending",
            DecisionState::Rejected(_) => "rejected",
            DecisionState::Accepted => "accepted",
        }
    }
}

/// Durable rank entry for one application. Owned by the application: created
/// at submission, overwritten on resubmission, removed with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankRecord {
    pub application_id: ApplicationId,
    pub applicant_id: ApplicantId,
    pub speciality_id: SpecialityId,
    pub composite_score: f64,
    pub state: DecisionState,
    /// Set once the applicant has received an enrollment email for this
    /// speciality, so repeated cutoff runs do not re-send.
    pub enrollment_notified: bool,
    pub submitted_at: DateTime<Utc>,
}

/// Administrative directive applied to a single application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    Accept,
    Reject(String),
    None,
}

/// Speciality fields the engine reads: notification subject line, cutoff
/// capacity, and the recruitment gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialityInfo {
    pub id: SpecialityId,
    pub title: String,
    pub enrollment_plan: u32,
    pub recruitment_completed: bool,
}

/// Applicant fields the engine reads when addressing a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// One position in a derived rank list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    pub applicant_id: ApplicantId,
    pub application_id: ApplicationId,
    pub composite_score: f64,
}
