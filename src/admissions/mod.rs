//! Admission ranking and decision workflow.
//!
//! Composite scoring, per-speciality rank lists, the manual decision state
//! machine, and the enrollment-plan cutoff, wired over the storage and
//! notification traits in [`repository`] and [`notify`].

pub mod domain;
pub mod notify;
pub mod ranking;
pub mod repository;
pub mod scoring;
pub mod service;


pub use domain::{
    ApplicantContact, ApplicantId, ApplicationId, ApplicationSubmission, DecisionState, Directive,
    ExamMarks, RankEntry, RankRecord, SpecialityId, SpecialityInfo, SubjectId, SubjectWeights,
};
pub use notify::{Message, NotificationError, Notifier};
pub use ranking::build_rank;
pub use repository::{AdmissionsDirectory, RatingRepository, StoreError};
pub use scoring::{compute_composite, validate_marks, ScoringError, MAX_EXAM_MARK, MIN_EXAM_MARK};
pub use service::{AdmissionsError, AdmissionsService};
