//! Admission ranking and decision engine.
//!
//! The crate computes weighted composite scores for submitted applications,
//! builds per-speciality rank lists, and drives the pending/accepted/rejected
//! decision state machine with its notification side effects. Persistence,
//! HTTP routing, and document storage live behind the collaborator traits in
//! [`admissions::repository`] and [`admissions::notify`].

pub mod admissions;
pub mod config;
pub mod telemetry;

pub use admissions::{
    AdmissionsDirectory, AdmissionsError, AdmissionsService, ApplicantContact, ApplicationId,
    ApplicationSubmission, DecisionState, Directive, Notifier, NotificationError, RankEntry,
    RankRecord, RatingRepository, ScoringError, SpecialityInfo, StoreError,
};
pub use config::{AppConfig, ConfigError, ScoringPolicy};
