use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{
    ApplicantId, ApplicationId, ApplicationSubmission, DecisionState, Directive, RankEntry,
    RankRecord, SpecialityId,
};
use super::notify::{
    acceptance_message, enrollment_message, rejection_message, Message, Notifier,
};
use super::ranking;
use super::repository::{AdmissionsDirectory, RatingRepository, StoreError};
use super::scoring::{self, ScoringError};
use crate::config::ScoringPolicy;

/// Service composing the score calculator, rank builder, and decision state
/// machine over the storage and notification collaborators.
pub struct AdmissionsService<R, D, N> {
    repository: Arc<R>,
    directory: Arc<D>,
    notifier: Arc<N>,
    policy: ScoringPolicy,
    locks: Mutex<HashMap<ApplicationId, Arc<Mutex<()>>>>,
}

impl<R, D, N> AdmissionsService<R, D, N>
where
    R: RatingRepository + 'static,
    D: AdmissionsDirectory + 'static,
    N: Notifier + 'static,
{
    pub fn new(repository: Arc<R>, directory: Arc<D>, notifier: Arc<N>, policy: ScoringPolicy) -> Self {
        Self {
            repository,
            directory,
            notifier,
            policy,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Create the rank record for a newly submitted application. The composite
    /// score is computed here, at creation time, and the record starts Pending.
    pub fn register(
        &self,
        submission: &ApplicationSubmission,
    ) -> Result<RankRecord, AdmissionsError> {
        debug!(application = submission.application_id.0, "registering application");
        let score = self.score_submission(submission)?;

        let record = RankRecord {
            application_id: submission.application_id,
            applicant_id: submission.applicant_id,
            speciality_id: submission.speciality_id,
            composite_score: score,
            state: DecisionState::Pending,
            enrollment_notified: false,
            submitted_at: Utc::now(),
        };

        match self.repository.insert(record) {
            Ok(stored) => Ok(stored),
            Err(StoreError::Conflict) => {
                warn!(
                    application = submission.application_id.0,
                    "application already has a rank record"
                );
                Err(AdmissionsError::DuplicateApplication(submission.application_id))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Recompute the composite score after an application edit. A rejected
    /// record returns to Pending; an accepted one keeps its terminal state.
    pub fn resubmit(
        &self,
        submission: &ApplicationSubmission,
    ) -> Result<RankRecord, AdmissionsError> {
        let lock = self.application_lock(submission.application_id);
        let _serial = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut record = self
            .repository
            .fetch(submission.application_id)?
            .ok_or(AdmissionsError::UnknownApplication(submission.application_id))?;

        record.composite_score = self.score_submission(submission)?;
        if let DecisionState::Rejected(_) = record.state {
            record.state = DecisionState::Pending;
        }
        record.submitted_at = Utc::now();

        self.repository.update(record.clone())?;
        debug!(
            application = record.application_id.0,
            score = record.composite_score,
            "rank record rescored"
        );
        Ok(record)
    }

    /// Apply an administrative directive to one application.
    ///
    /// The read-transition-write sequence runs under a per-application lock,
    /// and a notification goes out only when the state actually changed, so
    /// replaying the same directive is idempotent and silent.
    pub fn decide(
        &self,
        application_id: ApplicationId,
        directive: &Directive,
    ) -> Result<RankRecord, AdmissionsError> {
        let lock = self.application_lock(application_id);
        let _serial = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut record = self
            .repository
            .fetch(application_id)?
            .ok_or(AdmissionsError::UnknownApplication(application_id))?;

        let next = apply_directive(&record.state, directive);
        if next == record.state {
            debug!(application = application_id.0, state = record.state.label(), "no transition");
            return Ok(record);
        }

        record.state = next;
        self.repository.update(record.clone())?;
        info!(
            application = application_id.0,
            state = record.state.label(),
            "decision applied"
        );

        match &record.state {
            DecisionState::Accepted => self.send_decision_email(&record, None),
            DecisionState::Rejected(reason) => {
                let reason = reason.clone();
                self.send_decision_email(&record, Some(&reason));
            }
            DecisionState::Pending => {}
        }

        Ok(record)
    }

    /// Rank list for one speciality, descending by composite score. Equal
    /// scores keep repository retrieval order.
    pub fn rank_list(&self, speciality: SpecialityId) -> Result<Vec<RankEntry>, AdmissionsError> {
        let records = self.repository.for_speciality(speciality)?;
        Ok(ranking::build_rank(&records))
    }

    /// Enrollment cutoff for a speciality whose recruitment has closed.
    ///
    /// The rank list is snapshotted before any notification is dispatched, so
    /// concurrent edits cannot change who is admitted mid-run. Each admitted
    /// applicant receives the enrollment email at most once across runs; the
    /// returned set is the full admitted set either way. A speciality still
    /// recruiting yields an empty set with no side effects.
    pub fn close_recruitment(
        &self,
        speciality: SpecialityId,
    ) -> Result<Vec<ApplicantId>, AdmissionsError> {
        let info = self.directory.speciality(speciality)?;
        if !info.recruitment_completed {
            debug!(speciality = speciality.0, "recruitment still open, no cutoff");
            return Ok(Vec::new());
        }

        let records = self.repository.for_speciality(speciality)?;
        let rank = ranking::build_rank(&records);
        let admitted: Vec<RankEntry> = ranking::cutoff(&rank, info.enrollment_plan).to_vec();
        info!(
            speciality = speciality.0,
            admitted = admitted.len(),
            plan = info.enrollment_plan,
            "recruitment closed, applying cutoff"
        );

        let mut enrolled = Vec::with_capacity(admitted.len());
        for entry in &admitted {
            enrolled.push(entry.applicant_id);
            self.notify_enrollment(entry, &info.title)?;
        }
        Ok(enrolled)
    }

    /// Current status label for one application, for listing views.
    pub fn status_of(&self, application_id: ApplicationId) -> Result<&'static str, AdmissionsError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(AdmissionsError::UnknownApplication(application_id))?;
        Ok(record.state.label())
    }

    fn score_submission(&self, submission: &ApplicationSubmission) -> Result<f64, AdmissionsError> {
        scoring::validate_marks(&submission.exam_marks)?;
        let weights = self.directory.subject_weights(submission.speciality_id)?;
        let score = scoring::compute_composite(
            &self.policy,
            &weights,
            &submission.exam_marks,
            submission.attestation_mark,
        )?;
        Ok(score)
    }

    /// Sends one enrollment email per applicant per speciality, flagging the
    /// record after the attempt so later cutoff runs skip it.
    fn notify_enrollment(&self, entry: &RankEntry, title: &str) -> Result<(), AdmissionsError> {
        let lock = self.application_lock(entry.application_id);
        let _serial = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut record = match self.repository.fetch(entry.application_id)? {
            Some(record) if !record.enrollment_notified => record,
            _ => return Ok(()),
        };

        match self.directory.applicant(entry.applicant_id) {
            Ok(contact) => {
                let message = enrollment_message(&contact, title);
                self.deliver(&contact.email, &message);
            }
            Err(err) => {
                warn!(
                    applicant = entry.applicant_id.0,
                    error = %err,
                    "no contact details for enrolled applicant"
                );
            }
        }

        record.enrollment_notified = true;
        self.repository.update(record)?;
        Ok(())
    }

    /// Builds and dispatches the acceptance or rejection email for an already
    /// committed transition. Lookup and delivery failures are logged only.
    fn send_decision_email(&self, record: &RankRecord, reason: Option<&str>) {
        let contact = match self.directory.applicant(record.applicant_id) {
            Ok(contact) => contact,
            Err(err) => {
                warn!(applicant = record.applicant_id.0, error = %err, "contact lookup failed");
                return;
            }
        };
        let title = match self.directory.speciality(record.speciality_id) {
            Ok(info) => info.title,
            Err(err) => {
                warn!(speciality = record.speciality_id.0, error = %err, "speciality lookup failed");
                return;
            }
        };

        let message = match reason {
            Some(reason) => rejection_message(&contact, &title, reason),
            None => acceptance_message(&contact, &title),
        };
        self.deliver(&contact.email, &message);
    }

    fn deliver(&self, recipient: &str, message: &Message) {
        if let Err(err) = self
            .notifier
            .notify(recipient, &message.subject, &message.body)
        {
            warn!(recipient, error = %err, "notification delivery failed");
        }
    }

    fn application_lock(&self, application_id: ApplicationId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(application_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Pure transition function for the manual decision path.
///
/// `Accepted` is terminal: neither a rejection nor the bare directive reverses
/// it. A rejection with an empty reason behaves like `Directive::None`, which
/// returns a rejected record to Pending.
fn apply_directive(state: &DecisionState, directive: &Directive) -> DecisionState {
    match directive {
        Directive::Accept => DecisionState::Accepted,
        Directive::Reject(reason) if !reason.is_empty() => match state {
            DecisionState::Accepted => DecisionState::Accepted,
            _ => DecisionState::Rejected(reason.clone()),
        },
        Directive::Reject(_) | Directive::None => match state {
            DecisionState::Accepted => DecisionState::Accepted,
            _ => DecisionState::Pending,
        },
    }
}

/// Error raised by the admissions service.
#[derive(Debug, thiserror::Error)]
pub enum AdmissionsError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no rank record for application {0:?}")]
    UnknownApplication(ApplicationId),
    #[error("application {0:?} already has a rank record")]
    DuplicateApplication(ApplicationId),
}
