use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use crate::admissions::domain::{
    ApplicantContact, ApplicantId, ApplicationId, ApplicationSubmission, RankRecord, SpecialityId,
    SpecialityInfo, SubjectId, SubjectWeights,
};
use crate::admissions::notify::{NotificationError, Notifier};
use crate::admissions::repository::{
    AdmissionsDirectory, RatingRepository, StoreError,
};
use crate::admissions::service::AdmissionsService;
use crate::config::ScoringPolicy;

pub(super) const MATH: SubjectId = SubjectId(1);
pub(super) const PHYSICS: SubjectId = SubjectId(2);
pub(super) const SOFTWARE: SpecialityId = SpecialityId(10);

pub(super) fn policy() -> ScoringPolicy {
    ScoringPolicy {
        zno_weight: 0.6,
        att_weight: 0.4,
    }
}

/// Policy that maps a single full-weight subject mark straight through, so
/// rank tests can dictate composite scores exactly.
pub(super) fn passthrough_policy() -> ScoringPolicy {
    ScoringPolicy {
        zno_weight: 1.0,
        att_weight: 0.0,
    }
}

pub(super) fn weights() -> SubjectWeights {
    let mut weights = BTreeMap::new();
    weights.insert(MATH, 0.5);
    weights.insert(PHYSICS, 0.3);
    weights
}

pub(super) fn passthrough_weights() -> SubjectWeights {
    let mut weights = BTreeMap::new();
    weights.insert(MATH, 1.0);
    weights
}

pub(super) fn submission(
    application: u32,
    applicant: u32,
    marks: &[(SubjectId, u16)],
    attestation_mark: u16,
) -> ApplicationSubmission {
    ApplicationSubmission {
        application_id: ApplicationId(application),
        applicant_id: ApplicantId(applicant),
        speciality_id: SOFTWARE,
        exam_marks: marks.iter().copied().collect(),
        attestation_mark,
    }
}

pub(super) fn contact(applicant: u32) -> ApplicantContact {
    ApplicantContact {
        first_name: format!("First{applicant}"),
        last_name: format!("Last{applicant}"),
        email: format!("applicant{applicant}@example.com"),
    }
}

/// Insertion-ordered in-memory store so tie-break tests observe retrieval
/// order.
#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<Vec<RankRecord>>,
}

impl RatingRepository for MemoryRepository {
    fn fetch(&self, id: ApplicationId) -> Result<Option<RankRecord>, StoreError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        Ok(records.iter().find(|r| r.application_id == id).cloned())
    }

    fn insert(&self, record: RankRecord) -> Result<RankRecord, StoreError> {
        let mut records = self.records.lock().expect("repository mutex poisoned");
        if records.iter().any(|r| r.application_id == record.application_id) {
            return Err(StoreError::Conflict);
        }
        records.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: RankRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("repository mutex poisoned");
        match records
            .iter_mut()
            .find(|r| r.application_id == record.application_id)
        {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn for_speciality(&self, speciality: SpecialityId) -> Result<Vec<RankRecord>, StoreError> {
        let records = self.records.lock().expect("repository mutex poisoned");
        Ok(records
            .iter()
            .filter(|r| r.speciality_id == speciality)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(super) struct MemoryDirectory {
    weights: HashMap<SpecialityId, SubjectWeights>,
    specialities: Mutex<HashMap<SpecialityId, SpecialityInfo>>,
    applicants: HashMap<ApplicantId, ApplicantContact>,
}

impl MemoryDirectory {
    pub(super) fn with_speciality(weights: SubjectWeights, info: SpecialityInfo) -> Self {
        let mut weight_map = HashMap::new();
        weight_map.insert(info.id, weights);
        let mut specialities = HashMap::new();
        specialities.insert(info.id, info);
        Self {
            weights: weight_map,
            specialities: Mutex::new(specialities),
            applicants: HashMap::new(),
        }
    }

    pub(super) fn add_applicant(&mut self, applicant: ApplicantId, contact: ApplicantContact) {
        self.applicants.insert(applicant, contact);
    }

    pub(super) fn complete_recruitment(&self, speciality: SpecialityId) {
        let mut specialities = self.specialities.lock().expect("directory mutex poisoned");
        if let Some(info) = specialities.get_mut(&speciality) {
            info.recruitment_completed = true;
        }
    }
}

impl AdmissionsDirectory for MemoryDirectory {
    fn subject_weights(&self, speciality: SpecialityId) -> Result<SubjectWeights, StoreError> {
        self.weights
            .get(&speciality)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn speciality(&self, speciality: SpecialityId) -> Result<SpecialityInfo, StoreError> {
        self.specialities
            .lock()
            .expect("directory mutex poisoned")
            .get(&speciality)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn applicant(&self, applicant: ApplicantId) -> Result<ApplicantContact, StoreError> {
        self.applicants
            .get(&applicant)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SentMail {
    pub(super) recipient: String,
    pub(super) subject: String,
    pub(super) body: String,
}

#[derive(Default)]
pub(super) struct MemoryNotifier {
    sent: Mutex<Vec<SentMail>>,
}

impl MemoryNotifier {
    pub(super) fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotificationError> {
        self.sent.lock().expect("notifier mutex poisoned").push(SentMail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

pub(super) struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn notify(&self, _: &str, _: &str, _: &str) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("smtp offline".to_string()))
    }
}

pub(super) type Service =
    AdmissionsService<MemoryRepository, MemoryDirectory, MemoryNotifier>;

pub(super) fn speciality_info(plan: u32) -> SpecialityInfo {
    SpecialityInfo {
        id: SOFTWARE,
        title: "Software Engineering".to_string(),
        enrollment_plan: plan,
        recruitment_completed: false,
    }
}

/// Service over the default two-subject speciality with the given contacts
/// registered in the directory.
pub(super) fn build_service(
    policy: ScoringPolicy,
    weights: SubjectWeights,
    plan: u32,
    applicants: &[u32],
) -> (
    Arc<Service>,
    Arc<MemoryRepository>,
    Arc<MemoryDirectory>,
    Arc<MemoryNotifier>,
) {
    let mut directory = MemoryDirectory::with_speciality(weights, speciality_info(plan));
    for applicant in applicants {
        directory.add_applicant(ApplicantId(*applicant), contact(*applicant));
    }

    let repository = Arc::new(MemoryRepository::default());
    let directory = Arc::new(directory);
    let notifier = Arc::new(MemoryNotifier::default());
    let service = Arc::new(AdmissionsService::new(
        repository.clone(),
        directory.clone(),
        notifier.clone(),
        policy,
    ));
    (service, repository, directory, notifier)
}
