use super::domain::{
    ApplicantContact, ApplicantId, ApplicationId, RankRecord, SpecialityId, SpecialityInfo,
    SubjectWeights,
};

/// Durable storage for rank records, keyed by application id. Implementations
/// must preserve insertion order in [`RatingRepository::for_speciality`] so the
/// rank builder's tie-break stays deterministic.
pub trait RatingRepository: Send + Sync {
    fn fetch(&self, id: ApplicationId) -> Result<Option<RankRecord>, StoreError>;
    fn insert(&self, record: RankRecord) -> Result<RankRecord, StoreError>;
    fn update(&self, record: RankRecord) -> Result<(), StoreError>;
    fn for_speciality(&self, speciality: SpecialityId) -> Result<Vec<RankRecord>, StoreError>;
}

/// Read-only lookups into the speciality catalogue and applicant register.
/// The engine never walks an entity graph; it asks for exactly these fields.
pub trait AdmissionsDirectory: Send + Sync {
    fn subject_weights(&self, speciality: SpecialityId) -> Result<SubjectWeights, StoreError>;
    fn speciality(&self, speciality: SpecialityId) -> Result<SpecialityInfo, StoreError>;
    fn applicant(&self, applicant: ApplicantId) -> Result<ApplicantContact, StoreError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
