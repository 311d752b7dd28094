use super::domain::{RankEntry, RankRecord};

/// Orders the rank records of one speciality into a descending rank list.
///
/// The sort is stable: records with equal composite scores keep the order in
/// which the repository returned them. No further tie-break (submission time
/// or otherwise) is applied. An empty input yields an empty list.
pub fn build_rank(records: &[RankRecord]) -> Vec<RankEntry> {
    let mut entries: Vec<RankEntry> = records
        .iter()
        .map(|record| RankEntry {
            applicant_id: record.applicant_id,
            application_id: record.application_id,
            composite_score: record.composite_score,
        })
        .collect();

    entries.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));
    entries
}

/// Rank positions admitted under the enrollment plan: the first
/// `min(capacity, len)` entries, in rank order.
pub fn cutoff(entries: &[RankEntry], capacity: u32) -> &[RankEntry] {
    let admitted = entries.len().min(capacity as usize);
    &entries[..admitted]
}
