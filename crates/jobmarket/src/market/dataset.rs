use super::domain::{GroupBy, JobFilter, JobRecord};
use super::report::MarketReport;
use super::vocabulary::SkillVocabulary;

/// Immutable snapshot of one cleaned postings export.
///
/// Reports only ever borrow from the snapshot, so a shared `Arc` can
/// serve any number of concurrent report requests without locking.
#[derive(Debug, Clone)]
pub struct JobDataset {
    records: Vec<JobRecord>,
    vocabulary: SkillVocabulary,
    source_rows: usize,
    duplicates_dropped: usize,
}

impl JobDataset {
    pub fn new(
        records: Vec<JobRecord>,
        vocabulary: SkillVocabulary,
        source_rows: usize,
        duplicates_dropped: usize,
    ) -> Self {
        Self {
            records,
            vocabulary,
            source_rows,
            duplicates_dropped,
        }
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn vocabulary(&self) -> &SkillVocabulary {
        &self.vocabulary
    }

    /// Raw row count of the source export, duplicates included.
    pub fn source_rows(&self) -> usize {
        self.source_rows
    }

    pub fn duplicates_dropped(&self) -> usize {
        self.duplicates_dropped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrowing view of the records matching a filter. The snapshot
    /// itself is never mutated.
    pub fn snapshot(&self, filter: &JobFilter) -> Vec<&JobRecord> {
        self.records
            .iter()
            .filter(|record| filter.matches(record))
            .collect()
    }

    pub fn report(&self, filter: &JobFilter, group_by: GroupBy) -> MarketReport {
        MarketReport::build(&self.snapshot(filter), group_by)
    }
}
