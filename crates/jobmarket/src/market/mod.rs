pub mod dataset;
pub mod domain;
pub mod report;
pub mod vocabulary;

pub use dataset::JobDataset;
pub use domain::{GroupBy, JobFilter, JobRecord, Seniority};
pub use vocabulary::SkillVocabulary;
