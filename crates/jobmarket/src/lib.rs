pub mod config;
pub mod error;
pub mod market;
pub mod pipeline;
pub mod telemetry;

pub use error::AppError;
pub use market::{GroupBy, JobDataset, JobFilter, JobRecord, Seniority, SkillVocabulary};
pub use pipeline::DatasetImporter;
