pub mod location;
mod parser;
pub mod salary;
pub mod seniority;
pub mod skills;
pub mod writer;

use crate::config::DatasetConfig;
use crate::market::dataset::JobDataset;
use crate::market::domain::JobRecord;
use crate::market::vocabulary::SkillVocabulary;
use salary::SalaryParser;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::info;

macro_rules! re {
    ($name:ident, $($e:expr),* $(,)?) => {
        static $name: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(
            || regex::Regex::new(concat!($($e),*)).unwrap(),
        );
    };
}
pub(crate) use re;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to read job export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid job export CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("job export is missing required columns: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },
}

/// Turns a raw Glassdoor postings export into a cleaned [`JobDataset`].
///
/// Malformed field values degrade to null fields on the affected record;
/// only unreadable input or a header missing required columns aborts the
/// import.
#[derive(Debug, Clone)]
pub struct DatasetImporter {
    vocabulary: SkillVocabulary,
    hourly_annual_hours: Option<f64>,
}

impl Default for DatasetImporter {
    fn default() -> Self {
        Self::new(SkillVocabulary::standard())
    }
}

impl DatasetImporter {
    pub fn new(vocabulary: SkillVocabulary) -> Self {
        Self {
            vocabulary,
            hourly_annual_hours: None,
        }
    }

    pub fn from_config(config: &DatasetConfig) -> Self {
        Self::new(SkillVocabulary::standard()).with_hourly_annual_hours(config.hourly_annual_hours)
    }

    /// Enables annualizing of hourly salary text at the given yearly hours.
    pub fn with_hourly_annual_hours(mut self, hours: Option<f64>) -> Self {
        self.hourly_annual_hours = hours;
        self
    }

    pub fn import_path<P: AsRef<Path>>(&self, path: P) -> Result<JobDataset, PipelineError> {
        let file = std::fs::File::open(path)?;
        self.import_reader(file)
    }

    pub fn import_reader<R: Read>(&self, reader: R) -> Result<JobDataset, PipelineError> {
        let postings = parser::parse_postings(reader)?;
        let source_rows = postings.len();

        let salary_parser = SalaryParser::new(self.hourly_annual_hours);
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(postings.len());

        for posting in postings {
            let fingerprint = (
                posting.title.clone(),
                posting.company.clone(),
                posting.location_text.clone().unwrap_or_default(),
                posting.description.clone().unwrap_or_default(),
            );
            // Scraped exports routinely repeat postings; keep the first copy.
            if !seen.insert(fingerprint) {
                continue;
            }

            let salary = posting
                .salary_text
                .as_deref()
                .map(|text| salary_parser.parse(text))
                .unwrap_or_default();
            let location = location::normalize_location(posting.location_text.as_deref());
            let seniority = seniority::classify_seniority(&posting.title);
            let skills = skills::extract_skills(posting.description.as_deref(), &self.vocabulary);

            records.push(JobRecord {
                title: posting.title,
                company: posting.company,
                industry: posting.industry,
                city: location.city,
                state: location.state,
                seniority,
                salary_low_k: salary.low_k,
                salary_high_k: salary.high_k,
                avg_salary_k: salary.avg_k,
                hourly: salary.hourly,
                rating: posting.rating,
                skills,
            });
        }

        let duplicates = source_rows - records.len();
        info!(
            rows = source_rows,
            records = records.len(),
            duplicates,
            "imported job postings"
        );

        Ok(JobDataset::new(
            records,
            self.vocabulary.clone(),
            source_rows,
            duplicates,
        ))
    }
}
