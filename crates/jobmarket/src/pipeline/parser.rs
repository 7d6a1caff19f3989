use super::PipelineError;
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::io::Read;

const REQUIRED_COLUMNS: &[&str] = &[
    "Job Title",
    "Company Name",
    "Salary Estimate",
    "Location",
    "Rating",
    "Job Description",
];

#[derive(Debug, Clone)]
pub(crate) struct RawJobPosting {
    pub(crate) title: String,
    pub(crate) company: String,
    pub(crate) industry: Option<String>,
    pub(crate) salary_text: Option<String>,
    pub(crate) location_text: Option<String>,
    pub(crate) rating: Option<f64>,
    pub(crate) description: Option<String>,
}

pub(crate) fn parse_postings<R: Read>(reader: R) -> Result<Vec<RawJobPosting>, PipelineError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    validate_headers(csv_reader.headers()?)?;

    let mut postings = Vec::new();
    for record in csv_reader.deserialize::<JobRow>() {
        let row = record?;
        postings.push(RawJobPosting {
            title: row.job_title.trim().to_string(),
            company: clean_company(&row.company_name),
            industry: row.industry,
            salary_text: row.salary_estimate,
            location_text: row.location,
            rating: parse_rating(row.rating.as_deref()),
            description: row.job_description,
        });
    }

    Ok(postings)
}

fn validate_headers(headers: &csv::StringRecord) -> Result<(), PipelineError> {
    let present: HashSet<&str> = headers.iter().collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !present.contains(**column))
        .map(|column| (*column).to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::MissingColumns { columns: missing })
    }
}

#[derive(Debug, Deserialize)]
struct JobRow {
    #[serde(rename = "Job Title")]
    job_title: String,
    #[serde(rename = "Company Name")]
    company_name: String,
    #[serde(
        rename = "Salary Estimate",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    salary_estimate: Option<String>,
    #[serde(rename = "Location", default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(rename = "Rating", default, deserialize_with = "empty_string_as_none")]
    rating: Option<String>,
    #[serde(
        rename = "Job Description",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    job_description: Option<String>,
    #[serde(rename = "Industry", default, deserialize_with = "empty_string_as_none")]
    industry: Option<String>,
}

/// Glassdoor company cells often carry the star rating on a trailing
/// line, e.g. `Tecolote Research\n3.8`. Strip it when it parses as a
/// number, otherwise keep the cell as scraped.
fn clean_company(raw: &str) -> String {
    match raw.rsplit_once('\n') {
        Some((name, suffix)) if suffix.trim().parse::<f64>().is_ok() => name.trim().to_string(),
        _ => raw.trim().to_string(),
    }
}

/// Ratings outside the 0 to 5 star scale, including the -1 placeholder
/// Glassdoor uses for missing values, degrade to null.
fn parse_rating(raw: Option<&str>) -> Option<f64> {
    let value: f64 = raw?.trim().parse().ok()?;
    (0.0..=5.0).contains(&value).then_some(value)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
