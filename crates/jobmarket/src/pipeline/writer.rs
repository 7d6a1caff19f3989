use crate::market::dataset::JobDataset;
use crate::pipeline::PipelineError;
use std::io::Write;
use std::path::Path;

const FIXED_COLUMNS: &[&str] = &[
    "job_title",
    "company",
    "industry",
    "city",
    "state",
    "seniority",
    "salary_low_k",
    "salary_high_k",
    "avg_salary_k",
    "rating",
];

/// Writes the cleaned dataset as a flat CSV for downstream charting.
/// After the fixed columns comes one `skill_<tag>` indicator column per
/// vocabulary entry, in vocabulary order, holding 1 or 0. Null fields
/// serialize as empty cells.
pub fn write_cleaned_csv<W: Write>(dataset: &JobDataset, writer: W) -> Result<(), PipelineError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = FIXED_COLUMNS.iter().map(|name| name.to_string()).collect();
    for skill in dataset.vocabulary().skills() {
        header.push(format!("skill_{}", skill.tag));
    }
    csv_writer.write_record(&header)?;

    for record in dataset.records() {
        let mut row: Vec<String> = vec![
            record.title.clone(),
            record.company.clone(),
            record.industry.clone().unwrap_or_default(),
            record.city.clone().unwrap_or_default(),
            record.state.to_string(),
            record.seniority.label().to_string(),
            amount_cell(record.salary_low_k),
            amount_cell(record.salary_high_k),
            amount_cell(record.avg_salary_k),
            amount_cell(record.rating),
        ];
        for skill in dataset.vocabulary().skills() {
            row.push(indicator_cell(record.has_skill(skill.tag)));
        }
        csv_writer.write_record(&row)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Creates missing parent directories, then writes the cleaned CSV.
pub fn write_cleaned_path<P: AsRef<Path>>(
    dataset: &JobDataset,
    path: P,
) -> Result<(), PipelineError> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_cleaned_csv(dataset, file)
}

fn amount_cell(value: Option<f64>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

fn indicator_cell(present: bool) -> String {
    if present { "1" } else { "0" }.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::domain::{JobRecord, Seniority};
    use crate::market::vocabulary::SkillVocabulary;
    use std::collections::BTreeSet;

    fn dataset() -> JobDataset {
        let vocabulary = SkillVocabulary::from_entries(&[
            ("sql", "SQL", r"\bsql\b"),
            ("python", "Python", r"\bpython\b"),
        ])
        .expect("vocabulary compiles");

        let records = vec![
            JobRecord {
                title: "Senior Data Analyst".to_string(),
                company: "Acme".to_string(),
                industry: None,
                city: Some("Austin".to_string()),
                state: "TX",
                seniority: Seniority::Senior,
                salary_low_k: Some(90.0),
                salary_high_k: Some(110.0),
                avg_salary_k: Some(100.0),
                hourly: false,
                rating: Some(4.0),
                skills: BTreeSet::from(["sql"]),
            },
            JobRecord {
                title: "Data Analyst".to_string(),
                company: "Initech".to_string(),
                industry: Some("Consulting".to_string()),
                city: None,
                state: "unknown",
                seniority: Seniority::Mid,
                salary_low_k: None,
                salary_high_k: None,
                avg_salary_k: None,
                hourly: true,
                rating: None,
                skills: BTreeSet::new(),
            },
        ];
        JobDataset::new(records, vocabulary, 2, 0)
    }

    fn written_lines(dataset: &JobDataset) -> Vec<String> {
        let mut buffer = Vec::new();
        write_cleaned_csv(dataset, &mut buffer).expect("write succeeds");
        String::from_utf8(buffer)
            .expect("valid utf-8")
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn header_lists_fixed_then_skill_columns_in_vocabulary_order() {
        let lines = written_lines(&dataset());
        assert_eq!(
            lines[0],
            "job_title,company,industry,city,state,seniority,salary_low_k,salary_high_k,avg_salary_k,rating,skill_sql,skill_python"
        );
    }

    #[test]
    fn rows_carry_labels_amounts_and_indicators() {
        let lines = written_lines(&dataset());
        assert_eq!(
            lines[1],
            "Senior Data Analyst,Acme,,Austin,TX,Senior,90,110,100,4,1,0"
        );
    }

    #[test]
    fn null_fields_serialize_as_empty_cells() {
        let lines = written_lines(&dataset());
        assert_eq!(lines[2], "Data Analyst,Initech,Consulting,,unknown,Mid-Level,,,,,0,0");
    }
}
