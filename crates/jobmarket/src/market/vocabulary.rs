use regex::Regex;
use std::sync::OnceLock;

/// Tag, display label and word-boundary pattern for every skill the
/// standard vocabulary tracks. Patterns are compiled case-insensitively.
const STANDARD_SKILLS: &[(&str, &str, &str)] = &[
    // Languages and query tools
    ("python", "Python", r"\bpython\b"),
    ("sql", "SQL", r"\bsql\b"),
    ("r", "R", r"\br\b"),
    ("java", "Java", r"\bjava\b"),
    ("scala", "Scala", r"\bscala\b"),
    ("sas", "SAS", r"\bsas\b"),
    ("spss", "SPSS", r"\bspss\b"),
    // Analyst tooling
    ("excel", "Excel", r"\bexcel\b"),
    ("tableau", "Tableau", r"\btableau\b"),
    ("power_bi", "Power BI", r"\bpower\s*bi\b"),
    // Data platforms
    ("spark", "Spark", r"\bspark\b"),
    ("hadoop", "Hadoop", r"\bhadoop\b"),
    ("hive", "Hive", r"\bhive\b"),
    ("kafka", "Kafka", r"\bkafka\b"),
    ("snowflake", "Snowflake", r"\bsnowflake\b"),
    ("databricks", "Databricks", r"\bdatabricks\b"),
    ("airflow", "Airflow", r"\bairflow\b"),
    ("etl", "ETL", r"\betl\b"),
    // Cloud
    ("aws", "AWS", r"\baws\b"),
    ("azure", "Azure", r"\bazure\b"),
    ("gcp", "GCP", r"\b(gcp|google\s+cloud)\b"),
    // Modeling and statistics
    ("machine_learning", "Machine Learning", r"\bmachine\s+learning\b"),
    ("deep_learning", "Deep Learning", r"\bdeep\s+learning\b"),
    ("nlp", "NLP", r"\b(nlp|natural\s+language\s+processing)\b"),
    ("statistics", "Statistics", r"\bstatistic(s|al)?\b"),
    // Python ecosystem
    ("pandas", "Pandas", r"\bpandas\b"),
    ("numpy", "NumPy", r"\bnumpy\b"),
    ("tensorflow", "TensorFlow", r"\btensorflow\b"),
    ("pytorch", "PyTorch", r"\bpytorch\b"),
    ("scikit_learn", "scikit-learn", r"\bscikit[\s-]*learn\b"),
    // Engineering practice
    ("git", "Git", r"\bgit\b"),
    ("docker", "Docker", r"\bdocker\b"),
];

#[derive(Debug, Clone)]
pub struct SkillSpec {
    pub tag: &'static str,
    pub label: &'static str,
    pattern: Regex,
}

impl SkillSpec {
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// The set of skills mined from job descriptions. Callers hand a
/// vocabulary to the importer rather than reaching for a global, so
/// trimmed-down or extended lists can be swapped in.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    skills: Vec<SkillSpec>,
}

impl SkillVocabulary {
    /// The standard vocabulary, compiled once per process.
    pub fn standard() -> Self {
        static STANDARD: OnceLock<SkillVocabulary> = OnceLock::new();
        STANDARD
            .get_or_init(|| {
                // The table above is fixed, so compilation cannot fail at runtime.
                Self::from_entries(STANDARD_SKILLS).expect("standard skill patterns compile")
            })
            .clone()
    }

    pub fn from_entries(
        entries: &[(&'static str, &'static str, &'static str)],
    ) -> Result<Self, regex::Error> {
        let mut skills = Vec::with_capacity(entries.len());
        for &(tag, label, pattern) in entries {
            skills.push(SkillSpec {
                tag,
                label,
                pattern: Regex::new(&format!("(?i:{pattern})"))?,
            });
        }
        Ok(Self { skills })
    }

    pub fn skills(&self) -> &[SkillSpec] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn label_for(&self, tag: &str) -> Option<&'static str> {
        self.skills
            .iter()
            .find(|skill| skill.tag == tag)
            .map(|skill| skill.label)
    }
}
