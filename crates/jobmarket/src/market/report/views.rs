use super::super::domain::GroupBy;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct GroupStatsEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub count: usize,
    pub share_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_salary_k: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_salary_k: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillFrequencyEntry {
    pub tag: &'static str,
    pub label: &'static str,
    pub count: usize,
    pub pct_of_jobs: f64,
}

/// Co-occurrence of two skills: `both` postings mention the pair,
/// `either` mention at least one of the two.
#[derive(Debug, Clone, Serialize)]
pub struct SkillPairEntry {
    pub first: &'static str,
    pub second: &'static str,
    pub both: usize,
    pub either: usize,
    pub rate_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountEntry {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketReportSummary {
    pub group_by: GroupBy,
    pub group_by_label: &'static str,
    pub total_jobs: usize,
    pub jobs_with_salary: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_salary_k: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_salary_k: Option<f64>,
    pub groups: Vec<GroupStatsEntry>,
    pub skill_frequencies: Vec<SkillFrequencyEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skill_pairs: Vec<SkillPairEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_cities: Vec<CountEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_companies: Vec<CountEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_industries: Vec<CountEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopStateEntry {
    pub code: &'static str,
    pub label: &'static str,
    pub count: usize,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketInsights {
    pub total_jobs: usize,
    pub jobs_with_salary: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_salary_k: Option<f64>,
    pub unique_companies: usize,
    pub states_represented: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub junior_to_senior_growth_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_state: Option<TopStateEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_three_state_share_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_skills: Vec<SkillFrequencyEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}
