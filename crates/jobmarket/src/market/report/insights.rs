use super::super::domain::{JobRecord, Seniority, UNKNOWN_STATE};
use super::summary::{median, percentage};
use super::views::{MarketInsights, MarketReportSummary, TopStateEntry};
use crate::pipeline::location::state_label;
use std::collections::{HashMap, HashSet};

pub(crate) fn generate_insights(
    summary: &MarketReportSummary,
    records: &[&JobRecord],
) -> MarketInsights {
    if records.is_empty() {
        return MarketInsights {
            total_jobs: 0,
            jobs_with_salary: 0,
            median_salary_k: None,
            unique_companies: 0,
            states_represented: 0,
            junior_to_senior_growth_pct: None,
            top_state: None,
            top_three_state_share_pct: None,
            top_skills: Vec::new(),
            highlights: vec!["No postings matched the requested filters".to_string()],
        };
    }

    let unique_companies = records
        .iter()
        .map(|record| record.company.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut state_counts: HashMap<&'static str, usize> = HashMap::new();
    for record in records {
        *state_counts.entry(record.state).or_default() += 1;
    }
    let states_represented = state_counts
        .keys()
        .filter(|code| **code != UNKNOWN_STATE)
        .count();

    let mut states: Vec<(&'static str, usize)> = state_counts.into_iter().collect();
    states.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    let top_state = states.first().map(|&(code, count)| TopStateEntry {
        code,
        label: state_label(code),
        count,
        share_pct: percentage(count, records.len()),
    });
    let top_three: usize = states.iter().take(3).map(|(_, count)| count).sum();
    let top_three_state_share_pct = Some(percentage(top_three, records.len()));

    let seniority_median = |level: Seniority| {
        let salaries: Vec<f64> = records
            .iter()
            .filter(|record| record.seniority == level)
            .filter_map(|record| record.avg_salary_k)
            .collect();
        median(&salaries)
    };
    let junior_to_senior_growth_pct =
        match (seniority_median(Seniority::Junior), seniority_median(Seniority::Senior)) {
            (Some(junior), Some(senior)) if junior > 0.0 => {
                Some((senior - junior) / junior * 100.0)
            }
            _ => None,
        };

    let top_skills: Vec<_> = summary.skill_frequencies.iter().take(3).cloned().collect();

    let mut highlights = Vec::new();
    highlights.push(format!(
        "{} postings from {} companies across {} states",
        summary.total_jobs, unique_companies, states_represented
    ));

    if let Some(median_k) = summary.median_salary_k {
        highlights.push(format!(
            "Median advertised salary is ${median_k:.0}K across {} priced postings",
            summary.jobs_with_salary
        ));
    } else {
        highlights.push("No postings carry a usable salary estimate".to_string());
    }

    if let Some(skill) = top_skills.first() {
        highlights.push(format!(
            "{} is the most requested skill, named in {:.0}% of postings",
            skill.label, skill.pct_of_jobs
        ));
    }

    if let Some(growth) = junior_to_senior_growth_pct {
        highlights.push(format!(
            "Median salary grows {growth:.0}% from junior to senior roles"
        ));
    }

    if let (Some(state), Some(three_share)) = (&top_state, top_three_state_share_pct) {
        highlights.push(format!(
            "{} leads with {} postings ({:.0}% of the market); the top three states hold {:.0}%",
            state.label, state.count, state.share_pct, three_share
        ));
    }

    MarketInsights {
        total_jobs: summary.total_jobs,
        jobs_with_salary: summary.jobs_with_salary,
        median_salary_k: summary.median_salary_k,
        unique_companies,
        states_represented,
        junior_to_senior_growth_pct,
        top_state,
        top_three_state_share_pct,
        top_skills,
        highlights,
    }
}
