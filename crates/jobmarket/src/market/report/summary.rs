use super::super::domain::{GroupBy, JobRecord, Seniority};
use super::super::vocabulary::SkillVocabulary;
use super::views::{
    CountEntry, GroupStatsEntry, MarketInsights, MarketReportSummary, SkillFrequencyEntry,
    SkillPairEntry,
};
use crate::pipeline::location::state_label;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct GroupStats {
    pub count: usize,
    pub salaries_k: Vec<f64>,
}

impl GroupStats {
    fn observe(&mut self, record: &JobRecord) {
        self.count += 1;
        if let Some(avg) = record.avg_salary_k {
            self.salaries_k.push(avg);
        }
    }
}

/// Accumulated statistics over one filtered snapshot. Built in a single
/// pass, then flattened into ordered views by [`MarketReport::summary`].
#[derive(Debug)]
pub struct MarketReport {
    pub group_by: GroupBy,
    pub total_jobs: usize,
    pub salaries_k: Vec<f64>,
    pub groups: HashMap<&'static str, GroupStats>,
    pub skill_counts: HashMap<&'static str, usize>,
    pub pair_mentions: HashMap<(&'static str, &'static str), usize>,
    pub state_counts: HashMap<&'static str, usize>,
    pub city_counts: HashMap<String, usize>,
    pub company_counts: HashMap<String, usize>,
    pub industry_counts: HashMap<String, usize>,
}

impl MarketReport {
    pub fn build(records: &[&JobRecord], group_by: GroupBy) -> Self {
        let mut report = Self {
            group_by,
            total_jobs: records.len(),
            salaries_k: Vec::new(),
            groups: HashMap::new(),
            skill_counts: HashMap::new(),
            pair_mentions: HashMap::new(),
            state_counts: HashMap::new(),
            city_counts: HashMap::new(),
            company_counts: HashMap::new(),
            industry_counts: HashMap::new(),
        };

        for record in records {
            if let Some(avg) = record.avg_salary_k {
                report.salaries_k.push(avg);
            }

            match group_by {
                GroupBy::Seniority => report
                    .groups
                    .entry(record.seniority.key())
                    .or_default()
                    .observe(record),
                GroupBy::State => report.groups.entry(record.state).or_default().observe(record),
                // A posting naming several skills counts towards each of
                // them, so the skill dimension is not a partition.
                GroupBy::Skill => {
                    for &tag in &record.skills {
                        report.groups.entry(tag).or_default().observe(record);
                    }
                }
            }

            *report.state_counts.entry(record.state).or_default() += 1;
            *report
                .company_counts
                .entry(record.company.clone())
                .or_default() += 1;
            if let Some(city) = &record.city {
                *report.city_counts.entry(city.clone()).or_default() += 1;
            }
            if let Some(industry) = &record.industry {
                *report.industry_counts.entry(industry.clone()).or_default() += 1;
            }

            // The skills set iterates sorted, so pair keys come out in
            // canonical alphabetical order.
            let tags: Vec<&'static str> = record.skills.iter().copied().collect();
            for &tag in &tags {
                *report.skill_counts.entry(tag).or_default() += 1;
            }
            for (index, &first) in tags.iter().enumerate() {
                for &second in &tags[index + 1..] {
                    *report.pair_mentions.entry((first, second)).or_default() += 1;
                }
            }
        }

        report
    }

    pub fn jobs_with_salary(&self) -> usize {
        self.salaries_k.len()
    }

    /// Flattens the accumulators into deterministically ordered views.
    /// `top` caps the open-ended lists (pairs, cities, companies,
    /// industries); groups and skill frequencies stay complete.
    pub fn summary(&self, top: usize, vocabulary: &SkillVocabulary) -> MarketReportSummary {
        MarketReportSummary {
            group_by: self.group_by,
            group_by_label: self.group_by.label(),
            total_jobs: self.total_jobs,
            jobs_with_salary: self.jobs_with_salary(),
            median_salary_k: median(&self.salaries_k),
            mean_salary_k: mean(&self.salaries_k),
            groups: self.group_entries(vocabulary),
            skill_frequencies: self.skill_frequency_entries(vocabulary),
            skill_pairs: self.skill_pair_entries(top),
            top_cities: top_counts(&self.city_counts, top),
            top_companies: top_counts(&self.company_counts, top),
            top_industries: top_counts(&self.industry_counts, top),
        }
    }

    fn group_entries(&self, vocabulary: &SkillVocabulary) -> Vec<GroupStatsEntry> {
        match self.group_by {
            GroupBy::Seniority => Seniority::ordered()
                .into_iter()
                .filter_map(|level| {
                    self.groups
                        .get(level.key())
                        .map(|stats| self.group_entry(level.key(), level.label(), stats))
                })
                .collect(),
            GroupBy::State => {
                let mut entries: Vec<GroupStatsEntry> = self
                    .groups
                    .iter()
                    .map(|(&code, stats)| self.group_entry(code, state_label(code), stats))
                    .collect();
                sort_entries(&mut entries);
                entries
            }
            GroupBy::Skill => {
                let mut entries: Vec<GroupStatsEntry> = self
                    .groups
                    .iter()
                    .map(|(&tag, stats)| {
                        self.group_entry(tag, vocabulary.label_for(tag).unwrap_or(tag), stats)
                    })
                    .collect();
                sort_entries(&mut entries);
                entries
            }
        }
    }

    fn group_entry(
        &self,
        key: &'static str,
        label: &'static str,
        stats: &GroupStats,
    ) -> GroupStatsEntry {
        GroupStatsEntry {
            key,
            label,
            count: stats.count,
            share_pct: percentage(stats.count, self.total_jobs),
            median_salary_k: median(&stats.salaries_k),
            mean_salary_k: mean(&stats.salaries_k),
        }
    }

    fn skill_frequency_entries(&self, vocabulary: &SkillVocabulary) -> Vec<SkillFrequencyEntry> {
        let mut entries: Vec<SkillFrequencyEntry> = self
            .skill_counts
            .iter()
            .map(|(&tag, &count)| SkillFrequencyEntry {
                tag,
                label: vocabulary.label_for(tag).unwrap_or(tag),
                count,
                pct_of_jobs: percentage(count, self.total_jobs),
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(b.tag)));
        entries
    }

    fn skill_pair_entries(&self, top: usize) -> Vec<SkillPairEntry> {
        let mut entries: Vec<SkillPairEntry> = self
            .pair_mentions
            .iter()
            .map(|(&(first, second), &both)| {
                let either = self.skill_counts.get(first).copied().unwrap_or(0)
                    + self.skill_counts.get(second).copied().unwrap_or(0)
                    - both;
                SkillPairEntry {
                    first,
                    second,
                    both,
                    either,
                    rate_pct: percentage(both, either),
                }
            })
            .collect();
        entries.sort_by(|a, b| {
            b.rate_pct
                .total_cmp(&a.rate_pct)
                .then_with(|| a.first.cmp(b.first))
                .then_with(|| a.second.cmp(b.second))
        });
        entries.truncate(top);
        entries
    }
}

impl MarketReportSummary {
    pub fn insights(&self, records: &[&JobRecord]) -> MarketInsights {
        super::generate_insights(self, records)
    }
}

fn sort_entries(entries: &mut [GroupStatsEntry]) {
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(b.key)));
}

fn top_counts(counts: &HashMap<String, usize>, top: usize) -> Vec<CountEntry> {
    let mut entries: Vec<CountEntry> = counts
        .iter()
        .map(|(name, &count)| CountEntry {
            name: name.clone(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    entries.truncate(top);
    entries
}

pub(crate) fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}
