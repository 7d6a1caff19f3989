use crate::pipeline::location::resolve_state;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sentinel state value for postings whose location cannot be resolved.
pub const UNKNOWN_STATE: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
    Unknown,
}

impl Seniority {
    pub const fn ordered() -> [Self; 4] {
        [Self::Junior, Self::Mid, Self::Senior, Self::Unknown]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Junior => "Junior",
            Self::Mid => "Mid-Level",
            Self::Senior => "Senior",
            Self::Unknown => "Unknown",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Mid => "mid",
            Self::Senior => "senior",
            Self::Unknown => "unknown",
        }
    }

    /// Accepts either the snake key or the display label, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "junior" => Some(Self::Junior),
            "mid" | "mid-level" | "mid level" => Some(Self::Mid),
            "senior" => Some(Self::Senior),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    Seniority,
    State,
    Skill,
}

impl GroupBy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Seniority => "Seniority Level",
            Self::State => "State",
            Self::Skill => "Skill",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "seniority" => Some(Self::Seniority),
            "state" => Some(Self::State),
            "skill" => Some(Self::Skill),
            _ => None,
        }
    }
}

/// One cleaned posting. Produced once by the pipeline and never mutated.
#[derive(Debug, Clone)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub industry: Option<String>,
    pub city: Option<String>,
    pub state: &'static str,
    pub seniority: Seniority,
    pub salary_low_k: Option<f64>,
    pub salary_high_k: Option<f64>,
    pub avg_salary_k: Option<f64>,
    /// Salary text carried an hourly-rate annotation.
    pub hourly: bool,
    pub rating: Option<f64>,
    pub skills: BTreeSet<&'static str>,
}

impl JobRecord {
    pub fn has_skill(&self, tag: &str) -> bool {
        self.skills.contains(tag)
    }
}

/// Filter criteria handed to the aggregator by the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub state: Option<String>,
    pub seniority: Option<Seniority>,
    pub salary_min_k: Option<f64>,
    pub salary_max_k: Option<f64>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.state.is_none()
            && self.seniority.is_none()
            && self.salary_min_k.is_none()
            && self.salary_max_k.is_none()
    }

    pub fn matches(&self, record: &JobRecord) -> bool {
        if let Some(state) = self.state.as_deref() {
            let wanted = match resolve_state(state) {
                Some(code) => code,
                None if state.trim().eq_ignore_ascii_case(UNKNOWN_STATE) => UNKNOWN_STATE,
                // An unresolvable state filter selects nothing rather than erroring.
                None => return false,
            };
            if record.state != wanted {
                return false;
            }
        }

        if let Some(level) = self.seniority {
            if record.seniority != level {
                return false;
            }
        }

        if self.salary_min_k.is_some() || self.salary_max_k.is_some() {
            let Some(avg) = record.avg_salary_k else {
                return false;
            };
            if let Some(min) = self.salary_min_k {
                if avg < min {
                    return false;
                }
            }
            if let Some(max) = self.salary_max_k {
                if avg > max {
                    return false;
                }
            }
        }

        true
    }
}
