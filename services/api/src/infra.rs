use jobmarket::{GroupBy, JobDataset, Seniority};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) dataset: Arc<JobDataset>,
}

pub(crate) fn parse_seniority(raw: &str) -> Result<Seniority, String> {
    Seniority::parse(raw).ok_or_else(|| format!("unknown seniority level '{raw}'"))
}

pub(crate) fn parse_group_by(raw: &str) -> Result<GroupBy, String> {
    GroupBy::parse(raw).ok_or_else(|| format!("unknown report dimension '{raw}'"))
}

pub(crate) fn deserialize_optional_seniority<'de, D>(
    deserializer: D,
) -> Result<Option<Seniority>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_seniority(&value).map_err(serde::de::Error::custom))
        .transpose()
}

pub(crate) fn deserialize_optional_group_by<'de, D>(
    deserializer: D,
) -> Result<Option<GroupBy>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_group_by(&value).map_err(serde::de::Error::custom))
        .transpose()
}
