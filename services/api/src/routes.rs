use crate::infra::{deserialize_optional_group_by, deserialize_optional_seniority, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{Local, NaiveDate};
use jobmarket::error::AppError;
use jobmarket::market::report::views::{MarketInsights, MarketReportSummary};
use jobmarket::market::report::MarketReport;
use jobmarket::{DatasetImporter, GroupBy, JobFilter, Seniority};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

/// Cap applied to the open-ended report lists when the request leaves
/// `top` unset.
const DEFAULT_TOP: usize = 10;

#[derive(Debug, Deserialize)]
pub(crate) struct MarketReportRequest {
    #[serde(default)]
    pub(crate) state: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_seniority")]
    pub(crate) seniority: Option<Seniority>,
    #[serde(default)]
    pub(crate) salary_min_k: Option<f64>,
    #[serde(default)]
    pub(crate) salary_max_k: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_group_by")]
    pub(crate) group_by: Option<GroupBy>,
    #[serde(default)]
    pub(crate) top: Option<usize>,
    #[serde(default)]
    pub(crate) jobs_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MarketReportResponse {
    pub(crate) generated_on: NaiveDate,
    pub(crate) data_source: MarketDataSource,
    pub(crate) summary: MarketReportSummary,
    pub(crate) insights: MarketInsights,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum MarketDataSource {
    Snapshot,
    InlineCsv,
}

#[derive(Debug, Serialize)]
pub(crate) struct SkillListEntry {
    pub(crate) tag: &'static str,
    pub(crate) label: &'static str,
}

pub(crate) fn market_router() -> axum::Router {
    axum::Router::new()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/market/skills", axum::routing::get(skills_endpoint))
        .route(
            "/api/v1/market/report",
            axum::routing::post(market_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn skills_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<Vec<SkillListEntry>> {
    let skills = state
        .dataset
        .vocabulary()
        .skills()
        .iter()
        .map(|skill| SkillListEntry {
            tag: skill.tag,
            label: skill.label,
        })
        .collect();
    Json(skills)
}

pub(crate) async fn market_report_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<MarketReportRequest>,
) -> Result<Json<MarketReportResponse>, AppError> {
    let MarketReportRequest {
        state: state_filter,
        seniority,
        salary_min_k,
        salary_max_k,
        group_by,
        top,
        jobs_csv,
    } = payload;

    let (dataset, data_source) = if let Some(csv) = jobs_csv {
        let reader = Cursor::new(csv.into_bytes());
        let imported = DatasetImporter::default().import_reader(reader)?;
        (Arc::new(imported), MarketDataSource::InlineCsv)
    } else {
        (state.dataset.clone(), MarketDataSource::Snapshot)
    };

    let filter = JobFilter {
        state: state_filter,
        seniority,
        salary_min_k,
        salary_max_k,
    };
    let group_by = group_by.unwrap_or(GroupBy::Seniority);
    let top = top.unwrap_or(DEFAULT_TOP);

    let snapshot = dataset.snapshot(&filter);
    let report = MarketReport::build(&snapshot, group_by);
    let summary = report.summary(top, dataset.vocabulary());
    let insights = summary.insights(&snapshot);

    Ok(Json(MarketReportResponse {
        generated_on: Local::now().date_naive(),
        data_source,
        summary,
        insights,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;

    const SAMPLE_CSV: &str = "Job Title,Company Name,Salary Estimate,Location,Rating,Job Description\n\
Senior Data Analyst,Acme Analytics,$90K-$110K (Glassdoor est.),\"Austin, TX\",4.1,Advanced SQL and Excel reporting\n\
Data Analyst,Initech,$60K-$80K,\"Sacramento, CA\",3.5,Dashboards in Tableau backed by SQL\n\
Junior Data Analyst,Hooli,,Remote,4.4,Entry level SQL cleanup\n";

    fn test_state() -> AppState {
        let dataset = DatasetImporter::default()
            .import_reader(Cursor::new(SAMPLE_CSV))
            .expect("sample import succeeds");
        let handle = PrometheusBuilder::new().build_recorder().handle();
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: Arc::new(handle),
            dataset: Arc::new(dataset),
        }
    }

    fn empty_request() -> MarketReportRequest {
        MarketReportRequest {
            state: None,
            seniority: None,
            salary_min_k: None,
            salary_max_k: None,
            group_by: None,
            top: None,
            jobs_csv: None,
        }
    }

    #[tokio::test]
    async fn market_report_endpoint_reports_on_the_loaded_snapshot() {
        let Json(body) = market_report_endpoint(Extension(test_state()), Json(empty_request()))
            .await
            .expect("report builds");

        assert_eq!(body.data_source, MarketDataSource::Snapshot);
        assert_eq!(body.summary.group_by, GroupBy::Seniority);
        assert_eq!(body.summary.total_jobs, 3);
        assert_eq!(body.summary.jobs_with_salary, 2);
        assert_eq!(body.summary.median_salary_k, Some(85.0));
        assert_eq!(body.summary.groups.len(), 3);
        assert_eq!(body.insights.top_skills[0].tag, "sql");
    }

    #[tokio::test]
    async fn market_report_endpoint_accepts_an_inline_export() {
        let request = MarketReportRequest {
            group_by: Some(GroupBy::State),
            jobs_csv: Some(SAMPLE_CSV.to_string()),
            ..empty_request()
        };

        let Json(body) = market_report_endpoint(Extension(test_state()), Json(request))
            .await
            .expect("report builds");

        assert_eq!(body.data_source, MarketDataSource::InlineCsv);
        assert_eq!(body.summary.group_by_label, "State");
        let keys: Vec<&str> = body.summary.groups.iter().map(|entry| entry.key).collect();
        assert_eq!(keys, vec!["CA", "TX", "unknown"]);
    }

    #[tokio::test]
    async fn market_report_endpoint_applies_filters() {
        let request = MarketReportRequest {
            state: Some("Texas".to_string()),
            ..empty_request()
        };

        let Json(body) = market_report_endpoint(Extension(test_state()), Json(request))
            .await
            .expect("report builds");

        assert_eq!(body.summary.total_jobs, 1);
        assert_eq!(body.summary.groups[0].key, "senior");
        assert_eq!(body.insights.unique_companies, 1);
    }

    #[tokio::test]
    async fn market_report_endpoint_handles_a_filter_matching_nothing() {
        let request = MarketReportRequest {
            state: Some("Atlantis".to_string()),
            ..empty_request()
        };

        let Json(body) = market_report_endpoint(Extension(test_state()), Json(request))
            .await
            .expect("empty result is not an error");

        assert_eq!(body.summary.total_jobs, 0);
        assert_eq!(body.summary.median_salary_k, None);
        assert!(body.summary.groups.is_empty());
        assert_eq!(
            body.insights.highlights,
            vec!["No postings matched the requested filters".to_string()]
        );
    }

    #[tokio::test]
    async fn market_report_endpoint_rejects_a_malformed_export() {
        let request = MarketReportRequest {
            jobs_csv: Some("Job Title,Location\nData Analyst,\"Austin, TX\"\n".to_string()),
            ..empty_request()
        };

        let err = market_report_endpoint(Extension(test_state()), Json(request))
            .await
            .expect_err("schema mismatch surfaces");

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn skills_endpoint_lists_the_vocabulary() {
        let state = test_state();
        let expected = state.dataset.vocabulary().len();

        let Json(skills) = skills_endpoint(Extension(state)).await;

        assert_eq!(skills.len(), expected);
        assert!(skills
            .iter()
            .any(|skill| skill.tag == "power_bi" && skill.label == "Power BI"));
    }

    #[test]
    fn report_requests_accept_seniority_labels() {
        let request: MarketReportRequest = serde_json::from_value(json!({
            "seniority": "Mid-Level",
            "group_by": "state"
        }))
        .expect("request parses");

        assert_eq!(request.seniority, Some(Seniority::Mid));
        assert_eq!(request.group_by, Some(GroupBy::State));

        let err = serde_json::from_value::<MarketReportRequest>(json!({ "seniority": "wizard" }))
            .expect_err("unknown level rejected");
        assert!(err.to_string().contains("unknown seniority level"));
    }
}
