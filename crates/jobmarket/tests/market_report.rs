use jobmarket::market::report::views::MarketReportSummary;
use jobmarket::{DatasetImporter, GroupBy, JobDataset, JobFilter, Seniority};

fn sample_dataset() -> JobDataset {
    let data = include_bytes!("../glassdoor_sample.csv");
    DatasetImporter::default()
        .import_reader(&data[..])
        .expect("sample export imports")
}

fn summary_for(dataset: &JobDataset, filter: &JobFilter, group_by: GroupBy) -> MarketReportSummary {
    dataset
        .report(filter, group_by)
        .summary(100, dataset.vocabulary())
}

#[test]
fn seniority_groups_partition_the_market() {
    let dataset = sample_dataset();
    let summary = summary_for(&dataset, &JobFilter::default(), GroupBy::Seniority);

    let keys: Vec<&str> = summary.groups.iter().map(|entry| entry.key).collect();
    assert_eq!(keys, vec!["junior", "mid", "senior"]);

    let counts: Vec<usize> = summary.groups.iter().map(|entry| entry.count).collect();
    assert_eq!(counts, vec![4, 13, 6]);
    assert_eq!(counts.iter().sum::<usize>(), summary.total_jobs);

    assert_eq!(summary.groups[0].median_salary_k, Some(54.0));
    assert_eq!(summary.groups[1].median_salary_k, Some(90.0));
    assert_eq!(summary.groups[2].median_salary_k, Some(130.75));
}

#[test]
fn overall_salary_statistics_ignore_unpriced_postings() {
    let dataset = sample_dataset();
    let summary = summary_for(&dataset, &JobFilter::default(), GroupBy::Seniority);

    assert_eq!(summary.total_jobs, 23);
    assert_eq!(summary.jobs_with_salary, 20);
    assert_eq!(summary.median_salary_k, Some(98.0));
    assert_eq!(summary.mean_salary_k, Some(98.0));
}

#[test]
fn state_groups_rank_by_volume_with_unknown_last() {
    let dataset = sample_dataset();
    let summary = summary_for(&dataset, &JobFilter::default(), GroupBy::State);

    assert_eq!(summary.groups.len(), 13);

    let texas = &summary.groups[0];
    assert_eq!(texas.key, "TX");
    assert_eq!(texas.label, "Texas");
    assert_eq!(texas.count, 4);
    assert!((texas.share_pct - 400.0 / 23.0).abs() < 1e-9);

    assert_eq!(summary.groups[1].key, "NY");
    assert_eq!(summary.groups[1].count, 3);

    assert!(summary
        .groups
        .windows(2)
        .all(|pair| pair[0].count >= pair[1].count));
    assert_eq!(summary.groups.last().expect("groups non-empty").key, "unknown");
}

#[test]
fn skill_frequencies_rank_most_requested_first() {
    let dataset = sample_dataset();
    let summary = summary_for(&dataset, &JobFilter::default(), GroupBy::Seniority);

    // Every vocabulary skill is mentioned at least once in the sample.
    assert_eq!(summary.skill_frequencies.len(), dataset.vocabulary().len());

    let first = &summary.skill_frequencies[0];
    assert_eq!(first.tag, "sql");
    assert_eq!(first.label, "SQL");
    assert_eq!(first.count, 8);
    assert!((first.pct_of_jobs - 800.0 / 23.0).abs() < 1e-9);

    assert_eq!(summary.skill_frequencies[1].tag, "excel");
    assert_eq!(summary.skill_frequencies[1].count, 7);
    assert_eq!(summary.skill_frequencies[2].tag, "python");
    assert_eq!(summary.skill_frequencies[2].count, 5);
}

#[test]
fn skill_pairs_report_union_rates() {
    let dataset = sample_dataset();
    let summary = summary_for(&dataset, &JobFilter::default(), GroupBy::Seniority);

    let top = &summary.skill_pairs[0];
    assert_eq!((top.first, top.second), ("azure", "databricks"));
    assert_eq!(top.rate_pct, 100.0);

    let excel_sql = summary
        .skill_pairs
        .iter()
        .find(|pair| pair.first == "excel" && pair.second == "sql")
        .expect("excel and sql co-occur");
    assert_eq!(excel_sql.both, 4);
    assert_eq!(excel_sql.either, 11);
    assert!((excel_sql.rate_pct - 400.0 / 11.0).abs() < 1e-9);
}

#[test]
fn filters_restrict_the_snapshot() {
    let dataset = sample_dataset();

    let texas = JobFilter {
        state: Some("Texas".to_string()),
        ..JobFilter::default()
    };
    assert_eq!(summary_for(&dataset, &texas, GroupBy::Seniority).total_jobs, 4);

    let texas_paid = JobFilter {
        state: Some("TX".to_string()),
        salary_min_k: Some(60.0),
        ..JobFilter::default()
    };
    assert_eq!(
        summary_for(&dataset, &texas_paid, GroupBy::Seniority).total_jobs,
        2
    );

    let texas_senior = JobFilter {
        state: Some("TX".to_string()),
        seniority: Some(Seniority::Senior),
        ..JobFilter::default()
    };
    let summary = summary_for(&dataset, &texas_senior, GroupBy::Seniority);
    assert_eq!(summary.total_jobs, 1);
    assert_eq!(summary.groups[0].key, "senior");
}

#[test]
fn unmatched_filters_produce_an_empty_report_not_an_error() {
    let dataset = sample_dataset();
    let filter = JobFilter {
        state: Some("Atlantis".to_string()),
        ..JobFilter::default()
    };

    let snapshot = dataset.snapshot(&filter);
    let summary = summary_for(&dataset, &filter, GroupBy::State);
    assert_eq!(summary.total_jobs, 0);
    assert!(summary.groups.is_empty());
    assert_eq!(summary.median_salary_k, None);

    let insights = summary.insights(&snapshot);
    assert_eq!(
        insights.highlights,
        vec!["No postings matched the requested filters".to_string()]
    );
}

#[test]
fn insights_summarize_the_whole_market() {
    let dataset = sample_dataset();
    let snapshot = dataset.snapshot(&JobFilter::default());
    let summary = summary_for(&dataset, &JobFilter::default(), GroupBy::Seniority);
    let insights = summary.insights(&snapshot);

    assert_eq!(insights.total_jobs, 23);
    assert_eq!(insights.jobs_with_salary, 20);
    assert_eq!(insights.unique_companies, 14);
    assert_eq!(insights.states_represented, 12);

    let top_state = insights.top_state.expect("top state present");
    assert_eq!(top_state.code, "TX");
    assert_eq!(top_state.count, 4);

    let growth = insights
        .junior_to_senior_growth_pct
        .expect("growth present");
    assert!((growth - 7675.0 / 54.0).abs() < 1e-9);

    let top_three = insights
        .top_three_state_share_pct
        .expect("top three share present");
    assert!((top_three - 900.0 / 23.0).abs() < 1e-9);

    assert_eq!(insights.top_skills[0].tag, "sql");
    assert_eq!(
        insights.highlights[0],
        "23 postings from 14 companies across 12 states"
    );
    assert_eq!(
        insights.highlights[1],
        "Median advertised salary is $98K across 20 priced postings"
    );
}

#[test]
fn top_caps_shorten_open_ended_lists_only() {
    let dataset = sample_dataset();
    let summary = dataset
        .report(&JobFilter::default(), GroupBy::Seniority)
        .summary(3, dataset.vocabulary());

    assert_eq!(summary.top_companies.len(), 3);
    assert_eq!(summary.top_companies[0].name, "Summit Finance");
    assert_eq!(summary.top_companies[0].count, 3);

    assert_eq!(summary.top_cities[0].name, "New York");
    assert_eq!(summary.top_cities[0].count, 3);

    assert_eq!(summary.top_industries[0].name, "Information Technology");
    assert_eq!(summary.top_industries[0].count, 6);

    assert_eq!(summary.skill_pairs.len(), 3);
    assert_eq!(summary.groups.len(), 3);
    assert_eq!(summary.skill_frequencies.len(), dataset.vocabulary().len());
}

#[test]
fn repeated_reports_over_the_same_snapshot_are_identical() {
    let dataset = sample_dataset();
    let filter = JobFilter {
        salary_min_k: Some(50.0),
        ..JobFilter::default()
    };

    let first = summary_for(&dataset, &filter, GroupBy::State);
    let second = summary_for(&dataset, &filter, GroupBy::State);

    let first_json = serde_json::to_value(&first).expect("summary serializes");
    let second_json = serde_json::to_value(&second).expect("summary serializes");
    assert_eq!(first_json, second_json);
}
