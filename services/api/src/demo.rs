use clap::Args;
use jobmarket::config::AppConfig;
use jobmarket::error::AppError;
use jobmarket::market::report::MarketReport;
use jobmarket::pipeline::writer;
use jobmarket::{DatasetImporter, GroupBy, JobDataset, JobFilter, Seniority};
use std::io::Cursor;
use std::path::PathBuf;

const SAMPLE_EXPORT: &str = "\
Job Title,Company Name,Salary Estimate,Location,Rating,Industry,Job Description
Senior Data Analyst,Lakeview Analytics,$95K-$120K (Glassdoor est.),\"Austin, TX\",4.2,Information Technology,Own executive dashboards in Tableau backed by advanced SQL
Data Analyst,Prairie Insurance,\"$62,000 - $74,000\",\"Des Moines, IA\",3.6,Insurance,Excel reporting with a migration to Power BI underway
Junior Data Analyst,Harbor Health,$21-$27 Per Hour(Glassdoor est.),\"Portland, OR\",3.9,Health Care,Entry level SQL tidy-up and spreadsheet upkeep in Excel
Data Scientist,Cascade Labs,Employer Provided Salary:$135K-$160K,Remote,4.5,Information Technology,Python machine learning pipelines on AWS with Spark
Lead Data Engineer,Summit Logistics,$140K,\"Denver, CO\",4.0,Transportation,Airflow ETL into Snowflake with dbt and SQL
Data Analyst,Prairie Insurance,Unknown / Non-Applicable,\"Des Moines, IA\",3.6,Insurance,SAS to R migration for actuarial statistics
Analytics Intern,Beacon Media,$18-$22 Per Hour,\"Austin, TX\",3.3,Media,Support survey statistics in SPSS and Excel
Senior Machine Learning Engineer,Cascade Labs,$150K-$185K (Glassdoor est.),\"Seattle, WA\",4.5,Information Technology,Deep learning in PyTorch and TensorFlow served from GCP
";

#[derive(Args, Debug)]
pub(crate) struct CleanArgs {
    /// Raw postings export to clean (defaults to the configured path)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Destination for the cleaned CSV (defaults to the configured path)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct MarketReportArgs {
    /// Postings export to report on (defaults to the configured path)
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Keep postings from a single state (code or full name)
    #[arg(long)]
    pub(crate) state: Option<String>,
    /// Keep postings at a single seniority level
    #[arg(long, value_parser = crate::infra::parse_seniority)]
    pub(crate) seniority: Option<Seniority>,
    /// Keep postings with an average salary at or above this many $K
    #[arg(long)]
    pub(crate) salary_min_k: Option<f64>,
    /// Keep postings with an average salary at or below this many $K
    #[arg(long)]
    pub(crate) salary_max_k: Option<f64>,
    /// Dimension to group the report by (seniority, state or skill)
    #[arg(long, default_value = "seniority", value_parser = crate::infra::parse_group_by)]
    pub(crate) group_by: GroupBy,
    /// Cap for the ranked lists in the output
    #[arg(long, default_value_t = 10)]
    pub(crate) top: usize,
    /// Include the full per-skill frequency listing in the output
    #[arg(long)]
    pub(crate) list_skills: bool,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Optional postings export to demo against (defaults to a bundled sample)
    #[arg(long)]
    pub(crate) jobs_csv: Option<PathBuf>,
    /// Dimension to group the demo report by (seniority, state or skill)
    #[arg(long, default_value = "seniority", value_parser = crate::infra::parse_group_by)]
    pub(crate) group_by: GroupBy,
    /// Cap for the ranked lists in the output
    #[arg(long, default_value_t = 5)]
    pub(crate) top: usize,
    /// Include the full per-skill frequency listing in the demo output
    #[arg(long)]
    pub(crate) list_skills: bool,
}

pub(crate) fn run_clean(args: CleanArgs) -> Result<(), AppError> {
    let CleanArgs { input, output } = args;

    let config = AppConfig::load()?;
    let importer = DatasetImporter::from_config(&config.dataset);
    let input = input.unwrap_or(config.dataset.source_path);
    let output = output.unwrap_or(config.dataset.cleaned_path);

    let dataset = importer.import_path(&input)?;
    writer::write_cleaned_path(&dataset, &output)?;

    println!("Cleaned postings written to {}", output.display());
    println!(
        "- {} source rows -> {} records ({} duplicates dropped)",
        dataset.source_rows(),
        dataset.len(),
        dataset.duplicates_dropped()
    );
    println!(
        "- {} of {} records carry a usable salary estimate",
        dataset
            .records()
            .iter()
            .filter(|record| record.avg_salary_k.is_some())
            .count(),
        dataset.len()
    );

    Ok(())
}

pub(crate) fn run_market_report(args: MarketReportArgs) -> Result<(), AppError> {
    let MarketReportArgs {
        input,
        state,
        seniority,
        salary_min_k,
        salary_max_k,
        group_by,
        top,
        list_skills,
    } = args;

    let config = AppConfig::load()?;
    let importer = DatasetImporter::from_config(&config.dataset);
    let input = input.unwrap_or(config.dataset.source_path);
    let dataset = importer.import_path(&input)?;

    let filter = JobFilter {
        state,
        seniority,
        salary_min_k,
        salary_max_k,
    };
    render_market_report(&dataset, &filter, group_by, top, list_skills);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        jobs_csv,
        group_by,
        top,
        list_skills,
    } = args;

    println!("Job market analytics demo");
    match &jobs_csv {
        Some(path) => println!("Data source: {}", path.display()),
        None => println!("Data source: bundled sample export"),
    }

    let dataset = load_dataset_from_path(jobs_csv)?;
    println!(
        "Loaded {} postings ({} source rows, {} duplicates dropped)",
        dataset.len(),
        dataset.source_rows(),
        dataset.duplicates_dropped()
    );

    render_market_report(&dataset, &JobFilter::default(), group_by, top, list_skills);

    println!("\nFocused slice: senior postings in Texas");
    let focused = JobFilter {
        state: Some("TX".to_string()),
        seniority: Some(Seniority::Senior),
        ..JobFilter::default()
    };
    render_market_report(&dataset, &focused, GroupBy::State, top, false);

    Ok(())
}

pub(crate) fn load_dataset_from_path(jobs_csv: Option<PathBuf>) -> Result<JobDataset, AppError> {
    match jobs_csv {
        Some(path) => DatasetImporter::default()
            .import_path(path)
            .map_err(AppError::from),
        None => DatasetImporter::default()
            .import_reader(Cursor::new(SAMPLE_EXPORT))
            .map_err(AppError::from),
    }
}

pub(crate) fn render_market_report(
    dataset: &JobDataset,
    filter: &JobFilter,
    group_by: GroupBy,
    top: usize,
    list_skills: bool,
) {
    let snapshot = dataset.snapshot(filter);
    let report = MarketReport::build(&snapshot, group_by);
    let summary = report.summary(top, dataset.vocabulary());
    let insights = summary.insights(&snapshot);

    if filter.is_empty() {
        println!("\nMarket report over {} postings", summary.total_jobs);
    } else {
        println!(
            "\nMarket report over {} of {} postings (filters applied)",
            summary.total_jobs,
            dataset.len()
        );
    }

    match summary.median_salary_k {
        Some(median) => println!(
            "Median advertised salary ${median:.0}K across {} priced postings",
            summary.jobs_with_salary
        ),
        None => println!("No usable salary estimates in this selection"),
    }

    println!("\nPostings by {}", summary.group_by_label);
    for group in &summary.groups {
        match group.median_salary_k {
            Some(median) => println!(
                "- {}: {} postings ({:.0}%), median ${:.0}K",
                group.label, group.count, group.share_pct, median
            ),
            None => println!(
                "- {}: {} postings ({:.0}%), no salary data",
                group.label, group.count, group.share_pct
            ),
        }
    }

    if list_skills {
        println!("\nSkill frequencies");
        for skill in &summary.skill_frequencies {
            println!(
                "- {}: {} postings ({:.0}%)",
                skill.label, skill.count, skill.pct_of_jobs
            );
        }
    } else if !insights.top_skills.is_empty() {
        println!("\nMost requested skills");
        for skill in &insights.top_skills {
            println!(
                "- {}: {} postings ({:.0}%)",
                skill.label, skill.count, skill.pct_of_jobs
            );
        }
    }

    if !summary.skill_pairs.is_empty() {
        println!("\nSkill pairings");
        for pair in &summary.skill_pairs {
            println!(
                "- {} + {}: together in {} of {} postings ({:.0}%)",
                pair.first, pair.second, pair.both, pair.either, pair.rate_pct
            );
        }
    }

    if !summary.top_companies.is_empty() {
        println!("\nTop companies");
        for entry in &summary.top_companies {
            println!("- {}: {} postings", entry.name, entry.count);
        }
    }

    if !summary.top_industries.is_empty() {
        println!("\nTop industries");
        for entry in &summary.top_industries {
            println!("- {}: {} postings", entry.name, entry.count);
        }
    }

    println!("\nHighlights");
    for highlight in &insights.highlights {
        println!("- {}", highlight);
    }
}
