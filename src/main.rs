//! CLI entry point for the emissions rater tool.
//!
//! Provides subcommands for scoring activity records against a domain's
//! fitted artifacts, aggregating daily results into monthly summaries, and
//! inspecting the supported domains.

use anyhow::Result;
use clap::{Parser, Subcommand};
use emissions_rater::bundle::ModelBundle;
use emissions_rater::domains::Domain;
use emissions_rater::output::{append_daily_results, print_summary_json, write_summary};
use emissions_rater::pipeline::aggregate::{GapPolicy, aggregate};
use emissions_rater::pipeline::assemble::assemble_with;
use emissions_rater::pipeline::calendar::DayPartition;
use emissions_rater::pipeline::types::SummaryReport;
use emissions_rater::records::{read_activity_csv, read_daily_results};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "emissions_rater")]
#[command(about = "A tool to score activity records and rate emission risk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score activity records and append classified daily results
    Predict {
        /// Emission domain the records belong to
        #[arg(short = 'm', long, value_enum)]
        domain: Domain,

        /// CSV file of activity records (one row per entity-observation)
        #[arg(value_name = "RECORDS_CSV")]
        input: String,

        /// Directory holding encoder.json, scaler.json and model.json
        #[arg(short, long, default_value = "artifacts")]
        artifacts: String,

        /// CSV file to append daily results to
        #[arg(short, long, default_value = "daily.csv")]
        output: String,
    },
    /// Roll daily results up into monthly summaries
    Aggregate {
        /// Emission domain the results belong to
        #[arg(short = 'm', long, value_enum)]
        domain: Domain,

        /// CSV file of daily results to aggregate
        #[arg(value_name = "DAILY_CSV")]
        input: String,

        /// File to write the summary JSON to (stdout log if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Reject day indices outside every month range instead of dropping them
        #[arg(long, default_value_t = false)]
        strict_days: bool,
    },
    /// Score activity records and aggregate them in one pass
    Run {
        /// Emission domain the records belong to
        #[arg(short = 'm', long, value_enum)]
        domain: Domain,

        /// CSV file of activity records
        #[arg(value_name = "RECORDS_CSV")]
        input: String,

        /// Directory holding encoder.json, scaler.json and model.json
        #[arg(short, long, default_value = "artifacts")]
        artifacts: String,

        /// File to write the summary JSON to (stdout log if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Reject day indices outside every month range instead of dropping them
        #[arg(long, default_value_t = false)]
        strict_days: bool,
    },
    /// List supported domains with their schemas and risk thresholds
    ListDomains,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/emissions_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("emissions_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Predict {
            domain,
            input,
            artifacts,
            output,
        } => {
            let spec = domain.spec();
            let bundle = ModelBundle::load(Path::new(&artifacts), spec)?;
            let days = read_activity_csv(&input, spec)?;
            let results = assemble_with(&days, spec, &bundle)?;

            append_daily_results(&output, &results)?;
            info!(
                domain = %domain,
                records = results.len(),
                output = %output,
                "Daily predictions written"
            );
        }
        Commands::Aggregate {
            domain,
            input,
            output,
            strict_days,
        } => {
            let spec = domain.spec();
            let results = read_daily_results(&input)?;
            let months = aggregate(
                &results,
                &DayPartition::calendar(),
                spec.kinds,
                gap_policy(strict_days),
            )?;

            emit_report(domain, months, output)?;
        }
        Commands::Run {
            domain,
            input,
            artifacts,
            output,
            strict_days,
        } => {
            let spec = domain.spec();
            let bundle = ModelBundle::load(Path::new(&artifacts), spec)?;
            let days = read_activity_csv(&input, spec)?;
            let results = assemble_with(&days, spec, &bundle)?;
            let months = aggregate(
                &results,
                &DayPartition::calendar(),
                spec.kinds,
                gap_policy(strict_days),
            )?;

            emit_report(domain, months, output)?;
        }
        Commands::ListDomains => {
            for domain in Domain::ALL {
                let spec = domain.spec();
                let fields: Vec<&str> = spec.fields.iter().map(|f| f.name).collect();

                info!(
                    domain = %domain,
                    fields = ?fields,
                    entity_field = spec.entity_field,
                    kinds = ?spec.kinds,
                    "Domain"
                );

                for (kind, [t1, t2, t3]) in spec.thresholds {
                    info!(domain = %domain, kind, t1, t2, t3, "Risk thresholds");
                }
            }
        }
    }

    Ok(())
}

fn gap_policy(strict_days: bool) -> GapPolicy {
    if strict_days {
        GapPolicy::Error
    } else {
        GapPolicy::Drop
    }
}

fn emit_report(
    domain: Domain,
    months: Vec<emissions_rater::pipeline::types::MonthSummary>,
    output: Option<String>,
) -> Result<()> {
    let report = SummaryReport::new(domain, months);
    match output {
        Some(path) => write_summary(&path, &report)?,
        None => print_summary_json(&report)?,
    }
    Ok(())
}
