#![forbid(unsafe_code)]

//! `jiralog` — daily activity log to tracker worklog uploader.
//!
//! Parses the log, prints per-interval and per-task totals, asks for
//! confirmation per task, and uploads confirmed worklogs concurrently.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, ValueEnum};
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use jiralog::config::TrackerConfig;
use jiralog::console;
use jiralog::pipeline::UploadPipeline;
use jiralog::timelog::{aggregate, split_lines};
use jiralog::tracker::JiraClient;
use jiralog::{AppError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "jiralog", about = "Upload a day's activity log as tracker worklogs", version, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Path to the activity log for the day.
    #[arg(long, default_value = "input.txt")]
    input: PathBuf,

    /// Diagnostic log output format (text or json).
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format)?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::Config(format!("failed to build tokio runtime: {err}")))?
        .block_on(run(args))
        .inspect_err(|err| error!(%err, "jiralog aborted"))
}

async fn run(args: Cli) -> Result<()> {
    // ── Load configuration and the day's log ────────────
    let config = TrackerConfig::load_from_path(&args.config)?;
    info!(baseurl = %config.baseurl, prefix = %config.prefix, "configuration loaded");

    let text = std::fs::read_to_string(&args.input).map_err(|err| {
        AppError::Io(format!("cannot read input {}: {err}", args.input.display()))
    })?;
    let lines = split_lines(&text);

    // ── Aggregate per-task totals ───────────────────────
    let aggregation = aggregate(&lines, &config.prefix)?;
    info!(
        lines = lines.len(),
        tasks = aggregation.totals.len(),
        "activity log aggregated"
    );

    let mut out = io::stdout();
    console::write_summary(&aggregation, &mut out)?;

    // ── Confirm and upload ──────────────────────────────
    let zone = config.zone();
    let today = Utc::now().with_timezone(&zone).date_naive();
    let client = Arc::new(JiraClient::new(config));
    let (pipeline, results) = UploadPipeline::new(client, today, zone);

    let mut stdin = BufReader::new(tokio::io::stdin());
    let launched = console::confirm_and_launch(&aggregation, &mut stdin, &mut out, &pipeline).await?;
    info!(launched, "uploads launched");

    writeln!(out)?;
    let closer = pipeline.finish();
    let printed = console::print_results(results, &mut out).await?;
    closer
        .await
        .map_err(|err| AppError::Io(format!("result closer failed: {err}")))?;
    info!(printed, "all uploads reported");

    Ok(())
}

fn init_tracing(log_format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = fmt().with_env_filter(env_filter).with_writer(io::stderr);

    match log_format {
        LogFormat::Text => subscriber
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|err| AppError::Config(format!("failed to init tracing: {err}")))?,
    }

    Ok(())
}
