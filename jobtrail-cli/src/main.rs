use anyhow::{Context, Result};
use clap::Parser;
use extractors::{CompanyExtractor, MetadataExtractor, RecordConsolidator};
use jobtrail_cli::config::TrackerConfig;
use jobtrail_cli::helpers::gmail_auth::get_access_token_for_gmail;
use jobtrail_cli::pipeline::track_applications;
use jobtrail_cli::GmailClient;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "jobtrail",
    author,
    version,
    about = "Report the companies you applied to, from your Gmail inbox"
)]
struct Args {
    /// Config file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// CSV report path, overrides `output.file`
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Log file path, overrides `logging.file`
    #[arg(long)]
    log_file_path: Option<PathBuf>,

    /// Gmail search query, overrides `gmail.query`
    #[arg(long)]
    query: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let (config, config_path) = match TrackerConfig::load(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_file = args.log_file_path.clone().or(config.logging.file.clone());
    let _guard = init_tracing(log_file.as_deref());
    tracing::debug!("Loaded config from {:?}", config_path);

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("An error occurred: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &TrackerConfig) -> Result<()> {
    let company_extractor =
        CompanyExtractor::with_extra_patterns(&config.extraction.extra_patterns)
            .context("Invalid extraction pattern in config")?;
    tracing::debug!(
        "Company patterns: {}",
        company_extractor.pattern_names().collect::<Vec<_>>().join(", ")
    );

    let access_token = get_access_token_for_gmail(&config.gmail)?;
    let gmail = GmailClient::new(access_token, &config.gmail.user_id)?;

    let query = args.query.as_deref().unwrap_or(&config.gmail.query);
    let consolidator = RecordConsolidator::new(MetadataExtractor::new(company_extractor));
    let output = args.output.as_ref().unwrap_or(&config.output.file);

    let report = track_applications(
        &gmail,
        &consolidator,
        query,
        config.gmail.max_messages,
        output,
    )?;
    if let Some(report) = report {
        print!("{report}");
    }
    Ok(())
}

fn init_tracing(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if let Some(log_path) = log_file {
        let file_appender = tracing_appender::rolling::never(
            log_path.parent().unwrap_or(Path::new(".")),
            log_path
                .file_name()
                .unwrap_or(std::ffi::OsStr::new("jobtrail.log")),
        );
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .init();

        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
        None
    }
}
