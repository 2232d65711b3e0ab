//! uacheck
//!
//! Interactive Jira acceptance-criteria analyzer backed by an Ollama model.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use uacheck_cli::{report_pull_failure, ProgressPrinter, Session};
use uacheck_core::models::Settings;
use uacheck_core::storage::{resolve_config_path, ConfigStorage};
use uacheck_jira::JiraClient;
use uacheck_ollama::{ensure_model, OllamaClient};

#[derive(Parser, Debug)]
#[command(name = "uacheck")]
#[command(about = "Checks Jira issues for user acceptance criteria using an LLM", long_about = None)]
struct Args {
    /// Path to environment.properties
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ollama model, overrides ollama.model
    #[arg(short, long)]
    model: Option<String>,

    /// Ollama host, overrides ollama.host
    #[arg(long)]
    ollama_host: Option<String>,

    /// Log level
    #[arg(
        short,
        long,
        default_value = "info",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

fn setup_logging(log_level: &str) -> Result<PathBuf> {
    let mut log_path = std::env::temp_dir();
    log_path.push("uacheck.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_level)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(log_path)
}

fn load_settings(args: &Args) -> uacheck_core::Result<Settings> {
    let path = resolve_config_path(args.config.as_deref());
    info!("Loading configuration from {}", path.display());

    let mut settings = ConfigStorage::new(path).load()?;
    settings.apply_overrides(args.model.as_deref(), args.ollama_host.as_deref());
    settings.validate()?;
    Ok(settings)
}

async fn provision(ollama: &OllamaClient, model: &str) {
    let mut printer = ProgressPrinter::new(std::io::stdout());
    if let Err(e) = printer.start(model) {
        tracing::warn!("Failed to render pull progress: {}", e);
    }

    let result = ensure_model(ollama, model, |update| {
        if let Err(e) = printer.update(update) {
            tracing::warn!("Failed to render pull progress: {}", e);
        }
    })
    .await;

    match result {
        Ok(_) => {
            if let Err(e) = printer.finish() {
                tracing::warn!("Failed to render pull progress: {}", e);
            }
        }
        Err(e) => {
            tracing::error!("Failed to pull {}: {}", model, e);
            if let Err(write_err) = report_pull_failure(&mut std::io::stdout(), model, &e) {
                tracing::warn!("Failed to report pull failure: {}", write_err);
            }
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = setup_logging(&args.log_level)?;
    info!("uacheck starting, logging to {}", log_path.display());

    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(uacheck_core::Error::ConfigMissing(path)) => {
            eprintln!("Property file not found: {}", path.display());
            eprintln!("Exiting...");
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("Failed to load configuration"),
    };
    info!(
        "Jira host: {}, Ollama host: {}, model: {}",
        settings.jira.host, settings.ollama.host, settings.ollama.model
    );

    let jira = JiraClient::from_settings(&settings.jira).context("Failed to set up Jira client")?;
    let ollama =
        OllamaClient::from_settings(&settings.ollama).context("Failed to set up Ollama client")?;

    provision(&ollama, &settings.ollama.model).await;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut session = Session::new(
        jira,
        ollama,
        settings.ollama.model.clone(),
        stdin,
        std::io::stdout(),
    );
    let stats = session.run().await?;
    info!("Exiting after {} analysis result(s)", stats.reported);

    Ok(())
}
