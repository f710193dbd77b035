use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use smartcampus::{AppConfig, AssistantService, InteractionLog, MatchMode, doctor, loader};
use tracing_subscriber::EnvFilter;

/// smartcampus - grounded answers from campus documents
#[derive(Parser)]
#[command(name = "smartcampus")]
#[command(about = "Answers campus questions from a fixed set of campus documents")]
#[command(version)]
struct Cli {
    /// Directory containing the campus documents
    #[arg(long, global = true, value_name = "DIR")]
    docs_dir: Option<PathBuf>,

    /// Interaction log CSV file
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Matching variant: token-count or substring
    #[arg(long, global = true, value_name = "MODE", value_parser = parse_mode)]
    mode: Option<MatchMode>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Ask a question and print the grounded answer
    Ask(AskCommand),
    /// Show the most recent interaction log rows
    Logs(LogsCommand),
    /// Show dashboard metrics over the interaction log
    Stats,
    /// List configured sources and how many records each produced
    Sources,
    /// Check documents and interaction log health
    Doctor,
    /// Launch interactive terminal UI
    Tui,
}

/// Ask a question
#[derive(Parser)]
struct AskCommand {
    /// The question to answer
    #[arg(value_name = "QUERY")]
    query: String,
}

/// Show recent interactions
#[derive(Parser)]
struct LogsCommand {
    /// Number of rows to show
    #[arg(long, value_name = "N", default_value_t = 5)]
    tail: usize,
}

fn parse_mode(s: &str) -> Result<MatchMode, String> {
    MatchMode::parse(s).ok_or_else(|| format!("unknown mode '{s}' (expected token-count or substring)"))
}

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.command);

    let config = resolve_config(&cli);

    let result = match &cli.command {
        Commands::Ask(cmd) => handle_ask(cmd, &config),
        Commands::Logs(cmd) => handle_logs(cmd, &config),
        Commands::Stats => handle_stats(&config),
        Commands::Sources => handle_sources(&config),
        Commands::Doctor => handle_doctor(&config),
        Commands::Tui => smartcampus::tui::run(&config),
    };

    if let Err(e) = result {
        // Determine exit code based on error type
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code);
    }
}

/// Logs go to stderr so answers on stdout stay pipeable. The TUI owns the
/// screen, so it only gets warnings.
fn init_tracing(command: &Commands) {
    let default_filter = match command {
        Commands::Tui => "smartcampus=warn",
        _ => "smartcampus=info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Applies command-line overrides on top of the environment configuration.
fn resolve_config(cli: &Cli) -> AppConfig {
    let mut config = AppConfig::from_env();
    if let Some(dir) = &cli.docs_dir {
        config.docs_dir = dir.clone();
    }
    if let Some(file) = &cli.log_file {
        config.log_file = file.clone();
    }
    if let Some(mode) = cli.mode {
        config.match_mode = mode;
    }
    config
}

/// Determines if an error is a user error (vs internal error).
///
/// User errors include validation failures like an empty query.
/// Internal errors include log write failures and I/O errors.
fn is_user_error(error: &anyhow::Error) -> bool {
    error.to_string().contains("cannot be empty")
}

fn handle_ask(cmd: &AskCommand, config: &AppConfig) -> Result<()> {
    if cmd.query.trim().is_empty() {
        anyhow::bail!("Query cannot be empty");
    }

    let service = AssistantService::from_config(config);
    let outcome = service.ask(&cmd.query)?;

    println!("{}", outcome.result.answer());
    println!();
    println!("Sources: {}", format_sources(&outcome));
    println!(
        "Confidence: {:.2} ({}) | Latency: {:.2}ms",
        outcome.result.confidence(),
        outcome.entry.verdict,
        outcome.latency_ms()
    );

    Ok(())
}

fn format_sources(outcome: &smartcampus::AskOutcome) -> String {
    let evidence = outcome.result.evidence();
    if evidence.is_empty() {
        return "None".to_string();
    }
    evidence
        .iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn handle_logs(cmd: &LogsCommand, config: &AppConfig) -> Result<()> {
    let log = InteractionLog::new(&config.log_file);
    let rows = log
        .tail(cmd.tail)
        .with_context(|| format!("Failed to read {}", config.log_file.display()))?;

    if rows.is_empty() {
        println!("No interactions logged yet.");
        return Ok(());
    }

    for row in rows {
        let sources = if row.evidence_ids.is_empty() {
            "None".to_string()
        } else {
            row.evidence_ids
                .iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "{}  {:<18} {:>8.2}ms  {:.2}  {:<4}  {}",
            row.timestamp, row.retrieval_method, row.latency_ms, row.confidence, row.verdict, sources
        );
    }

    Ok(())
}

fn handle_stats(config: &AppConfig) -> Result<()> {
    let log = InteractionLog::new(&config.log_file);
    let summary = log
        .summary()
        .with_context(|| format!("Failed to read {}", config.log_file.display()))?;

    println!("Interaction log: {}", config.log_file.display());
    doctor::print_summary(&summary);
    Ok(())
}

fn handle_sources(config: &AppConfig) -> Result<()> {
    let service = AssistantService::from_config(config);

    println!("Documents directory: {}", config.docs_dir.display());
    for report in service.load_report() {
        let detail = match &report.status {
            loader::SourceStatus::Loaded { records } => format!("{records} record(s)"),
            loader::SourceStatus::Missing => "missing".to_string(),
            loader::SourceStatus::Failed(e) => format!("failed: {e}"),
        };
        println!("  {:<52} {}", report.source, detail);
    }
    println!("Total records: {}", service.knowledge_base().len());
    println!(
        "Matching: {} (top {} evidence)",
        service.matcher().mode(),
        service.matcher().top_n()
    );
    Ok(())
}

fn handle_doctor(config: &AppConfig) -> Result<()> {
    let service = AssistantService::from_config(config);
    let report = doctor::run_health_checks(&config.docs_dir, &service);
    if report.has_errors() {
        anyhow::bail!("Health checks failed");
    }
    Ok(())
}
