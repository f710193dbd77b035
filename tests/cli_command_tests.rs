//! CLI integration tests for the `smartcampus` command surface.
//!
//! These tests verify that the subcommands and global flags are wired into clap
//! the way the binary defines them.

use clap::{CommandFactory, Parser};

/// smartcampus - grounded answers from campus documents
#[derive(Parser)]
#[command(name = "smartcampus")]
#[command(version)]
struct Cli {
    #[arg(long, global = true)]
    docs_dir: Option<std::path::PathBuf>,

    #[arg(long, global = true)]
    mode: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands (minimal mirror of the binary)
#[derive(clap::Subcommand)]
enum Commands {
    /// Ask a question and print the grounded answer
    Ask { query: String },
    /// Show the most recent interaction log rows
    Logs {
        #[arg(long, default_value_t = 5)]
        tail: usize,
    },
    /// Show dashboard metrics over the interaction log
    Stats,
    /// List configured sources and how many records each produced
    Sources,
    /// Check documents and interaction log health
    Doctor,
    /// Launch interactive terminal UI
    Tui,
}

#[test]
fn every_subcommand_is_registered() {
    let cmd = Cli::command();
    let names: Vec<&str> = cmd.get_subcommands().map(|c| c.get_name()).collect();

    for expected in ["ask", "logs", "stats", "sources", "doctor", "tui"] {
        assert!(names.contains(&expected), "missing subcommand {expected}");
    }
}

#[test]
fn ask_requires_a_query() {
    let result = Cli::command().try_get_matches_from(vec!["smartcampus", "ask"]);
    assert!(result.is_err(), "ask without a query should be rejected");
}

#[test]
fn ask_accepts_quoted_query() {
    let cli = Cli::try_parse_from(vec!["smartcampus", "ask", "when does the shuttle run"])
        .expect("failed to parse ask command");

    match cli.command {
        Commands::Ask { query } => assert_eq!(query, "when does the shuttle run"),
        _ => panic!("expected ask command"),
    }
}

#[test]
fn logs_tail_can_be_overridden() {
    let cli = Cli::try_parse_from(vec!["smartcampus", "logs", "--tail", "20"])
        .expect("failed to parse logs command");

    assert!(matches!(cli.command, Commands::Logs { tail: 20 }));
}

#[test]
fn global_flags_are_accepted_after_subcommand() {
    let cli = Cli::try_parse_from(vec!["smartcampus", "stats", "--docs-dir", "docs"])
        .expect("failed to parse global flag");

    assert_eq!(cli.docs_dir, Some(std::path::PathBuf::from("docs")));
    assert!(matches!(cli.command, Commands::Stats));
}

#[test]
fn tui_command_has_help_text() {
    let cmd = Cli::command();
    let tui_subcommand = cmd
        .get_subcommands()
        .find(|c| c.get_name() == "tui")
        .expect("tui subcommand should exist");

    let about = tui_subcommand
        .get_about()
        .expect("tui command should have about text");

    assert!(about.to_string().contains("interactive terminal UI"));
}

#[test]
fn tui_command_takes_no_arguments() {
    let result = Cli::command().try_get_matches_from(vec!["smartcampus", "tui", "extra-arg"]);

    assert!(
        result.is_err(),
        "tui command should not accept extra arguments"
    );
}
