//! Terminal User Interface for smartcampus.
//!
//! Provides a query input, grounded answer panel with evidence, and a small
//! dashboard over the interaction log, using ratatui for rendering and
//! crossterm for terminal management.

use std::io;
use std::panic;

use anyhow::{Context, Result};
use crossterm::{
    event::{self as crossterm_event, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::AppConfig;
use crate::service::AssistantService;

mod app;
pub mod event;
mod ui;

pub use app::{App, Focus, RECENT_LOG_ROWS};

/// Initializes the terminal for TUI rendering.
///
/// Enables raw mode and enters the alternate screen.
///
/// # Errors
///
/// Returns an error if terminal initialization fails.
fn init_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("failed to create terminal")?;
    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// Must run before exiting the TUI, including on error paths.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;
    Ok(())
}

/// Minimal terminal restoration for the panic hook. Errors are ignored.
fn restore_terminal_panic() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

/// Installs a panic hook that restores the terminal before the original hook runs.
fn init_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_panic();
        original_hook(panic_info);
    }));
}

/// Runs the main event loop for the TUI.
///
/// Polls for keyboard events, answers submitted queries, and re-renders.
///
/// # Errors
///
/// Returns an error if event polling, rendering, or terminal operations fail.
/// Terminal state is always restored, even on error.
pub fn run_event_loop(app: &mut App, service: &AssistantService) -> Result<()> {
    let mut terminal = init_terminal()?;

    let result = run_event_loop_internal(app, service, &mut terminal);

    if let Err(e) = restore_terminal(&mut terminal) {
        eprintln!("Error restoring terminal: {e}");
    }

    result
}

fn run_event_loop_internal(
    app: &mut App,
    service: &AssistantService,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            ui::draw(frame, app);
        })?;

        if crossterm_event::poll(std::time::Duration::from_millis(100))?
            && let Event::Key(key) = crossterm_event::read()?
        {
            if event::handle_key_event(app, key) {
                break;
            }
            process_pending_submit(app, service);
        }
    }

    Ok(())
}

/// Answers the submitted query, if any, and refreshes the dashboard.
///
/// A failed log write keeps the previous answer and dashboard and surfaces
/// the error as a status line instead of leaving the TUI.
fn process_pending_submit(app: &mut App, service: &AssistantService) {
    let Some(query) = app.take_submit() else {
        return;
    };

    match service.ask(&query) {
        Ok(outcome) => {
            app.set_outcome(outcome);
            refresh_dashboard(app, service);
        }
        Err(e) => {
            tracing::warn!(error = %e, "query failed");
            app.set_status(format!("{e:#}"));
        }
    }
}

/// Reloads the recent log rows and dashboard metrics into the App.
fn refresh_dashboard(app: &mut App, service: &AssistantService) {
    let dashboard = service
        .recent_interactions(RECENT_LOG_ROWS)
        .and_then(|recent| Ok((recent, service.summary()?)));

    match dashboard {
        Ok((recent, summary)) => app.set_dashboard(recent, summary),
        Err(e) => app.set_status(format!("{e:#}")),
    }
}

/// Entry point for the TUI application.
///
/// Loads the configured documents, reads the existing interaction log for
/// the dashboard, and starts the event loop.
///
/// # Errors
///
/// Returns an error if terminal initialization or the event loop fails.
pub fn run(config: &AppConfig) -> Result<()> {
    init_panic_hook();

    let service = AssistantService::from_config(config);

    let mut app = App::new();
    app.set_record_count(service.knowledge_base().len());
    refresh_dashboard(&mut app, &service);

    run_event_loop(&mut app, &service).context("TUI event loop failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction_log::InteractionLog;
    use crate::matcher::{KeywordMatcher, MatchMode};
    use crate::models::Record;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tempfile::{TempDir, tempdir};

    fn service() -> (AssistantService, TempDir) {
        let dir = tempdir().expect("failed to create temp dir");
        let service = AssistantService::new(
            vec![
                Record::from_page("shuttle.pdf", 1, "The shuttle schedule begins at 6am"),
                Record::from_page("safety.pdf", 3, "Campus police escort service"),
            ]
            .into(),
            KeywordMatcher::new(MatchMode::TokenCount),
            InteractionLog::new(dir.path().join("metrics.csv")),
        );
        (service, dir)
    }

    fn type_query(app: &mut App, query: &str) {
        for c in query.chars() {
            event::handle_key_event(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        event::handle_key_event(app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
    }

    #[test]
    fn refresh_dashboard_with_empty_log() {
        let (service, _dir) = service();
        let mut app = App::new();

        refresh_dashboard(&mut app, &service);

        assert!(app.recent_logs().is_empty());
        assert_eq!(app.summary().map(|s| s.total_queries), Some(0));
        assert!(app.status().is_none());
    }

    #[test]
    fn submitted_query_is_answered_and_logged() {
        let (service, _dir) = service();
        let mut app = App::new();

        type_query(&mut app, "shuttle");
        process_pending_submit(&mut app, &service);

        let outcome = app.outcome().expect("query should be answered");
        assert_eq!(outcome.result.answer(), "The shuttle schedule begins at 6am");
        assert_eq!(app.evidence().len(), 1);
        assert_eq!(app.recent_logs().len(), 1);
        assert_eq!(app.summary().map(|s| s.total_queries), Some(1));
    }

    #[test]
    fn nothing_happens_without_submit() {
        let (service, _dir) = service();
        let mut app = App::new();

        process_pending_submit(&mut app, &service);

        assert!(app.outcome().is_none());
        assert_eq!(service.log().row_count().unwrap(), 0);
    }

    #[test]
    fn dashboard_keeps_only_recent_rows() {
        let (service, _dir) = service();
        let mut app = App::new();

        for _ in 0..(RECENT_LOG_ROWS + 2) {
            type_query(&mut app, "police");
            process_pending_submit(&mut app, &service);
        }

        assert_eq!(app.recent_logs().len(), RECENT_LOG_ROWS);
        assert_eq!(
            app.summary().map(|s| s.total_queries),
            Some(RECENT_LOG_ROWS + 2)
        );
    }

    #[test]
    fn log_failure_is_shown_as_status() {
        let dir = tempdir().unwrap();
        let service = AssistantService::new(
            Default::default(),
            KeywordMatcher::new(MatchMode::TokenCount),
            InteractionLog::new(dir.path()),
        );
        let mut app = App::new();

        type_query(&mut app, "shuttle");
        process_pending_submit(&mut app, &service);

        assert!(app.outcome().is_none());
        assert!(
            app.status()
                .is_some_and(|s| s.contains("Failed to record interaction"))
        );
    }
}
