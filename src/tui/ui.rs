//! UI rendering functions for the TUI.
//!
//! Lays out the query input, answer, evidence list, health metrics and the
//! most recent interaction log rows using ratatui widgets.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use time::macros::format_description;

use super::app::{App, Focus};
use crate::models::{InteractionLogEntry, Verdict};

/// Main rendering function for the TUI.
///
/// # Arguments
///
/// * `frame` - The ratatui Frame to render into
/// * `app` - The application state containing the query, answer and log rows
pub fn draw(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Query input at top, content in middle, shortcuts at bottom
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    // Answer side (65%) | dashboard side (35%)
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_chunks[1]);

    let answer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(7)])
        .split(content_chunks[0]);

    let dashboard_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(content_chunks[1]);

    render_query_input(frame, app, main_chunks[0]);
    render_answer(frame, app, answer_chunks[0]);
    render_evidence(frame, app, answer_chunks[1]);
    render_health(frame, app, dashboard_chunks[0]);
    render_recent_logs(frame, app, dashboard_chunks[1]);
    render_shortcut_bar(frame, app, main_chunks[2]);
}

fn panel(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style)
}

fn label(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().add_modifier(Modifier::BOLD))
}

fn dim(text: String) -> Span<'static> {
    Span::styled(text, Style::default().fg(Color::DarkGray))
}

/// Renders the query input with a cursor indicator when focused.
fn render_query_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus() == Focus::QueryInput;

    let mut content = app.query_input().to_string();
    if is_focused {
        content.push('\u{2588}');
    }

    let paragraph = Paragraph::new(content).block(panel(
        "Ask about shuttles, safety or the catalog",
        is_focused,
    ));
    frame.render_widget(paragraph, area);
}

/// Renders the grounded answer with its confidence and verdict.
fn render_answer(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus() == Focus::Answer;

    let mut content = if let Some(outcome) = app.outcome() {
        let result = &outcome.result;
        let mut text = Text::default();

        text.lines.push(Line::from(vec![
            label("Confidence:"),
            Span::raw(format!(" {:.2} ", result.confidence())),
            verdict_span(outcome.entry.verdict),
            dim(format!("  {:.2}ms", outcome.latency_ms())),
        ]));
        text.lines.push(Line::from(""));
        text.lines.push(Line::from(result.answer().to_string()));
        text
    } else {
        Text::from(format!(
            "Type a question and press Enter. {} records loaded.",
            app.record_count()
        ))
    };

    if let Some(status) = app.status() {
        content.lines.push(Line::from(""));
        content.lines.push(Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(content)
        .block(panel("Grounded Answer", is_focused))
        .wrap(Wrap { trim: false })
        .scroll((app.answer_scroll(), 0));

    frame.render_widget(paragraph, area);
}

/// Renders the evidence identifiers of the last answer.
fn render_evidence(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus() == Focus::Evidence;

    let items: Vec<ListItem> = if app.evidence().is_empty() {
        vec![ListItem::new(dim("None".to_string()))]
    } else {
        app.evidence()
            .iter()
            .map(|id| ListItem::new(id.to_string()))
            .collect()
    };

    let list = List::new(items)
        .block(panel("Sources", is_focused))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::REVERSED),
        );

    let mut list_state = ListState::default();
    list_state.select(app.selected_evidence());

    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Renders the dashboard metrics computed over the whole log.
fn render_health(frame: &mut Frame, app: &App, area: Rect) {
    let mut text = Text::default();

    match app.summary() {
        Some(summary) if summary.total_queries > 0 => {
            text.lines.push(Line::from(vec![
                label("Total Queries: "),
                Span::raw(summary.total_queries.to_string()),
            ]));
            if let Some(avg) = summary.avg_latency_ms {
                text.lines.push(Line::from(vec![
                    label("Avg Latency: "),
                    Span::raw(format!("{avg:.0}ms")),
                ]));
            }
            if let Some(rate) = summary.faithfulness_rate {
                text.lines.push(Line::from(vec![
                    label("Faithfulness Rate: "),
                    Span::raw(format!("{:.0}%", rate * 100.0)),
                ]));
            }
        }
        _ => text.lines.push(Line::from(dim("No queries logged yet".to_string()))),
    }

    let paragraph = Paragraph::new(text).block(panel("System Health", false));
    frame.render_widget(paragraph, area);
}

/// Renders the most recent log rows, newest last.
fn render_recent_logs(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focus() == Focus::Logs;

    let items: Vec<ListItem> = app.recent_logs().iter().map(log_row).collect();

    let list = List::new(items)
        .block(panel("Recent Interactions", is_focused))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::REVERSED),
        );

    let mut list_state = ListState::default();
    list_state.select(app.selected_log());

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn log_row(entry: &InteractionLogEntry) -> ListItem<'static> {
    let time = entry
        .timestamp
        .format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| "??:??:??".to_string());

    ListItem::new(Line::from(vec![
        dim(time),
        Span::raw(format!(" {:.2} ", entry.confidence)),
        verdict_span(entry.verdict),
        dim(format!(" {}src", entry.evidence_ids.len())),
    ]))
}

fn verdict_span(verdict: Verdict) -> Span<'static> {
    let color = if verdict.is_pass() {
        Color::Green
    } else {
        Color::Yellow
    };
    Span::styled(verdict.to_string(), Style::default().fg(color))
}

/// Renders the shortcut bar at the bottom of the screen.
///
/// Format: `Key: action | Key: action` with keys highlighted in cyan.
fn render_shortcut_bar(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default().fg(Color::Cyan);
    let sep_style = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled("Tab", key_style),
        Span::raw(": next panel"),
        Span::styled(" | ", sep_style),
        Span::styled("Esc", key_style),
        Span::raw(": reset"),
        Span::styled(" | ", sep_style),
    ];

    match app.focus() {
        Focus::QueryInput => {
            spans.push(Span::styled("Enter", key_style));
            spans.push(Span::raw(": search"));
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("Ctrl+C", key_style));
            spans.push(Span::raw(": quit"));
        }
        Focus::Answer => {
            spans.push(Span::styled("j/k", key_style));
            spans.push(Span::raw(": scroll"));
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("q", key_style));
            spans.push(Span::raw(": quit"));
        }
        Focus::Evidence | Focus::Logs => {
            spans.push(Span::styled("j/k", key_style));
            spans.push(Span::raw(": navigate"));
            spans.push(Span::styled(" | ", sep_style));
            spans.push(Span::styled("q", key_style));
            spans.push(Span::raw(": quit"));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
