//! Keyboard event handling for the TUI.
//!
//! Maps crossterm keyboard events to application state changes.
//! Key behavior depends on which panel has focus.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Focus};

/// Handles a keyboard event and updates the app state accordingly.
///
/// Returns `true` if the application should quit, `false` otherwise.
///
/// # Event Handling
///
/// - `Ctrl+C`: Quit from any panel
/// - `q`: Quit when a panel other than the query input is focused
/// - `Tab` / `Shift+Tab`: Cycle focus between panels
/// - `Esc`: Return to the query input and clear selections
/// - When `QueryInput` focused: characters edit the query, Enter submits
/// - When `Answer` focused: j/k scroll
/// - When `Evidence` or `Logs` focused: j/k navigate
///
/// # Examples
///
/// ```
/// use smartcampus::tui::{App, event::handle_key_event};
/// use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
///
/// let mut app = App::new();
/// let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
/// assert!(handle_key_event(&mut app, key));
/// ```
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    // 'q' is a query character while typing
    if key.code == KeyCode::Char('q') && key.modifiers.is_empty() && app.focus() != Focus::QueryInput
    {
        return true;
    }

    if key.code == KeyCode::Tab {
        app.next_focus();
        return false;
    }
    if key.code == KeyCode::BackTab {
        app.prev_focus();
        return false;
    }

    if key.code == KeyCode::Esc {
        app.reset_focus();
        app.clear_selection();
        return false;
    }

    match app.focus() {
        Focus::QueryInput => handle_query_input(app, key),
        Focus::Answer => handle_answer_view(app, key),
        Focus::Evidence | Focus::Logs => handle_list(app, key),
    }

    false
}

/// Handles keyboard input when the query input is focused.
fn handle_query_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT => {
            app.push_query_char(c);
        }
        KeyCode::Backspace => {
            app.pop_query_char();
        }
        KeyCode::Enter => {
            app.request_submit();
        }
        _ => {}
    }
}

/// Handles keyboard input when the answer view is focused.
fn handle_answer_view(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll_answer_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_answer_up(1),
        _ => {}
    }
}

/// Handles keyboard input when the evidence or log list is focused.
fn handle_list(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        _ => {}
    }
}
