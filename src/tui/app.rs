use crate::interaction_log::LogSummary;
use crate::models::{InteractionLogEntry, RecordId};
use crate::service::AskOutcome;

/// Number of log rows shown in the dashboard panel.
pub const RECENT_LOG_ROWS: usize = 5;

/// Application state for the TUI.
///
/// Holds the query buffer, the last answer, the dashboard data read from
/// the interaction log, and which panel has focus.
#[derive(Debug, Clone)]
pub struct App {
    /// Query input buffer
    query_input: String,
    /// Currently focused panel
    focus: Focus,
    /// Whether Enter was pressed and the query has not been answered yet
    submit_pending: bool,
    /// Most recent answer
    outcome: Option<AskOutcome>,
    /// Selected row in the evidence list
    selected_evidence: Option<usize>,
    /// Last rows of the interaction log, oldest first
    recent_logs: Vec<InteractionLogEntry>,
    /// Selected row in the log panel
    selected_log: Option<usize>,
    /// Dashboard metrics over the whole log
    summary: Option<LogSummary>,
    /// Records available to the matcher
    record_count: usize,
    /// Error or info message shown under the answer
    status: Option<String>,
    /// Scroll offset for the answer view
    answer_scroll: u16,
}

/// Panel focus state for keyboard navigation.
///
/// Determines which panel receives keyboard input and how keys are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Query input is focused (typing edits the query, Enter submits)
    QueryInput,
    /// Answer panel is focused (j/k scroll)
    Answer,
    /// Evidence list is focused (j/k navigation)
    Evidence,
    /// Recent log rows are focused (j/k navigation)
    Logs,
}

impl App {
    /// Creates a new App with default state.
    ///
    /// # Examples
    ///
    /// ```
    /// use smartcampus::tui::{App, Focus};
    ///
    /// let app = App::new();
    /// assert_eq!(app.focus(), Focus::QueryInput);
    /// assert!(app.outcome().is_none());
    /// ```
    pub fn new() -> Self {
        Self {
            query_input: String::new(),
            focus: Focus::QueryInput,
            submit_pending: false,
            outcome: None,
            selected_evidence: None,
            recent_logs: Vec::new(),
            selected_log: None,
            summary: None,
            record_count: 0,
            status: None,
            answer_scroll: 0,
        }
    }

    pub fn query_input(&self) -> &str {
        &self.query_input
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn outcome(&self) -> Option<&AskOutcome> {
        self.outcome.as_ref()
    }

    /// Evidence identifiers of the last answer (empty before the first query).
    pub fn evidence(&self) -> &[RecordId] {
        self.outcome
            .as_ref()
            .map(|o| o.result.evidence())
            .unwrap_or_default()
    }

    pub fn selected_evidence(&self) -> Option<usize> {
        self.selected_evidence
    }

    pub fn recent_logs(&self) -> &[InteractionLogEntry] {
        &self.recent_logs
    }

    pub fn selected_log(&self) -> Option<usize> {
        self.selected_log
    }

    pub fn summary(&self) -> Option<&LogSummary> {
        self.summary.as_ref()
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn set_record_count(&mut self, count: usize) {
        self.record_count = count;
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn answer_scroll(&self) -> u16 {
        self.answer_scroll
    }

    /// Adds a character to the query buffer.
    pub fn push_query_char(&mut self, c: char) {
        self.query_input.push(c);
    }

    /// Removes the last character from the query buffer.
    pub fn pop_query_char(&mut self) {
        self.query_input.pop();
    }

    /// Marks the current query for submission.
    ///
    /// Blank queries are ignored, matching a disabled submit button.
    pub fn request_submit(&mut self) {
        if !self.query_input.trim().is_empty() {
            self.submit_pending = true;
        }
    }

    /// Returns the query to answer, if a submit is pending, and clears the flag.
    pub fn take_submit(&mut self) -> Option<String> {
        if !self.submit_pending {
            return None;
        }
        self.submit_pending = false;
        Some(self.query_input.clone())
    }

    /// Stores a new answer and resets answer-related view state.
    pub fn set_outcome(&mut self, outcome: AskOutcome) {
        self.outcome = Some(outcome);
        self.selected_evidence = None;
        self.answer_scroll = 0;
        self.status = None;
    }

    /// Replaces the dashboard data read from the interaction log.
    pub fn set_dashboard(&mut self, recent_logs: Vec<InteractionLogEntry>, summary: LogSummary) {
        self.recent_logs = recent_logs;
        self.summary = Some(summary);
        self.selected_log = None;
    }

    /// Cycles focus to the next panel in Tab order.
    ///
    /// Order: `QueryInput` -> `Answer` -> `Evidence` -> `Logs` -> `QueryInput`
    ///
    /// # Examples
    ///
    /// ```
    /// use smartcampus::tui::{App, Focus};
    ///
    /// let mut app = App::new();
    /// app.next_focus();
    /// assert_eq!(app.focus(), Focus::Answer);
    ///
    /// app.next_focus();
    /// app.next_focus();
    /// app.next_focus();
    /// assert_eq!(app.focus(), Focus::QueryInput);
    /// ```
    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            Focus::QueryInput => Focus::Answer,
            Focus::Answer => Focus::Evidence,
            Focus::Evidence => Focus::Logs,
            Focus::Logs => Focus::QueryInput,
        };
        self.auto_select_on_list_focus();
    }

    /// Cycles focus to the previous panel in reverse Tab order.
    pub fn prev_focus(&mut self) {
        self.focus = match self.focus {
            Focus::QueryInput => Focus::Logs,
            Focus::Answer => Focus::QueryInput,
            Focus::Evidence => Focus::Answer,
            Focus::Logs => Focus::Evidence,
        };
        self.auto_select_on_list_focus();
    }

    /// Selects the first row when a list panel gains focus with no selection.
    fn auto_select_on_list_focus(&mut self) {
        match self.focus {
            Focus::Evidence if self.selected_evidence.is_none() && !self.evidence().is_empty() => {
                self.selected_evidence = Some(0);
            }
            Focus::Logs if self.selected_log.is_none() && !self.recent_logs.is_empty() => {
                self.selected_log = Some(0);
            }
            _ => {}
        }
    }

    /// Moves selection down in the focused list, wrapping at the end.
    pub fn select_next(&mut self) {
        match self.focus {
            Focus::Evidence => {
                self.selected_evidence = step_forward(self.selected_evidence, self.evidence().len());
            }
            Focus::Logs => {
                self.selected_log = step_forward(self.selected_log, self.recent_logs.len());
            }
            Focus::QueryInput | Focus::Answer => {}
        }
    }

    /// Moves selection up in the focused list, wrapping at the beginning.
    pub fn select_previous(&mut self) {
        match self.focus {
            Focus::Evidence => {
                self.selected_evidence = step_back(self.selected_evidence, self.evidence().len());
            }
            Focus::Logs => {
                self.selected_log = step_back(self.selected_log, self.recent_logs.len());
            }
            Focus::QueryInput | Focus::Answer => {}
        }
    }

    /// Scrolls the answer view down by the specified amount.
    pub fn scroll_answer_down(&mut self, amount: u16) {
        self.answer_scroll = self.answer_scroll.saturating_add(amount);
    }

    /// Scrolls the answer view up by the specified amount.
    pub fn scroll_answer_up(&mut self, amount: u16) {
        self.answer_scroll = self.answer_scroll.saturating_sub(amount);
    }

    /// Clears list selections (Esc key behavior).
    pub fn clear_selection(&mut self) {
        self.selected_evidence = None;
        self.selected_log = None;
    }

    /// Returns focus to `QueryInput` (Esc key behavior).
    pub fn reset_focus(&mut self) {
        self.focus = Focus::QueryInput;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn step_forward(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i + 1 < len => i + 1,
        Some(_) => 0,
        None => 0,
    })
}

fn step_back(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        None | Some(0) => len - 1,
        Some(i) => i - 1,
    })
}
