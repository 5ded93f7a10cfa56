use crate::table::TabularView;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Pause after the last search keystroke before the view recomputes.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// One generated multiple-choice question, owned by the session for
/// its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub difficulty: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    #[serde(default)]
    pub explanation: String,
}

/// Server-graded verdict. Score and total are exact integers from the
/// scorer; correctness is never recomputed locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
    pub percentage: f64,
    #[serde(default)]
    pub results: Vec<QuestionResult>,
}

#[derive(Debug, PartialEq)]
pub enum AppState {
    Menu,
    Browse,
    Quiz,
}

/// State for one listing screen: the table engine plus the raw search
/// input being debounced into it.
pub struct BrowsePage {
    pub title: String,
    pub view: TabularView,
    pub selected_column: usize,
    pub search_input: String,
    pub search_pending_since: Option<Instant>,
}

impl BrowsePage {
    pub fn new(title: &str, view: TabularView) -> Self {
        Self {
            title: title.to_string(),
            view,
            selected_column: 0,
            search_input: String::new(),
            search_pending_since: None,
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
        self.search_pending_since = Some(Instant::now());
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
        self.search_pending_since = Some(Instant::now());
    }

    /// Apply the buffered search once input has paused. Called from
    /// the tick loop; applying immediately would recompute on every
    /// keystroke over large row sets.
    pub fn flush_search(&mut self, now: Instant) {
        if let Some(since) = self.search_pending_since
            && now.duration_since(since) >= SEARCH_DEBOUNCE
        {
            self.view.set_search(&self.search_input);
            self.search_pending_since = None;
        }
    }

    pub fn sort_selected_column(&mut self) {
        if let Some(column) = self.view.columns().get(self.selected_column) {
            let key = column.key.clone();
            self.view.set_sort(&key);
        }
    }

    pub fn select_previous_column(&mut self) {
        if self.selected_column > 0 {
            self.selected_column -= 1;
        }
    }

    pub fn select_next_column(&mut self) {
        if self.selected_column < self.view.columns().len().saturating_sub(1) {
            self.selected_column += 1;
        }
    }
}
