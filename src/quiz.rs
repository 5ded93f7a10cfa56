use crate::api::ApiError;
use crate::logger;
use crate::models::{Question, QuizResult};
use std::collections::HashMap;
use std::sync::mpsc::Sender;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    Loading,
    InProgress,
    Submitting,
    Results,
    Failed,
}

/// Which request a `Failed` session should re-issue on retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Generate,
    Submit,
}

#[derive(Debug)]
pub enum QuizRequest {
    Generate {
        generation: u64,
        document_id: String,
        num_questions: usize,
    },
    Submit {
        generation: u64,
        document_id: String,
        answers: HashMap<u64, String>,
        time_taken_secs: u64,
    },
}

#[derive(Debug)]
pub enum QuizResponse {
    Questions {
        generation: u64,
        result: Result<Vec<Question>, ApiError>,
    },
    Graded {
        generation: u64,
        result: Result<QuizResult, ApiError>,
    },
}

const GENERIC_FAILURE: &str = "Something went wrong talking to the server.";

/// One quiz attempt from generation through scoring. All transitions
/// happen on the UI thread; the network round-trips run on the worker
/// and come back through `process_response`.
pub struct QuizSession {
    pub document_id: String,
    pub document_name: String,
    pub num_questions: usize,
    pub state: QuizState,
    pub questions: Vec<Question>,
    pub answers: HashMap<u64, String>,
    pub current_index: usize,
    pub selected_option: usize,
    pub result: Option<QuizResult>,
    pub error: Option<String>,
    pub failed_during: Option<QuizPhase>,
    pub started_at: Option<Instant>,
    pub generation: u64,
    pub quiz_tx: Option<Sender<QuizRequest>>,
}

impl QuizSession {
    pub fn new(
        document_id: &str,
        document_name: &str,
        num_questions: usize,
        quiz_tx: Option<Sender<QuizRequest>>,
    ) -> Self {
        let mut session = Self {
            document_id: document_id.to_string(),
            document_name: document_name.to_string(),
            num_questions,
            state: QuizState::Loading,
            questions: Vec::new(),
            answers: HashMap::new(),
            current_index: 0,
            selected_option: 0,
            result: None,
            error: None,
            failed_during: None,
            started_at: None,
            generation: 0,
            quiz_tx,
        };
        session.request_generation();
        session
    }

    fn request_generation(&mut self) {
        self.generation += 1;
        self.state = QuizState::Loading;
        self.error = None;
        logger::log(&format!(
            "Requesting {} questions for document {} (generation {})",
            self.num_questions, self.document_id, self.generation
        ));
        match &self.quiz_tx {
            Some(tx) => {
                tx.send(QuizRequest::Generate {
                    generation: self.generation,
                    document_id: self.document_id.clone(),
                    num_questions: self.num_questions,
                })
                .ok();
            }
            None => self.fail(QuizPhase::Generate, &ApiError::Config),
        }
    }

    fn request_submission(&mut self) {
        self.generation += 1;
        self.state = QuizState::Submitting;
        self.error = None;
        let time_taken_secs = self
            .started_at
            .map(|t| t.elapsed().as_secs())
            .unwrap_or(0);
        logger::log(&format!(
            "Submitting {} answers for document {} after {}s",
            self.answers.len(),
            self.document_id,
            time_taken_secs
        ));
        match &self.quiz_tx {
            Some(tx) => {
                tx.send(QuizRequest::Submit {
                    generation: self.generation,
                    document_id: self.document_id.clone(),
                    answers: self.answers.clone(),
                    time_taken_secs,
                })
                .ok();
            }
            None => self.fail(QuizPhase::Submit, &ApiError::Config),
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn current_answer(&self) -> Option<&String> {
        self.current_question().and_then(|q| self.answers.get(&q.id))
    }

    /// Record the highlighted option as the answer for the current
    /// question. Does not advance; answers can be revised until
    /// submission.
    pub fn answer_current(&mut self) {
        if self.state != QuizState::InProgress {
            return;
        }
        if let Some(question) = self.questions.get(self.current_index)
            && let Some(option) = question.options.get(self.selected_option)
        {
            self.answers.insert(question.id, option.clone());
        }
    }

    pub fn next(&mut self) {
        if self.state != QuizState::InProgress {
            return;
        }
        if self.current_index < self.questions.len().saturating_sub(1) {
            self.current_index += 1;
            self.restore_selection();
        }
    }

    pub fn previous(&mut self) {
        if self.state != QuizState::InProgress {
            return;
        }
        if self.current_index > 0 {
            self.current_index -= 1;
            self.restore_selection();
        }
    }

    /// Re-highlight a previously chosen option when navigating back
    /// to an answered question.
    fn restore_selection(&mut self) {
        self.selected_option = self
            .current_question()
            .and_then(|q| {
                let answered = self.answers.get(&q.id)?;
                q.options.iter().position(|o| o == answered)
            })
            .unwrap_or(0);
    }

    pub fn select_previous_option(&mut self) {
        if self.selected_option > 0 {
            self.selected_option -= 1;
        }
    }

    pub fn select_next_option(&mut self) {
        let limit = self
            .current_question()
            .map(|q| q.options.len().saturating_sub(1))
            .unwrap_or(0);
        if self.selected_option < limit {
            self.selected_option += 1;
        }
    }

    pub fn all_answered(&self) -> bool {
        !self.questions.is_empty()
            && self.questions.iter().all(|q| self.answers.contains_key(&q.id))
    }

    /// Send the collected answers for grading. Rejected outright when
    /// any question is still unanswered, and a no-op while a
    /// submission is already in flight.
    pub fn submit(&mut self) -> bool {
        if self.state != QuizState::InProgress || !self.all_answered() {
            return false;
        }
        self.request_submission();
        true
    }

    /// Re-attempt whichever request failed, keeping collected answers.
    pub fn retry(&mut self) {
        if self.state != QuizState::Failed {
            return;
        }
        match self.failed_during {
            Some(QuizPhase::Submit) => self.request_submission(),
            Some(QuizPhase::Generate) | None => self.request_generation(),
        }
    }

    /// Start over with a freshly generated question set. The
    /// generator is nondeterministic, so a retake is a new quiz, not
    /// a replay.
    pub fn retake(&mut self) {
        if self.state != QuizState::Results {
            return;
        }
        self.questions.clear();
        self.answers.clear();
        self.result = None;
        self.current_index = 0;
        self.selected_option = 0;
        self.started_at = None;
        self.failed_during = None;
        self.request_generation();
    }

    /// Apply a worker response. Responses from an earlier generation
    /// (a retake dispatched while a fetch was still in flight) are
    /// dropped so they cannot clobber the current state.
    pub fn process_response(&mut self, response: QuizResponse) {
        match response {
            QuizResponse::Questions { generation, result } => {
                if generation != self.generation {
                    logger::log("Dropping stale question response");
                    return;
                }
                match result {
                    Ok(questions) => {
                        logger::log(&format!("Received {} questions", questions.len()));
                        self.questions = questions;
                        self.answers.clear();
                        self.current_index = 0;
                        self.selected_option = 0;
                        self.started_at = Some(Instant::now());
                        self.error = None;
                        self.failed_during = None;
                        self.state = QuizState::InProgress;
                    }
                    Err(e) => self.fail(QuizPhase::Generate, &e),
                }
            }
            QuizResponse::Graded { generation, result } => {
                if generation != self.generation {
                    logger::log("Dropping stale grading response");
                    return;
                }
                match result {
                    Ok(verdict) => {
                        logger::log(&format!(
                            "Graded: {}/{} ({:.1}%)",
                            verdict.score, verdict.total, verdict.percentage
                        ));
                        self.result = Some(verdict);
                        self.error = None;
                        self.failed_during = None;
                        self.state = QuizState::Results;
                    }
                    Err(e) => self.fail(QuizPhase::Submit, &e),
                }
            }
        }
    }

    fn fail(&mut self, phase: QuizPhase, error: &ApiError) {
        logger::log(&format!("Quiz request failed: {}", error));
        let message = match error {
            ApiError::Network(detail) if !detail.is_empty() => detail.clone(),
            ApiError::NotFound => "The server returned no questions for this document.".to_string(),
            ApiError::Config => error.to_string(),
            _ => GENERIC_FAILURE.to_string(),
        };
        self.error = Some(message);
        self.failed_during = Some(phase);
        self.state = QuizState::Failed;
    }
}
