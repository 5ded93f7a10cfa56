use crate::models::{AppState, BrowsePage};
use crate::quiz::{QuizSession, QuizState};
use crossterm::event::{KeyCode, KeyEvent};

/// Keys for a listing screen: type to search, Left/Right to pick a
/// column, Enter to toggle its sort, Up/Down to page.
pub fn handle_browse_input(page: &mut BrowsePage, key: KeyEvent, app_state: &mut AppState) {
    match key.code {
        KeyCode::Esc => {
            *app_state = AppState::Menu;
        }
        KeyCode::Char(c) => {
            page.push_search_char(c);
        }
        KeyCode::Backspace => {
            page.pop_search_char();
        }
        KeyCode::Left => {
            page.select_previous_column();
        }
        KeyCode::Right => {
            page.select_next_column();
        }
        KeyCode::Enter => {
            page.sort_selected_column();
        }
        KeyCode::Down | KeyCode::PageDown => {
            page.view.next_page();
        }
        KeyCode::Up | KeyCode::PageUp => {
            page.view.previous_page();
        }
        _ => {}
    }
}

pub fn handle_quiz_input(session: &mut QuizSession, key: KeyEvent, app_state: &mut AppState) {
    if key.code == KeyCode::Esc {
        // Dropping the session in the caller discards any in-flight
        // request; stale responses are filtered by generation anyway.
        *app_state = AppState::Menu;
        return;
    }

    match session.state {
        QuizState::InProgress => match key.code {
            KeyCode::Up => session.select_previous_option(),
            KeyCode::Down => session.select_next_option(),
            KeyCode::Enter | KeyCode::Char(' ') => session.answer_current(),
            KeyCode::Left | KeyCode::Char('p') => session.previous(),
            KeyCode::Right | KeyCode::Char('n') => session.next(),
            KeyCode::Char('s') => {
                session.submit();
            }
            _ => {}
        },
        QuizState::Failed => {
            if key.code == KeyCode::Char('r') {
                session.retry();
            }
        }
        QuizState::Results => {
            if key.code == KeyCode::Char('r') {
                session.retake();
            }
        }
        // Loading and Submitting accept no actions; the in-flight
        // request is the mutual-exclusion gate.
        QuizState::Loading | QuizState::Submitting => {}
    }
}
