use coursevault::api::ApiClient;
use coursevault::input::{handle_browse_input, handle_quiz_input};
use coursevault::models::{AppState, BrowsePage};
use coursevault::quiz::QuizSession;
use coursevault::quiz_worker::spawn_quiz_worker;
use coursevault::ui::{draw_menu, draw_quiz, draw_results, draw_table};
use coursevault::{logger, seed, QuizState};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

const MENU_ENTRIES: [&str; 6] = [
    "Users",
    "Files",
    "Folders",
    "Subscriptions",
    "Activity Logs",
    "Study Quiz (demo document)",
];
const QUIZ_ENTRY: usize = 5;
const TICK: Duration = Duration::from_millis(100);

fn browse_page_for(index: usize) -> BrowsePage {
    match index {
        0 => BrowsePage::new("Users", seed::users_view()),
        1 => BrowsePage::new("Files", seed::files_view()),
        2 => BrowsePage::new("Folders", seed::folders_view()),
        3 => BrowsePage::new("Subscriptions", seed::subscriptions_view()),
        _ => BrowsePage::new("Activity Logs", seed::logs_view()),
    }
}

fn main() -> io::Result<()> {
    logger::init();

    // One worker owns all quiz network traffic; the UI never blocks
    // on the backend. Without a configured base URL the quiz screen
    // reports the missing configuration instead.
    let (response_tx, response_rx) = mpsc::channel();
    let (request_tx, request_rx) = mpsc::channel();
    let quiz_tx = match ApiClient::from_env() {
        Ok(client) => {
            spawn_quiz_worker(client, response_tx, request_rx);
            Some(request_tx)
        }
        Err(e) => {
            logger::log(&format!("No backend configured: {}", e));
            None
        }
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app_state = AppState::Menu;
    let mut selected_entry: usize = 0;
    let mut browse: Option<BrowsePage> = None;
    let mut quiz: Option<QuizSession> = None;

    loop {
        terminal.draw(|f| match app_state {
            AppState::Menu => draw_menu(f, &MENU_ENTRIES, selected_entry),
            AppState::Browse => {
                if let Some(page) = &browse {
                    draw_table(f, page);
                }
            }
            AppState::Quiz => {
                if let Some(session) = &quiz {
                    if session.state == QuizState::Results {
                        draw_results(f, session);
                    } else {
                        draw_quiz(f, session);
                    }
                }
            }
        })?;

        // Worker responses only ever apply to the live session; a
        // session discarded by navigation takes its generation with
        // it, and anything still in the channel is drained away.
        match &mut quiz {
            Some(session) => {
                while let Ok(response) = response_rx.try_recv() {
                    session.process_response(response);
                }
            }
            None => while response_rx.try_recv().is_ok() {},
        }

        if let Some(page) = &mut browse {
            page.flush_search(Instant::now());
        }

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            match app_state {
                AppState::Menu => match key.code {
                    KeyCode::Up => {
                        if selected_entry > 0 {
                            selected_entry -= 1;
                        }
                    }
                    KeyCode::Down => {
                        if selected_entry < MENU_ENTRIES.len() - 1 {
                            selected_entry += 1;
                        }
                    }
                    KeyCode::Enter => {
                        if selected_entry == QUIZ_ENTRY {
                            quiz = Some(QuizSession::new(
                                seed::DEMO_DOCUMENT_ID,
                                seed::DEMO_DOCUMENT_NAME,
                                seed::DEMO_NUM_QUESTIONS,
                                quiz_tx.clone(),
                            ));
                            app_state = AppState::Quiz;
                        } else {
                            browse = Some(browse_page_for(selected_entry));
                            app_state = AppState::Browse;
                        }
                    }
                    KeyCode::Char('q') => break,
                    _ => {}
                },
                AppState::Browse => {
                    if let Some(page) = &mut browse {
                        handle_browse_input(page, key, &mut app_state);
                    }
                    if app_state == AppState::Menu {
                        browse = None;
                    }
                }
                AppState::Quiz => {
                    if let Some(session) = &mut quiz {
                        handle_quiz_input(session, key, &mut app_state);
                    }
                    if app_state == AppState::Menu {
                        quiz = None;
                    }
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
