pub mod api;
pub mod input;
pub mod logger;
pub mod models;
pub mod quiz;
pub mod quiz_worker;
pub mod seed;
pub mod table;
pub mod ui;
pub mod utils;

// Re-exports for convenience
pub use api::{ApiClient, ApiError, QuizBackend};
pub use input::{handle_browse_input, handle_quiz_input};
pub use models::{AppState, BrowsePage, Question, QuizResult};
pub use quiz::{QuizSession, QuizState};
pub use quiz_worker::spawn_quiz_worker;
pub use table::{CellValue, Column, Row, TabularView};
pub use ui::{draw_menu, draw_quiz, draw_results, draw_table};
pub use utils::{format_percentage, truncate_string};
