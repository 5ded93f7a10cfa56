pub mod layout;
mod menu;
mod quiz;
mod results;
mod table;

pub use layout::{calculate_quiz_chunks, calculate_screen_chunks, calculate_table_chunks};
pub use menu::draw_menu;
pub use quiz::draw_quiz;
pub use results::draw_results;
pub use table::draw_table;
