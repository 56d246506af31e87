//! Bundled demo games.

mod breakout;
mod game_2048;
mod score_keeper;
mod snake;

pub use breakout::Breakout;
pub use game_2048::{Game2048, slide_line};
pub use score_keeper::ScoreKeeper;
pub use snake::Snake;
