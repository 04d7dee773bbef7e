mod random;
mod strategic;
mod user;

pub use random::RandomPlayer;
pub use strategic::StrategicPlayerFactory;
pub use user::UserInputPlayer;

use wordle::{feedback::to_emoji_string, GameResponse, HintKind};

pub enum Move {
    Guess(String),
    Hint(HintKind),
    Quit,
}

pub trait Player {
    fn next_move(&mut self, game: &GameResponse) -> Move;

    /// The server turned the word down.
    fn rejected(&mut self, _word: &str, _reason: &str) {}

    /// The server would not hand out the hint.
    fn refused(&mut self, _kind: HintKind, _reason: &str) {}
}

pub fn print_last_row(game: &GameResponse) {
    if let Some(row) = game.board.last() {
        println!("{} {}", to_emoji_string(&row.marks), row.word);
    }
}
