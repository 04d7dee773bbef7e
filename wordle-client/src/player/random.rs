use rand::seq::SliceRandom;
use squirrel_rng::SquirrelRng;
use wordle::{Catalog, GameResponse};

use super::{print_last_row, Move, Player};

/// Works through the built-in word list in random order.
pub struct RandomPlayer {
    idx: usize,
    words: Vec<String>,
}

impl RandomPlayer {
    pub fn new() -> Self {
        let mut words: Vec<_> = Catalog::classic().words().map(str::to_owned).collect();
        words.shuffle(&mut SquirrelRng::new());
        Self { idx: 0, words }
    }
}

impl Player for RandomPlayer {
    fn next_move(&mut self, game: &GameResponse) -> Move {
        print_last_row(game);

        match self.words.get(self.idx) {
            Some(word) => {
                self.idx += 1;
                Move::Guess(word.clone())
            }
            None => Move::Quit,
        }
    }
}
