use std::{io, path::Path};

use hashbrown::HashSet;
use log::debug;
use rand::seq::SliceRandom;
use squirrel_rng::SquirrelRng;
use wordle::{evaluate, Catalog, GameResponse, HintKind, Row};

use super::{print_last_row, Move, Player};

pub struct StrategicPlayerFactory {
    dictionary: Vec<String>,
}

impl StrategicPlayerFactory {
    pub fn from_path(dictionary: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::from_catalog(&Catalog::from_path(dictionary)?))
    }

    fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            dictionary: catalog.words().map(str::to_owned).collect(),
        }
    }

    pub fn into_player(self) -> StrategicPlayer {
        StrategicPlayer {
            dictionary: self.dictionary,
            rejected: HashSet::new(),
            hints_refused: false,
            rng: SquirrelRng::new(),
        }
    }
}

/// Only guesses words that agree with every answer so far, and buys a letter when the
/// field is still wide.
pub struct StrategicPlayer {
    dictionary: Vec<String>,
    rejected: HashSet<String>,
    hints_refused: bool,
    rng: SquirrelRng,
}

impl StrategicPlayer {
    fn candidates<'a>(&'a self, game: &GameResponse) -> Vec<&'a str> {
        self.dictionary
            .iter()
            .map(String::as_str)
            .filter(|word| !self.rejected.contains(*word))
            .filter(|word| fits_board(word, &game.board) && fits_revealed(word, &game.revealed))
            .collect()
    }

    fn wants_hint(&self, game: &GameResponse, candidates: usize) -> bool {
        !self.hints_refused
            && !game.board.is_empty()
            && candidates > game.guesses * 4
            && game
                .hints
                .iter()
                .any(|offer| offer.kind == HintKind::Letter && offer.affordable)
    }
}

impl Player for StrategicPlayer {
    fn next_move(&mut self, game: &GameResponse) -> Move {
        print_last_row(game);

        let candidates: Vec<String> = self
            .candidates(game)
            .into_iter()
            .map(str::to_owned)
            .collect();
        debug!("{} candidates left", candidates.len());

        if self.wants_hint(game, candidates.len()) {
            return Move::Hint(HintKind::Letter);
        }

        match candidates.choose(&mut self.rng) {
            Some(word) => Move::Guess(word.clone()),
            None => Move::Quit,
        }
    }

    fn rejected(&mut self, word: &str, _reason: &str) {
        self.rejected.insert(word.to_ascii_uppercase());
    }

    fn refused(&mut self, _kind: HintKind, _reason: &str) {
        self.hints_refused = true;
    }
}

/// A word could be the secret only if it would have produced every row on the board.
fn fits_board(word: &str, board: &[Row]) -> bool {
    board
        .iter()
        .all(|row| row.word != word && evaluate(word, &row.word) == row.marks)
}

fn fits_revealed(word: &str, revealed: &[Option<char>]) -> bool {
    word.chars()
        .zip(revealed)
        .all(|(letter, revealed)| revealed.map_or(true, |u| u == letter))
}
