//! A five-letter word guessing game with a themed and a classic word list, paid hints and
//! a running score kept across games.

use std::{borrow::Cow, collections::BTreeMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod catalog;
pub mod feedback;
pub mod hint;
pub mod score;
pub mod select;
pub mod session;
pub mod store;
pub mod validate;
pub mod variant;

pub use catalog::{Catalog, Entry, Trivia};
pub use feedback::{evaluate, Keyboard, Mark, Marks};
pub use hint::{HintError, HintKind, HintOffer, HintPolicy, Reveal};
pub use score::{final_score, Outcome, Stats};
pub use select::{select_word, IndexSource};
pub use session::{GuessError, Session, Status, Turn};
pub use store::{FileStore, KeyValueStore, MemoryStore, StatsRepository, StoreError};
pub use validate::{CatalogOnly, DictionaryApi, Verdict, WordValidator};
pub use variant::{Mode, Variant};

pub const WORD_LENGTH: usize = 5;
pub const MAX_GUESSES: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Row {
    pub word: String,
    pub marks: Marks,
}

fn rows(game: &Session) -> Vec<Row> {
    game.board()
        .map(|(word, marks)| Row {
            word: word.to_owned(),
            marks,
        })
        .collect()
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CreateGameResponse {
    pub id: Uuid,
    pub mode: Mode,
    pub length: usize,
    pub guesses: usize,
    pub hints: Vec<HintOffer>,
}

impl CreateGameResponse {
    pub fn new(id: Uuid, game: &Session, total_score: i64) -> Self {
        Self {
            id,
            mode: game.mode(),
            length: WORD_LENGTH,
            guesses: game.guesses_remaining(),
            hints: game.hint_offers(total_score),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GameResponse {
    pub board: Vec<Row>,
    pub keyboard: BTreeMap<String, Mark>,
    pub revealed: Vec<Option<char>>,
    pub clues: Vec<Reveal>,
    pub guesses: usize,
    pub hints: Vec<HintOffer>,
}

impl GameResponse {
    pub fn new(game: &Session, total_score: i64) -> Self {
        Self {
            board: rows(game),
            keyboard: game
                .keyboard()
                .iter()
                .map(|(letter, mark)| (letter.to_string(), mark))
                .collect(),
            revealed: game.revealed().to_vec(),
            clues: game.clues().to_vec(),
            guesses: game.guesses_remaining(),
            hints: game.hint_offers(total_score),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UpdateGameRequest {
    pub word: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum UpdateGameResponse {
    Update(GameResponse),
    Finalize {
        victory: bool,
        message: Cow<'static, str>,
        word: String,
        score: i64,
        board: Vec<Row>,
        stats: Stats,
    },
}

impl UpdateGameResponse {
    pub fn update(game: &Session, total_score: i64) -> Self {
        UpdateGameResponse::Update(GameResponse::new(game, total_score))
    }

    pub fn finalize(
        game: &Session,
        outcome: &Outcome,
        stats: Stats,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        UpdateGameResponse::Finalize {
            victory: outcome.won,
            message: message.into(),
            word: game.secret().to_owned(),
            score: outcome.score,
            board: rows(game),
            stats,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HintRequest {
    pub kind: HintKind,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HintResponse {
    pub reveal: Reveal,
    pub penalty: i64,
    pub game: GameResponse,
}
