//! A single playthrough.
//!
//! Submitting a guess goes through three steps: `screen` rejects malformed or repeated
//! guesses and tells whether the word is in the catalog; words that are not must be looked
//! up (`begin_lookup` blocks further input meanwhile); `resolve` then applies the verdict
//! and, if the word is accepted, scores it. `submit` runs the lot with a blocking validator.

use std::sync::Arc;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalog::{Entry, Trivia},
    feedback::{evaluate, is_win, Keyboard, Marks},
    hint::{HintError, HintKind, HintLedger, HintOffer, Reveal},
    score::Outcome,
    select::{select_word, IndexSource},
    store::{KeyValueStore, StatsRepository, StoreError},
    validate::{Verdict, WordValidator},
    variant::{Mode, Variant},
    MAX_GUESSES, WORD_LENGTH,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GuessError {
    #[error("the game is over")]
    GameOver,
    #[error("a word is already being checked")]
    Busy,
    #[error("guesses must be 5 letters long - {0:?} is not valid")]
    WrongLength(String),
    #[error("guesses may only use the letters A to Z - {0:?} is not valid")]
    NotAlphabetic(String),
    #[error("You cannot guess the same word.")]
    Repeated(String),
    #[error("Not a valid word.")]
    NotAWord(String),
    #[error("unable to check {0} right now - try again")]
    ValidationUnavailable(String),
}

/// A guess that passed the local checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screened {
    word: String,
    known: bool,
}

impl Screened {
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Words outside the catalog must go through the dictionary.
    pub fn needs_lookup(&self) -> bool {
        !self.known
    }
}

/// The result of an accepted guess.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub guess: String,
    pub marks: Marks,
    pub status: Status,
    /// Set only on the guess that ends the game.
    pub outcome: Option<Outcome>,
}

#[derive(Clone, Debug)]
pub struct Session {
    variant: Arc<Variant>,
    secret: Entry,
    guesses: Vec<String>,
    current: String,
    keyboard: Keyboard,
    revealed: [Option<char>; WORD_LENGTH],
    clues: Vec<Reveal>,
    hints: HintLedger,
    status: Status,
    checking: bool,
}

impl Session {
    pub fn new(variant: Arc<Variant>, secret: Entry) -> Self {
        debug_assert_eq!(secret.word.len(), WORD_LENGTH);

        Self {
            variant,
            secret,
            guesses: Vec::with_capacity(MAX_GUESSES),
            current: String::with_capacity(WORD_LENGTH),
            keyboard: Keyboard::default(),
            revealed: [None; WORD_LENGTH],
            clues: Vec::new(),
            hints: HintLedger::default(),
            status: Status::InProgress,
            checking: false,
        }
    }

    /// Starts a session on a fresh secret, remembering it as the mode's last word.
    pub fn start<S: KeyValueStore>(
        variant: Arc<Variant>,
        repo: &mut StatsRepository<S>,
        rng: &mut impl IndexSource,
    ) -> Result<Self, StoreError> {
        let key = variant.last_word_key();
        let last = repo.last_word(key);
        let secret = select_word(&variant.catalog, last.as_deref(), rng).clone();
        repo.set_last_word(key, secret.word())?;

        debug!("starting a {} game", variant.mode);
        Ok(Self::new(variant, secret))
    }

    pub fn mode(&self) -> Mode {
        self.variant.mode
    }

    pub fn secret(&self) -> &str {
        self.secret.word()
    }

    pub fn trivia(&self) -> Option<&Trivia> {
        self.secret.trivia.as_ref()
    }

    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn revealed(&self) -> &[Option<char>; WORD_LENGTH] {
        &self.revealed
    }

    pub fn clues(&self) -> &[Reveal] {
        &self.clues
    }

    pub fn hints(&self) -> &HintLedger {
        &self.hints
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_won(&self) -> bool {
        self.status == Status::Won
    }

    pub fn is_lost(&self) -> bool {
        self.status == Status::Lost
    }

    pub fn is_over(&self) -> bool {
        self.status != Status::InProgress
    }

    pub fn is_checking(&self) -> bool {
        self.checking
    }

    pub fn guesses_remaining(&self) -> usize {
        MAX_GUESSES - self.guesses.len()
    }

    /// Every submitted guess with its marks.
    pub fn board(&self) -> impl Iterator<Item = (&str, Marks)> + '_ {
        self.guesses
            .iter()
            .map(|guess| (guess.as_str(), evaluate(self.secret.word(), guess)))
    }

    /// How the game ended, once it has.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            Status::InProgress => None,
            Status::Won => Some(Outcome::new(
                true,
                self.guesses.len() as u32 - 1,
                self.hints.penalty,
            )),
            Status::Lost => Some(Outcome::new(
                false,
                MAX_GUESSES as u32,
                self.hints.penalty,
            )),
        }
    }

    /// Appends a letter to the pending guess. Ignored once five letters are typed, while a
    /// lookup is outstanding and after the game ends.
    pub fn type_letter(&mut self, letter: char) -> bool {
        if self.is_over()
            || self.checking
            || self.current.len() >= WORD_LENGTH
            || !letter.is_ascii_alphabetic()
        {
            return false;
        }

        self.current.push(letter.to_ascii_uppercase());
        true
    }

    pub fn erase(&mut self) -> Option<char> {
        if self.is_over() || self.checking {
            return None;
        }
        self.current.pop()
    }

    pub fn screen(&self, word: &str) -> Result<Screened, GuessError> {
        if self.is_over() {
            return Err(GuessError::GameOver);
        }

        if self.checking {
            return Err(GuessError::Busy);
        }

        let word = word.trim();
        if word.chars().count() != WORD_LENGTH {
            return Err(GuessError::WrongLength(word.to_owned()));
        }

        if !word.bytes().all(|u| u.is_ascii_alphabetic()) {
            return Err(GuessError::NotAlphabetic(word.to_owned()));
        }

        let word = word.to_ascii_uppercase();
        if self.guesses.contains(&word) {
            return Err(GuessError::Repeated(word));
        }

        let known = self.variant.catalog.contains(&word);
        Ok(Screened { word, known })
    }

    /// Blocks input until `resolve` is called.
    pub fn begin_lookup(&mut self) {
        self.checking = true;
    }

    /// Ends a lookup and applies its verdict to the guess.
    pub fn resolve(&mut self, screened: Screened, verdict: Verdict) -> Result<Turn, GuessError> {
        self.checking = false;

        match verdict {
            Verdict::Valid => self.commit(screened),
            Verdict::Rejected => Err(GuessError::NotAWord(screened.word)),
            Verdict::Unavailable => Err(GuessError::ValidationUnavailable(screened.word)),
        }
    }

    /// Scores a catalog word. Anything else has to go through `resolve`.
    pub fn accept(&mut self, screened: Screened) -> Result<Turn, GuessError> {
        if screened.needs_lookup() {
            return Err(GuessError::NotAWord(screened.word));
        }
        self.commit(screened)
    }

    fn commit(&mut self, screened: Screened) -> Result<Turn, GuessError> {
        // Checked again: the game may have moved on while the word was being looked up.
        let Screened { word, .. } = self.screen(&screened.word)?;

        let marks = evaluate(self.secret.word(), &word);
        self.keyboard.record(&word, &marks);
        self.guesses.push(word.clone());
        self.current.clear();

        if is_win(&marks) {
            self.status = Status::Won;
        } else if self.guesses.len() == MAX_GUESSES {
            self.status = Status::Lost;
        }

        let outcome = self.outcome();
        if let Some(outcome) = &outcome {
            info!(
                "{} game over after {} guesses: won={} score={}",
                self.variant.mode,
                self.guesses.len(),
                outcome.won,
                outcome.score
            );
        }

        Ok(Turn {
            guess: word,
            marks,
            status: self.status,
            outcome,
        })
    }

    pub fn submit(
        &mut self,
        word: &str,
        validator: &dyn WordValidator,
    ) -> Result<Turn, GuessError> {
        let screened = self.screen(word)?;
        if !screened.needs_lookup() {
            return self.accept(screened);
        }

        self.begin_lookup();
        let verdict = validator.validate(screened.word());
        self.resolve(screened, verdict)
    }

    /// Submits the pending guess.
    pub fn enter(&mut self, validator: &dyn WordValidator) -> Result<Turn, GuessError> {
        let word = self.current.clone();
        self.submit(&word, validator)
    }

    /// Hints that could be taken now, given the player's cumulative score.
    pub fn hint_offers(&self, total_score: i64) -> Vec<HintOffer> {
        if self.is_over() || self.checking {
            return Vec::new();
        }

        self.variant
            .hints
            .offers(&self.hints, self.trivia(), total_score)
    }

    pub fn take_hint(
        &mut self,
        kind: HintKind,
        total_score: i64,
        rng: &mut impl IndexSource,
    ) -> Result<Reveal, HintError> {
        if self.is_over() {
            return Err(HintError::GameOver);
        }

        if self.checking {
            return Err(HintError::Busy);
        }

        let hidden: Vec<_> = (0..WORD_LENGTH)
            .filter(|&idx| self.revealed[idx].is_none())
            .collect();
        if kind == HintKind::Letter && hidden.is_empty() {
            return Err(HintError::NothingToReveal);
        }

        let trivia = self.secret.trivia;
        let mut ledger = self.hints;
        let cost = self
            .variant
            .hints
            .charge(kind, &mut ledger, trivia.as_ref(), total_score)?;

        let reveal = match kind {
            HintKind::AlbumCover => trivia.map(|trivia| Reveal::AlbumCover {
                path: trivia.album_cover.to_owned(),
            }),
            HintKind::AlbumName => trivia.map(|trivia| Reveal::AlbumName {
                album: trivia.album.to_owned(),
            }),
            HintKind::Letter => {
                let position = hidden[rng.index(hidden.len())];
                let letter = self.secret.word.as_bytes()[position] as char;
                self.revealed[position] = Some(letter);
                Some(Reveal::Letter { position, letter })
            }
        }
        .ok_or(HintError::NotOffered(kind))?;

        self.hints = ledger;
        self.clues.push(reveal.clone());
        debug!("{kind} hint taken for {cost} points");

        Ok(reveal)
    }
}
