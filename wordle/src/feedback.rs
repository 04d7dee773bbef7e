//! Guess evaluation.
//!
//! A guess is scored against the secret one position at a time. Exact matches are settled
//! first and consume their letter, so a duplicated letter in the guess can only be marked
//! present as many times as the secret still has copies of it.

use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::WORD_LENGTH;

/// Rows of the on-screen keyboard.
pub const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

/// The classification of a single guessed letter.
///
/// Variants are ordered by strength, which is what lets the keyboard keep the best state a
/// letter has ever reached with a plain `max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    /// Letter not in the word, or every copy already accounted for (gray)
    Absent,
    /// Letter in the word at another position (yellow)
    Present,
    /// Letter in the right position (green)
    Exact,
}

impl Mark {
    pub fn to_char(self) -> char {
        match self {
            Mark::Exact => '🟩',
            Mark::Present => '🟨',
            Mark::Absent => '⬛',
        }
    }
}

/// Marks for a whole guess.
pub type Marks = [Mark; WORD_LENGTH];

/// Classify `guess` against `secret`.
///
/// Both words are expected to be five ASCII letters of the same case; anything else is a
/// caller bug and is only checked in debug builds.
pub fn evaluate(secret: &str, guess: &str) -> Marks {
    let secret = secret.as_bytes();
    let guess = guess.as_bytes();

    debug_assert_eq!(secret.len(), WORD_LENGTH);
    debug_assert_eq!(guess.len(), WORD_LENGTH);

    let mut marks = [Mark::Absent; WORD_LENGTH];
    let mut remaining: [Option<u8>; WORD_LENGTH] = [None; WORD_LENGTH];

    for i in 0..WORD_LENGTH {
        if guess[i] == secret[i] {
            marks[i] = Mark::Exact;
        } else {
            remaining[i] = Some(secret[i]);
        }
    }

    for i in 0..WORD_LENGTH {
        if marks[i] == Mark::Exact {
            continue;
        }

        if let Some(slot) = remaining.iter_mut().find(|slot| **slot == Some(guess[i])) {
            *slot = None;
            marks[i] = Mark::Present;
        }
    }

    marks
}

pub fn is_win(marks: &Marks) -> bool {
    marks.iter().all(|&mark| mark == Mark::Exact)
}

pub fn to_emoji_string(marks: &Marks) -> String {
    marks.iter().map(|mark| mark.to_char()).collect()
}

/// The best mark observed for each letter during a session.
#[derive(Clone, Debug, Default)]
pub struct Keyboard {
    letters: HashMap<u8, Mark>,
}

impl Keyboard {
    /// Fold the marks of one guess into the keyboard. A letter is never downgraded.
    pub fn record(&mut self, guess: &str, marks: &Marks) {
        for (u, &mark) in guess.bytes().zip(marks) {
            let entry = self.letters.entry(u.to_ascii_uppercase()).or_insert(mark);
            *entry = (*entry).max(mark);
        }
    }

    pub fn get(&self, letter: char) -> Option<Mark> {
        let u = letter.to_ascii_uppercase() as u32;
        u8::try_from(u).ok().and_then(|u| self.letters.get(&u).copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, Mark)> + '_ {
        self.letters.iter().map(|(&u, &mark)| (u as char, mark))
    }
}

impl FromIterator<(char, Mark)> for Keyboard {
    fn from_iter<I: IntoIterator<Item = (char, Mark)>>(iter: I) -> Self {
        let mut keyboard = Keyboard::default();
        for (letter, mark) in iter {
            let entry = keyboard
                .letters
                .entry(letter.to_ascii_uppercase() as u8)
                .or_insert(mark);
            *entry = (*entry).max(mark);
        }
        keyboard
    }
}

impl fmt::Display for Keyboard {
    /// Renders the keyboard rows; untouched keys are shown as-is, absent keys as `·`, and
    /// present/exact keys in lowercase/uppercase brackets.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in KEYBOARD_ROWS.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }

            write!(f, "{}", " ".repeat(idx))?;
            for letter in row.chars() {
                match self.get(letter) {
                    None => write!(f, " {letter} ")?,
                    Some(Mark::Absent) => write!(f, " · ")?,
                    Some(Mark::Present) => write!(f, "({})", letter.to_ascii_lowercase())?,
                    Some(Mark::Exact) => write!(f, "[{letter}]")?,
                }
            }
        }
        Ok(())
    }
}
