use std::{borrow::Cow, fs, io, path::Path};

use serde::{Deserialize, Serialize};

use crate::WORD_LENGTH;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SongTitle,
    Album,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Background for a themed word. Album name and cover double as hints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Trivia {
    pub category: Category,
    pub album: &'static str,
    pub year: u16,
    pub difficulty: Difficulty,
    pub hint: &'static str,
    pub album_cover: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub word: Cow<'static, str>,
    pub trivia: Option<Trivia>,
}

impl Entry {
    pub fn plain(word: impl Into<Cow<'static, str>>) -> Self {
        Self {
            word: word.into(),
            trivia: None,
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }
}

/// An immutable word list a session draws its secret from.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// The themed list, every entry carrying trivia.
    pub fn themed() -> Self {
        let entries = THEMED
            .iter()
            .map(|&(word, trivia)| Entry {
                word: Cow::Borrowed(word),
                trivia: Some(trivia),
            })
            .collect();
        Self { entries }
    }

    /// The built-in classic list.
    pub fn classic() -> Self {
        Self::from_words(include_str!("../words/classic.txt").lines())
    }

    /// Builds a plain catalog, keeping only five-letter ASCII words, uppercased and
    /// deduplicated.
    pub fn from_words<'a>(words: impl Iterator<Item = &'a str>) -> Self {
        let mut words: Vec<_> = words
            .map(str::trim)
            .filter(|word| word.len() == WORD_LENGTH && word.bytes().all(|u| u.is_ascii_alphabetic()))
            .map(|word| word.to_ascii_uppercase())
            .collect();

        words.sort_unstable();
        words.dedup();

        Self {
            entries: words.into_iter().map(Entry::plain).collect(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_words(text.lines()))
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.iter().any(|entry| entry.word.eq_ignore_ascii_case(word))
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::word)
    }
}

const fn song(
    album: &'static str,
    year: u16,
    difficulty: Difficulty,
    hint: &'static str,
    album_cover: &'static str,
) -> Trivia {
    Trivia {
        category: Category::SongTitle,
        album,
        year,
        difficulty,
        hint,
        album_cover,
    }
}

const fn album(
    album: &'static str,
    year: u16,
    difficulty: Difficulty,
    hint: &'static str,
    album_cover: &'static str,
) -> Trivia {
    Trivia {
        category: Category::Album,
        album,
        year,
        difficulty,
        hint,
        album_cover,
    }
}

use Difficulty::*;

static THEMED: &[(&str, Trivia)] = &[
    ("BLIND", song("Korn", 1994, Easy, "Opening track from the debut album", "/albums/korn.jpg")),
    ("CLOWN", song("Korn", 1994, Easy, "Fourth track from their self-titled debut", "/albums/korn.jpg")),
    ("FAGET", song("Korn", 1994, Medium, "Controversial track about bullying from the debut", "/albums/korn.jpg")),
    ("DADDY", song("Korn", 1994, Easy, "Emotional 17-minute closing track from the debut", "/albums/korn.jpg")),
    ("TWIST", song("Life Is Peachy", 1996, Easy, "49-second opening track from their second album", "/albums/life-is-peachy.jpg")),
    ("FREAK", song("Follow the Leader", 1998, Easy, "Part of their biggest hit '_____ on a Leash'", "/albums/follow-the-leader.jpg")),
    ("SEEDS", song("Follow the Leader", 1998, Medium, "Track 11 from Follow the Leader", "/albums/follow-the-leader.jpg")),
    ("TRASH", song("Issues", 1999, Easy, "Third track from the Issues album", "/albums/issues.jpg")),
    ("DIRTY", song("Issues", 1999, Medium, "Closing track from Issues", "/albums/issues.jpg")),
    ("BLAME", song("Untouchables", 2002, Easy, "Third track from Untouchables", "/albums/untouchables.jpg")),
    ("ALONE", song("Untouchables", 2002, Medium, "From '_____ I Break' on Untouchables", "/albums/untouchables.jpg")),
    ("ALIVE", song("Take a Look in the Mirror", 2003, Easy, "Track 9 from Take a Look in the Mirror", "/albums/take-a-look-in-the-mirror.jpg")),
    ("CREEP", song("MTV Unplugged", 2007, Medium, "Radiohead cover from MTV Unplugged", "/albums/mtv-unplugged.jpg")),
    ("CHAOS", song("The Path of Totality", 2011, Medium, "From '_____ Lives in Everything' - dubstep era", "/albums/the-path-of-totality.jpg")),
    ("SPIKE", song("The Paradigm Shift", 2013, Medium, "From '_____ in My Veins' - Head's return album", "/albums/the-paradigm-shift.jpg")),
    ("HATER", song("The Paradigm Shift", 2013, Hard, "Bonus track from The Paradigm Shift deluxe edition", "/albums/the-paradigm-shift.jpg")),
    ("NEVER", song("The Paradigm Shift", 2013, Medium, "From '_____ Never' - lead single from Head's return", "/albums/the-paradigm-shift.jpg")),
    ("VENOM", song("The Serenity of Suffering", 2016, Medium, "From 'Black Is the Soul' era", "/albums/the-serenity-of-suffering.jpg")),
    ("DEATH", song("The Nothing", 2019, Medium, "Theme throughout The Nothing album", "/albums/the-nothing.jpg")),
    ("SHIFT", album("The Paradigm Shift", 2013, Medium, "The Paradigm _____", "/albums/the-paradigm-shift.jpg")),
    ("PEACE", album("Life Is Peachy", 1996, Medium, "Life Is _____y (close enough!)", "/albums/life-is-peachy.jpg")),
    ("TOTAL", album("The Path of Totality", 2011, Medium, "The Path of _____ity", "/albums/the-path-of-totality.jpg")),
];
