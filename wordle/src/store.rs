//! Persistence of cumulative stats.
//!
//! Storage is a plain string key-value store. `StatsRepository` knows the keys and the
//! encoding; stores only move strings around.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use hashbrown::HashMap;
use log::{info, warn};
use thiserror::Error;

use crate::score::{Outcome, Stats};

pub const TOTAL_SCORE: &str = "totalScore";
pub const GAMES_PLAYED: &str = "gamesPlayed";
pub const GAMES_WON: &str = "gamesWon";
pub const WIN_STREAK: &str = "winStreak";
pub const BEST_SCORE: &str = "bestScore";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to access stats file: {0}")]
    Io(#[from] io::Error),
    #[error("stats file is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Writes every entry in one update.
    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), StoreError>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.set_many(&[(key, value)])
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        (**self).set_many(entries)
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.values.insert(key.to_owned(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.values.insert((*key).to_owned(), value.clone());
        }
        Ok(())
    }
}

/// A JSON object on disk, rewritten whole on every update.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_many(&mut self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        let mut values = self.values.clone();
        for (key, value) in entries {
            values.insert((*key).to_owned(), value.clone());
        }

        // Write aside and rename so a reader never sees half a file.
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, serde_json::to_string_pretty(&values)?)?;
        fs::rename(&staging, &self.path)?;

        self.values = values;
        Ok(())
    }
}

/// Stats and last-played words on top of a key-value store.
#[derive(Debug)]
pub struct StatsRepository<S> {
    store: S,
}

impl<S: KeyValueStore> StatsRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load(&self) -> Stats {
        Stats {
            total_score: self.read(TOTAL_SCORE),
            games_played: self.read(GAMES_PLAYED),
            games_won: self.read(GAMES_WON),
            win_streak: self.read(WIN_STREAK),
            best_score: self.read(BEST_SCORE),
        }
    }

    pub fn save(&mut self, stats: &Stats) -> Result<(), StoreError> {
        self.store.set_many(&[
            (TOTAL_SCORE, stats.total_score.to_string()),
            (GAMES_PLAYED, stats.games_played.to_string()),
            (GAMES_WON, stats.games_won.to_string()),
            (WIN_STREAK, stats.win_streak.to_string()),
            (BEST_SCORE, stats.best_score.to_string()),
        ])
    }

    /// Applies a finished game to the stored stats and returns the new totals.
    pub fn record(&mut self, outcome: &Outcome) -> Result<Stats, StoreError> {
        let stats = self.load().apply(outcome);
        self.save(&stats)?;
        info!(
            "game recorded: won={} score={} total={} streak={}",
            outcome.won, outcome.score, stats.total_score, stats.win_streak
        );
        Ok(stats)
    }

    pub fn last_word(&self, key: &str) -> Option<String> {
        self.store.get(key).filter(|word| !word.is_empty())
    }

    pub fn set_last_word(&mut self, key: &str, word: &str) -> Result<(), StoreError> {
        self.store.set(key, word.to_owned())
    }

    fn read<T>(&self, key: &str) -> T
    where
        T: std::str::FromStr + Default,
    {
        match self.store.get(key) {
            None => T::default(),
            Some(value) => value.trim().parse().unwrap_or_else(|_| {
                warn!("ignoring unreadable value {value:?} for {key}");
                T::default()
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use uuid::Uuid;

    use super::*;

    #[test]
    fn missing_keys_read_as_zero() {
        let repo = StatsRepository::new(MemoryStore::new());
        assert_eq!(repo.load(), Stats::default());
    }

    #[test]
    fn garbage_reads_as_zero() {
        let store = MemoryStore::new()
            .with(TOTAL_SCORE, "lots")
            .with(GAMES_PLAYED, 3);
        let stats = StatsRepository::new(store).load();
        assert_eq!(stats.total_score, 0);
        assert_eq!(stats.games_played, 3);
    }

    #[test]
    fn record_writes_every_key() {
        let mut repo = StatsRepository::new(MemoryStore::new().with(TOTAL_SCORE, 20));
        let stats = repo.record(&Outcome::new(false, 6, 10)).unwrap();

        assert_eq!(stats.total_score, 10);
        assert_eq!(repo.store().get(TOTAL_SCORE).as_deref(), Some("10"));
        assert_eq!(repo.store().get(GAMES_PLAYED).as_deref(), Some("1"));
        assert_eq!(repo.store().get(GAMES_WON).as_deref(), Some("0"));
        assert_eq!(repo.store().get(WIN_STREAK).as_deref(), Some("0"));
        assert_eq!(repo.store().get(BEST_SCORE).as_deref(), Some("0"));
    }

    #[test]
    fn file_store_survives_reopen() {
        let path = env::temp_dir().join(format!("wordle-stats-{}.json", Uuid::new_v4()));

        let mut repo = StatsRepository::new(FileStore::open(&path).unwrap());
        repo.record(&Outcome::new(true, 1, 0)).unwrap();
        repo.set_last_word("lastWord", "BLIND").unwrap();

        let repo = StatsRepository::new(FileStore::open(&path).unwrap());
        let stats = repo.load();
        assert_eq!(stats.total_score, 85);
        assert_eq!(stats.best_score, 85);
        assert_eq!(stats.win_streak, 1);
        assert_eq!(repo.last_word("lastWord").as_deref(), Some("BLIND"));
        assert_eq!(repo.last_word("lastClassicWord"), None);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = env::temp_dir().join(format!("wordle-stats-{}.json", Uuid::new_v4()));
        fs::write(&path, "not json").unwrap();

        assert!(matches!(FileStore::open(&path), Err(StoreError::Format(_))));

        fs::remove_file(&path).unwrap();
    }
}
