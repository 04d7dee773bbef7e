use log::debug;
use rand::Rng;
use squirrel_rng::SquirrelRng;

use crate::catalog::{Catalog, Entry};

/// A source of uniformly distributed indices.
///
/// Selection and letter reveals only ever need "pick one of `len`", so that is all a
/// random source has to provide. Tests script it.
pub trait IndexSource {
    /// Returns a value in `0..len`. `len` is never zero.
    fn index(&mut self, len: usize) -> usize;
}

impl IndexSource for SquirrelRng {
    fn index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

impl<T: IndexSource + ?Sized> IndexSource for &mut T {
    fn index(&mut self, len: usize) -> usize {
        (**self).index(len)
    }
}

/// Picks a secret word, avoiding `last_word` whenever that still leaves something to pick.
///
/// # Panics
///
/// Panics if the catalog is empty.
pub fn select_word<'a>(
    catalog: &'a Catalog,
    last_word: Option<&str>,
    rng: &mut impl IndexSource,
) -> &'a Entry {
    assert!(!catalog.is_empty(), "your word list is empty!");

    let mut candidates: Vec<_> = catalog
        .entries()
        .iter()
        .filter(|entry| last_word.map_or(true, |last| !entry.word.eq_ignore_ascii_case(last)))
        .collect();

    if candidates.is_empty() {
        candidates = catalog.entries().iter().collect();
    }

    let entry = candidates[rng.index(candidates.len())];
    debug!("selected a word out of {} candidates", candidates.len());
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(usize);

    impl IndexSource for Always {
        fn index(&mut self, len: usize) -> usize {
            self.0.min(len - 1)
        }
    }

    fn catalog(words: &[&'static str]) -> Catalog {
        Catalog::from_words(words.iter().copied())
    }

    #[test]
    fn never_repeats_the_last_word() {
        let catalog = catalog(&["BLIND", "CLOWN", "DADDY"]);
        for idx in 0..3 {
            let entry = select_word(&catalog, Some("CLOWN"), &mut Always(idx));
            assert_ne!(entry.word(), "CLOWN");
        }
    }

    #[test]
    fn single_word_catalog_repeats() {
        let catalog = catalog(&["BLIND"]);
        let entry = select_word(&catalog, Some("BLIND"), &mut Always(0));
        assert_eq!(entry.word(), "BLIND");
    }

    #[test]
    fn without_history_every_word_is_reachable() {
        let catalog = catalog(&["BLIND", "CLOWN", "DADDY"]);
        let picked: Vec<_> = (0..3)
            .map(|idx| select_word(&catalog, None, &mut Always(idx)).word())
            .collect();
        assert_eq!(picked, ["BLIND", "CLOWN", "DADDY"]);
    }

    #[test]
    fn seeded_rng_stays_in_bounds() {
        let catalog = Catalog::themed();
        let mut rng = SquirrelRng::with_seed(3408509824);
        let mut last = None;
        for _ in 0..100 {
            let word = select_word(&catalog, last.as_deref(), &mut rng).word().to_owned();
            assert_ne!(Some(&word), last.as_ref());
            last = Some(word);
        }
    }
}
