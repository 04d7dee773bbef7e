use std::{cell::Cell, collections::VecDeque, sync::Arc};

use wordle::{
    Catalog, CatalogOnly, Entry, GuessError, HintError, HintKind, IndexSource, Mark,
    MemoryStore, Mode, Reveal, Session, Stats, StatsRepository, Status, Variant, Verdict,
    WordValidator, MAX_GUESSES,
};

/// Hands out scripted indices, then zeros.
struct Script(VecDeque<usize>);

impl Script {
    fn new(indices: &[usize]) -> Self {
        Self(indices.iter().copied().collect())
    }
}

impl IndexSource for Script {
    fn index(&mut self, len: usize) -> usize {
        self.0.pop_front().unwrap_or(0).min(len - 1)
    }
}

/// Answers every lookup the same way and counts them.
struct Fixed {
    verdict: Verdict,
    calls: Cell<usize>,
}

impl Fixed {
    fn new(verdict: Verdict) -> Self {
        Self {
            verdict,
            calls: Cell::new(0),
        }
    }
}

impl WordValidator for Fixed {
    fn validate(&self, _word: &str) -> Verdict {
        self.calls.set(self.calls.get() + 1);
        self.verdict
    }
}

fn classic() -> Arc<Variant> {
    Arc::new(Variant::classic(Catalog::from_words(
        [
            "CRANE", "SLATE", "APPLE", "PLANT", "TRAIN", "BRAIN", "GRAIN", "DRAIN",
        ]
        .into_iter(),
    )))
}

fn themed_session(word: &str) -> Session {
    let variant = Arc::new(Variant::themed());
    let entry = variant
        .catalog
        .entries()
        .iter()
        .find(|entry| entry.word() == word)
        .cloned()
        .unwrap();
    Session::new(variant, entry)
}

#[test]
fn win_on_third_guess() {
    let mut game = Session::new(classic(), Entry::plain("CRANE"));

    assert!(game.submit("slate", &CatalogOnly).unwrap().outcome.is_none());
    assert!(game.submit("plant", &CatalogOnly).unwrap().outcome.is_none());

    let turn = game.submit("crane", &CatalogOnly).unwrap();
    assert_eq!(turn.status, Status::Won);
    assert_eq!(turn.marks, [Mark::Exact; 5]);

    let outcome = turn.outcome.unwrap();
    assert!(outcome.won);
    assert_eq!(outcome.wrong_guesses, 2);
    assert_eq!(outcome.score, 70);
}

#[test]
fn sixth_wrong_guess_loses() {
    let mut game = Session::new(classic(), Entry::plain("CRANE"));

    for word in ["SLATE", "APPLE", "PLANT", "TRAIN", "BRAIN"] {
        let turn = game.submit(word, &CatalogOnly).unwrap();
        assert_eq!(turn.status, Status::InProgress);
    }

    let turn = game.submit("GRAIN", &CatalogOnly).unwrap();
    assert_eq!(turn.status, Status::Lost);
    assert_eq!(game.guesses().len(), MAX_GUESSES);

    let outcome = turn.outcome.unwrap();
    assert!(!outcome.won);
    assert_eq!(outcome.wrong_guesses, 6);
    assert_eq!(outcome.score, 0);
}

#[test]
fn win_on_the_last_guess_is_a_win() {
    let mut game = Session::new(classic(), Entry::plain("CRANE"));
    for word in ["SLATE", "APPLE", "PLANT", "TRAIN", "BRAIN"] {
        game.submit(word, &CatalogOnly).unwrap();
    }

    let outcome = game.submit("CRANE", &CatalogOnly).unwrap().outcome.unwrap();
    assert!(outcome.won);
    assert_eq!(outcome.score, 25);
}

#[test]
fn finished_game_accepts_nothing() {
    let mut game = Session::new(classic(), Entry::plain("CRANE"));
    game.submit("CRANE", &CatalogOnly).unwrap();

    assert_eq!(game.submit("SLATE", &CatalogOnly), Err(GuessError::GameOver));
    assert_eq!(
        game.take_hint(HintKind::Letter, 100, &mut Script::new(&[])),
        Err(HintError::GameOver)
    );
    assert!(!game.type_letter('A'));
    assert_eq!(game.guesses().len(), 1);
}

#[test]
fn local_rejections_leave_no_trace() {
    let mut game = Session::new(classic(), Entry::plain("CRANE"));
    game.submit("SLATE", &CatalogOnly).unwrap();

    assert_eq!(
        game.submit("SLAT", &CatalogOnly),
        Err(GuessError::WrongLength("SLAT".into()))
    );
    assert_eq!(
        game.submit("SL4TE", &CatalogOnly),
        Err(GuessError::NotAlphabetic("SL4TE".into()))
    );
    assert_eq!(
        game.submit("slate", &CatalogOnly),
        Err(GuessError::Repeated("SLATE".into()))
    );
    assert_eq!(game.guesses(), ["SLATE"]);
    assert_eq!(game.guesses_remaining(), 5);
}

#[test]
fn catalog_words_skip_the_dictionary() {
    let mut game = Session::new(classic(), Entry::plain("CRANE"));
    let dictionary = Fixed::new(Verdict::Rejected);

    game.submit("SLATE", &dictionary).unwrap();
    assert_eq!(dictionary.calls.get(), 0);

    assert_eq!(
        game.submit("ROUTE", &dictionary),
        Err(GuessError::NotAWord("ROUTE".into()))
    );
    assert_eq!(dictionary.calls.get(), 1);
}

#[test]
fn dictionary_words_are_accepted() {
    let mut game = Session::new(classic(), Entry::plain("CRANE"));
    let dictionary = Fixed::new(Verdict::Valid);

    let turn = game.submit("REACT", &dictionary).unwrap();
    assert_eq!(
        turn.marks,
        [
            Mark::Present,
            Mark::Present,
            Mark::Exact,
            Mark::Present,
            Mark::Absent
        ]
    );
}

#[test]
fn keyboard_keeps_exact_letters() {
    let mut game = Session::new(classic(), Entry::plain("CRANE"));
    game.submit("TRAIN", &CatalogOnly).unwrap();
    assert_eq!(game.keyboard().get('R'), Some(Mark::Exact));
    assert_eq!(game.keyboard().get('N'), Some(Mark::Present));

    // R is in the wrong place this time.
    let turn = game.submit("ROUTE", &Fixed::new(Verdict::Valid)).unwrap();
    assert_eq!(turn.marks[0], Mark::Present);
    game.submit("PLANT", &CatalogOnly).unwrap();
    assert_eq!(game.keyboard().get('R'), Some(Mark::Exact));
    assert_eq!(game.keyboard().get('N'), Some(Mark::Exact));
    assert_eq!(game.keyboard().get('A'), Some(Mark::Exact));
    assert_eq!(game.keyboard().get('T'), Some(Mark::Absent));
}

#[test]
fn start_avoids_the_last_word_and_remembers_the_new_one() {
    let store = MemoryStore::new().with(Mode::Classic.last_word_key(), "APPLE");
    let mut repo = StatsRepository::new(store);

    let game = Session::start(classic(), &mut repo, &mut Script::new(&[0])).unwrap();
    assert_ne!(game.secret(), "APPLE");
    assert_eq!(repo.last_word("lastClassicWord").as_deref(), Some(game.secret()));
    assert_eq!(repo.last_word("lastWord"), None);
}

#[test]
fn classic_letter_hints_accumulate() {
    let mut game = Session::new(classic(), Entry::plain("CRANE"));
    let mut rng = Script::new(&[4, 0]);

    let first = game.take_hint(HintKind::Letter, 40, &mut rng).unwrap();
    assert_eq!(first, Reveal::Letter { position: 4, letter: 'E' });

    // Position 4 is taken, so index 0 of what is left is position 0.
    let second = game.take_hint(HintKind::Letter, 40, &mut rng).unwrap();
    assert_eq!(second, Reveal::Letter { position: 0, letter: 'C' });

    assert_eq!(game.revealed(), &[Some('C'), None, None, None, Some('E')]);
    assert_eq!(game.hints().penalty, 25);
    assert_eq!(
        game.take_hint(HintKind::Letter, 40, &mut rng),
        Err(HintError::Exhausted)
    );

    let outcome = game.submit("CRANE", &CatalogOnly).unwrap().outcome.unwrap();
    assert_eq!(outcome.score, 75);
}

#[test]
fn unaffordable_hint_changes_nothing() {
    let mut game = Session::new(classic(), Entry::plain("CRANE"));

    assert_eq!(
        game.take_hint(HintKind::Letter, 5, &mut Script::new(&[])),
        Err(HintError::Unaffordable { cost: 10, total: 5 })
    );
    assert_eq!(game.revealed(), &[None; 5]);
    assert_eq!(game.hints().used, 0);

    let offers = game.hint_offers(5);
    assert_eq!(offers.len(), 1);
    assert!(!offers[0].affordable);
}

#[test]
fn themed_hint_replaces_the_penalty_and_ends_hints() {
    let mut game = themed_session("CREEP");

    let reveal = game
        .take_hint(HintKind::AlbumName, 50, &mut Script::new(&[]))
        .unwrap();
    assert_eq!(
        reveal,
        Reveal::AlbumName {
            album: "MTV Unplugged".into()
        }
    );
    assert_eq!(game.hints().penalty, 10);
    assert!(game.hint_offers(50).is_empty());
    assert_eq!(
        game.take_hint(HintKind::AlbumCover, 50, &mut Script::new(&[])),
        Err(HintError::Exhausted)
    );
    assert_eq!(game.clues().len(), 1);
}

#[test]
fn themed_loss_costs_the_hint() {
    let mut game = themed_session("CREEP");
    game.take_hint(HintKind::AlbumCover, 5, &mut Script::new(&[]))
        .unwrap();

    for word in ["BLIND", "CLOWN", "DADDY", "TWIST", "FREAK", "SEEDS"] {
        game.submit(word, &CatalogOnly).unwrap();
    }

    let outcome = game.outcome().unwrap();
    assert!(!outcome.won);
    assert_eq!(outcome.score, -5);

    let stats = Stats {
        total_score: 5,
        win_streak: 3,
        ..Default::default()
    }
    .apply(&outcome);
    assert_eq!(stats.total_score, 0);
    assert_eq!(stats.win_streak, 0);
}

#[test]
fn recorded_once_per_game() {
    let mut repo = StatsRepository::new(MemoryStore::new());
    let mut game = Session::start(classic(), &mut repo, &mut Script::new(&[0])).unwrap();
    let secret = game.secret().to_owned();

    let turn = game.submit(&secret, &CatalogOnly).unwrap();
    let stats = repo.record(&turn.outcome.unwrap()).unwrap();
    assert_eq!(
        stats,
        Stats {
            total_score: 100,
            games_played: 1,
            games_won: 1,
            win_streak: 1,
            best_score: 100,
        }
    );

    // Further submissions produce no outcome to record.
    assert_eq!(game.submit("SLATE", &CatalogOnly), Err(GuessError::GameOver));
    assert_eq!(repo.load(), stats);
}
