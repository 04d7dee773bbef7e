use std::{path::PathBuf, sync::Arc};

use anyhow::bail;
use clap::Parser;
use log::info;
use read_input::{shortcut::input, InputBuild};
use squirrel_rng::SquirrelRng;
use wordle::{
    feedback::to_emoji_string, hint::ParseHintError, validate::DICTIONARY_URL, Catalog,
    CatalogOnly, DictionaryApi, FileStore, HintKind, Mode, Session, Stats, StatsRepository,
    Variant, WordValidator,
};

#[derive(Clone, Debug, Parser)]
struct Args {
    /// game mode (themed or classic)
    #[clap(long, default_value = "themed")]
    mode: Mode,

    /// path to a word list for classic games
    #[clap(long)]
    words: Option<PathBuf>,

    /// where cumulative statistics are kept
    #[clap(long, default_value = "wordle-stats.json")]
    stats: PathBuf,

    /// accept only words from the word lists
    #[clap(long)]
    offline: bool,

    /// dictionary service used for words outside the word lists
    #[clap(long, default_value = DICTIONARY_URL)]
    dictionary_url: String,

    /// seed for word selection and letter hints
    #[clap(long)]
    seed: Option<u32>,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Guess(String),
    Hint(Option<HintKind>),
    Quit,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let variant = Arc::new(match args.mode {
        Mode::Themed => Variant::themed(),
        Mode::Classic => Variant::classic(match &args.words {
            Some(path) => Catalog::from_path(path)?,
            None => Catalog::classic(),
        }),
    });

    if variant.catalog.is_empty() {
        bail!("your word list is empty!");
    }

    let validator: Box<dyn WordValidator> = if args.offline {
        Box::new(CatalogOnly)
    } else {
        Box::new(DictionaryApi::new(&args.dictionary_url)?)
    };

    let mut rng = match args.seed {
        Some(seed) => SquirrelRng::with_seed(seed.into()),
        None => SquirrelRng::new(),
    };

    let mut repo = StatsRepository::new(FileStore::open(&args.stats)?);
    let mut game = Session::start(variant, &mut repo, &mut rng)?;
    info!("stats in {}", args.stats.display());

    print_stats(&repo.load());

    while !game.is_over() {
        let total = repo.load().total_score;
        print_game(&game, total);

        match read_command() {
            Command::Quit => {
                println!("The word was: {}", game.secret());
                return Ok(());
            }

            Command::Hint(kind) => {
                let kind = match kind.or_else(|| first_hint(&game, total)) {
                    Some(kind) => kind,
                    None => {
                        println!("No hints available");
                        continue;
                    }
                };

                match game.take_hint(kind, total, &mut rng) {
                    Ok(reveal) => println!("Hint: {reveal}"),
                    Err(e) => println!("{e}"),
                }
            }

            Command::Guess(word) => match game.submit(&word, validator.as_ref()) {
                Ok(turn) => {
                    println!("{} {}", to_emoji_string(&turn.marks), turn.guess);
                }
                Err(e) => println!("{e}"),
            },
        }
    }

    for (word, marks) in game.board() {
        println!("{} {word}", to_emoji_string(&marks));
    }

    if let Some(outcome) = game.outcome() {
        let stats = repo.record(&outcome)?;
        if outcome.won {
            println!("You guessed the word! Score: {}", outcome.score);
        } else {
            println!(
                "Better luck next time! The word was {}. Score: {}",
                game.secret(),
                outcome.score
            );
        }

        if let Some(trivia) = game.trivia() {
            println!("{} - {} ({})", game.secret(), trivia.album, trivia.year);
        }

        print_stats(&stats);
    }

    Ok(())
}

fn read_command() -> Command {
    loop {
        let line: String = input().msg("Guess: ").get();
        match parse_command(&line) {
            Ok(command) => return command,
            Err(e) => println!("{e}"),
        }
    }
}

fn parse_command(line: &str) -> Result<Command, ParseHintError> {
    let line = line.trim();

    match line.split_once(' ').unwrap_or((line, "")) {
        (":quit", _) => Ok(Command::Quit),
        (":hint", "") => Ok(Command::Hint(None)),
        (":hint", kind) => kind.parse().map(|kind| Command::Hint(Some(kind))),
        _ => Ok(Command::Guess(line.to_owned())),
    }
}

fn first_hint(game: &Session, total: i64) -> Option<HintKind> {
    game.hint_offers(total)
        .into_iter()
        .find(|offer| offer.affordable)
        .map(|offer| offer.kind)
}

fn print_game(game: &Session, total: i64) {
    println!();
    for (word, marks) in game.board() {
        println!("{} {word}", to_emoji_string(&marks));
    }
    println!("{}", game.keyboard());

    if game.revealed().iter().any(Option::is_some) {
        let pattern: String = game.revealed().iter().map(|u| u.unwrap_or('_')).collect();
        println!("Revealed: {pattern}");
    }

    for offer in game.hint_offers(total).iter().filter(|offer| offer.affordable) {
        println!("  :hint {} ({} points)", offer.kind, offer.cost);
    }

    println!("(Guesses remaining: {})", game.guesses_remaining());
}

fn print_stats(stats: &Stats) {
    println!(
        "Total: {}  Played: {}  Won: {}  Streak: {}  Best: {}",
        stats.total_score, stats.games_played, stats.games_won, stats.win_streak, stats.best_score
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_parsed() {
        assert_eq!(
            parse_command(" crane ").unwrap(),
            Command::Guess("crane".into())
        );
        assert_eq!(parse_command(":quit").unwrap(), Command::Quit);
        assert_eq!(parse_command(":hint").unwrap(), Command::Hint(None));
        assert_eq!(
            parse_command(":hint album").unwrap(),
            Command::Hint(Some(HintKind::AlbumName))
        );
    }

    #[test]
    fn misspelled_hint_is_not_a_request_for_any_hint() {
        assert!(parse_command(":hint albun").is_err());
    }
}
