use read_input::{shortcut::input, InputBuild};
use wordle::{feedback::to_emoji_string, GameResponse, HintKind, Keyboard};

use super::{Move, Player};

pub struct UserInputPlayer;

impl UserInputPlayer {
    fn show(game: &GameResponse) {
        for row in &game.board {
            println!("{} {}", to_emoji_string(&row.marks), row.word);
        }

        let keyboard: Keyboard = game
            .keyboard
            .iter()
            .filter_map(|(letter, &mark)| letter.chars().next().map(|u| (u, mark)))
            .collect();
        println!("{keyboard}");

        if game.revealed.iter().any(Option::is_some) {
            let pattern: String = game.revealed.iter().map(|u| u.unwrap_or('_')).collect();
            println!("Revealed: {pattern}");
        }

        for clue in &game.clues {
            println!("Hint: {clue}");
        }

        for offer in game.hints.iter().filter(|offer| offer.affordable) {
            println!("  :hint {} ({} points)", offer.kind, offer.cost);
        }

        println!("(Guesses remaining: {})", game.guesses);
    }
}

impl Player for UserInputPlayer {
    fn next_move(&mut self, game: &GameResponse) -> Move {
        Self::show(game);

        loop {
            let line: String = input().msg("Guess: ").get();
            let line = line.trim();

            match line.split_once(' ').unwrap_or((line, "")) {
                (":quit", _) => return Move::Quit,
                (":hint", "") => match game.hints.iter().find(|offer| offer.affordable) {
                    Some(offer) => return Move::Hint(offer.kind),
                    None => println!("No hints available"),
                },
                (":hint", kind) => match kind.trim().parse::<HintKind>() {
                    Ok(kind) => return Move::Hint(kind),
                    Err(e) => println!("{e}"),
                },
                _ => return Move::Guess(line.to_owned()),
            }
        }
    }

    fn rejected(&mut self, _word: &str, reason: &str) {
        println!("{reason}");
    }

    fn refused(&mut self, _kind: HintKind, reason: &str) {
        println!("{reason}");
    }
}
