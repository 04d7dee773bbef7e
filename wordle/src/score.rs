use serde::{Deserialize, Serialize};

/// Points for a win on the first guess.
pub const BASE_SCORE: i64 = 100;

/// Points lost for each guess before the winning one.
pub const WRONG_GUESS_PENALTY: i64 = 15;

/// Score for a single finished game.
///
/// A loss is worth nothing but still costs the hint penalty, with no floor. A win never
/// goes below zero.
pub fn final_score(won: bool, wrong_guesses: u32, hint_penalty: i64) -> i64 {
    if !won {
        return -hint_penalty;
    }

    (BASE_SCORE - WRONG_GUESS_PENALTY * i64::from(wrong_guesses) - hint_penalty).max(0)
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Outcome {
    pub won: bool,
    pub wrong_guesses: u32,
    pub hint_penalty: i64,
    pub score: i64,
}

impl Outcome {
    pub fn new(won: bool, wrong_guesses: u32, hint_penalty: i64) -> Self {
        Self {
            won,
            wrong_guesses,
            hint_penalty,
            score: final_score(won, wrong_guesses, hint_penalty),
        }
    }
}

/// Cumulative statistics shared by every session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_score: i64,
    pub games_played: u32,
    pub games_won: u32,
    pub win_streak: u32,
    pub best_score: i64,
}

impl Stats {
    /// Fold one finished game into the totals.
    pub fn apply(&self, outcome: &Outcome) -> Stats {
        Stats {
            total_score: self.total_score + outcome.score,
            games_played: self.games_played + 1,
            games_won: self.games_won + u32::from(outcome.won),
            win_streak: if outcome.won { self.win_streak + 1 } else { 0 },
            best_score: self.best_score.max(outcome.score),
        }
    }

    pub fn can_afford(&self, cost: i64) -> bool {
        self.total_score >= cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_try_win_is_full_score() {
        assert_eq!(final_score(true, 0, 0), 100);
    }

    #[test]
    fn win_score_has_a_floor() {
        assert_eq!(final_score(true, 5, 30), 0);
        assert_eq!(final_score(true, 2, 15), 55);
    }

    #[test]
    fn loss_costs_the_hint_penalty() {
        assert_eq!(final_score(false, 6, 0), 0);
        assert_eq!(final_score(false, 6, 25), -25);
    }

    #[test]
    fn loss_resets_streak_and_charges_penalty() {
        let stats = Stats {
            total_score: 200,
            games_played: 4,
            games_won: 4,
            win_streak: 4,
            best_score: 85,
        };

        let next = stats.apply(&Outcome::new(false, 6, 10));
        assert_eq!(next.total_score, 190);
        assert_eq!(next.games_played, 5);
        assert_eq!(next.games_won, 4);
        assert_eq!(next.win_streak, 0);
        assert_eq!(next.best_score, 85);
    }

    #[test]
    fn win_extends_streak() {
        let stats = Stats {
            total_score: 40,
            games_played: 2,
            games_won: 1,
            win_streak: 1,
            best_score: 40,
        };

        let next = stats.apply(&Outcome::new(true, 2, 15));
        assert_eq!(next.total_score, 95);
        assert_eq!(next.games_won, 2);
        assert_eq!(next.win_streak, 2);
        assert_eq!(next.best_score, 55);
    }

    #[test]
    fn loss_can_raise_a_negative_best_score() {
        let stats = Stats {
            best_score: -15,
            ..Default::default()
        };

        assert_eq!(stats.apply(&Outcome::new(false, 6, 5)).best_score, -5);
        assert_eq!(stats.apply(&Outcome::new(false, 6, 20)).best_score, -15);
    }
}
