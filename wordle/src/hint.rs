//! Paid hints.
//!
//! Two policies are supported. A tiered policy offers several kinds of hint of which only
//! one may be taken per session; the penalty is the cost of that tier. A capped policy
//! offers letter reveals only, up to a fixed count, each priced by a schedule, and the
//! penalties add up.
//!
//! Affordability is judged against the cumulative total score. The penalty is only charged
//! when the session ends.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Trivia;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HintKind {
    AlbumCover,
    AlbumName,
    Letter,
}

impl HintKind {
    /// Whether the hint draws on the entry's trivia rather than the word itself.
    pub fn needs_trivia(self) -> bool {
        matches!(self, HintKind::AlbumCover | HintKind::AlbumName)
    }
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HintKind::AlbumCover => "cover",
            HintKind::AlbumName => "album",
            HintKind::Letter => "letter",
        })
    }
}

#[derive(Debug, Error)]
#[error("unknown hint {0:?} - expected cover, album or letter")]
pub struct ParseHintError(String);

impl FromStr for HintKind {
    type Err = ParseHintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cover" | "album_cover" => Ok(HintKind::AlbumCover),
            "album" | "album_name" => Ok(HintKind::AlbumName),
            "letter" => Ok(HintKind::Letter),
            _ => Err(ParseHintError(s.to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tier {
    pub kind: HintKind,
    pub cost: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HintPolicy {
    /// One hint per session, chosen among the tiers. Taking it sets the penalty.
    Tiered(Vec<Tier>),
    /// Letter reveals only; `costs[n]` is the price of hint `n`. Penalties accumulate.
    Capped { costs: Vec<i64> },
}

/// Hints taken so far in a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HintLedger {
    pub used: u32,
    pub penalty: i64,
}

/// A hint that could be taken right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct HintOffer {
    pub kind: HintKind,
    pub cost: i64,
    pub affordable: bool,
}

/// What a hint showed the player.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reveal {
    AlbumCover { path: String },
    AlbumName { album: String },
    Letter { position: usize, letter: char },
}

impl fmt::Display for Reveal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reveal::AlbumCover { path } => write!(f, "album cover: {path}"),
            Reveal::AlbumName { album } => write!(f, "album: {album}"),
            Reveal::Letter { position, letter } => {
                write!(f, "letter {} is {letter}", position + 1)
            }
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HintError {
    #[error("the game is over")]
    GameOver,
    #[error("a word is being checked - try again in a moment")]
    Busy,
    #[error("no hints remaining")]
    Exhausted,
    #[error("{0} hints are not offered for this word")]
    NotOffered(HintKind),
    #[error("not enough points for hint (need {cost}, have {total})")]
    Unaffordable { cost: i64, total: i64 },
    #[error("every letter has already been revealed")]
    NothingToReveal,
}

impl HintPolicy {
    /// Album cover 5, album name 10, letter 15; one per session.
    pub fn themed() -> Self {
        HintPolicy::Tiered(vec![
            Tier {
                kind: HintKind::AlbumCover,
                cost: 5,
            },
            Tier {
                kind: HintKind::AlbumName,
                cost: 10,
            },
            Tier {
                kind: HintKind::Letter,
                cost: 15,
            },
        ])
    }

    /// Two letter reveals, 10 then 15.
    pub fn classic() -> Self {
        HintPolicy::Capped {
            costs: vec![10, 15],
        }
    }

    pub fn max_hints(&self) -> u32 {
        match self {
            HintPolicy::Tiered(_) => 1,
            HintPolicy::Capped { costs } => costs.len() as u32,
        }
    }

    /// Every hint still on the table, affordable or not.
    pub fn offers(
        &self,
        ledger: &HintLedger,
        trivia: Option<&Trivia>,
        total_score: i64,
    ) -> Vec<HintOffer> {
        if ledger.used >= self.max_hints() {
            return Vec::new();
        }

        let offer = |kind, cost| HintOffer {
            kind,
            cost,
            affordable: total_score >= cost,
        };

        match self {
            HintPolicy::Tiered(tiers) => tiers
                .iter()
                .filter(|tier| trivia.is_some() || !tier.kind.needs_trivia())
                .map(|tier| offer(tier.kind, tier.cost))
                .collect(),
            HintPolicy::Capped { costs } => {
                vec![offer(HintKind::Letter, costs[ledger.used as usize])]
            }
        }
    }

    /// Checks that `kind` may be taken and books it in the ledger, returning its cost.
    pub fn charge(
        &self,
        kind: HintKind,
        ledger: &mut HintLedger,
        trivia: Option<&Trivia>,
        total_score: i64,
    ) -> Result<i64, HintError> {
        if ledger.used >= self.max_hints() {
            return Err(HintError::Exhausted);
        }

        let offer = self
            .offers(ledger, trivia, total_score)
            .into_iter()
            .find(|offer| offer.kind == kind)
            .ok_or(HintError::NotOffered(kind))?;

        if !offer.affordable {
            return Err(HintError::Unaffordable {
                cost: offer.cost,
                total: total_score,
            });
        }

        ledger.used += 1;
        match self {
            HintPolicy::Tiered(_) => ledger.penalty = offer.cost,
            HintPolicy::Capped { .. } => ledger.penalty += offer.cost,
        }

        Ok(offer.cost)
    }
}
