use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{catalog::Catalog, hint::HintPolicy};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[serde(alias = "korn")]
    Themed,
    Classic,
}

impl Mode {
    /// Store key remembering the last secret of this mode.
    pub fn last_word_key(self) -> &'static str {
        match self {
            Mode::Themed => "lastWord",
            Mode::Classic => "lastClassicWord",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Themed => "themed",
            Mode::Classic => "classic",
        })
    }
}

#[derive(Debug, Error)]
#[error("unknown mode {0:?} - expected themed or classic")]
pub struct ParseModeError(String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "themed" | "korn" => Ok(Mode::Themed),
            "classic" => Ok(Mode::Classic),
            _ => Err(ParseModeError(s.to_owned())),
        }
    }
}

/// Everything that differs between game modes.
#[derive(Clone, Debug)]
pub struct Variant {
    pub mode: Mode,
    pub catalog: Catalog,
    pub hints: HintPolicy,
}

impl Variant {
    pub fn themed() -> Self {
        Self {
            mode: Mode::Themed,
            catalog: Catalog::themed(),
            hints: HintPolicy::themed(),
        }
    }

    pub fn classic(catalog: Catalog) -> Self {
        Self {
            mode: Mode::Classic,
            catalog,
            hints: HintPolicy::classic(),
        }
    }

    pub fn last_word_key(&self) -> &'static str {
        self.mode.last_word_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korn_names_the_themed_mode_everywhere() {
        assert_eq!("korn".parse::<Mode>().unwrap(), Mode::Themed);
        assert_eq!(serde_json::from_str::<Mode>("\"korn\"").unwrap(), Mode::Themed);
        assert_eq!(serde_json::to_string(&Mode::Themed).unwrap(), "\"themed\"");
        assert_eq!(serde_json::from_str::<Mode>("\"classic\"").unwrap(), Mode::Classic);
    }
}
