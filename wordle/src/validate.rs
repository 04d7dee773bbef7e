use std::time::Duration;

use log::warn;
use reqwest::{blocking::Client, StatusCode};

pub const DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// The answer of a dictionary lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Rejected,
    /// The dictionary could not be asked, or answered with something unexpected.
    Unavailable,
}

impl Verdict {
    /// Interprets the status of a dictionary lookup response.
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_success() {
            Verdict::Valid
        } else if status == StatusCode::NOT_FOUND {
            Verdict::Rejected
        } else {
            Verdict::Unavailable
        }
    }
}

/// Decides whether a word outside the curated catalog is a real word.
pub trait WordValidator {
    fn validate(&self, word: &str) -> Verdict;
}

/// Accepts nothing beyond the catalog.
#[derive(Clone, Copy, Debug, Default)]
pub struct CatalogOnly;

impl WordValidator for CatalogOnly {
    fn validate(&self, _word: &str) -> Verdict {
        Verdict::Rejected
    }
}

/// Builds the lookup url for `word` under `base_url`.
pub fn lookup_url(base_url: &str, word: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        word.to_ascii_lowercase()
    )
}

pub struct DictionaryApi {
    client: Client,
    base_url: String,
}

impl DictionaryApi {
    pub fn new(base_url: impl Into<String>) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("wordle v", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

impl WordValidator for DictionaryApi {
    fn validate(&self, word: &str) -> Verdict {
        match self.client.get(lookup_url(&self.base_url, word)).send() {
            Ok(response) => Verdict::from_status(response.status()),
            Err(e) => {
                warn!("dictionary lookup for {word} failed: {e}");
                Verdict::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(Verdict::from_status(StatusCode::OK), Verdict::Valid);
        assert_eq!(Verdict::from_status(StatusCode::NOT_FOUND), Verdict::Rejected);
        assert_eq!(
            Verdict::from_status(StatusCode::TOO_MANY_REQUESTS),
            Verdict::Unavailable
        );
        assert_eq!(
            Verdict::from_status(StatusCode::BAD_GATEWAY),
            Verdict::Unavailable
        );
    }

    #[test]
    fn urls_are_lowercase() {
        assert_eq!(
            lookup_url("https://example.com/en/", "CRANE"),
            "https://example.com/en/crane"
        );
    }
}
