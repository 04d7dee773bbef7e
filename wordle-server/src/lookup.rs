use std::time::Duration;

use log::warn;
use reqwest::Client;
use wordle::{validate::lookup_url, Verdict};

/// Where words outside the word lists are checked.
pub enum Lookup {
    /// Nothing beyond the word lists is accepted.
    Offline,
    Dictionary { client: Client, base_url: String },
}

impl Lookup {
    pub fn dictionary(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("wordle-server v", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Lookup::Dictionary {
            client,
            base_url: base_url.into(),
        })
    }

    pub async fn check(&self, word: &str) -> Verdict {
        let (client, base_url) = match self {
            Lookup::Offline => return Verdict::Rejected,
            Lookup::Dictionary { client, base_url } => (client, base_url),
        };

        match client.get(lookup_url(base_url, word)).send().await {
            Ok(response) => Verdict::from_status(response.status()),
            Err(e) => {
                warn!("dictionary lookup for {word} failed: {e}");
                Verdict::Unavailable
            }
        }
    }
}
