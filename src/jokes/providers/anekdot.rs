use async_trait::async_trait;
use rand::Rng;

use crate::jokes::error::FetchError;
use crate::jokes::normalize::{extract_embedded_array, unescape_array_entry};
use crate::jokes::types::{Joke, JokeProvider};

const SOURCE: &str = "anekdot.ru";
const DEFAULT_URL: &str = "https://www.anekdot.ru/rss/randomu.html";

/// anekdot.ru: the random page inlines a `JSON.parse('[...]')` literal in a
/// script block; one entry is picked uniformly at random.
pub struct AnekdotRuProvider {
    client: reqwest::Client,
    url: String,
}

impl AnekdotRuProvider {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_URL)
    }

    /// Point the provider at a different endpoint (tests).
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

impl Default for AnekdotRuProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JokeProvider for AnekdotRuProvider {
    async fn fetch(&self) -> Result<Joke, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(SOURCE, e))?;

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::network(SOURCE, e))?;

        let entries = extract_embedded_array(SOURCE, &html)?;
        let pick = {
            let mut rng = rand::rng();
            rng.random_range(0..entries.len())
        };

        Joke::from_normalized(SOURCE, unescape_array_entry(entries[pick]), true)
    }

    fn name(&self) -> &'static str {
        SOURCE
    }
}
