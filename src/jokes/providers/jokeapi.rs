use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::jokes::error::FetchError;
use crate::jokes::types::{Joke, JokeProvider};

const SOURCE: &str = "jokeapi.dev";
const DEFAULT_URL: &str = "https://v2.jokeapi.dev/joke/Any?type=single";

#[derive(Debug, Deserialize)]
struct JokeApiBody {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    message: String,
    #[serde(default)]
    joke: String,
    #[serde(default)]
    setup: String,
    #[serde(default)]
    delivery: String,
}

/// jokeapi.dev: JSON that is either `{joke}` or a `{setup, delivery}` pair,
/// with an in-band `error` flag carrying its own message.
pub struct JokeApiProvider {
    client: reqwest::Client,
    url: String,
}

impl JokeApiProvider {
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

impl Default for JokeApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JokeProvider for JokeApiProvider {
    async fn fetch(&self) -> Result<Joke, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(SOURCE, e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(SOURCE, e))?;
        let parsed: JokeApiBody =
            serde_json::from_slice(&body).map_err(|e| FetchError::decoding(SOURCE, e))?;

        if parsed.error {
            return Err(FetchError::upstream(SOURCE, parsed.message));
        }
        if !parsed.joke.trim().is_empty() {
            return Joke::from_normalized(SOURCE, parsed.joke, false);
        }
        if !parsed.setup.trim().is_empty() && !parsed.delivery.trim().is_empty() {
            let text = format!("{}\n{}", parsed.setup.trim(), parsed.delivery.trim());
            return Joke::from_normalized(SOURCE, text, false);
        }

        Err(FetchError::extraction(SOURCE, "response carries neither joke nor setup/delivery"))
    }

    fn name(&self) -> &'static str {
        SOURCE
    }
}
