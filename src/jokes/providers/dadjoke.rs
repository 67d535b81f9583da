use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;

use crate::jokes::error::FetchError;
use crate::jokes::normalize::is_json_content_type;
use crate::jokes::types::{Joke, JokeProvider};

const SOURCE: &str = "icanhazdadjoke.com";
const DEFAULT_URL: &str = "https://icanhazdadjoke.com";
// The API asks integrators to identify themselves.
const USER_AGENT_VALUE: &str = "joke-service (https://github.com/joke-service/joke-service)";

#[derive(Debug, Deserialize)]
struct DadJokeBody {
    #[serde(default)]
    joke: String,
}

/// icanhazdadjoke.com: plain JSON `{joke}` behind a mandatory Accept header.
/// The endpoint falls back to HTML without it, hence the content-type check.
pub struct DadJokeProvider {
    client: reqwest::Client,
    url: String,
}

impl DadJokeProvider {
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

impl Default for DadJokeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JokeProvider for DadJokeProvider {
    async fn fetch(&self) -> Result<Joke, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, USER_AGENT_VALUE)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(SOURCE, e))?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !is_json_content_type(&content_type) {
            return Err(FetchError::unexpected_content_type(SOURCE, content_type));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(SOURCE, e))?;
        let parsed: DadJokeBody =
            serde_json::from_slice(&body).map_err(|e| FetchError::decoding(SOURCE, e))?;

        Joke::from_normalized(SOURCE, parsed.joke, false)
    }

    fn name(&self) -> &'static str {
        SOURCE
    }
}
