use async_trait::async_trait;

use crate::jokes::error::FetchError;
use crate::jokes::normalize::extract_meta_description;
use crate::jokes::types::{Joke, JokeProvider};

const SOURCE: &str = "baneks.ru";
const DEFAULT_URL: &str = "https://baneks.ru/random";

/// baneks.ru: the random page carries the full joke in its
/// `<meta name="description">` tag.
pub struct BaneksProvider {
    client: reqwest::Client,
    url: String,
}

impl BaneksProvider {
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

impl Default for BaneksProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JokeProvider for BaneksProvider {
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

        let text = extract_meta_description(SOURCE, &html)?;
        Joke::from_normalized(SOURCE, text, true)
    }

    fn name(&self) -> &'static str {
        SOURCE
    }
}
