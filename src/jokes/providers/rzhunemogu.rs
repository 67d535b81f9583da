use async_trait::async_trait;
use serde::Deserialize;

use crate::jokes::error::FetchError;
use crate::jokes::normalize::{decode_legacy_json, restore_newlines};
use crate::jokes::types::{Joke, JokeProvider};

const SOURCE: &str = "rzhunemogu.ru";
const DEFAULT_URL: &str = "http://rzhunemogu.ru/RandJSON.aspx?CType=1";

#[derive(Debug, Deserialize)]
struct RandJson {
    #[serde(default)]
    content: String,
}

/// rzhunemogu.ru: windows-1251 JSON `{content}` with raw CRLF pairs inside
/// the string value, which must be re-escaped before parsing.
pub struct RzhunemoguProvider {
    client: reqwest::Client,
    url: String,
}

impl RzhunemoguProvider {
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

impl Default for RzhunemoguProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JokeProvider for RzhunemoguProvider {
    async fn fetch(&self) -> Result<Joke, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(SOURCE, e))?;

        let raw = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(SOURCE, e))?;

        let payload = decode_legacy_json(SOURCE, &raw)?;
        let parsed: RandJson =
            serde_json::from_str(&payload).map_err(|e| FetchError::decoding(SOURCE, e))?;
        if parsed.content.is_empty() {
            return Err(FetchError::extraction(SOURCE, "empty joke payload"));
        }

        Joke::from_normalized(SOURCE, restore_newlines(&parsed.content), true)
    }

    fn name(&self) -> &'static str {
        SOURCE
    }
}
