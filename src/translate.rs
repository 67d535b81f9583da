//! Pass-through client for the public Google Translate proxy endpoint.
//! The contract is deliberately thin: text in, translated text or failure
//! out; the response format is treated as opaque beyond the segments walk.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Client;

const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

/// Translation calls tolerate a longer budget than joke fetches.
pub const DEFAULT_TRANSLATE_TIMEOUT: Duration = Duration::from_secs(8);

pub struct Translator {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Translator {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different proxy host (tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout: DEFAULT_TRANSLATE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Translate arbitrary text to Russian. The proxy answers with a nested
    /// array; the translation is the concatenation of the `[0][i][0]`
    /// string segments.
    pub async fn translate(&self, text: &str) -> Result<String> {
        let url = format!("{}/translate_a/single", self.base_url);
        let data: serde_json::Value = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", "en"),
                ("tl", "ru"),
                ("dt", "t"),
                ("q", text),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .context("translation request failed")?
            .json()
            .await
            .context("decoding translation response")?;

        let mut translation = String::new();
        if let Some(segments) = data.get(0).and_then(|v| v.as_array()) {
            for segment in segments {
                if let Some(part) = segment.get(0).and_then(|v| v.as_str()) {
                    translation.push_str(part);
                }
            }
        }
        if translation.is_empty() {
            bail!("translation proxy returned no segments");
        }
        Ok(translation)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}
