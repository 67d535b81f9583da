use async_trait::async_trait;

use super::error::FetchError;

/// Canonical output unit: one normalized joke and where it came from.
/// Wire names (`joke`, `is_russian`) are what the frontend consumes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Joke {
    #[serde(rename = "joke")]
    pub text: String,
    pub source: String,
    pub is_russian: bool,
}

impl Joke {
    /// Build a record from normalized text. Text that is empty after
    /// trimming is never a record; it is an extraction failure of the
    /// originating provider.
    pub fn from_normalized(
        provider: &'static str,
        text: impl Into<String>,
        is_russian: bool,
    ) -> Result<Self, FetchError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(FetchError::extraction(provider, "empty joke after normalization"));
        }
        Ok(Self {
            text: trimmed.to_string(),
            source: provider.to_string(),
            is_russian,
        })
    }
}

/// One joke source. A fetch performs exactly one outbound request and
/// normalizes the response; cancellation is the caller dropping the future.
/// Retry policy, if any, belongs to the caller.
#[async_trait]
pub trait JokeProvider: Send + Sync {
    async fn fetch(&self) -> Result<Joke, FetchError>;
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_trimmed() {
        let joke = Joke::from_normalized("test", "  ха-ха\n", true).unwrap();
        assert_eq!(joke.text, "ха-ха");
        assert_eq!(joke.source, "test");
        assert!(joke.is_russian);
    }

    #[test]
    fn empty_text_is_never_a_record() {
        assert!(Joke::from_normalized("test", "", false).is_err());
        assert!(Joke::from_normalized("test", "   \n\t ", false).is_err());
    }

    #[test]
    fn wire_names_match_the_frontend() {
        let joke = Joke::from_normalized("test", "ha", false).unwrap();
        let json = serde_json::to_value(&joke).unwrap();
        assert_eq!(json["joke"], "ha");
        assert_eq!(json["source"], "test");
        assert_eq!(json["is_russian"], false);
    }
}
