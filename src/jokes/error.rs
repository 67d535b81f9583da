use thiserror::Error;

/// Boxed underlying cause for variants that chain one.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a single fetch attempt failed. Every variant names the provider so
/// callers can log with context; none of these are retried by the core.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{provider}: failed to build request")]
    RequestConstruction {
        provider: &'static str,
        #[source]
        cause: Cause,
    },

    /// Covers connection errors and deadline expiry alike; the two are told
    /// apart by the cause chain, not by a separate variant.
    #[error("{provider}: request failed")]
    Network {
        provider: &'static str,
        #[source]
        cause: Cause,
    },

    #[error("{provider}: unexpected content type {content_type:?}")]
    UnexpectedContentType {
        provider: &'static str,
        content_type: String,
    },

    #[error("{provider}: failed to decode response")]
    Decoding {
        provider: &'static str,
        #[source]
        cause: Cause,
    },

    #[error("{provider}: {reason}")]
    Extraction {
        provider: &'static str,
        reason: String,
    },

    #[error("{provider}: upstream reported an error: {message}")]
    Upstream {
        provider: &'static str,
        message: String,
    },
}

impl FetchError {
    pub fn network(provider: &'static str, cause: impl Into<Cause>) -> Self {
        Self::Network {
            provider,
            cause: cause.into(),
        }
    }

    pub fn decoding(provider: &'static str, cause: impl Into<Cause>) -> Self {
        Self::Decoding {
            provider,
            cause: cause.into(),
        }
    }

    pub fn extraction(provider: &'static str, reason: impl Into<String>) -> Self {
        Self::Extraction {
            provider,
            reason: reason.into(),
        }
    }

    pub fn upstream(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Upstream {
            provider,
            message: message.into(),
        }
    }

    pub fn unexpected_content_type(provider: &'static str, content_type: impl Into<String>) -> Self {
        Self::UnexpectedContentType {
            provider,
            content_type: content_type.into(),
        }
    }

    /// Classify a reqwest failure: builder problems mean the request never
    /// left the process, everything else is a network failure.
    pub fn from_reqwest(provider: &'static str, err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::RequestConstruction {
                provider,
                cause: Box::new(err),
            }
        } else {
            Self::Network {
                provider,
                cause: Box::new(err),
            }
        }
    }

    /// Provider tag carried by every variant.
    pub fn provider(&self) -> &'static str {
        match self {
            Self::RequestConstruction { provider, .. }
            | Self::Network { provider, .. }
            | Self::UnexpectedContentType { provider, .. }
            | Self::Decoding { provider, .. }
            | Self::Extraction { provider, .. }
            | Self::Upstream { provider, .. } => *provider,
        }
    }
}
