//! Joke aggregation: normalizers, providers, weighted selection, and the
//! fetch facade shared by the HTTP handlers and the bot.

pub mod error;
pub mod normalize;
pub mod providers;
pub mod registry;
pub mod types;
pub mod weights;

pub use error::FetchError;
pub use registry::ProviderRegistry;
pub use types::{Joke, JokeProvider};
pub use weights::WeightsConfig;

use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;

/// Hard per-fetch time budget, independent of any caller-side timeout.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(3);

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("joke_fetch_total", "Joke fetch attempts per provider.");
        describe_counter!("joke_fetch_errors_total", "Failed joke fetches per provider.");
        describe_histogram!("joke_fetch_ms", "Joke fetch duration in milliseconds.");
    });
}

/// Single entry point for every caller: pick a provider (weighted, unless
/// pinned) and run exactly one fetch under the fixed time budget. A failed
/// fetch is a failed request; there is no fallback to another provider.
pub struct JokeService {
    registry: ProviderRegistry,
    timeout: Duration,
}

impl JokeService {
    pub fn new(registry: ProviderRegistry, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    /// Production wiring: the five default sources under the given weights.
    pub fn with_weights(weights: &WeightsConfig, timeout: Duration) -> Self {
        Self::new(ProviderRegistry::with_defaults(weights), timeout)
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Fetch one joke. `pinned` bypasses weighted selection for
    /// language-pinned requests. Deadline expiry surfaces as a network
    /// failure with the elapsed timer in the cause chain.
    pub async fn fetch(&self, pinned: Option<&dyn JokeProvider>) -> Result<Joke, FetchError> {
        ensure_metrics_described();

        let provider = match pinned {
            Some(provider) => provider,
            None => self.registry.select_weighted(),
        };
        let name = provider.name();
        counter!("joke_fetch_total", "provider" => name).increment(1);

        let started = std::time::Instant::now();
        let result = match tokio::time::timeout(self.timeout, provider.fetch()).await {
            Ok(res) => res,
            Err(elapsed) => Err(FetchError::network(name, elapsed)),
        };
        let ms = started.elapsed().as_secs_f64() * 1_000.0;
        histogram!("joke_fetch_ms", "provider" => name).record(ms);

        if let Err(e) = &result {
            tracing::warn!(provider = name, error = ?e, "joke fetch failed");
            counter!("joke_fetch_errors_total", "provider" => name).increment(1);
        }
        result
    }

    /// Russian-only fetch for the `/joke_ru` path.
    pub async fn fetch_native(&self) -> Result<Joke, FetchError> {
        self.fetch(Some(self.registry.native())).await
    }
}
