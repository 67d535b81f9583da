//! Fixed provider set with weighted random selection.

use rand::Rng;

use super::providers::{
    AnekdotRuProvider, BaneksProvider, DadJokeProvider, JokeApiProvider, RzhunemoguProvider,
};
use super::types::JokeProvider;
use super::weights::WeightsConfig;

/// Immutable set of providers with their relative weights, built once at
/// startup. The provider and weight tables must stay in lockstep; a mismatch
/// is tolerated at draw time by degrading to the first provider.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn JokeProvider>>,
    weights: Vec<u32>,
}

impl ProviderRegistry {
    pub fn new(providers: Vec<Box<dyn JokeProvider>>, weights: Vec<u32>) -> Self {
        assert!(!providers.is_empty(), "registry requires at least one provider");
        Self { providers, weights }
    }

    /// All five production sources. The pinned Russian-only source comes
    /// first; `native()` relies on that ordering.
    pub fn with_defaults(weights: &WeightsConfig) -> Self {
        let providers: Vec<Box<dyn JokeProvider>> = vec![
            Box::new(RzhunemoguProvider::new()),
            Box::new(AnekdotRuProvider::new()),
            Box::new(BaneksProvider::new()),
            Box::new(DadJokeProvider::new()),
            Box::new(JokeApiProvider::new()),
        ];
        let table = providers.iter().map(|p| weights.weight_for(p.name())).collect();
        Self::new(providers, table)
    }

    pub fn providers(&self) -> &[Box<dyn JokeProvider>] {
        &self.providers
    }

    pub fn total_weight(&self) -> u32 {
        self.weights.iter().sum()
    }

    /// Weighted random draw: each provider is selected with probability
    /// weight / total, independent of table order.
    pub fn select_weighted(&self) -> &dyn JokeProvider {
        let total = self.total_weight();
        if total == 0 {
            return self.providers[0].as_ref();
        }
        let draw = rand::rng().random_range(0..total);
        self.provider_for_draw(draw)
    }

    /// The pinned Russian JSON source, bypassing weights entirely.
    pub fn native(&self) -> &dyn JokeProvider {
        self.providers[0].as_ref()
    }

    /// Resolve a draw in `[0, total)` by walking cumulative weights and
    /// returning the first provider whose cumulative sum exceeds the draw.
    fn provider_for_draw(&self, draw: u32) -> &dyn JokeProvider {
        let mut cumulative = 0u32;
        for (provider, weight) in self.providers.iter().zip(&self.weights) {
            cumulative += weight;
            if draw < cumulative {
                return provider.as_ref();
            }
        }
        // Tables out of lockstep: degrade to the first provider.
        self.providers[0].as_ref()
    }
}
