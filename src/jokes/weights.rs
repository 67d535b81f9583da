//! Relative selection weights for joke providers.
//!
//! Loaded from a TOML file when one is configured, otherwise a built-in
//! seed is used: Russian sources carry triple the weight of English ones.
//! Weights only shape selection probability; no source is ever excluded.

use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    /// Weight for providers missing from the table.
    #[serde(default = "default_default_weight")]
    pub default_weight: u32,
    /// Explicit weights keyed by provider name.
    #[serde(default)]
    pub weights: HashMap<String, u32>,
}

fn default_default_weight() -> u32 {
    1
}

impl WeightsConfig {
    /// Load from a TOML file, falling back to the built-in seed on any error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => toml::from_str(&s).unwrap_or_else(|_| Self::default_seed()),
            Err(_) => Self::default_seed(),
        }
    }

    /// Weight for a provider name. Unknown names get the default; every
    /// weight is clamped to at least 1 so the cumulative walk stays strictly
    /// increasing.
    pub fn weight_for(&self, provider: &str) -> u32 {
        self.weights
            .get(provider)
            .copied()
            .unwrap_or(self.default_weight)
            .max(1)
    }

    pub fn default_seed() -> Self {
        let mut weights = HashMap::new();
        for (name, w) in [
            ("rzhunemogu.ru", 3),
            ("anekdot.ru", 3),
            ("baneks.ru", 3),
            ("icanhazdadjoke.com", 1),
            ("jokeapi.dev", 1),
        ] {
            weights.insert(name.to_string(), w);
        }
        Self {
            default_weight: 1,
            weights,
        }
    }
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self::default_seed()
    }
}
