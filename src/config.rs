use std::env;

use anyhow::Result;

use crate::engine::EngineSettings;

/// Central configuration loaded from environment variables.
///
/// Every field has a default; the .env file is loaded automatically at
/// startup via dotenvy. Tuning knobs only — no secrets live here.
pub struct Config {
    /// Per-day exponential decay rate applied to interaction age (default 0.1)
    pub decay_rate: f64,
    /// Influence of each group profile on similarity scores (default 0.3)
    pub group_weight: f64,
    /// Vocabulary cap for the TF-IDF vectorizer (default 5000)
    pub vocab_size: usize,
    /// Fixed seed for the selector's source shuffle; unset draws OS entropy
    pub selector_seed: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unparseable values fall back to the default rather than aborting —
    /// a typo'd env var should not take the recommender down.
    pub fn load() -> Result<Self> {
        Ok(Self {
            decay_rate: env_f64("HEARTH_DECAY_RATE", 0.1),
            group_weight: env_f64("HEARTH_GROUP_WEIGHT", 0.3),
            vocab_size: env_usize("HEARTH_VOCAB_SIZE", 5000),
            selector_seed: env::var("HEARTH_SELECTOR_SEED")
                .ok()
                .and_then(|v| v.parse().ok()),
        })
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            decay_rate: self.decay_rate,
            group_weight: self.group_weight,
            vocab_size: self.vocab_size,
            selector_seed: self.selector_seed,
        }
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
