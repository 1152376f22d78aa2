//! Assistant configuration.

use core::str::FromStr;

use crate::error::AssistantError;
use crate::tagging::CandidateStrategy;

/// Minimum similarity a fuzzy candidate must *exceed* to be accepted.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Query-time low-stock cutoff (`quantity <= threshold`).
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

pub const ENV_FUZZY_THRESHOLD: &str = "MUSTOCK_FUZZY_THRESHOLD";
pub const ENV_LOW_STOCK_THRESHOLD: &str = "MUSTOCK_LOW_STOCK_THRESHOLD";
pub const ENV_CANDIDATE_STRATEGY: &str = "MUSTOCK_CANDIDATE_STRATEGY";

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AssistantConfig {
    pub fuzzy_threshold: f64,
    pub low_stock_threshold: u32,
    pub candidate_strategy: CandidateStrategy,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            candidate_strategy: CandidateStrategy::default(),
        }
    }
}

impl AssistantConfig {
    /// Read overrides from the process environment.
    ///
    /// Unparsable values are logged and replaced by their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AssistantConfig::from_env`], with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            fuzzy_threshold: read_or_default(&lookup, ENV_FUZZY_THRESHOLD, defaults.fuzzy_threshold),
            low_stock_threshold: read_or_default(
                &lookup,
                ENV_LOW_STOCK_THRESHOLD,
                defaults.low_stock_threshold,
            ),
            candidate_strategy: read_or_default(
                &lookup,
                ENV_CANDIDATE_STRATEGY,
                defaults.candidate_strategy,
            ),
        }
    }

    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub fn with_low_stock_threshold(mut self, threshold: u32) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    pub fn with_candidate_strategy(mut self, strategy: CandidateStrategy) -> Self {
        self.candidate_strategy = strategy;
        self
    }

    pub fn validate(&self) -> Result<(), AssistantError> {
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(AssistantError::InvalidConfig(format!(
                "fuzzy_threshold must be within [0, 1] (got {})",
                self.fuzzy_threshold
            )));
        }
        Ok(())
    }
}

fn read_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + core::fmt::Debug,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("{key}={raw:?} is not valid; using default {default:?}");
            default
        }),
    }
}
