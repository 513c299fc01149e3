//! Selector configuration
//!
//! Controls how far the exhaustive optimal search is allowed to go, what
//! happens to pools beyond that, and whether random selection is seeded.

use std::fmt;
use std::str::FromStr;

use crate::error::{SelectorError, SelectorResult};

/// Largest pool searched exhaustively unless configured otherwise
pub const DEFAULT_EXHAUSTIVE_LIMIT: usize = 9;

/// Upper bound accepted for the exhaustive limit (12! permutations)
pub const MAX_EXHAUSTIVE_LIMIT: usize = 12;

/// Environment variable names read by [`SelectorConfig::from_env`]
pub const ENV_EXHAUSTIVE_LIMIT: &str = "SELECTOR_EXHAUSTIVE_LIMIT";
pub const ENV_LARGE_POOLS: &str = "SELECTOR_LARGE_POOLS";
pub const ENV_SEED: &str = "SELECTOR_SEED";

/// What the optimal strategy does with pools above the exhaustive limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LargePoolPolicy {
    /// Fail with `EnumerationOverflow`
    #[default]
    Reject,

    /// Solve as a minimum-cost perfect matching instead
    Matching,
}

impl fmt::Display for LargePoolPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LargePoolPolicy::Reject => write!(f, "reject"),
            LargePoolPolicy::Matching => write!(f, "matching"),
        }
    }
}

impl FromStr for LargePoolPolicy {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reject" => Ok(LargePoolPolicy::Reject),
            "matching" => Ok(LargePoolPolicy::Matching),
            _ => Err(SelectorError::config("large_pools", s)),
        }
    }
}

/// Configuration shared by the selection strategies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    /// Largest pool the optimal strategy enumerates exhaustively
    pub exhaustive_limit: usize,

    /// Behaviour for optimal requests above `exhaustive_limit`
    pub large_pools: LargePoolPolicy,

    /// Fixed seed for the random strategy (entropy when unset)
    pub seed: Option<u64>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            exhaustive_limit: DEFAULT_EXHAUSTIVE_LIMIT,
            large_pools: LargePoolPolicy::default(),
            seed: None,
        }
    }
}

impl SelectorConfig {
    pub fn with_exhaustive_limit(mut self, limit: usize) -> Self {
        self.exhaustive_limit = limit;
        self
    }

    pub fn with_large_pools(mut self, policy: LargePoolPolicy) -> Self {
        self.large_pools = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - SELECTOR_EXHAUSTIVE_LIMIT: largest pool for exhaustive search (default: 9)
    /// - SELECTOR_LARGE_POOLS: reject|matching (default: reject)
    /// - SELECTOR_SEED: u64 seed for random selection (default: entropy)
    pub fn from_env() -> SelectorResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> SelectorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_EXHAUSTIVE_LIMIT) {
            config.exhaustive_limit = raw
                .trim()
                .parse()
                .map_err(|_| SelectorError::config(ENV_EXHAUSTIVE_LIMIT, &raw))?;
        }

        if let Some(raw) = lookup(ENV_LARGE_POOLS) {
            config.large_pools = raw.parse()?;
        }

        if let Some(raw) = lookup(ENV_SEED) {
            let seed = raw
                .trim()
                .parse()
                .map_err(|_| SelectorError::config(ENV_SEED, &raw))?;
            config.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject limits that are useless (below 2) or would effectively hang
    pub fn validate(&self) -> SelectorResult<()> {
        if self.exhaustive_limit < 2 || self.exhaustive_limit > MAX_EXHAUSTIVE_LIMIT {
            return Err(SelectorError::config(
                "exhaustive_limit",
                self.exhaustive_limit.to_string(),
            ));
        }
        Ok(())
    }
}
