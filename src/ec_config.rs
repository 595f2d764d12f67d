//! Sweep configuration and validation.

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for a reliability sweep.
///
/// Immutable once handed to a `SweepRunner`. Deserializable from YAML
/// scenario files; every field falls back to the defaults below.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Total number of nodes in the network
    pub nodes: usize,

    /// Number of rounds for a single simulation
    pub rounds: usize,

    /// Lower bound for k in EC(n, k)
    pub k_min: usize,

    /// Upper bound for k in EC(n, k), inclusive
    pub k_max: usize,

    /// Reliability thresholds above which a node is out, by label.
    ///
    /// Higher means more tolerant on reliability (a node is considered out
    /// less frequently). Curves are produced in declaration order.
    pub thresholds: IndexMap<String, f64>,

    /// Number of nodes whose score drifts each round (a fixed prefix of the
    /// population, independent of k)
    pub drift_nodes: usize,

    /// Upper bound for a single-round score increment
    pub drift_limit: f64,

    /// Quantile of the Lévy distribution used as the clipping cap
    pub drift_quantile: f64,

    /// Random seed for reproducibility (None = generate from entropy)
    pub seed: Option<[u8; 32]>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        let mut thresholds = IndexMap::new();
        thresholds.insert("high".to_string(), 10.0);
        thresholds.insert("medium".to_string(), 5.0);
        thresholds.insert("low".to_string(), 1.0);

        Self {
            nodes: 10_000,
            rounds: 100,
            k_min: 4,
            k_max: 40,
            thresholds,
            drift_nodes: 1000,
            drift_limit: 10.0,
            drift_quantile: 0.99,
            seed: None,
        }
    }
}

impl SweepConfig {
    /// Check the configuration before any simulation work starts.
    ///
    /// A malformed configuration invalidates every curve it would produce,
    /// so the sweep must abort up front rather than emit truncated or
    /// silently wrong results.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nodes == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.k_min == 0 || self.k_min > self.k_max {
            return Err(ConfigError::InvalidKRange {
                k_min: self.k_min,
                k_max: self.k_max,
            });
        }
        if self.k_max > self.nodes {
            return Err(ConfigError::KExceedsPopulation {
                k_max: self.k_max,
                nodes: self.nodes,
            });
        }
        if self.drift_nodes > self.nodes {
            return Err(ConfigError::DriftPrefixExceedsPopulation {
                drift_nodes: self.drift_nodes,
                nodes: self.nodes,
            });
        }
        if self.thresholds.is_empty() {
            return Err(ConfigError::NoThresholds);
        }
        if self.drift_limit < 0.0 || !self.drift_limit.is_finite() {
            return Err(ConfigError::InvalidDriftLimit(self.drift_limit));
        }
        if !(self.drift_quantile > 0.0 && self.drift_quantile < 1.0) {
            return Err(ConfigError::InvalidDriftQuantile(self.drift_quantile));
        }
        Ok(())
    }

    /// Get or generate seed
    pub fn resolve_seed(&self) -> [u8; 32] {
        self.seed.unwrap_or_else(|| {
            let mut temp_rng = StdRng::from_entropy();
            let mut seed = [0u8; 32];
            temp_rng.fill_bytes(&mut seed);
            seed
        })
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Configuration errors. None are recoverable: any of them would skew the
/// statistics of the whole sweep.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("population size must be positive")]
    EmptyPopulation,

    #[error("round count must be positive")]
    NoRounds,

    #[error("invalid k range: k_min={k_min}, k_max={k_max} (need 1 <= k_min <= k_max)")]
    InvalidKRange { k_min: usize, k_max: usize },

    #[error("k_max {k_max} exceeds population size {nodes}")]
    KExceedsPopulation { k_max: usize, nodes: usize },

    #[error("drift prefix {drift_nodes} exceeds population size {nodes}")]
    DriftPrefixExceedsPopulation { drift_nodes: usize, nodes: usize },

    #[error("threshold set is empty")]
    NoThresholds,

    #[error("drift limit must be finite and non-negative, got {0}")]
    InvalidDriftLimit(f64),

    #[error("drift quantile must lie in (0, 1), got {0}")]
    InvalidDriftQuantile(f64),
}
