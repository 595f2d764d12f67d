//! Sweep over the EC k parameter for each reliability threshold.

use crate::ec_config::{ConfigError, SweepConfig};
use crate::ec_drift::BoundedLevy;
use crate::ec_population::NodePopulation;
use crate::ec_round::RoundSimulator;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io;
use std::path::Path;

// ============================================================================
// Results
// ============================================================================

/// Reliability curve for one named threshold.
///
/// `data` holds one percentage per k, aligned by position to
/// `k = k_min, k_min + 1, ..., k_max`. This is the payload handed to the
/// external plotting collaborator.
#[derive(Debug, Clone)]
pub struct ThresholdCurve {
    pub label: String,
    pub data: Vec<f64>,
}

/// Aggregated results of a full sweep over every configured threshold.
#[derive(Debug, Clone)]
pub struct SweepReport {
    pub k_min: usize,
    pub k_max: usize,
    pub rounds: usize,
    pub seed_used: [u8; 32],
    pub curves: Vec<ThresholdCurve>,
}

impl SweepReport {
    /// Print a summary of the sweep results
    pub fn print_summary(&self) {
        println!("\n╔════════════════════════════════════════════════════════╗");
        println!("║        Stripe Reliability Sweep Results                ║");
        println!("╚════════════════════════════════════════════════════════╝\n");

        println!("Configuration:");
        println!("  Seed: {:?}", self.seed_used);
        println!("  k range: {}..={}", self.k_min, self.k_max);
        println!("  Rounds per k: {}\n", self.rounds);

        println!("Percent of rounds with a missing data fragment:");
        for curve in &self.curves {
            let min = curve.data.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = curve.data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let avg = curve.data.iter().sum::<f64>() / curve.data.len() as f64;
            println!(
                "  {} reliability: min={:.1}%, max={:.1}%, avg={:.1}%",
                curve.label, min, max, avg
            );
        }
        println!();
    }

    /// Export the curves as CSV: one row per k, one column per threshold
    /// label. The file is the hand-off point for external plotting.
    pub fn write_csv(&self, path: &Path) -> io::Result<()> {
        let mut out = String::from("k");
        for curve in &self.curves {
            out.push(',');
            out.push_str(&curve.label);
        }
        out.push('\n');

        for (row, k) in (self.k_min..=self.k_max).enumerate() {
            out.push_str(&k.to_string());
            for curve in &self.curves {
                out.push_str(&format!(",{}", curve.data[row]));
            }
            out.push('\n');
        }

        fs::write(path, out)
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Drives the round simulator over the configured k range for each
/// reliability threshold.
pub struct SweepRunner {
    config: SweepConfig,
    drift: BoundedLevy,
    seed: [u8; 32],
}

impl SweepRunner {
    /// Validate the configuration and build a runner.
    ///
    /// Fails fast: an invalid configuration would silently skew every
    /// curve, so nothing runs until it is checked.
    pub fn new(config: SweepConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let drift = BoundedLevy::new(config.drift_quantile, config.drift_limit);
        let seed = config.resolve_seed();
        Ok(Self {
            config,
            drift,
            seed,
        })
    }

    pub fn seed(&self) -> [u8; 32] {
        self.seed
    }

    /// Run a full simulation for one reliability threshold.
    ///
    /// A fresh population is created for the threshold, then for each k in
    /// `k_min..=k_max` the round simulator runs `rounds` times. Population
    /// state persists across rounds AND across successive k values: churn
    /// during the k-th run shapes the starting state of the (k+1)-th. The
    /// returned percentages are aligned by position to `k_min..=k_max`.
    pub fn run(&self, threshold: f64) -> Vec<f64> {
        // Each threshold sweep gets its own RNG seeded identically, so
        // sweeps are reproducible and independent of each other.
        let mut rng = StdRng::from_seed(self.seed);
        let mut population = NodePopulation::new(self.config.nodes, &mut rng);
        let round = RoundSimulator::new(self.config.drift_nodes, threshold);

        let mut results = Vec::with_capacity(self.config.k_max - self.config.k_min + 1);
        for k in self.config.k_min..=self.config.k_max {
            info!("simulation for threshold={}/k={}", threshold, k);

            let mut events = 0usize;
            for _ in 0..self.config.rounds {
                if round.step(&mut population, &self.drift, &mut rng, k) {
                    events += 1;
                }
            }
            results.push(events as f64 * 100.0 / self.config.rounds as f64);
        }
        results
    }

    /// Run every configured threshold, producing one curve per label in
    /// declaration order.
    pub fn run_all(&self) -> SweepReport {
        let curves = self
            .config
            .thresholds
            .iter()
            .map(|(label, &threshold)| ThresholdCurve {
                label: label.clone(),
                data: self.run(threshold),
            })
            .collect();

        SweepReport {
            k_min: self.config.k_min,
            k_max: self.config.k_max,
            rounds: self.config.rounds,
            seed_used: self.seed,
            curves,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn small_config() -> SweepConfig {
        let mut thresholds = IndexMap::new();
        thresholds.insert("high".to_string(), 10.0);
        thresholds.insert("low".to_string(), 1.0);

        SweepConfig {
            nodes: 100,
            rounds: 20,
            k_min: 1,
            k_max: 3,
            thresholds,
            drift_nodes: 50,
            drift_limit: 10.0,
            drift_quantile: 0.99,
            seed: Some([20u8; 32]),
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = SweepConfig {
            k_min: 5,
            k_max: 4,
            ..small_config()
        };
        assert!(SweepRunner::new(config).is_err());
    }

    #[test]
    fn test_percentages_stay_within_range() {
        let runner = SweepRunner::new(small_config()).unwrap();
        let report = runner.run_all();

        assert_eq!(report.curves.len(), 2);
        for curve in &report.curves {
            assert_eq!(curve.data.len(), 3);
            for &pct in &curve.data {
                assert!((0.0..=100.0).contains(&pct));
            }
        }
    }

    #[test]
    fn test_one_value_per_k_in_order() {
        let config = SweepConfig {
            k_min: 4,
            k_max: 5,
            ..small_config()
        };
        let runner = SweepRunner::new(config).unwrap();
        let curve = runner.run(5.0);

        // Exactly one percentage for k=4 and one for k=5, in that order
        assert_eq!(curve.len(), 2);
    }

    #[test]
    fn test_same_seed_reproduces_curves() {
        let runner_a = SweepRunner::new(small_config()).unwrap();
        let runner_b = SweepRunner::new(small_config()).unwrap();

        assert_eq!(runner_a.run(5.0), runner_b.run(5.0));
    }

    #[test]
    fn test_zero_drift_never_loses_a_fragment() {
        // Without drift no score ever reaches the threshold: the initial
        // half-normal scores sit far below 5.
        let config = SweepConfig {
            rounds: 10,
            k_min: 1,
            k_max: 1,
            drift_limit: 0.0,
            ..small_config()
        };
        let runner = SweepRunner::new(config).unwrap();

        assert_eq!(runner.run(5.0), vec![0.0]);
    }

    #[test]
    fn test_zero_threshold_loses_a_fragment_every_round() {
        // With a cutoff of zero and strong drift, some holding node is at
        // or above the threshold every single round.
        let config = SweepConfig {
            rounds: 10,
            k_min: 10,
            k_max: 10,
            drift_limit: 100.0,
            drift_quantile: 0.5,
            ..small_config()
        };
        let runner = SweepRunner::new(config).unwrap();

        assert_eq!(runner.run(0.0), vec![100.0]);
    }

    #[test]
    fn test_csv_layout() {
        let report = SweepReport {
            k_min: 4,
            k_max: 5,
            rounds: 10,
            seed_used: [0u8; 32],
            curves: vec![
                ThresholdCurve {
                    label: "high".to_string(),
                    data: vec![10.0, 20.0],
                },
                ThresholdCurve {
                    label: "low".to_string(),
                    data: vec![30.0, 40.0],
                },
            ],
        };

        let dir = std::env::temp_dir();
        let path = dir.join("ec_stripe_csv_layout_test.csv");
        report.write_csv(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "k,high,low");
        assert_eq!(lines[1], "4,10,30");
        assert_eq!(lines[2], "5,20,40");
        assert_eq!(lines.len(), 3);
    }
}
