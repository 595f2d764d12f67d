//! # ec_stripe - Erasure-Coded Stripe Reliability Simulator
//!
//! Estimates, for an erasure-coded storage scheme EC(n, k), the probability
//! that a stripe of `k` data fragments (out of a population of `N` storage
//! nodes) becomes unreadable in a given round because at least one of its
//! `k` holding nodes is unavailable.
//!
//! Each node carries a reliability score that drifts upward over time
//! (accumulating wear/load) following a bounded heavy-tailed Lévy process,
//! and is reset whenever the node crosses the reliability threshold and is
//! replaced. Sweeping `k` across a range for several thresholds yields a
//! reliability-degradation curve per threshold.
//!
//! ## Core Components
//!
//! - **NodePopulation**: reliability scores for every node, sorted at
//!   creation so the data-holding prefix starts as the most reliable nodes
//! - **BoundedLevy**: clipped, rescaled Lévy increments driving score drift
//! - **RoundSimulator**: one round of drift, availability check, and churn
//! - **SweepRunner**: the outer loop over k and over named thresholds
//!
//! Rendering the curves is out of scope: the runner hands back one
//! `ThresholdCurve` per threshold label for an external plotting component
//! (or exports them as CSV via `SweepReport::write_csv`).
//!
//! ## Usage
//!
//! ```no_run
//! use ec_stripe::{SweepConfig, SweepRunner};
//!
//! let config = SweepConfig::default();
//! let runner = SweepRunner::new(config).unwrap();
//!
//! let report = runner.run_all();
//! for curve in &report.curves {
//!     println!("{} reliability: {:?}", curve.label, curve.data);
//! }
//! ```

pub mod ec_config;
pub mod ec_drift;
pub mod ec_population;
pub mod ec_round;
pub mod ec_sweep;

// Re-export commonly used types
pub use ec_config::{ConfigError, SweepConfig};
pub use ec_drift::BoundedLevy;
pub use ec_population::NodePopulation;
pub use ec_round::RoundSimulator;
pub use ec_sweep::{SweepReport, SweepRunner, ThresholdCurve};
