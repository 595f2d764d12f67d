//! Node population: per-node reliability scores.

use rand::Rng;
use rand_distr::StandardNormal;

/// Reliability scores for every node in the network.
///
/// A score is accumulated unreliability: a freshly provisioned node sits
/// near zero and drifts upward over time until churn resets it. Scores are
/// sorted ascending at creation, so the first `k` slots start out as the
/// `k` most reliable nodes; those slots are where the stripe's fragments
/// are placed. The ordering is not restored after churn (see `lowest`).
#[derive(Debug, Clone)]
pub struct NodePopulation {
    scores: Vec<f64>,
}

impl NodePopulation {
    /// Create `size` nodes with half-normal initial scores (`|Z|` for
    /// `Z ~ N(0, 1)`), sorted ascending.
    pub fn new(size: usize, rng: &mut impl Rng) -> Self {
        let mut scores: Vec<f64> = (0..size)
            .map(|_| {
                let z: f64 = rng.sample(StandardNormal);
                z.abs()
            })
            .collect();
        scores.sort_unstable_by(f64::total_cmp);
        Self { scores }
    }

    /// Build a population from explicit scores, bypassing the random
    /// initialization. Test-only.
    #[cfg(test)]
    pub(crate) fn from_scores(scores: Vec<f64>) -> Self {
        Self { scores }
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Read-only view of the first `k` slots in storage order.
    ///
    /// Fresh populations are sorted, so this is the true lowest-k set until
    /// the first churn event; after that it is simply the fixed prefix that
    /// holds the stripe's fragments. Callers guarantee `k <= len()`.
    pub fn lowest(&self, k: usize) -> &[f64] {
        &self.scores[..k]
    }

    pub fn score(&self, index: usize) -> f64 {
        self.scores[index]
    }

    /// Add `delta >= 0` to the score at `index`. May perturb the ascending
    /// order of that entry relative to its neighbours.
    pub fn apply_increment(&mut self, index: usize, delta: f64) {
        self.scores[index] += delta;
    }

    /// Replace the score at `index` with a fresh `N(0, 1)` draw. The draw
    /// can be negative: a replacement node is treated as highly reliable.
    pub fn reset(&mut self, index: usize, rng: &mut impl Rng) {
        self.scores[index] = rng.sample(StandardNormal);
    }
}
