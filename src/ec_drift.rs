//! Bounded heavy-tailed drift increments.

use rand::Rng;
use rand_distr::StandardNormal;
use statrs::distribution::{ContinuousCDF, Normal};

/// Per-round score increments following a clipped, rescaled Lévy
/// distribution.
///
/// The heavy tail models rare large reliability degradations such as
/// hardware faults. Draws are clipped at a fixed quantile of the
/// distribution so a single round cannot produce an unbounded score jump,
/// then rescaled linearly so the clip point maps to `limit`. Increments
/// therefore always land in `[0, limit]` and stay commensurate with the
/// configured thresholds.
#[derive(Debug, Clone, Copy)]
pub struct BoundedLevy {
    cap: f64,
    limit: f64,
}

impl BoundedLevy {
    /// Build a sampler clipping at the given quantile of the standard Lévy
    /// distribution. Callers guarantee `0 < quantile < 1`.
    pub fn new(quantile: f64, limit: f64) -> Self {
        // The standard Lévy CDF is F(x) = 2 - 2*Phi(1/sqrt(x)), so the
        // q-quantile is 1 / Phi^-1(1 - q/2)^2.
        let normal = Normal::new(0.0, 1.0).unwrap();
        let cap = normal.inverse_cdf(1.0 - quantile / 2.0).powi(-2);
        Self { cap, limit }
    }

    /// Draw `count` independent increments, each in `[0, limit]`.
    ///
    /// Stateless: the output depends only on the RNG stream.
    pub fn sample(&self, rng: &mut impl Rng, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.draw(rng)).collect()
    }

    fn draw(&self, rng: &mut impl Rng) -> f64 {
        // A standard Lévy variate is Z^-2 for Z ~ N(0, 1).
        let z: f64 = rng.sample(StandardNormal);
        let levy = z.powi(-2);
        // Divide before multiplying so a clipped draw maps to exactly
        // `limit`.
        levy.min(self.cap) / self.cap * self.limit
    }
}
