//! Seeded measurement sampling.
//!
//! Converts the final amplitude vector into a probability distribution,
//! draws a fixed number of pseudorandom shots from it, and reports the
//! most frequent basis index. With a fixed seed the whole stage is
//! deterministic, which is what makes the digest reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::statevector::Statevector;

/// Default simulator seed, matching the reference pipeline.
pub const DEFAULT_SEED: u64 = 42;

/// Default number of measurement shots.
pub const DEFAULT_SHOTS: u32 = 1024;

/// Tolerance before the probability distribution is renormalized.
const PROB_SUM_TOLERANCE: f64 = 1e-9;

/// The winning measurement outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementOutcome {
    /// Winning basis index in `[0, 2^n)`.
    pub index: usize,
    /// Number of shots that observed it.
    pub count: u32,
}

/// Deterministic shot sampler.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    shots: u32,
    seed: u64,
}

impl Sampler {
    /// Sampler with the given seed and the default shot count.
    pub fn new(seed: u64) -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            seed,
        }
    }

    /// Override the shot count.
    #[must_use]
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// The seed this sampler draws with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw shots from the statevector's distribution and return the
    /// most frequent basis index.
    ///
    /// Ties on the count are broken toward the smallest basis index.
    /// The rule is deliberate: the reference let unordered-container
    /// iteration decide, which is not reproducible across runs.
    pub fn measure(&self, sv: &Statevector) -> MeasurementOutcome {
        let mut probs = sv.probabilities();
        let total: f64 = probs.iter().sum();
        if (total - 1.0).abs() > PROB_SUM_TOLERANCE && total > 0.0 {
            debug!(total, "renormalizing measurement distribution");
            for p in &mut probs {
                *p /= total;
            }
        }

        // Cumulative distribution for O(log N) lookups per shot.
        let mut cdf = Vec::with_capacity(probs.len());
        let mut acc = 0.0;
        for p in &probs {
            acc += p;
            cdf.push(acc);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut counts: FxHashMap<usize, u32> = FxHashMap::default();
        for _ in 0..self.shots {
            let r: f64 = rng.r#gen();
            let idx = cdf.partition_point(|&c| c <= r).min(probs.len() - 1);
            *counts.entry(idx).or_insert(0) += 1;
        }

        let outcome = select_winner(&counts);
        debug!(
            shots = self.shots,
            seed = self.seed,
            distinct = counts.len(),
            index = outcome.index,
            count = outcome.count,
            "measurement complete"
        );
        outcome
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Pick the highest-count index; ties go to the smallest index.
pub(crate) fn select_winner(counts: &FxHashMap<usize, u32>) -> MeasurementOutcome {
    let mut winner = MeasurementOutcome { index: 0, count: 0 };
    for (&index, &count) in counts {
        if count > winner.count || (count == winner.count && index < winner.index) {
            winner = MeasurementOutcome { index, count };
        }
    }
    winner
}
