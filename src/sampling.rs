use rand::{Rng, distr::weighted::WeightedIndex, seq::index};

use crate::Result;

/// The buffer's weighted draw policy, fixed at construction.
///
/// The two policies are distinct numeric procedures, not one parameterized
/// draw: with replacement treats the stored log weights as categorical logits
/// and draws each index independently, without replacement normalizes the
/// max-shifted exponentials explicitly and draws distinct indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplePolicy {
    WithReplacement,
    WithoutReplacement,
}

impl SamplePolicy {
    /// Draws `amount` indices in `[0, log_w.len())` weighted by the given
    /// log weights.
    ///
    /// The max subtraction before exponentiation is required: raw log weights
    /// routinely sit far below zero and would underflow to an all-zero weight
    /// vector.
    ///
    /// # Errors
    /// Returns `BufferErr::DegenerateWeights` if the weight vector is
    /// rejected by the draw primitive (e.g. NaN weights).
    pub(crate) fn draw<R: Rng>(
        &self,
        rng: &mut R,
        log_w: &[f32],
        amount: usize,
    ) -> Result<Vec<usize>> {
        let max = log_w.iter().fold(f32::NEG_INFINITY, |acc, &lw| acc.max(lw));
        let weights: Vec<f32> = log_w.iter().map(|&lw| (lw - max).exp()).collect();

        match self {
            SamplePolicy::WithReplacement => {
                let categorical = WeightedIndex::new(&weights)?;
                Ok((0..amount).map(|_| rng.sample(&categorical)).collect())
            }
            SamplePolicy::WithoutReplacement => {
                let total: f32 = weights.iter().sum();
                let probs: Vec<f32> = weights.iter().map(|w| w / total).collect();

                let drawn = index::sample_weighted(rng, probs.len(), |i| probs[i], amount)?;
                Ok(drawn.into_vec())
            }
        }
    }
}
