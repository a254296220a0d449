//! Action output appliers: continuous row copy + seeded discrete sampling.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use tl_core::{ActionRecord, AgentId, MemoryRecord, OutputTensor};

use crate::applier::Applier;

/// Writes each agent's tensor row directly as its action vector.
pub struct ContinuousActionApplier {
    size: usize,
}

impl ContinuousActionApplier {
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl Applier for ContinuousActionApplier {
    fn apply(
        &mut self,
        tensor: &OutputTensor,
        agent_order: &[AgentId],
        actions: &mut ActionRecord,
        _memories: &mut MemoryRecord,
    ) {
        debug_assert_eq!(tensor.batch_size(), agent_order.len());
        debug_assert_eq!(tensor.row_len(), self.size);

        for (i, &id) in agent_order.iter().enumerate() {
            actions.insert(id, tensor.row(i).to_vec());
        }
    }
}

/// Samples one action index per branch from the row's concatenated per-branch
/// logit blocks.
///
/// Sampling is categorical over softmax-normalized logits, drawn from a
/// `ChaCha8Rng` seeded at construction: same seed + same logits + same call
/// sequence reproduce the same indices. Stored actions are raw `f32` index
/// values, one per branch.
pub struct DiscreteActionApplier {
    branch_sizes: Vec<usize>,
    rng: Box<ChaCha8Rng>,
}

impl DiscreteActionApplier {
    pub fn new(branch_sizes: Vec<usize>, seed: u64) -> Self {
        Self {
            branch_sizes,
            rng: Box::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl Applier for DiscreteActionApplier {
    fn apply(
        &mut self,
        tensor: &OutputTensor,
        agent_order: &[AgentId],
        actions: &mut ActionRecord,
        _memories: &mut MemoryRecord,
    ) {
        debug_assert_eq!(tensor.batch_size(), agent_order.len());
        debug_assert_eq!(
            tensor.row_len(),
            self.branch_sizes.iter().sum::<usize>(),
            "row must concatenate one logit block per branch"
        );

        for (i, &id) in agent_order.iter().enumerate() {
            let row = tensor.row(i);
            let mut out = Vec::with_capacity(self.branch_sizes.len());
            let mut off = 0usize;
            for &b in &self.branch_sizes {
                let idx = sample_categorical(&row[off..off + b], self.rng.as_mut());
                out.push(idx as f32);
                off += b;
            }
            actions.insert(id, out);
        }
    }
}

/// Softmax-normalized categorical draw over raw logits.
///
/// Max-subtracted before exponentiation. Returns index 0 when the
/// distribution degenerates (all logits non-finite, or zero total mass).
fn sample_categorical(logits: &[f32], rng: &mut impl Rng) -> usize {
    debug_assert!(!logits.is_empty());

    let m = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    if !m.is_finite() {
        return 0;
    }

    let mut weights = Vec::with_capacity(logits.len());
    let mut sum = 0.0f32;
    for &l in logits {
        let w = (l - m).exp();
        weights.push(w);
        sum += w;
    }
    if !(sum.is_finite() && sum > 0.0) {
        return 0;
    }

    // Inverse-CDF draw: one uniform per branch.
    let u: f32 = rng.gen_range(0.0..1.0);
    let mut acc = 0.0f32;
    for (i, &w) in weights.iter().enumerate() {
        acc += w / sum;
        if u < acc {
            return i;
        }
    }
    weights.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorical_is_deterministic_for_same_seed() {
        let logits = [0.3f32, -1.2, 0.9, 0.0];
        let mut a = ChaCha8Rng::seed_from_u64(11);
        let mut b = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..64 {
            assert_eq!(
                sample_categorical(&logits, &mut a),
                sample_categorical(&logits, &mut b)
            );
        }
    }

    #[test]
    fn categorical_follows_overwhelming_logit() {
        // exp(-60) underflows against exp(0): index 2 gets all the mass.
        let logits = [-60.0f32, -60.0, 0.0];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for _ in 0..128 {
            assert_eq!(sample_categorical(&logits, &mut rng), 2);
        }
    }

    #[test]
    fn categorical_degenerate_mass_falls_back_to_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            sample_categorical(&[f32::NEG_INFINITY, f32::NEG_INFINITY], &mut rng),
            0
        );
        assert_eq!(sample_categorical(&[f32::NAN, f32::NAN], &mut rng), 0);
    }

    #[test]
    fn categorical_index_always_in_range() {
        let logits = [0.5f32, 0.5, 0.5, 0.5, 0.5];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..256 {
            assert!(sample_categorical(&logits, &mut rng) < logits.len());
        }
    }
}
