//! Output tensor view + caller-owned per-agent records.

use rustc_hash::FxHashMap;

/// Opaque handle for one active agent instance.
///
/// Unique within a decision cycle; stable across cycles while the same
/// logical agent stays active.
pub type AgentId = u64;

/// Most recent action vector per agent. Caller-owned; action appliers
/// overwrite entries in place and never remove other agents' entries.
pub type ActionRecord = FxHashMap<AgentId, Vec<f32>>;

/// Recurrent state carried between inference cycles, per agent.
pub type MemoryRecord = FxHashMap<AgentId, Vec<f32>>;

/// One named output tensor produced by the inference engine.
///
/// Row-major `f32` payload. The first shape dimension is the batch: the
/// number of agents in the current decision cycle. Immutable from the
/// dispatcher's viewpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTensor {
    pub name: String,
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

impl OutputTensor {
    /// Build a rank-2 `[batch, row_len]` tensor.
    ///
    /// # Panics
    /// Panics if `data.len() != batch * row_len`.
    pub fn from_rows(
        name: impl Into<String>,
        batch: usize,
        row_len: usize,
        data: Vec<f32>,
    ) -> Self {
        assert_eq!(
            data.len(),
            batch * row_len,
            "payload length must match shape"
        );
        Self {
            name: name.into(),
            shape: vec![batch, row_len],
            data,
        }
    }

    /// Number of agents covered by this tensor (first shape dimension).
    pub fn batch_size(&self) -> usize {
        self.shape.first().copied().unwrap_or(0)
    }

    /// Flattened per-agent row width (product of the non-batch dimensions).
    pub fn row_len(&self) -> usize {
        self.shape.iter().skip(1).product()
    }

    /// The row for batch position `i`.
    ///
    /// # Panics
    /// Panics if `i >= batch_size()`.
    pub fn row(&self, i: usize) -> &[f32] {
        let w = self.row_len();
        &self.data[i * w..(i + 1) * w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_index_the_batch_dimension() {
        let t = OutputTensor::from_rows("action_output", 2, 3, vec![0., 1., 2., 3., 4., 5.]);
        assert_eq!(t.batch_size(), 2);
        assert_eq!(t.row_len(), 3);
        assert_eq!(t.row(0), &[0., 1., 2.]);
        assert_eq!(t.row(1), &[3., 4., 5.]);
    }

    #[test]
    fn row_len_flattens_trailing_dims() {
        let t = OutputTensor {
            name: "recurrent_output".to_string(),
            shape: vec![2, 2, 4],
            data: vec![0.0; 16],
        };
        assert_eq!(t.batch_size(), 2);
        assert_eq!(t.row_len(), 8);
        assert_eq!(t.row(1).len(), 8);
    }

    #[test]
    #[should_panic(expected = "payload length")]
    fn from_rows_rejects_mismatched_payload() {
        let _ = OutputTensor::from_rows("action_output", 2, 3, vec![0.0; 5]);
    }
}
