//! Memory output appliers: whole-entry overwrite + per-cell sub-range writes.

use tl_core::{ActionRecord, AgentId, MemoryRecord, OutputTensor};

use crate::applier::Applier;

/// Replaces each agent's recurrent state entry with its tensor row.
///
/// Used when the model exposes exactly one recurrent state tensor.
pub struct MemoryApplier;

impl Applier for MemoryApplier {
    fn apply(
        &mut self,
        tensor: &OutputTensor,
        agent_order: &[AgentId],
        _actions: &mut ActionRecord,
        memories: &mut MemoryRecord,
    ) {
        debug_assert_eq!(tensor.batch_size(), agent_order.len());

        for (i, &id) in agent_order.iter().enumerate() {
            memories.insert(id, tensor.row(i).to_vec());
        }
    }
}

/// Writes one named cell's slice of a shared per-agent memory buffer.
///
/// Multi-cell models declare `count` memory output tensors; cell `index`
/// owns `[index * width, (index + 1) * width)` of the shared buffer, where
/// `width` is this tensor's row width. Sibling cells' regions are left
/// intact, so cells of one cycle can be applied in any order.
pub struct AuxMemoryApplier {
    count: usize,
    index: usize,
}

impl AuxMemoryApplier {
    pub fn new(count: usize, index: usize) -> Self {
        debug_assert!(index < count);
        Self { count, index }
    }
}

impl Applier for AuxMemoryApplier {
    fn apply(
        &mut self,
        tensor: &OutputTensor,
        agent_order: &[AgentId],
        _actions: &mut ActionRecord,
        memories: &mut MemoryRecord,
    ) {
        debug_assert_eq!(tensor.batch_size(), agent_order.len());

        let width = tensor.row_len();
        let span = self.count * width;
        let offset = self.index * width;

        for (i, &id) in agent_order.iter().enumerate() {
            let buf = memories.entry(id).or_default();
            if buf.len() < span {
                buf.resize(span, 0.0);
            }
            buf[offset..offset + width].copy_from_slice(tensor.row(i));
        }
    }
}
