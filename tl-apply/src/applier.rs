//! The applier seam: one strategy per registered output tensor name.

use tl_core::{ActionRecord, AgentId, MemoryRecord, OutputTensor};

/// A strategy that maps one named tensor's contents to per-agent mutable
/// state.
///
/// Row `i` of the tensor belongs to `agent_order[i]`. An applier touches only
/// the entries of agents present in `agent_order`; it never removes or
/// reorders other agents' entries. Shape mismatches are precondition
/// violations enforced at the engine boundary, guarded here with debug
/// assertions only.
pub trait Applier: Send {
    fn apply(
        &mut self,
        tensor: &OutputTensor,
        agent_order: &[AgentId],
        actions: &mut ActionRecord,
        memories: &mut MemoryRecord,
    );
}
