//! Output dispatcher: the name → applier registry and per-cycle application.

use rustc_hash::FxHashMap;
use thiserror::Error;

use tl_core::capability::{ActionSpace, CapabilityDescriptor, DescriptorError};
use tl_core::names::{ACTION_OUTPUT, RECURRENT_OUTPUT};
use tl_core::{ActionRecord, AgentId, MemoryRecord, OutputTensor};

use crate::action::{ContinuousActionApplier, DiscreteActionApplier};
use crate::applier::Applier;
use crate::memory::{AuxMemoryApplier, MemoryApplier};

/// Registry construction failures.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    /// Two declared output names collide (an auxiliary memory name repeated,
    /// or shadowing a reserved name).
    #[error("duplicate applier registration for tensor name {name:?}")]
    DuplicateName { name: String },
}

/// Dispatch failures.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The model produced an output this dispatcher was not built for: a
    /// mismatch between the loaded model and the capability descriptor.
    /// Fatal for the cycle; retrying against the same registry fails the
    /// same way.
    #[error("unknown output tensor: {name:?}")]
    UnknownOutputTensor { name: String },
}

/// Counters across `apply_all` calls.
#[derive(Debug, Default, Clone)]
pub struct DispatchStats {
    pub cycles: u64,
    pub tensors: u64,
    pub agent_rows: u64,
}

/// Routes each named output tensor of a cycle to its registered applier.
///
/// The registry is built once and never mutated afterwards. `apply_all` is
/// non-reentrant for a given record pair; independent agent groups use
/// independent dispatcher instances (the discrete sampler's RNG lives inside
/// its applier and is never shared).
pub struct OutputDispatcher {
    registry: FxHashMap<String, Box<dyn Applier>>,
    stats: DispatchStats,
}

impl OutputDispatcher {
    /// Wire up appliers for everything `descriptor` declares.
    ///
    /// `seed` initializes the discrete action sampler; it is unused for
    /// continuous action spaces.
    pub fn new(descriptor: &CapabilityDescriptor, seed: u64) -> Result<Self, BuildError> {
        descriptor.validate()?;

        let mut registry: FxHashMap<String, Box<dyn Applier>> = FxHashMap::default();

        let action: Box<dyn Applier> = match &descriptor.action {
            ActionSpace::Continuous { size } => Box::new(ContinuousActionApplier::new(*size)),
            ActionSpace::Discrete { branch_sizes } => {
                Box::new(DiscreteActionApplier::new(branch_sizes.clone(), seed))
            }
        };
        insert_unique(&mut registry, ACTION_OUTPUT.to_string(), action)?;
        insert_unique(
            &mut registry,
            RECURRENT_OUTPUT.to_string(),
            Box::new(MemoryApplier),
        )?;

        let count = descriptor.aux_memory_outputs.len();
        for (i, name) in descriptor.aux_memory_outputs.iter().enumerate() {
            insert_unique(
                &mut registry,
                name.clone(),
                Box::new(AuxMemoryApplier::new(count, i)),
            )?;
        }

        Ok(Self {
            registry,
            stats: DispatchStats::default(),
        })
    }

    /// Names this dispatcher accepts, i.e. the model's expected output set.
    pub fn registered_names(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }

    pub fn stats(&self) -> &DispatchStats {
        &self.stats
    }

    /// Apply one cycle's tensors to the caller-owned records.
    ///
    /// `agent_order` defines the row-to-agent correspondence for every tensor
    /// in the batch: row `i` belongs to `agent_order[i]`. Agents absent from
    /// the order are untouched. There is no atomicity across the batch:
    /// tensors applied before an unknown name stay applied, and the failing
    /// tensor writes nothing.
    pub fn apply_all<'a, I>(
        &mut self,
        tensors: I,
        agent_order: &[AgentId],
        actions: &mut ActionRecord,
        memories: &mut MemoryRecord,
    ) -> Result<(), DispatchError>
    where
        I: IntoIterator<Item = &'a OutputTensor>,
    {
        self.stats.cycles += 1;
        for tensor in tensors {
            let applier = self.registry.get_mut(&tensor.name).ok_or_else(|| {
                DispatchError::UnknownOutputTensor {
                    name: tensor.name.clone(),
                }
            })?;

            debug_assert_eq!(
                tensor.batch_size(),
                agent_order.len(),
                "tensor batch must match the agent order"
            );

            applier.apply(tensor, agent_order, actions, memories);
            self.stats.tensors += 1;
            self.stats.agent_rows += agent_order.len() as u64;
        }
        Ok(())
    }
}

fn insert_unique(
    registry: &mut FxHashMap<String, Box<dyn Applier>>,
    name: String,
    applier: Box<dyn Applier>,
) -> Result<(), BuildError> {
    if registry.contains_key(&name) {
        return Err(BuildError::DuplicateName { name });
    }
    registry.insert(name, applier);
    Ok(())
}
