//! Capability descriptor: action space shape + recurrent outputs of the model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Descriptor violations caught before a dispatcher is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("continuous action size must be > 0")]
    ZeroContinuousSize,
    #[error("discrete action space must declare at least one branch")]
    EmptyBranches,
    #[error("discrete branch {index} has size 0")]
    ZeroBranchSize { index: usize },
}

/// Action space exposed by the model.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionSpace {
    /// `size` floats per agent, copied verbatim from the action tensor.
    Continuous { size: usize },
    /// One categorical choice per branch; the action tensor carries the
    /// concatenated per-branch logit blocks.
    Discrete { branch_sizes: Vec<usize> },
}

impl ActionSpace {
    /// Expected action tensor row width for this space.
    pub fn row_len(&self) -> usize {
        match self {
            ActionSpace::Continuous { size } => *size,
            ActionSpace::Discrete { branch_sizes } => branch_sizes.iter().sum(),
        }
    }

    /// Stable identifier recorded in manifests and logs.
    pub fn id(&self) -> &'static str {
        match self {
            ActionSpace::Continuous { .. } => "continuous_v1",
            ActionSpace::Discrete { .. } => "discrete_branches_v1",
        }
    }
}

/// What the model exposes: the action space plus any auxiliary named memory
/// output tensors (multi-cell recurrent models), in model declaration order.
///
/// The declaration order matters: auxiliary cell `i` owns the `i`-th slice of
/// the shared per-agent memory buffer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CapabilityDescriptor {
    pub action: ActionSpace,
    #[serde(default)]
    pub aux_memory_outputs: Vec<String>,
}

impl CapabilityDescriptor {
    pub fn new(action: ActionSpace) -> Self {
        Self {
            action,
            aux_memory_outputs: Vec::new(),
        }
    }

    pub fn with_aux_memory_outputs(mut self, names: Vec<String>) -> Self {
        self.aux_memory_outputs = names;
        self
    }

    /// Check action-space dimensions. Name collisions are the registry
    /// builder's contract and are reported there, not here.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        match &self.action {
            ActionSpace::Continuous { size } => {
                if *size == 0 {
                    return Err(DescriptorError::ZeroContinuousSize);
                }
            }
            ActionSpace::Discrete { branch_sizes } => {
                if branch_sizes.is_empty() {
                    return Err(DescriptorError::EmptyBranches);
                }
                for (index, &b) in branch_sizes.iter().enumerate() {
                    if b == 0 {
                        return Err(DescriptorError::ZeroBranchSize { index });
                    }
                }
            }
        }
        Ok(())
    }
}
