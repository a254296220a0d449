//! tl-apply: routes named inference output tensors to per-agent state.
//!
//! The `OutputDispatcher` owns a registry of `Applier` strategies keyed by
//! tensor name, built once from a `CapabilityDescriptor` plus a seed:
//! - continuous action space: identity row copy into the action record
//! - discrete action space: seeded per-branch categorical sampling
//! - recurrent output: whole-entry memory overwrite
//! - auxiliary memory outputs: per-cell sub-range writes into a shared buffer
//!
//! Tensors are assumed to carry the batch on the first dimension, ordered the
//! same way as the agent order passed to `apply_all`.

pub mod action;
pub mod applier;
pub mod dispatch;
pub mod memory;

pub use action::{ContinuousActionApplier, DiscreteActionApplier};
pub use applier::Applier;
pub use dispatch::{BuildError, DispatchError, DispatchStats, OutputDispatcher};
pub use memory::{AuxMemoryApplier, MemoryApplier};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
