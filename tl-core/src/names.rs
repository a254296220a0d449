//! Reserved output tensor names shared with the inference-engine contract.
//!
//! These are the names the dispatcher always registers; auxiliary memory
//! tensors use model-declared names and must not collide with them.

/// Version of the engine ↔ dispatcher output naming contract.
pub const OUTPUT_CONTRACT_VERSION: u32 = 1;

/// Per-agent action rows: continuous values, or concatenated branch logits.
pub const ACTION_OUTPUT: &str = "action_output";

/// Per-agent recurrent state rows (single-cell models).
pub const RECURRENT_OUTPUT: &str = "recurrent_output";
