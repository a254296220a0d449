//! tl-core: output tensor model, agent records, capability descriptor, and configuration.

pub mod batch;
pub mod capability;
pub mod config;
pub mod names;
pub mod tensor;

pub use capability::{ActionSpace, CapabilityDescriptor, DescriptorError};
pub use config::{Config, ConfigError};
pub use tensor::{ActionRecord, AgentId, MemoryRecord, OutputTensor};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
