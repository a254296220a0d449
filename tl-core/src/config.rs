//! Unified configuration schema for tensorlink.
//!
//! The same YAML file configures the dispatcher here and the model export
//! tooling on the training side; field names are part of that contract.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::capability::{ActionSpace, CapabilityDescriptor};

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Seed for the discrete action sampler. Same seed + same logits
    /// reproduce the same sampled actions.
    #[serde(default)]
    pub seed: u64,
    /// Action space exposed by the model.
    pub action: ActionSpace,
    /// Recurrent memory outputs.
    #[serde(default)]
    pub memory: MemoryConfig,
}

/// Recurrent memory configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MemoryConfig {
    /// Auxiliary named memory output tensors (multi-cell models), in model
    /// declaration order. Empty for single-cell models.
    #[serde(default)]
    pub aux_output_names: Vec<String>,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// The capability descriptor this configuration describes.
    pub fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor {
            action: self.action.clone(),
            aux_memory_outputs: self.memory.aux_output_names.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_continuous_yaml() {
        let yaml = r#"
seed: 7
action:
  kind: continuous
  size: 4
"#;
        let config = Config::from_yaml(yaml).expect("Failed to parse YAML");
        assert_eq!(config.seed, 7);
        assert_eq!(config.action, ActionSpace::Continuous { size: 4 });
        // Check defaults are applied
        assert!(config.memory.aux_output_names.is_empty());
    }

    #[test]
    fn parse_discrete_yaml_with_aux_memory() {
        let yaml = r#"
action:
  kind: discrete
  branch_sizes: [3, 2]

memory:
  aux_output_names:
    - "recurrent_output_h"
    - "recurrent_output_c"
"#;
        let config = Config::from_yaml(yaml).expect("Failed to parse YAML");
        assert_eq!(config.seed, 0);
        assert_eq!(
            config.action,
            ActionSpace::Discrete {
                branch_sizes: vec![3, 2]
            }
        );

        let d = config.descriptor();
        assert_eq!(
            d.aux_memory_outputs,
            vec!["recurrent_output_h".to_string(), "recurrent_output_c".to_string()]
        );
        assert!(d.validate().is_ok());
    }

    #[test]
    fn load_example_yaml() {
        // Load the actual config file from the repo
        let config =
            Config::load("../configs/example.yaml").expect("Failed to load configs/example.yaml");

        assert_eq!(config.seed, 7);
        assert_eq!(
            config.action,
            ActionSpace::Discrete {
                branch_sizes: vec![3, 3, 2]
            }
        );
        assert_eq!(config.memory.aux_output_names.len(), 2);
        assert!(config.descriptor().validate().is_ok());
    }

    #[test]
    fn invalid_yaml_fails() {
        let invalid_yaml = "this is not: valid: yaml: {{{}}}";
        let result = Config::from_yaml(invalid_yaml);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_action_kind_fails() {
        let yaml = r#"
action:
  kind: tensorial
  size: 3
"#;
        assert!(Config::from_yaml(yaml).is_err());
    }
}
