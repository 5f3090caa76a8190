//! Instance fabrication limits.

use serde::{Deserialize, Serialize};

/// Maximum object nesting before fabrication truncates.
const fn default_max_depth() -> usize {
    6
}

/// Elements synthesized per collection or map.
const fn default_collection_len() -> usize {
    2
}

const fn default_validate_schema() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FabricationConfig {
    /// Nesting cap for self-referential type graphs.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Number of elements placed in every collection and map.
    #[serde(default = "default_collection_len")]
    pub collection_len: usize,

    /// Validate each fabricated value against the type's JSON Schema.
    #[serde(default = "default_validate_schema")]
    pub validate_schema: bool,
}

impl Default for FabricationConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            collection_len: default_collection_len(),
            validate_schema: default_validate_schema(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = FabricationConfig::default();
        assert_eq!(config.max_depth, 6);
        assert_eq!(config.collection_len, 2);
        assert!(config.validate_schema);
    }
}
