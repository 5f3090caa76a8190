//! Which entity model module the suite runs against.

use serde::{Deserialize, Serialize};

/// Module checked when nothing else is configured.
pub const DEFAULT_MODULE: &str = "dto-model";

fn default_module() -> String {
    DEFAULT_MODULE.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
    /// Name of the module, resolved through the host's declared dependencies.
    #[serde(default = "default_module")]
    pub module: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            module: default_module(),
        }
    }
}
