//! Verifier and auditor options.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What to do after the first failing type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop at the first failure; later types are reported as skipped.
    FailFast,
    /// Check every type and report all failures together.
    #[default]
    CollectAll,
}

impl FailurePolicy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FailFast => "fail_fast",
            Self::CollectAll => "collect_all",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn default_typed_roundtrip() -> bool {
    true
}

/// Spaces per indentation level in the canonical form.
const fn default_indent() -> usize {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifyConfig {
    /// Also decode the canonical text into the concrete type and compare.
    #[serde(default = "default_typed_roundtrip")]
    pub typed_roundtrip: bool,

    #[serde(default = "default_indent")]
    pub indent: usize,

    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            typed_roundtrip: default_typed_roundtrip(),
            indent: default_indent(),
            failure_policy: FailurePolicy::default(),
        }
    }
}
