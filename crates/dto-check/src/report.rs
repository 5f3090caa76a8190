//! Per-run outcome records.

use std::fmt;

use dto_config::FailurePolicy;
use serde::Serialize;

use crate::error::{CheckError, FailureKind};

/// Which check produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Verify,
    Audit,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Verify => "verify",
            Self::Audit => "audit",
        })
    }
}

/// One failed type (or type + property).
#[derive(Debug, Clone, Serialize)]
pub struct CheckFailure {
    pub kind: FailureKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    pub detail: String,
    /// Both encodings, for round-trip mismatches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl From<&CheckError> for CheckFailure {
    fn from(err: &CheckError) -> Self {
        let (expected, actual) = match err {
            CheckError::SerializationMismatch {
                expected, actual, ..
            } => (Some(expected.clone()), Some(actual.clone())),
            _ => (None, None),
        };
        Self {
            kind: err.kind(),
            type_name: err.type_name().map(str::to_string),
            property: err.property().map(str::to_string),
            detail: err.to_string(),
            expected,
            actual,
        }
    }
}

/// Outcome of running one check over a module's candidate types.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub check: CheckKind,
    pub module: String,
    pub policy: FailurePolicy,
    /// Types that passed, in check order.
    pub passed: Vec<String>,
    pub failures: Vec<CheckFailure>,
    /// Types left unchecked after a fail-fast stop.
    pub skipped: Vec<String>,
}

impl CheckReport {
    #[must_use]
    pub fn new(check: CheckKind, module: impl Into<String>, policy: FailurePolicy) -> Self {
        Self {
            check,
            module: module.into(),
            policy,
            passed: Vec::new(),
            failures: Vec::new(),
            skipped: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Distinct types with at least one failure, in first-failure order.
    #[must_use]
    pub fn failed_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();
        for name in self.failures.iter().filter_map(|f| f.type_name.as_deref()) {
            if !types.contains(&name) {
                types.push(name);
            }
        }
        types
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}: {} passed, {} failed, {} skipped ({})",
            self.check,
            self.module,
            self.passed.len(),
            self.failed_types().len(),
            self.skipped.len(),
            self.policy,
        )?;
        for failure in &self.failures {
            writeln!(f, "  FAIL {}", failure.detail)?;
        }
        if !self.skipped.is_empty() {
            writeln!(f, "  skipped: {}", self.skipped.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::MismatchStage;

    fn mismatch() -> CheckError {
        CheckError::SerializationMismatch {
            type_name: "Order".into(),
            stage: MismatchStage::Typed,
            expected: "{}".into(),
            actual: "{\n  \"x\": 1\n}".into(),
            first_difference: "line 1: expected `{}`, found `{`".into(),
        }
    }

    #[test]
    fn failure_keeps_both_encodings_for_mismatches() {
        let failure = CheckFailure::from(&mismatch());
        assert_eq!(failure.kind, FailureKind::SerializationMismatch);
        assert_eq!(failure.type_name.as_deref(), Some("Order"));
        assert_eq!(failure.property, None);
        assert_eq!(failure.expected.as_deref(), Some("{}"));
    }

    #[test]
    fn report_serializes_with_snake_case_tags() {
        let mut report = CheckReport::new(CheckKind::Audit, "dto-model", FailurePolicy::FailFast);
        report.failures.push(CheckFailure::from(&CheckError::MissingAnnotation {
            type_name: "Customer".into(),
            property: "nickname".into(),
        }));
        report.skipped.push("Order".into());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["check"], "audit");
        assert_eq!(json["policy"], "fail_fast");
        assert_eq!(json["failures"][0]["kind"], "missing_annotation");
        assert_eq!(json["failures"][0]["property"], "nickname");
        assert!(json["failures"][0].get("expected").is_none());
        assert!(!report.is_success());
    }

    #[test]
    fn display_counts_failed_types_once() {
        let mut report = CheckReport::new(CheckKind::Audit, "dto-model", FailurePolicy::CollectAll);
        report.passed.push("Address".into());
        for property in ["a", "b"] {
            report.failures.push(CheckFailure::from(&CheckError::MissingAnnotation {
                type_name: "Customer".into(),
                property: property.into(),
            }));
        }
        let text = report.to_string();
        assert!(text.starts_with("audit dto-model: 1 passed, 1 failed, 0 skipped (collect_all)\n"));
        assert!(text.contains("  FAIL Customer.b: property has neither"));
    }
}
