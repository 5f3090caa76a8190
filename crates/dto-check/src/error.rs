//! Error types for discovery, fabrication, verification, and audit.
//!
//! Every per-type error carries the type name so a report line is
//! self-explanatory without the surrounding test context.

use std::fmt;

use dto_core::ManifestError;
use serde::Serialize;
use thiserror::Error;

/// Why an instance could not be synthesized from a schema.
#[derive(Debug, Error)]
pub enum FabricationError {
    /// A `$ref` led back to a type already being fabricated, and no nullable
    /// or collection boundary was available to stop at.
    #[error("cycle through {reference} at {path}")]
    Cycle { reference: String, path: String },

    /// Nesting went past the configured depth with no boundary to stop at.
    #[error("nesting deeper than {max_depth} at {path}")]
    DepthExceeded { max_depth: usize, path: String },

    #[error("unresolved schema reference {reference} at {path}")]
    UnresolvedRef { reference: String, path: String },

    #[error("unsupported schema shape at {path}: {detail}")]
    UnsupportedShape { path: String, detail: String },

    /// A property asked to be left null is not a top-level property.
    #[error("no top-level property named '{property}' to leave null")]
    UnknownProperty { property: String },

    /// The fabricated value does not conform to the schema it was built from.
    #[error("fabricated value violates schema: {}", .errors.join("; "))]
    SchemaViolation { errors: Vec<String> },

    /// The type's schema could not be produced.
    #[error("schema generation failed: {0}")]
    Schema(#[source] serde_json::Error),

    /// The concrete type rejected the fabricated value.
    #[error("cannot instantiate from fabricated value: {0}")]
    Instantiate(#[source] serde_json::Error),
}

impl FabricationError {
    /// Cycles and depth overruns can be absorbed by a nullable or collection
    /// boundary further up; everything else is fatal for the type.
    #[must_use]
    pub const fn is_truncation(&self) -> bool {
        matches!(self, Self::Cycle { .. } | Self::DepthExceeded { .. })
    }
}

/// Which comparison detected a mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchStage {
    /// Canonical text vs. re-encoded type-erased value.
    Generic,
    /// Canonical text vs. re-encoded concrete instance.
    Typed,
}

impl fmt::Display for MismatchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Generic => "generic",
            Self::Typed => "typed",
        })
    }
}

/// Errors raised by the harness.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The requested module is not among the declared dependencies.
    #[error("module '{name}' is not a declared dependency (declared: {})", .declared.join(", "))]
    ModuleNotFound { name: String, declared: Vec<String> },

    /// The module is declared but its manifest failed to load.
    #[error("module '{name}' failed to load: {source}")]
    ModuleLoad {
        name: String,
        #[source]
        source: ManifestError,
    },

    #[error("{type_name}: cannot fabricate instance: {source}")]
    InstanceFabrication {
        type_name: String,
        #[source]
        source: FabricationError,
    },

    /// The encoder failed on a valid instance.
    #[error("{type_name}: serialization failed: {source}")]
    Serialization {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The canonical text could not be decoded back into the concrete type.
    #[error("{type_name}: canonical form does not decode: {source}")]
    Deserialization {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{type_name}: {stage} round-trip changed the encoding ({first_difference})")]
    SerializationMismatch {
        type_name: String,
        stage: MismatchStage,
        expected: String,
        actual: String,
        first_difference: String,
    },

    /// A populated property vanished during encoding.
    #[error("{type_name}.{property}: populated property missing from the encoding")]
    DroppedProperty { type_name: String, property: String },

    #[error("{type_name}.{property}: property has neither a serialize nor an exclude directive")]
    MissingAnnotation { type_name: String, property: String },

    #[error("{type_name}.{property}: {reason}")]
    ConflictingAnnotation {
        type_name: String,
        property: String,
        reason: String,
    },
}

impl CheckError {
    pub(crate) fn fabrication(type_name: &str, source: FabricationError) -> Self {
        Self::InstanceFabrication {
            type_name: type_name.to_string(),
            source,
        }
    }

    pub(crate) fn serialization(type_name: &str, source: serde_json::Error) -> Self {
        Self::Serialization {
            type_name: type_name.to_string(),
            source,
        }
    }

    /// The type this error is about, if it is about one.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::ModuleNotFound { .. } | Self::ModuleLoad { .. } => None,
            Self::InstanceFabrication { type_name, .. }
            | Self::Serialization { type_name, .. }
            | Self::Deserialization { type_name, .. }
            | Self::SerializationMismatch { type_name, .. }
            | Self::DroppedProperty { type_name, .. }
            | Self::MissingAnnotation { type_name, .. }
            | Self::ConflictingAnnotation { type_name, .. } => Some(type_name),
        }
    }

    /// The property this error is about, for property-level failures.
    #[must_use]
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::DroppedProperty { property, .. }
            | Self::MissingAnnotation { property, .. }
            | Self::ConflictingAnnotation { property, .. } => Some(property),
            _ => None,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::ModuleNotFound { .. } => FailureKind::ModuleNotFound,
            Self::ModuleLoad { .. } => FailureKind::ModuleLoad,
            Self::InstanceFabrication { .. } => FailureKind::InstanceFabrication,
            Self::Serialization { .. } => FailureKind::Serialization,
            Self::Deserialization { .. } => FailureKind::Deserialization,
            Self::SerializationMismatch { .. } => FailureKind::SerializationMismatch,
            Self::DroppedProperty { .. } => FailureKind::DroppedProperty,
            Self::MissingAnnotation { .. } => FailureKind::MissingAnnotation,
            Self::ConflictingAnnotation { .. } => FailureKind::ConflictingAnnotation,
        }
    }
}

/// Tag for a [`CheckError`] variant, used in serialized reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    ModuleNotFound,
    ModuleLoad,
    InstanceFabrication,
    Serialization,
    Deserialization,
    SerializationMismatch,
    DroppedProperty,
    MissingAnnotation,
    ConflictingAnnotation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_not_found_lists_declared_names() {
        let err = CheckError::ModuleNotFound {
            name: "billing".into(),
            declared: vec!["dto-model".into(), "auth-model".into()],
        };
        assert_eq!(
            err.to_string(),
            "module 'billing' is not a declared dependency (declared: dto-model, auth-model)"
        );
        assert_eq!(err.type_name(), None);
        assert_eq!(err.kind(), FailureKind::ModuleNotFound);
    }

    #[test]
    fn property_errors_expose_type_and_property() {
        let err = CheckError::MissingAnnotation {
            type_name: "Order".into(),
            property: "notes".into(),
        };
        assert_eq!(err.type_name(), Some("Order"));
        assert_eq!(err.property(), Some("notes"));
        assert!(err.to_string().starts_with("Order.notes:"));
    }

    #[test]
    fn fabrication_error_carries_inner_cause() {
        let err = CheckError::fabrication(
            "Node",
            FabricationError::Cycle {
                reference: "#/$defs/Node".into(),
                path: "$.next".into(),
            },
        );
        assert_eq!(
            err.to_string(),
            "Node: cannot fabricate instance: cycle through #/$defs/Node at $.next"
        );
    }

    #[test]
    fn only_cycles_and_depth_are_truncations() {
        assert!(
            FabricationError::DepthExceeded {
                max_depth: 2,
                path: "$".into()
            }
            .is_truncation()
        );
        assert!(
            !FabricationError::UnsupportedShape {
                path: "$".into(),
                detail: "x".into()
            }
            .is_truncation()
        );
    }
}
