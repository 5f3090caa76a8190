//! Attribute completeness audit.
//!
//! Cross-checks a type's `FIELDS` table against the properties its encoder
//! emits (the serialize-side schema). Every emitted property must be claimed
//! by an own or inherited field, and every own field's directive must agree
//! with the encoding. Fields listed twice are rejected earlier, when the
//! module's manifest is built.

use std::collections::{BTreeSet, HashSet};

use dto_core::{Directive, FieldSpec};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::discovery::CandidateType;
use crate::error::{CheckError, FabricationError};

/// Directive carried by an audited property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectiveKind {
    Serialize,
    Exclude,
}

/// One property seen by the auditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyDescriptor {
    /// Rust field name, or the wire name for unclaimed properties.
    pub name: String,
    /// Emitted name, if the property is emitted.
    pub wire: Option<String>,
    pub declaring_type: String,
    /// `None` for a property with no directive.
    pub directive: Option<DirectiveKind>,
}

/// Properties of one type and the violations found among them.
#[derive(Debug, Default)]
pub struct Audit {
    pub properties: Vec<PropertyDescriptor>,
    pub violations: Vec<CheckError>,
}

impl Audit {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Audit `candidate`'s directives.
///
/// All violations are collected; callers that want fail-fast take the first.
#[must_use]
pub fn audit(candidate: &CandidateType) -> Audit {
    let type_name = candidate.name();
    let schema = match (candidate.hooks().wire_schema)() {
        Ok(schema) => schema,
        Err(e) => {
            return Audit {
                properties: Vec::new(),
                violations: vec![CheckError::fabrication(type_name, FabricationError::Schema(e))],
            };
        }
    };
    let emitted = emitted_properties(&schema);

    let mut audit = Audit::default();
    let mut claimed = HashSet::new();

    for field in candidate.fields() {
        match field.directive {
            Directive::Serialize { wire } => {
                if !emitted.contains(wire) {
                    audit.violations.push(conflict(
                        type_name,
                        field.name,
                        format!("declared as serialized under `{wire}`, but the encoder never emits it"),
                    ));
                }
                claimed.insert(wire);
                audit.properties.push(PropertyDescriptor {
                    name: field.name.to_string(),
                    wire: Some(wire.to_string()),
                    declaring_type: type_name.to_string(),
                    directive: Some(DirectiveKind::Serialize),
                });
            }
            Directive::Exclude => {
                if emitted.contains(field.name) {
                    audit.violations.push(conflict(
                        type_name,
                        field.name,
                        "declared as excluded, but the encoder emits it",
                    ));
                }
                claimed.insert(field.name);
                audit.properties.push(PropertyDescriptor {
                    name: field.name.to_string(),
                    wire: None,
                    declaring_type: type_name.to_string(),
                    directive: Some(DirectiveKind::Exclude),
                });
            }
            Directive::Inherit { base, fields } => {
                let mut inherited = Vec::new();
                inherited_wires(fields, &mut inherited);
                debug!(type_name, base, inherited = inherited.len(), "skipping inherited properties");
                claimed.extend(inherited);
            }
        }
    }

    for property in &emitted {
        if !claimed.contains(property.as_str()) {
            audit.violations.push(CheckError::MissingAnnotation {
                type_name: type_name.to_string(),
                property: property.clone(),
            });
            audit.properties.push(PropertyDescriptor {
                name: property.clone(),
                wire: Some(property.clone()),
                declaring_type: type_name.to_string(),
                directive: None,
            });
        }
    }

    debug!(
        type_name,
        properties = audit.properties.len(),
        violations = audit.violations.len(),
        "audited"
    );
    audit
}

fn conflict(type_name: &str, property: &str, reason: impl Into<String>) -> CheckError {
    CheckError::ConflictingAnnotation {
        type_name: type_name.to_string(),
        property: property.to_string(),
        reason: reason.into(),
    }
}

fn inherited_wires(fields: &'static [FieldSpec], out: &mut Vec<&'static str>) {
    for field in fields {
        match field.directive {
            Directive::Serialize { wire } => out.push(wire),
            Directive::Exclude => {}
            Directive::Inherit { fields, .. } => inherited_wires(fields, out),
        }
    }
}

/// Top-level property names of an object schema, including those merged in
/// through `allOf` or a root `$ref`. Sorted for stable reporting.
fn emitted_properties(schema: &Value) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let mut stack = vec![schema];
    let mut followed = HashSet::new();
    while let Some(node) = stack.pop() {
        if let Some(properties) = node.get("properties").and_then(Value::as_object) {
            names.extend(properties.keys().cloned());
        }
        if let Some(parts) = node.get("allOf").and_then(Value::as_array) {
            stack.extend(parts);
        }
        if let Some(reference) = node.get("$ref").and_then(Value::as_str) {
            if followed.insert(reference) {
                stack.extend(schema.pointer(reference.trim_start_matches('#')));
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use dto_core::{ApiObject, ModuleManifest};
    use pretty_assertions::assert_eq;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    use super::*;
    use crate::discovery::discover;
    use crate::error::FailureKind;

    #[derive(Debug, Serialize, Deserialize, JsonSchema)]
    struct Stamp {
        created_at: String,
        #[serde(rename = "etag")]
        version_tag: String,
    }

    impl ApiObject for Stamp {
        const TYPE_NAME: &'static str = "Stamp";
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::json("created_at", "created_at"),
            FieldSpec::json("version_tag", "etag"),
        ];
    }

    #[derive(Debug, Serialize, Deserialize, JsonSchema)]
    struct Invoice {
        #[serde(flatten)]
        stamp: Stamp,
        number: String,
        #[serde(rename = "amountDue")]
        amount_due: i64,
        #[serde(skip)]
        cached_total: i64,
    }

    impl ApiObject for Invoice {
        const TYPE_NAME: &'static str = "Invoice";
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::inherit("stamp", Stamp::TYPE_NAME, Stamp::FIELDS),
            FieldSpec::json("number", "number"),
            FieldSpec::json("amount_due", "amountDue"),
            FieldSpec::exclude("cached_total"),
        ];
    }

    #[derive(Debug, Serialize, Deserialize, JsonSchema)]
    struct Careless {
        id: String,
        memo: String,
        #[serde(skip_serializing)]
        secret: String,
        label: String,
    }

    impl ApiObject for Careless {
        const TYPE_NAME: &'static str = "Careless";
        const FIELDS: &'static [FieldSpec] = &[
            FieldSpec::json("id", "id"),
            FieldSpec::json("secret", "secret"),
            FieldSpec::exclude("label"),
        ];
    }

    fn candidate<T: ApiObject>() -> CandidateType {
        let manifest = ModuleManifest::builder("fixtures", "0.0.0")
            .object::<T>()
            .build()
            .unwrap();
        discover(&manifest).remove(0)
    }

    #[test]
    fn fully_annotated_type_is_clean() {
        let audit = audit(&candidate::<Invoice>());
        assert!(audit.is_clean(), "{:?}", audit.violations);
        let own: Vec<(&str, Option<DirectiveKind>)> = audit
            .properties
            .iter()
            .map(|p| (p.name.as_str(), p.directive))
            .collect();
        assert_eq!(
            own,
            vec![
                ("number", Some(DirectiveKind::Serialize)),
                ("amount_due", Some(DirectiveKind::Serialize)),
                ("cached_total", Some(DirectiveKind::Exclude)),
            ]
        );
    }

    #[test]
    fn inherited_properties_are_not_reported_on_the_descendant() {
        let audit = audit(&candidate::<Invoice>());
        assert!(audit.properties.iter().all(|p| p.declaring_type == "Invoice"));
        assert!(!audit.properties.iter().any(|p| p.name == "created_at"));
    }

    #[test]
    fn every_violation_is_collected() {
        let audit = audit(&candidate::<Careless>());
        let found: Vec<(FailureKind, Option<&str>)> = audit
            .violations
            .iter()
            .map(|v| (v.kind(), v.property()))
            .collect();
        assert_eq!(
            found,
            vec![
                (FailureKind::ConflictingAnnotation, Some("secret")),
                (FailureKind::ConflictingAnnotation, Some("label")),
                (FailureKind::MissingAnnotation, Some("memo")),
            ]
        );
        assert!(audit.violations.iter().all(|v| v.type_name() == Some("Careless")));
    }

    #[test]
    fn missing_annotation_names_type_and_property() {
        let audit = audit(&candidate::<Careless>());
        let message = audit
            .violations
            .iter()
            .find(|v| v.kind() == FailureKind::MissingAnnotation)
            .map(ToString::to_string)
            .unwrap();
        assert_eq!(
            message,
            "Careless.memo: property has neither a serialize nor an exclude directive"
        );
    }

    #[test]
    fn emitted_properties_follow_all_of_and_refs() {
        let schema = json!({
            "$ref": "#/$defs/Outer",
            "$defs": {
                "Outer": {
                    "properties": {"a": {}},
                    "allOf": [{"properties": {"b": {}}}, {"$ref": "#/$defs/Outer"}]
                }
            }
        });
        let names: Vec<String> = emitted_properties(&schema).into_iter().collect();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }
}
