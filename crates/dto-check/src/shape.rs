//! Classification of JSON Schema nodes into fabrication shapes.
//!
//! The fabricator dispatches on a closed set of shapes, one synthesis rule
//! per shape. This module turns the open-ended schemars output into that set.
//! It understands the constructs schemars emits for serde-derived types:
//! `$ref`, `type` (single or with `"null"`), `enum`, `const`, `oneOf`,
//! `anyOf`, `allOf`, `properties`, `additionalProperties`, `items`, and
//! `prefixItems`.

use serde_json::{Map, Value};

/// Values admitted by an object without declared properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapValues<'s> {
    Any,
    Schema(&'s Value),
    /// `additionalProperties: false` and no properties: only `{}`.
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape<'s> {
    /// `true` or an empty schema.
    Any,
    Null,
    Const(&'s Value),
    Reference(&'s str),
    Boolean,
    Integer {
        minimum: Option<i64>,
        maximum: Option<i64>,
    },
    Number,
    Text {
        format: Option<&'s str>,
        min_length: usize,
    },
    /// Non-null enum members in declaration order.
    Enum(Vec<&'s Value>),
    Collection {
        items: Option<&'s Value>,
        unique: bool,
    },
    Tuple(&'s [Value]),
    Map(MapValues<'s>),
    Object(&'s Map<String, Value>),
    /// Non-null `oneOf` / `anyOf` branches in declaration order.
    Choice(Vec<&'s Value>),
    AllOf(&'s [Value]),
    Nullable(Box<Shape<'s>>),
}

impl<'s> Shape<'s> {
    /// Classify a schema node.
    ///
    /// # Errors
    ///
    /// Returns a human-readable detail when the node cannot produce a value
    /// (the `false` schema, an empty `enum`, an unknown `type`).
    pub fn classify(node: &'s Value) -> Result<Self, String> {
        let schema = match node {
            Value::Bool(true) => return Ok(Self::Any),
            Value::Bool(false) => return Err("schema `false` admits no value".to_string()),
            Value::Object(schema) => schema,
            other => return Err(format!("schema node is not an object: {other}")),
        };

        if let Some(reference) = schema.get("$ref").and_then(Value::as_str) {
            return Ok(Self::Reference(reference));
        }
        if let Some(constant) = schema.get("const") {
            return Ok(if constant.is_null() {
                Self::Null
            } else {
                Self::Const(constant)
            });
        }
        if let Some(members) = schema.get("enum").and_then(Value::as_array) {
            return Self::enumeration(members);
        }
        if let Some(branches) = schema
            .get("oneOf")
            .or_else(|| schema.get("anyOf"))
            .and_then(Value::as_array)
        {
            return Self::choice(branches);
        }
        if let Some(parts) = schema.get("allOf").and_then(Value::as_array) {
            return Ok(Self::AllOf(parts));
        }

        match schema.get("type") {
            Some(Value::String(ty)) => Self::typed(ty, schema),
            Some(Value::Array(types)) => {
                let mut nullable = false;
                let mut concrete = None;
                for ty in types.iter().filter_map(Value::as_str) {
                    if ty == "null" {
                        nullable = true;
                    } else if concrete.is_none() {
                        concrete = Some(ty);
                    }
                }
                match concrete {
                    None => Ok(Self::Null),
                    Some(ty) => {
                        let inner = Self::typed(ty, schema)?;
                        Ok(if nullable { inner.nullable() } else { inner })
                    }
                }
            }
            Some(other) => Err(format!("unrecognized `type` value {other}")),
            None if schema.contains_key("properties") => Self::typed("object", schema),
            None => Ok(Self::Any),
        }
    }

    fn nullable(self) -> Self {
        match self {
            Self::Nullable(_) | Self::Null => self,
            other => Self::Nullable(Box::new(other)),
        }
    }

    fn enumeration(members: &'s [Value]) -> Result<Self, String> {
        let nullable = members.iter().any(Value::is_null);
        let values: Vec<&Value> = members.iter().filter(|v| !v.is_null()).collect();
        if values.is_empty() {
            return if nullable {
                Ok(Self::Null)
            } else {
                Err("`enum` has no members".to_string())
            };
        }
        let shape = Self::Enum(values);
        Ok(if nullable { shape.nullable() } else { shape })
    }

    fn choice(branches: &'s [Value]) -> Result<Self, String> {
        let nullable = branches.iter().any(is_null_schema);
        let values: Vec<&Value> = branches.iter().filter(|b| !is_null_schema(b)).collect();
        if values.is_empty() {
            return if nullable {
                Ok(Self::Null)
            } else {
                Err("`oneOf`/`anyOf` has no branches".to_string())
            };
        }
        let shape = Self::Choice(values);
        Ok(if nullable { shape.nullable() } else { shape })
    }

    fn typed(ty: &str, schema: &'s Map<String, Value>) -> Result<Self, String> {
        let shape = match ty {
            "null" => Self::Null,
            "boolean" => Self::Boolean,
            "integer" => Self::Integer {
                minimum: schema.get("minimum").and_then(as_bound),
                maximum: schema.get("maximum").and_then(as_bound),
            },
            "number" => Self::Number,
            "string" => Self::Text {
                format: schema.get("format").and_then(Value::as_str),
                min_length: schema
                    .get("minLength")
                    .and_then(Value::as_u64)
                    .and_then(|n| usize::try_from(n).ok())
                    .unwrap_or(0),
            },
            "array" => match schema.get("prefixItems").and_then(Value::as_array) {
                Some(items) => Self::Tuple(items),
                None => Self::Collection {
                    items: schema.get("items"),
                    unique: schema
                        .get("uniqueItems")
                        .and_then(Value::as_bool)
                        .unwrap_or(false),
                },
            },
            "object" => match schema.get("properties").and_then(Value::as_object) {
                Some(properties) => Self::Object(properties),
                None => Self::Map(match schema.get("additionalProperties") {
                    None | Some(Value::Bool(true)) => MapValues::Any,
                    Some(Value::Bool(false)) => MapValues::Closed,
                    Some(values) => MapValues::Schema(values),
                }),
            },
            other => return Err(format!("unsupported type `{other}`")),
        };
        Ok(shape)
    }
}

fn is_null_schema(node: &Value) -> bool {
    node.get("type").and_then(Value::as_str) == Some("null")
        || node.get("const").is_some_and(Value::is_null)
}

fn as_bound(value: &Value) -> Option<i64> {
    // `u64::MAX`-style bounds do not fit; the seeds used are far below them.
    value
        .as_i64()
        .or_else(|| value.as_u64().map(|_| i64::MAX))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn nullable_type_array() {
        let node = json!({"type": ["string", "null"], "format": "date-time"});
        assert_eq!(
            Shape::classify(&node).unwrap(),
            Shape::Nullable(Box::new(Shape::Text {
                format: Some("date-time"),
                min_length: 0
            }))
        );
    }

    #[test]
    fn nullable_ref_via_any_of() {
        let node = json!({"anyOf": [{"$ref": "#/$defs/Address"}, {"type": "null"}]});
        let shape = Shape::classify(&node).unwrap();
        let Shape::Nullable(inner) = shape else {
            panic!("expected nullable");
        };
        let Shape::Choice(branches) = *inner else {
            panic!("expected choice");
        };
        assert_eq!(branches.len(), 1);
        assert_eq!(
            Shape::classify(branches[0]).unwrap(),
            Shape::Reference("#/$defs/Address")
        );
    }

    #[test]
    fn unsigned_integer_bounds() {
        let node = json!({"type": "integer", "format": "uint8", "minimum": 0, "maximum": 255});
        assert_eq!(
            Shape::classify(&node).unwrap(),
            Shape::Integer {
                minimum: Some(0),
                maximum: Some(255)
            }
        );
    }

    #[test]
    fn string_enum() {
        let node = json!({"type": "string", "enum": ["pending", "paid", "shipped"]});
        let Shape::Enum(values) = Shape::classify(&node).unwrap() else {
            panic!("expected enum");
        };
        assert_eq!(values, vec![&json!("pending"), &json!("paid"), &json!("shipped")]);
    }

    #[test]
    fn map_and_set_shapes() {
        let map = json!({"type": "object", "additionalProperties": {"type": "string"}});
        assert!(matches!(
            Shape::classify(&map).unwrap(),
            Shape::Map(MapValues::Schema(_))
        ));

        let set = json!({"type": "array", "items": {"type": "string"}, "uniqueItems": true});
        assert!(matches!(
            Shape::classify(&set).unwrap(),
            Shape::Collection { unique: true, .. }
        ));
    }

    #[test]
    fn true_schema_is_any() {
        assert_eq!(Shape::classify(&json!(true)).unwrap(), Shape::Any);
        assert_eq!(Shape::classify(&json!({})).unwrap(), Shape::Any);
    }

    #[test]
    fn unfabricable_nodes_are_errors() {
        assert!(Shape::classify(&json!(false)).is_err());
        assert!(Shape::classify(&json!({"enum": []})).is_err());
        assert!(Shape::classify(&json!({"type": "blob"})).is_err());
    }
}
