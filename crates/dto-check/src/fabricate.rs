//! Instance fabrication from a JSON Schema.
//!
//! [`Fabricator`] walks a type's schema and synthesizes a `serde_json::Value`
//! in which every property holds a non-default value: nonzero numbers,
//! non-empty strings, `true`, the second enum member, populated collections,
//! and recursively fabricated nested objects. The concrete type is then
//! allocated by deserializing that value (see `verify`).
//!
//! Recursive type graphs are bounded two ways: a stack of `$ref`s currently
//! being expanded (cycle detection) and a cap on object nesting. Either limit
//! raises a truncation error that the nearest nullable, collection, or map
//! boundary absorbs by emitting `null`, `[]`, or `{}`.

use dto_config::FabricationConfig;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::FabricationError;
use crate::shape::{MapValues, Shape};

/// Schema for map values when `additionalProperties` is absent or `true`.
static ANY_VALUE: Value = Value::Bool(true);

/// Limits and switches for one fabrication run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FabricationOptions {
    pub max_depth: usize,
    pub collection_len: usize,
    pub validate_schema: bool,
}

impl Default for FabricationOptions {
    fn default() -> Self {
        Self::from(&FabricationConfig::default())
    }
}

impl From<&FabricationConfig> for FabricationOptions {
    fn from(config: &FabricationConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            collection_len: config.collection_len,
            validate_schema: config.validate_schema,
        }
    }
}

/// Synthesizes a fully-populated value for one root schema.
pub struct Fabricator<'s> {
    root: &'s Value,
    options: FabricationOptions,
    leave_null: Option<String>,
    left_null: bool,
    seed: u32,
    visiting: Vec<String>,
    path: Vec<String>,
}

impl<'s> Fabricator<'s> {
    #[must_use]
    pub const fn new(root: &'s Value, options: FabricationOptions) -> Self {
        Self {
            root,
            options,
            leave_null: None,
            left_null: false,
            seed: 0,
            visiting: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Leave top-level `property` null instead of populating it.
    #[must_use]
    pub fn leave_null(mut self, property: impl Into<String>) -> Self {
        self.leave_null = Some(property.into());
        self
    }

    /// Fabricate the root value.
    ///
    /// # Errors
    ///
    /// Returns a [`FabricationError`] when a cycle or the depth cap is hit
    /// with no boundary to absorb it, a `$ref` does not resolve, a node has
    /// an unsupported shape, the [`Self::leave_null`] property does not
    /// exist, or (with validation on) the result violates the schema.
    pub fn fabricate(mut self) -> Result<Value, FabricationError> {
        let root = self.root;
        self.visiting.push("#".to_string());
        let value = self.value(root, 0, "value")?;
        if let Some(property) = self.leave_null.take() {
            if !self.left_null {
                return Err(FabricationError::UnknownProperty { property });
            }
        }
        if self.options.validate_schema {
            validate(root, &value)?;
        }
        Ok(value)
    }

    fn value(&mut self, node: &'s Value, depth: usize, hint: &str) -> Result<Value, FabricationError> {
        let shape = Shape::classify(node).map_err(|detail| FabricationError::UnsupportedShape {
            path: self.path_string(),
            detail,
        })?;
        self.synthesize(shape, depth, hint)
    }

    fn synthesize(&mut self, shape: Shape<'s>, depth: usize, hint: &str) -> Result<Value, FabricationError> {
        match shape {
            Shape::Any => Ok(json!({ "sample": self.next_seed() })),
            Shape::Null => Ok(Value::Null),
            Shape::Const(value) => Ok(value.clone()),
            Shape::Reference(reference) => self.reference(reference, depth, hint),
            Shape::Boolean => Ok(Value::Bool(true)),
            Shape::Integer { minimum, maximum } => Ok(json!(self.integer(minimum, maximum))),
            Shape::Number => Ok(json!(f64::from(self.next_seed()) + 0.5)),
            Shape::Text { format, min_length } => {
                Ok(Value::String(self.text(format, min_length, hint)))
            }
            Shape::Enum(members) => Ok((*pick(&members)).clone()),
            Shape::Collection { items, unique } => self.collection(items, unique, depth, hint),
            Shape::Tuple(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    out.push(self.element(item, depth, hint, format!("[{index}]"))?);
                }
                Ok(Value::Array(out))
            }
            Shape::Map(values) => self.map(values, depth, hint),
            Shape::Object(properties) => self.object(properties, depth),
            Shape::Choice(branches) => self.value(*pick(&branches), depth, hint),
            Shape::AllOf(parts) => self.all_of(parts, depth, hint),
            Shape::Nullable(inner) => match self.synthesize(*inner, depth, hint) {
                Err(err) if err.is_truncation() => {
                    debug!(path = %self.path_string(), %err, "truncated to null");
                    Ok(Value::Null)
                }
                other => other,
            },
        }
    }

    fn reference(&mut self, reference: &'s str, depth: usize, hint: &str) -> Result<Value, FabricationError> {
        if self.visiting.iter().any(|r| r == reference) {
            return Err(FabricationError::Cycle {
                reference: reference.to_string(),
                path: self.path_string(),
            });
        }
        let target = resolve(self.root, reference).ok_or_else(|| FabricationError::UnresolvedRef {
            reference: reference.to_string(),
            path: self.path_string(),
        })?;
        self.visiting.push(reference.to_string());
        let result = self.value(target, depth, hint);
        self.visiting.pop();
        result
    }

    fn object(&mut self, properties: &'s Map<String, Value>, depth: usize) -> Result<Value, FabricationError> {
        if depth >= self.options.max_depth {
            return Err(FabricationError::DepthExceeded {
                max_depth: self.options.max_depth,
                path: self.path_string(),
            });
        }
        let mut out = Map::new();
        for (name, schema) in properties {
            if depth == 0 && self.leave_null.as_deref() == Some(name.as_str()) {
                out.insert(name.clone(), Value::Null);
                self.left_null = true;
                continue;
            }
            self.path.push(format!(".{name}"));
            let result = self.value(schema, depth + 1, name);
            self.path.pop();
            out.insert(name.clone(), result?);
        }
        Ok(Value::Object(out))
    }

    fn collection(
        &mut self,
        items: Option<&'s Value>,
        unique: bool,
        depth: usize,
        hint: &str,
    ) -> Result<Value, FabricationError> {
        let mut out: Vec<Value> = Vec::with_capacity(self.options.collection_len);
        for index in 0..self.options.collection_len {
            let element = match items {
                Some(items) => self.element(items, depth, hint, format!("[{index}]")),
                None => Ok(json!(self.next_seed())),
            };
            match element {
                Ok(value) if unique && out.contains(&value) => {}
                Ok(value) => out.push(value),
                Err(err) if err.is_truncation() => {
                    debug!(path = %self.path_string(), %err, "truncated to empty collection");
                    return Ok(Value::Array(Vec::new()));
                }
                Err(err) => return Err(err),
            }
        }
        Ok(Value::Array(out))
    }

    fn map(&mut self, values: MapValues<'s>, depth: usize, hint: &str) -> Result<Value, FabricationError> {
        let schema = match values {
            MapValues::Closed => return Ok(Value::Object(Map::new())),
            MapValues::Any => &ANY_VALUE,
            MapValues::Schema(schema) => schema,
        };
        let mut out = Map::new();
        for _ in 0..self.options.collection_len {
            let key = format!("key-{}", self.next_seed());
            match self.element(schema, depth, hint, format!("[{key:?}]")) {
                Ok(value) => {
                    out.insert(key, value);
                }
                Err(err) if err.is_truncation() => {
                    debug!(path = %self.path_string(), %err, "truncated to empty map");
                    return Ok(Value::Object(Map::new()));
                }
                Err(err) => return Err(err),
            }
        }
        Ok(Value::Object(out))
    }

    fn all_of(&mut self, parts: &'s [Value], depth: usize, hint: &str) -> Result<Value, FabricationError> {
        let mut merged: Option<Value> = None;
        for part in parts {
            let value = self.value(part, depth, hint)?;
            merged = Some(match (merged, value) {
                (Some(Value::Object(mut acc)), Value::Object(more)) => {
                    acc.extend(more);
                    Value::Object(acc)
                }
                (Some(acc), _) => acc,
                (None, value) => value,
            });
        }
        merged.ok_or_else(|| FabricationError::UnsupportedShape {
            path: self.path_string(),
            detail: "`allOf` has no parts".to_string(),
        })
    }

    fn element(
        &mut self,
        node: &'s Value,
        depth: usize,
        hint: &str,
        accessor: String,
    ) -> Result<Value, FabricationError> {
        self.path.push(accessor);
        let result = self.value(node, depth, hint);
        self.path.pop();
        result
    }

    fn integer(&mut self, minimum: Option<i64>, maximum: Option<i64>) -> i64 {
        let mut n = i64::from(self.next_seed());
        if let Some(max) = maximum {
            n = n.min(max);
        }
        if let Some(min) = minimum {
            n = n.max(min);
        }
        if n == 0 {
            // Only reachable when the range is pinned around zero.
            n = if maximum.is_some_and(|max| max < 1) { -1 } else { 1 };
        }
        n
    }

    fn text(&mut self, format: Option<&str>, min_length: usize, hint: &str) -> String {
        let seed = self.next_seed();
        let mut text = match format {
            Some("date-time") => format!(
                "2026-03-{:02}T{:02}:{:02}:{:02}Z",
                1 + seed % 28,
                seed % 24,
                seed % 60,
                seed.wrapping_mul(7) % 60
            ),
            Some("date") => format!("2026-03-{:02}", 1 + seed % 28),
            Some("time") => format!("{:02}:{:02}:{:02}", seed % 24, seed % 60, seed.wrapping_mul(7) % 60),
            Some("uuid") => format!("00000000-0000-4000-8000-{seed:012x}"),
            Some("email") => format!("user{seed}@example.com"),
            Some("uri" | "uri-reference") => format!("https://api.example.com/{hint}/{seed}"),
            Some("ipv4") => format!("10.0.{}.{}", (seed / 256) % 256, seed % 256),
            _ => format!("{hint}-{seed}"),
        };
        while text.len() < min_length {
            text.push('x');
        }
        text
    }

    fn next_seed(&mut self) -> u32 {
        self.seed = self.seed.wrapping_add(1);
        self.seed
    }

    fn path_string(&self) -> String {
        format!("${}", self.path.concat())
    }
}

/// Member at index 1 when there is one, so enums never fall on their
/// (usually default) first member.
fn pick<'a, T>(members: &'a [T]) -> &'a T {
    members.get(1).unwrap_or(&members[0])
}

fn resolve<'s>(root: &'s Value, reference: &str) -> Option<&'s Value> {
    reference.strip_prefix('#').and_then(|pointer| root.pointer(pointer))
}

fn validate(schema: &Value, value: &Value) -> Result<(), FabricationError> {
    let validator = jsonschema::validator_for(schema).map_err(|e| FabricationError::SchemaViolation {
        errors: vec![format!("schema does not compile: {e}")],
    })?;
    let errors: Vec<String> = validator.iter_errors(value).map(|e| format!("{e}")).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(FabricationError::SchemaViolation { errors })
    }
}
