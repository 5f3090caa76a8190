//! Type descriptors: what a module says about each type it exports.
//!
//! Only marked, concrete, non-generic types carry [`ObjectHooks`]. The hooks
//! are monomorphized function pointers, so the harness can schema, allocate,
//! and encode a type it only knows by descriptor.

use schemars::generate::SchemaSettings;
use serde_json::Value;
use thiserror::Error;

use crate::marker::{ApiObject, FieldSpec};

/// Whether a type can be instantiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Concrete,
    /// A trait or other interface-like type with no instances of its own.
    Abstract,
}

/// Failure inside a typed encode/decode hook.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The JSON could not be deserialized into the concrete type.
    #[error("cannot instantiate from JSON: {0}")]
    Instantiate(#[source] serde_json::Error),

    /// The concrete instance could not be serialized.
    #[error("cannot encode instance: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Monomorphized entry points for one [`ApiObject`] type.
#[derive(Debug, Clone, Copy)]
pub struct ObjectHooks {
    /// JSON Schema of what the type accepts (schemars, draft 2020-12).
    pub schema: fn() -> Result<Value, serde_json::Error>,

    /// JSON Schema of what the type emits. Differs from `schema` for
    /// `skip_serializing` fields and one-way renames.
    pub wire_schema: fn() -> Result<Value, serde_json::Error>,

    /// Deserialize a value into the type, then serialize the instance.
    pub encode: fn(Value) -> Result<Value, CodecError>,

    /// Parse text into the type, then serialize the instance.
    pub decode: fn(&str) -> Result<Value, CodecError>,

    /// The type's directive table.
    pub fields: &'static [FieldSpec],
}

impl ObjectHooks {
    /// Hooks for `T`.
    #[must_use]
    pub fn of<T: ApiObject>() -> Self {
        Self {
            schema: schema_of::<T>,
            wire_schema: wire_schema_of::<T>,
            encode: encode_value::<T>,
            decode: decode_text::<T>,
            fields: T::FIELDS,
        }
    }
}

fn schema_of<T: ApiObject>() -> Result<Value, serde_json::Error> {
    serde_json::to_value(schemars::schema_for!(T))
}

fn wire_schema_of<T: ApiObject>() -> Result<Value, serde_json::Error> {
    let generator = SchemaSettings::default().for_serialize().into_generator();
    serde_json::to_value(generator.into_root_schema_for::<T>())
}

fn encode_value<T: ApiObject>(value: Value) -> Result<Value, CodecError> {
    let instance: T = serde_json::from_value(value).map_err(CodecError::Instantiate)?;
    serde_json::to_value(&instance).map_err(CodecError::Encode)
}

fn decode_text<T: ApiObject>(text: &str) -> Result<Value, CodecError> {
    let instance: T = serde_json::from_str(text).map_err(CodecError::Instantiate)?;
    serde_json::to_value(&instance).map_err(CodecError::Encode)
}

/// One exported type of a module.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: &'static str,
    kind: TypeKind,
    generic_params: usize,
    marked: bool,
    hooks: Option<ObjectHooks>,
}

impl TypeDescriptor {
    /// A marked, concrete, fully-resolved type.
    #[must_use]
    pub fn object<T: ApiObject>() -> Self {
        Self {
            name: T::TYPE_NAME,
            kind: TypeKind::Concrete,
            generic_params: 0,
            marked: true,
            hooks: Some(ObjectHooks::of::<T>()),
        }
    }

    /// A concrete type without the serializable-object marker.
    #[must_use]
    pub const fn plain(name: &'static str) -> Self {
        Self {
            name,
            kind: TypeKind::Concrete,
            generic_params: 0,
            marked: false,
            hooks: None,
        }
    }

    /// A marked abstract type (a trait the concrete objects implement).
    #[must_use]
    pub const fn abstract_object(name: &'static str) -> Self {
        Self {
            name,
            kind: TypeKind::Abstract,
            generic_params: 0,
            marked: true,
            hooks: None,
        }
    }

    /// A marked type with `arity` unresolved type parameters, e.g. `Page<T>`.
    #[must_use]
    pub const fn generic_object(name: &'static str, arity: usize) -> Self {
        Self {
            name,
            kind: TypeKind::Concrete,
            generic_params: arity,
            marked: true,
            hooks: None,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        matches!(self.kind, TypeKind::Abstract)
    }

    #[must_use]
    pub const fn generic_params(&self) -> usize {
        self.generic_params
    }

    #[must_use]
    pub const fn is_marked(&self) -> bool {
        self.marked
    }

    /// Encode/decode entry points. `None` unless the type is a marked object.
    #[must_use]
    pub const fn hooks(&self) -> Option<&ObjectHooks> {
        self.hooks.as_ref()
    }
}
