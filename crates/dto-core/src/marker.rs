//! Type-level marker and field-level directives.
//!
//! A type opts into the harness by implementing [`ApiObject`]. Its `FIELDS`
//! side-table lists every public field together with the directive that
//! controls how the field is encoded. The table must agree with the serde
//! attributes on the struct; `dto-check`'s auditor enforces that.

use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// How a single field participates in the wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Serialized under the given wire name.
    Serialize { wire: &'static str },

    /// Never serialized (`#[serde(skip)]`).
    Exclude,

    /// A `#[serde(flatten)]`-ed base struct. Its properties are declared on
    /// `base` and audited there, not on the embedding type.
    Inherit {
        base: &'static str,
        fields: &'static [FieldSpec],
    },
}

/// One entry in an [`ApiObject::FIELDS`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Rust field name.
    pub name: &'static str,
    pub directive: Directive,
}

impl FieldSpec {
    /// Field serialized under `wire`.
    #[must_use]
    pub const fn json(name: &'static str, wire: &'static str) -> Self {
        Self {
            name,
            directive: Directive::Serialize { wire },
        }
    }

    /// Field excluded from serialization.
    #[must_use]
    pub const fn exclude(name: &'static str) -> Self {
        Self {
            name,
            directive: Directive::Exclude,
        }
    }

    /// Flattened base struct whose own table is `fields`.
    #[must_use]
    pub const fn inherit(
        name: &'static str,
        base: &'static str,
        fields: &'static [FieldSpec],
    ) -> Self {
        Self {
            name,
            directive: Directive::Inherit { base, fields },
        }
    }

    /// The wire name this field is emitted under, if it is emitted directly.
    #[must_use]
    pub const fn wire_name(&self) -> Option<&'static str> {
        match self.directive {
            Directive::Serialize { wire } => Some(wire),
            Directive::Exclude | Directive::Inherit { .. } => None,
        }
    }
}

/// Marker for types that participate in the API's JSON encoding.
///
/// The supertraits give the harness everything it needs: `JsonSchema` to
/// describe the shape, `DeserializeOwned` to allocate an instance from a
/// fabricated value, and `Serialize` to encode it again.
pub trait ApiObject: Serialize + DeserializeOwned + JsonSchema {
    /// Name reported in failures and used for discovery.
    const TYPE_NAME: &'static str;

    /// Every public field with its directive.
    const FIELDS: &'static [FieldSpec];
}
