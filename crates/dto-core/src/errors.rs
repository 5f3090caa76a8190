//! Manifest validation errors.

use thiserror::Error;

/// Errors raised while building a [`crate::ModuleManifest`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    /// The module itself has no name.
    #[error("module name is empty")]
    EmptyModuleName,

    /// A type descriptor has no name.
    #[error("module '{module}' exports a type with an empty name")]
    EmptyTypeName { module: String },

    /// Two descriptors share a name, so failures could not be attributed.
    #[error("module '{module}' exports '{type_name}' more than once")]
    DuplicateType { module: String, type_name: String },

    /// An object lists the same field twice in its `FIELDS` table.
    #[error("'{module}::{type_name}' lists field '{field}' more than once")]
    DuplicateField {
        module: String,
        type_name: String,
        field: String,
    },

    /// A generic descriptor was registered without any type parameters.
    #[error("module '{module}' declares generic type '{type_name}' with zero parameters")]
    InvalidArity { module: String, type_name: String },
}
