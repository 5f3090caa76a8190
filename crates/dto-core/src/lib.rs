//! # dto-core
//!
//! Serialization markers, field directives, and module manifests for API
//! entity models.
//!
//! This crate is the vocabulary an entity model uses to describe itself to the
//! round-trip harness in `dto-check`:
//! - [`ApiObject`]: the type-level "serializable object" marker
//! - [`FieldSpec`] / [`Directive`]: per-field serialize / exclude / inherit directives
//! - [`TypeDescriptor`]: one exported type, marked or not, concrete or not
//! - [`ModuleManifest`]: the list of exported types a module publishes
//!
//! Entity models depend on this crate the same way they depend on serde: to
//! declare how they are encoded. They never depend on the harness itself.

pub mod descriptor;
pub mod errors;
pub mod manifest;
pub mod marker;

pub use descriptor::{CodecError, ObjectHooks, TypeDescriptor, TypeKind};
pub use errors::ManifestError;
pub use manifest::{ManifestBuilder, ModuleManifest};
pub use marker::{ApiObject, Directive, FieldSpec};
