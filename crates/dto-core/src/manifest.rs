//! Module manifests: the exported-type listing of an entity model crate.
//!
//! A manifest is the Rust stand-in for enumerating a loaded module's types.
//! Entity models expose a `manifest()` function built with [`ManifestBuilder`];
//! the harness resolves that function by module name and discovers candidate
//! types from the result.

use std::collections::HashSet;

use crate::descriptor::TypeDescriptor;
use crate::errors::ManifestError;
use crate::marker::ApiObject;

/// Every type a module exports, marked or not.
#[derive(Debug, Clone)]
pub struct ModuleManifest {
    name: String,
    version: String,
    types: Vec<TypeDescriptor>,
}

impl ModuleManifest {
    /// Start a manifest for module `name` at `version`.
    #[must_use]
    pub fn builder(name: impl Into<String>, version: impl Into<String>) -> ManifestBuilder {
        ManifestBuilder {
            name: name.into(),
            version: version.into(),
            types: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Exported types in registration order.
    #[must_use]
    pub fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    /// Look up an exported type by name.
    #[must_use]
    pub fn find(&self, type_name: &str) -> Option<&TypeDescriptor> {
        self.types.iter().find(|t| t.name() == type_name)
    }
}

/// Builder for [`ModuleManifest`]; validation happens in [`Self::build`].
#[derive(Debug)]
pub struct ManifestBuilder {
    name: String,
    version: String,
    types: Vec<TypeDescriptor>,
}

impl ManifestBuilder {
    /// Register a marked object type.
    #[must_use]
    pub fn object<T: ApiObject>(self) -> Self {
        self.with(TypeDescriptor::object::<T>())
    }

    /// Register a type that is not a serializable object.
    #[must_use]
    pub fn plain(self, name: &'static str) -> Self {
        self.with(TypeDescriptor::plain(name))
    }

    /// Register a marked abstract type.
    #[must_use]
    pub fn abstract_object(self, name: &'static str) -> Self {
        self.with(TypeDescriptor::abstract_object(name))
    }

    /// Register a marked generic type with unresolved parameters.
    #[must_use]
    pub fn generic_object(self, name: &'static str, arity: usize) -> Self {
        self.with(TypeDescriptor::generic_object(name, arity))
    }

    /// Register an arbitrary descriptor.
    #[must_use]
    pub fn with(mut self, descriptor: TypeDescriptor) -> Self {
        self.types.push(descriptor);
        self
    }

    /// Validate and finish the manifest.
    ///
    /// # Errors
    ///
    /// Returns a [`ManifestError`] if the module name or a type name is empty,
    /// a type name is registered twice, an object lists a field twice, or a
    /// generic type has no parameters.
    pub fn build(self) -> Result<ModuleManifest, ManifestError> {
        if self.name.trim().is_empty() {
            return Err(ManifestError::EmptyModuleName);
        }

        let mut seen = HashSet::new();
        for descriptor in &self.types {
            let type_name = descriptor.name();
            if type_name.trim().is_empty() {
                return Err(ManifestError::EmptyTypeName {
                    module: self.name,
                });
            }
            if !seen.insert(type_name) {
                return Err(ManifestError::DuplicateType {
                    module: self.name,
                    type_name: type_name.to_string(),
                });
            }
            if descriptor.generic_params() == 0
                && descriptor.is_marked()
                && descriptor.hooks().is_none()
                && !descriptor.is_abstract()
            {
                // Only `generic_object` produces a marked concrete descriptor without hooks.
                return Err(ManifestError::InvalidArity {
                    module: self.name,
                    type_name: type_name.to_string(),
                });
            }
            if let Some(hooks) = descriptor.hooks() {
                let mut fields = HashSet::new();
                if let Some(field) = hooks.fields.iter().find(|f| !fields.insert(f.name)) {
                    return Err(ManifestError::DuplicateField {
                        module: self.name,
                        type_name: type_name.to_string(),
                        field: field.name.to_string(),
                    });
                }
            }
        }

        Ok(ModuleManifest {
            name: self.name,
            version: self.version,
            types: self.types,
        })
    }
}
