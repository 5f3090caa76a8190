//! Type discovery and module resolution.
//!
//! A module is found by name among the host's declared dependencies, loaded
//! once, and scanned for candidate types: marked, concrete, and free of
//! unresolved generic parameters.

use std::collections::HashMap;
use std::sync::Arc;

use dto_core::{FieldSpec, ManifestError, ModuleManifest, ObjectHooks};
use tracing::{debug, info};

use crate::error::CheckError;

/// Produces a module's manifest.
pub type ModuleLoader = fn() -> Result<ModuleManifest, ManifestError>;

/// A type selected for round-trip and audit checks.
#[derive(Debug, Clone)]
pub struct CandidateType {
    name: &'static str,
    hooks: ObjectHooks,
}

impl CandidateType {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn hooks(&self) -> &ObjectHooks {
        &self.hooks
    }

    /// The type's directive table.
    #[must_use]
    pub const fn fields(&self) -> &'static [FieldSpec] {
        self.hooks.fields
    }
}

/// Select the candidate types exported by `manifest`.
///
/// Abstract types, open generics, and unmarked types are skipped.
#[must_use]
pub fn discover(manifest: &ModuleManifest) -> Vec<CandidateType> {
    let candidates: Vec<CandidateType> = manifest
        .types()
        .iter()
        .filter(|t| t.is_marked() && !t.is_abstract() && t.generic_params() == 0)
        .filter_map(|t| {
            t.hooks().map(|hooks| CandidateType {
                name: t.name(),
                hooks: *hooks,
            })
        })
        .collect();

    debug!(
        module = manifest.name(),
        exported = manifest.types().len(),
        candidates = candidates.len(),
        "discovered candidate types"
    );
    candidates
}

struct DeclaredModule {
    name: &'static str,
    loader: ModuleLoader,
}

/// The modules a host process declares it depends on.
///
/// Names compare with `-` and `_` treated as equal, so `dto-model` and
/// `dto_model` refer to the same dependency.
#[derive(Default)]
pub struct Dependencies {
    declared: Vec<DeclaredModule>,
    loaded: HashMap<String, Arc<ModuleManifest>>,
}

impl Dependencies {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a dependency and the function that loads its manifest.
    #[must_use]
    pub fn declare(mut self, name: &'static str, loader: ModuleLoader) -> Self {
        self.declared.push(DeclaredModule { name, loader });
        self
    }

    /// Declared dependency names, in declaration order.
    #[must_use]
    pub fn declared_names(&self) -> Vec<&'static str> {
        self.declared.iter().map(|d| d.name).collect()
    }

    /// Resolve and load the module called `name`.
    ///
    /// Repeated calls return the same manifest without reloading.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::ModuleNotFound`] if no declared dependency has
    /// that name, or [`CheckError::ModuleLoad`] if its manifest is invalid.
    pub fn load(&mut self, name: &str) -> Result<Arc<ModuleManifest>, CheckError> {
        let key = normalize(name);
        if let Some(manifest) = self.loaded.get(&key) {
            return Ok(Arc::clone(manifest));
        }

        let declared = self
            .declared
            .iter()
            .find(|d| normalize(d.name) == key)
            .ok_or_else(|| CheckError::ModuleNotFound {
                name: name.to_string(),
                declared: self.declared.iter().map(|d| d.name.to_string()).collect(),
            })?;

        let manifest = (declared.loader)().map_err(|source| CheckError::ModuleLoad {
            name: declared.name.to_string(),
            source,
        })?;

        info!(
            module = manifest.name(),
            version = manifest.version(),
            types = manifest.types().len(),
            "loaded module"
        );
        let manifest = Arc::new(manifest);
        self.loaded.insert(key, Arc::clone(&manifest));
        Ok(manifest)
    }

    /// Load the module called `name` and discover its candidate types.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Self::load`].
    pub fn discover(&mut self, name: &str) -> Result<Vec<CandidateType>, CheckError> {
        let manifest = self.load(name)?;
        Ok(discover(&manifest))
    }
}

fn normalize(name: &str) -> String {
    name.trim().replace('-', "_")
}
