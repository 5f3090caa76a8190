//! Behaviour shared by every stored resource.

use chrono::{DateTime, Utc};

use crate::common::ResourceMeta;

/// A stored, addressable API resource.
///
/// Registered in the manifest as an abstract object: it is part of the
/// model's surface but has no instances of its own.
pub trait Resource {
    /// Object type tag, as used in URLs and webhook payloads.
    const OBJECT: &'static str;

    fn meta(&self) -> &ResourceMeta;

    fn id(&self) -> &str {
        &self.meta().id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.meta().created_at
    }

    /// `/v1/{object}s/{id}`
    fn path(&self) -> String {
        format!("/v1/{}s/{}", Self::OBJECT, self.id())
    }
}
