//! # dto-check
//!
//! Serialization round-trip and annotation audit for API entity models.
//!
//! This crate provides:
//! - Type discovery: resolve a declared module and select its candidate types
//! - Instance fabrication: synthesize a non-default value from a type's JSON Schema
//! - Round-trip verification: encode, decode, re-encode, compare canonical forms
//! - Attribute audit: every property carries exactly one serialize/exclude directive
//! - Reports: per-run outcomes under a fail-fast or collect-all policy
//!
//! ## Architecture
//!
//! Entity models implement `dto_core::ApiObject` and publish a
//! `dto_core::ModuleManifest`. This crate never sees the concrete types; it
//! works through the function pointers in each descriptor's `ObjectHooks`.

pub mod audit;
pub mod canonical;
pub mod discovery;
pub mod error;
pub mod fabricate;
pub mod report;
pub mod shape;
pub mod suite;
pub mod verify;

pub use audit::{Audit, DirectiveKind, PropertyDescriptor, audit};
pub use canonical::CanonicalFormat;
pub use discovery::{CandidateType, Dependencies, ModuleLoader, discover};
pub use error::{CheckError, FabricationError, FailureKind, MismatchStage};
pub use fabricate::{FabricationOptions, Fabricator};
pub use report::{CheckFailure, CheckKind, CheckReport};
pub use suite::Suite;
pub use verify::{Encoded, RoundTrip, Verifier, VerifyOptions};
