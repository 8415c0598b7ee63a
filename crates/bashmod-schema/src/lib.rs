//! Shared types and registry wire format for bashmod.
//!
//! This crate is consumed by both the core library (aggregation, conflict
//! detection, installation) and the command line front end. It owns the
//! decode-and-validate step that turns a raw registry document into typed
//! [`Module`] records.

/// Exported shell symbols, grouped by kind.
pub mod exports;
/// Registry document decoding and validation.
pub mod registry;
/// Catalog, conflict and installed-state records.
pub mod types;

// Re-exports
pub use exports::{ExportKind, ExportSet};
pub use registry::{ModuleEntry, RegistryDocument, SUPPORTED_REGISTRY_VERSION, SchemaError};
pub use types::{Conflict, InstalledRecord, Module, ModuleFile};
