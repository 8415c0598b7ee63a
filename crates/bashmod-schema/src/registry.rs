//! Registry document decoding.
//!
//! A registry is a JSON document of the form
//! `{"version": "1.0", "modules": [ ... ]}`. Decoding is strict: an unknown
//! schema version, a `name` key on a module entry, or an entry that does not
//! match [`ModuleEntry`] rejects the whole document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::exports::ExportSet;
use crate::types::{Module, ModuleFile};

/// The only registry schema version this crate understands.
pub const SUPPORTED_REGISTRY_VERSION: &str = "1.0";

/// Errors raised while decoding and validating a registry document.
#[derive(thiserror::Error, Debug)]
pub enum SchemaError {
    /// The text is not valid JSON.
    #[error("Invalid registry JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level shape is wrong (not an object, `modules` not an array).
    #[error("Invalid registry document: {0}")]
    InvalidDocument(String),

    /// The top-level `version` is not [`SUPPORTED_REGISTRY_VERSION`].
    #[error("Unsupported registry version: {0}")]
    UnsupportedVersion(String),

    /// A module entry carries a `name` key; identity is `id`.
    #[error(
        "Module at index {index} (id: {id}) contains invalid 'name' field. \
         The 'name' field is not part of the registry schema. Remove it."
    )]
    DisallowedField {
        /// Position of the entry in `modules`.
        index: usize,
        /// The entry's `id`, or `unknown`.
        id: String,
    },

    /// A module entry does not match the entry schema.
    #[error("Module at index {index} is malformed: {source}")]
    InvalidEntry {
        /// Position of the entry in `modules`.
        index: usize,
        /// Underlying decode error.
        source: serde_json::Error,
    },

    /// A required string field is empty.
    #[error("Module at index {index} has an empty '{field}' field")]
    EmptyField {
        /// Position of the entry in `modules`.
        index: usize,
        /// Name of the empty field.
        field: &'static str,
    },
}

/// One module as it appears on the wire, before a source label is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleEntry {
    /// Module identifier.
    pub id: String,
    /// One-line description.
    pub description: String,
    /// Version string.
    pub version: String,
    /// Primary script location.
    pub url: String,
    /// Grouping category.
    pub category: String,
    /// Informational dependency ids.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Declared exports.
    #[serde(default)]
    pub exports: Option<ExportSet>,
    /// Auxiliary files.
    #[serde(default)]
    pub files: Vec<ModuleFile>,
}

impl ModuleEntry {
    fn validate(&self, index: usize) -> Result<(), SchemaError> {
        if self.id.is_empty() {
            return Err(SchemaError::EmptyField { index, field: "id" });
        }
        if self.version.is_empty() {
            return Err(SchemaError::EmptyField {
                index,
                field: "version",
            });
        }
        if self.url.is_empty() {
            return Err(SchemaError::EmptyField { index, field: "url" });
        }
        Ok(())
    }

    /// Attach a source label, producing a catalog [`Module`].
    pub fn into_module(self, source: &str) -> Module {
        Module {
            id: self.id,
            description: self.description,
            version: self.version,
            url: self.url,
            category: self.category,
            source: source.to_string(),
            dependencies: self.dependencies,
            exports: self.exports,
            files: self.files,
        }
    }
}

/// A validated registry document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryDocument {
    /// Schema version (always [`SUPPORTED_REGISTRY_VERSION`] once validated).
    pub version: String,
    /// Module entries in document order.
    pub modules: Vec<ModuleEntry>,
}

impl RegistryDocument {
    /// Decode and validate a registry from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Json`] for unparseable text and any error
    /// produced by [`RegistryDocument::from_value`].
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Validate an already-parsed JSON value.
    ///
    /// A missing top-level `version` is read as `"1.0"` and a missing
    /// `modules` array as empty.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnsupportedVersion`] for any other version,
    /// [`SchemaError::DisallowedField`] for an entry with a `name` key,
    /// [`SchemaError::InvalidEntry`] or [`SchemaError::EmptyField`] for a
    /// malformed entry, and [`SchemaError::InvalidDocument`] for a wrong
    /// top-level shape.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        let Value::Object(mut root) = value else {
            return Err(SchemaError::InvalidDocument(
                "top level must be an object".to_string(),
            ));
        };

        let version = match root.remove("version") {
            None => SUPPORTED_REGISTRY_VERSION.to_string(),
            Some(Value::String(v)) => v,
            Some(other) => return Err(SchemaError::UnsupportedVersion(other.to_string())),
        };
        if version != SUPPORTED_REGISTRY_VERSION {
            return Err(SchemaError::UnsupportedVersion(version));
        }

        let raw_modules = match root.remove("modules") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(SchemaError::InvalidDocument(
                    "'modules' must be an array".to_string(),
                ));
            }
        };

        let mut modules = Vec::with_capacity(raw_modules.len());
        for (index, raw) in raw_modules.into_iter().enumerate() {
            if let Some(obj) = raw.as_object() {
                if obj.contains_key("name") {
                    let id = obj
                        .get("id")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown")
                        .to_string();
                    return Err(SchemaError::DisallowedField { index, id });
                }
            }

            let entry: ModuleEntry = serde_json::from_value(raw)
                .map_err(|source| SchemaError::InvalidEntry { index, source })?;
            entry.validate(index)?;
            modules.push(entry);
        }

        Ok(Self { version, modules })
    }

    /// Convert every entry into a catalog [`Module`] tagged with `source`.
    pub fn into_modules(self, source: &str) -> Vec<Module> {
        self.modules
            .into_iter()
            .map(|entry| entry.into_module(source))
            .collect()
    }
}
