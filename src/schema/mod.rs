//! Schema handles.
//!
//! A schema is an opaque handle with a single capability: validate a property
//! map. Concrete shapes come from whatever store hands them out; the bundled
//! field-rule implementation lives in [`spec`].

pub mod spec;

pub use spec::{FieldDef, FieldRule, FieldType, SchemaDef, SchemaSpec};

use serde_json::{Map, Value};
use thiserror::Error;

/// Failure classification for schema-side validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The properties do not satisfy the schema's rules.
    #[error("{message}")]
    Violation { message: String },
    /// Anything else. Not an expected validation outcome; callers of
    /// [`Flexible::validate`](crate::validation::Flexible::validate) see it
    /// unchanged.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SchemaError {
    pub fn violation(message: impl Into<String>) -> Self {
        Self::Violation {
            message: message.into(),
        }
    }

    /// Whether this failure belongs to the classified validation-failure set.
    pub fn is_violation(&self) -> bool {
        matches!(self, Self::Violation { .. })
    }
}

/// An externally supplied validation schema.
pub trait Schema: Send + Sync + std::fmt::Debug {
    /// Code this schema was registered under.
    fn code(&self) -> &str;

    /// Resolved revision of the schema.
    fn version(&self) -> &str;

    /// Check `properties` against the schema's rules.
    fn validate(&self, properties: &Map<String, Value>) -> Result<(), SchemaError>;
}
