//! Schema stores.
//!
//! A store resolves a `(code, version)` pair to a schema handle. Lookup
//! failures (`NotFound`, `Load`) form the classified set the validation core
//! recovers from; `Backend` failures pass through untouched.

pub mod registry;

pub use registry::{RegistryError, SchemaRegistry};

use std::sync::Arc;

use thiserror::Error;

use crate::schema::Schema;

/// Failure classification for schema lookup.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No schema registered for the requested code/version.
    #[error("no schema registered for code '{code}' version '{version}'")]
    NotFound { code: String, version: String },
    /// The schema exists but could not be constructed.
    #[error("schema '{code}' version '{version}' could not be loaded: {reason}")]
    Load {
        code: String,
        version: String,
        reason: String,
    },
    /// Store-internal failure. Not an expected validation outcome.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl StoreError {
    /// Whether this failure belongs to the classified lookup-failure set.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Load { .. })
    }
}

/// Resolves schema handles at runtime.
pub trait SchemaStore {
    /// Resolve the schema registered under `(code, version)`.
    ///
    /// `version` may be [`LATEST_VERSION`](crate::record::LATEST_VERSION),
    /// selecting the newest registered revision.
    fn get_schema(&self, code: &str, version: &str) -> Result<Arc<dyn Schema>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_lookup_failure_classification() {
        let not_found = StoreError::NotFound {
            code: "07".into(),
            version: "latest".into(),
        };
        let load = StoreError::Load {
            code: "07".into(),
            version: "001".into(),
            reason: "definition is malformed".into(),
        };
        let backend = StoreError::Backend(anyhow!("connection reset"));

        assert!(not_found.is_lookup_failure());
        assert!(load.is_lookup_failure());
        assert!(!backend.is_lookup_failure());
    }

    #[test]
    fn test_error_messages_carry_coordinates() {
        let err = StoreError::NotFound {
            code: "07".into(),
            version: "latest".into(),
        };
        let message = err.to_string();
        assert!(message.contains("07"));
        assert!(message.contains("latest"));
    }
}
