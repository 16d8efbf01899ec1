//! Validation error surface.
//!
//! One normalized error type covers every expected failure: whether the store
//! could not resolve a schema or the schema rejected the properties, callers
//! see the same [`ValidationError`]. Anything outside the classified failure
//! sets passes through [`FlexibleError::Internal`] untouched.

use std::fmt;

use thiserror::Error;

/// The normalized validation error.
///
/// The only error type produced for expected validation outcomes. The two
/// failure branches (lookup, violation) are indistinguishable by type; the
/// message keeps the underlying detail.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub(crate) fn missing_code() -> Self {
        Self {
            message: "record has no schema code".to_string(),
        }
    }

    pub(crate) fn schema_lookup(code: &str, version: &str, detail: &dyn fmt::Display) -> Self {
        Self {
            message: format!(
                "cannot resolve schema for code '{}' version '{}': {}",
                code, version, detail
            ),
        }
    }

    pub(crate) fn properties_invalid(code: &str, version: &str, detail: &dyn fmt::Display) -> Self {
        Self {
            message: format!(
                "properties do not conform to schema '{}' version '{}': {}",
                code, version, detail
            ),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Error surface of [`Flexible::validate`](super::Flexible::validate).
#[derive(Debug, Error)]
pub enum FlexibleError {
    /// Expected outcome: the record could not be validated, either because
    /// the schema was unavailable or because the properties were rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Unclassified collaborator failure, passed through unchanged.
    #[error(transparent)]
    Internal(anyhow::Error),
}

impl FlexibleError {
    /// Whether this is the normalized validation outcome.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
