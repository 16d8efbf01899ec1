//! Record model.
//!
//! A record is the input to one validation run: a schema code, an optional
//! schema version and the property payload to check.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sentinel version selecting the newest registered revision of a schema.
pub const LATEST_VERSION: &str = "latest";

/// Input to one validation run.
///
/// The record carries no validity rules of its own beyond `code` being
/// present; whether `properties` are acceptable is decided entirely by the
/// schema the store resolves for `(code, version)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Record {
    pub fn new(code: impl Into<String>, properties: Map<String, Value>) -> Self {
        Self {
            code: code.into(),
            version: None,
            properties,
        }
    }

    /// Pin the record to a specific schema version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// The version the store should resolve, defaulting to [`LATEST_VERSION`].
    pub fn version_or_latest(&self) -> &str {
        self.version.as_deref().unwrap_or(LATEST_VERSION)
    }
}
