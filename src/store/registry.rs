//! In-memory schema registry.
//!
//! Thread-safe store implementation holding compiled [`SchemaSpec`] handles
//! keyed by code and version. Registration validates code/version formats and
//! rejects duplicates; lookups resolve the `latest` sentinel to the
//! numerically greatest registered version.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use parking_lot::RwLock;
use regex::Regex;
use thiserror::Error;

use crate::record::LATEST_VERSION;
use crate::schema::{Schema, SchemaDef, SchemaSpec};

use super::{SchemaStore, StoreError};

lazy_static! {
    /// Codes are short identifiers: letters, digits, `_`, `-`, `.`.
    static ref CODE_RE: Regex = Regex::new(r"^[A-Za-z0-9_.-]{1,64}$").unwrap();

    /// Versions are dotted numeric strings ("001", "1.2.3"). The `latest`
    /// sentinel is therefore never registrable as a concrete version.
    static ref VERSION_RE: Regex = Regex::new(r"^[0-9]+(\.[0-9]+)*$").unwrap();
}

/// Failures while registering schema definitions.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid schema code '{code}'")]
    InvalidCode { code: String },
    #[error("invalid schema version '{version}': expected dotted numeric form")]
    InvalidVersion { version: String },
    #[error("schema '{code}' version '{version}' is already registered")]
    Duplicate { code: String, version: String },
    #[error("invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("malformed schema definition: {0}")]
    Definition(#[from] serde_json::Error),
}

/// Version string ordered by numeric components, so "10" sorts after "9".
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct VersionKey(Vec<u64>, String);

impl VersionKey {
    fn new(version: &str) -> Self {
        // Components beyond u64 range collapse to 0; the raw string keeps
        // ordering total regardless.
        let parts = version
            .split('.')
            .map(|part| part.parse().unwrap_or(0))
            .collect();
        Self(parts, version.to_string())
    }
}

#[derive(Debug, Clone)]
struct RegistryEntry {
    schema: Arc<SchemaSpec>,
    registered_at: DateTime<Utc>,
}

/// Thread-safe in-memory schema store.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    inner: RwLock<HashMap<String, BTreeMap<VersionKey, RegistryEntry>>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a compiled schema.
    pub fn register(&self, spec: SchemaSpec) -> Result<(), RegistryError> {
        if !CODE_RE.is_match(spec.code()) {
            return Err(RegistryError::InvalidCode {
                code: spec.code().to_string(),
            });
        }
        if !VERSION_RE.is_match(spec.version()) {
            return Err(RegistryError::InvalidVersion {
                version: spec.version().to_string(),
            });
        }

        let mut inner = self.inner.write();
        let versions = inner.entry(spec.code().to_string()).or_default();
        let key = VersionKey::new(spec.version());
        if versions.contains_key(&key) {
            return Err(RegistryError::Duplicate {
                code: spec.code().to_string(),
                version: spec.version().to_string(),
            });
        }

        let registered_at = Utc::now();
        log::info!(
            "REGISTRY_SCHEMA_REGISTERED code={} version={} fingerprint={} registered_at={}",
            spec.code(),
            spec.version(),
            &spec.fingerprint()[..12],
            registered_at.to_rfc3339()
        );
        versions.insert(
            key,
            RegistryEntry {
                schema: Arc::new(spec),
                registered_at,
            },
        );
        Ok(())
    }

    /// Register a schema from its JSON definition.
    pub fn register_json(&self, definition: &str) -> Result<(), RegistryError> {
        let def: SchemaDef = serde_json::from_str(definition)?;
        let spec = SchemaSpec::try_from(def)?;
        self.register(spec)
    }

    /// Registered codes, sorted.
    pub fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.inner.read().keys().cloned().collect();
        codes.sort();
        codes
    }

    /// Registered versions for a code, oldest first.
    pub fn versions(&self, code: &str) -> Vec<String> {
        self.inner
            .read()
            .get(code)
            .map(|versions| versions.keys().map(|key| key.1.clone()).collect())
            .unwrap_or_default()
    }

    /// When the given schema was registered.
    pub fn registered_at(&self, code: &str, version: &str) -> Option<DateTime<Utc>> {
        self.inner
            .read()
            .get(code)
            .and_then(|versions| versions.get(&VersionKey::new(version)))
            .map(|entry| entry.registered_at)
    }

    /// Total number of registered schemas across all codes.
    pub fn len(&self) -> usize {
        self.inner.read().values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Drop every registered schema.
    pub fn clear(&self) {
        self.inner.write().clear();
        log::info!("REGISTRY_CLEARED");
    }
}

impl SchemaStore for SchemaRegistry {
    fn get_schema(&self, code: &str, version: &str) -> Result<Arc<dyn Schema>, StoreError> {
        let inner = self.inner.read();
        let not_found = || StoreError::NotFound {
            code: code.to_string(),
            version: version.to_string(),
        };

        let versions = inner.get(code).ok_or_else(not_found)?;
        let entry = if version == LATEST_VERSION {
            versions.values().next_back()
        } else {
            versions.get(&VersionKey::new(version))
        }
        .ok_or_else(not_found)?;

        log::debug!(
            "REGISTRY_SCHEMA_RESOLVED code={} version={} requested={}",
            code,
            entry.schema.version(),
            version
        );
        Ok(entry.schema.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldRule, FieldType};
    use std::collections::BTreeMap as Fields;

    fn spec(code: &str, version: &str) -> SchemaSpec {
        let mut fields = Fields::new();
        fields.insert("m".into(), FieldRule::required(FieldType::String));
        SchemaSpec::new(code, version, fields)
    }

    #[test]
    fn test_register_and_resolve() {
        let registry = SchemaRegistry::new();
        registry.register(spec("04", "001")).unwrap();

        let schema = registry.get_schema("04", "001").unwrap();
        assert_eq!(schema.code(), "04");
        assert_eq!(schema.version(), "001");
        assert_eq!(registry.codes(), vec!["04"]);
    }

    #[test]
    fn test_latest_resolves_numerically() {
        let registry = SchemaRegistry::new();
        registry.register(spec("04", "2")).unwrap();
        registry.register(spec("04", "10")).unwrap();
        registry.register(spec("04", "9")).unwrap();

        let schema = registry.get_schema("04", LATEST_VERSION).unwrap();
        assert_eq!(schema.version(), "10");
        assert_eq!(registry.versions("04"), vec!["2", "9", "10"]);
    }

    #[test]
    fn test_unknown_code_is_not_found() {
        let registry = SchemaRegistry::new();
        let err = registry.get_schema("missing", LATEST_VERSION).unwrap_err();
        assert!(err.is_lookup_failure());
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_unknown_version_is_not_found() {
        let registry = SchemaRegistry::new();
        registry.register(spec("04", "001")).unwrap();

        let err = registry.get_schema("04", "999").unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_duplicate_rejected() {
        let registry = SchemaRegistry::new();
        registry.register(spec("04", "001")).unwrap();

        let err = registry.register(spec("04", "001")).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { .. }));
    }

    #[test]
    fn test_malformed_code_and_version_rejected() {
        let registry = SchemaRegistry::new();

        let err = registry.register(spec("bad code", "001")).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidCode { .. }));

        let err = registry.register(spec("04", "latest")).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidVersion { .. }));

        let err = registry.register(spec("04", "v1")).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidVersion { .. }));
    }

    #[test]
    fn test_register_json() {
        let registry = SchemaRegistry::new();
        registry
            .register_json(
                r#"{
                    "code": "06",
                    "version": "001",
                    "fields": {"a": {"type": "string", "required": true}}
                }"#,
            )
            .unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.get_schema("06", LATEST_VERSION).is_ok());
        assert!(registry.registered_at("06", "001").is_some());
    }

    #[test]
    fn test_register_json_malformed() {
        let registry = SchemaRegistry::new();
        let err = registry.register_json("not json").unwrap_err();
        assert!(matches!(err, RegistryError::Definition(_)));
    }

    #[test]
    fn test_clear() {
        let registry = SchemaRegistry::new();
        registry.register(spec("04", "001")).unwrap();
        assert!(!registry.is_empty());

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.get_schema("04", LATEST_VERSION).is_err());
    }

    #[test]
    fn test_shared_lookups_across_threads() {
        let registry = Arc::new(SchemaRegistry::new());
        registry.register(spec("04", "001")).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        registry.get_schema("04", LATEST_VERSION).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
