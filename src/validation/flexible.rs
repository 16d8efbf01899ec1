//! Dispatch-and-validate core.
//!
//! [`Flexible`] wraps one record and one injected store. `validate()`
//! resolves the record's schema by `(code, version)`, runs it against the
//! properties and collapses both classified failure sources into the
//! normalized [`ValidationError`].

use crate::logging::structured::LogContext;
use crate::record::Record;
use crate::schema::SchemaError;
use crate::store::{SchemaStore, StoreError};

use super::error::{FlexibleError, ValidationError};

/// Validates one record against a store-resolved schema.
///
/// Holds no state beyond the record and the store reference; instances are
/// cheap and meant to be discarded after one `validate()` call. Fetched
/// schemas are not cached here.
pub struct Flexible<'a> {
    record: Record,
    store: &'a dyn SchemaStore,
}

impl<'a> Flexible<'a> {
    pub fn new(record: Record, store: &'a dyn SchemaStore) -> Self {
        Self { record, store }
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Validate the record's properties against its schema.
    ///
    /// Returns `Ok(())` when the resolved schema accepts the properties. A
    /// schema that cannot be resolved and properties that violate the
    /// schema's rules both surface as [`FlexibleError::Validation`]; any
    /// unclassified store or schema failure passes through unchanged as
    /// [`FlexibleError::Internal`].
    pub fn validate(&self) -> Result<(), FlexibleError> {
        let code = &self.record.code;
        let version = self.record.version_or_latest();
        let ctx = LogContext::new().with_schema(code, version);

        log::debug!(
            "{} VALIDATE_START fields={}",
            ctx,
            self.record.properties.len()
        );

        if code.is_empty() {
            log::warn!("{} SCHEMA_LOOKUP_FAILED reason=empty_code", ctx);
            return Err(ValidationError::missing_code().into());
        }

        let schema = match self.store.get_schema(code, version) {
            Ok(schema) => schema,
            Err(err @ (StoreError::NotFound { .. } | StoreError::Load { .. })) => {
                log::warn!("{} SCHEMA_LOOKUP_FAILED error={}", ctx, err);
                return Err(ValidationError::schema_lookup(code, version, &err).into());
            }
            Err(StoreError::Backend(source)) => {
                log::error!("{} STORE_BACKEND_ERROR error={}", ctx, source);
                return Err(FlexibleError::Internal(source));
            }
        };

        log::debug!("{} SCHEMA_RESOLVED version={}", ctx, schema.version());

        match schema.validate(&self.record.properties) {
            Ok(()) => {
                log::info!("{} VALIDATE_OK version={}", ctx, schema.version());
                Ok(())
            }
            Err(err @ SchemaError::Violation { .. }) => {
                log::warn!("{} PROPERTIES_INVALID error={}", ctx, err);
                Err(ValidationError::properties_invalid(code, schema.version(), &err).into())
            }
            Err(SchemaError::Internal(source)) => {
                log::error!("{} SCHEMA_INTERNAL_ERROR error={}", ctx, source);
                Err(FlexibleError::Internal(source))
            }
        }
    }
}
