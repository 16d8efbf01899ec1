//! Flexible Core - runtime schema dispatch and validation.
//!
//! Validates a record's properties against a schema selected at runtime by a
//! `(code, version)` pair. Callers never know the concrete schema shape at
//! compile time; the shape is resolved from an injected schema store, and
//! every expected failure - schema unavailable, properties rejected - is
//! collapsed into one normalized [`ValidationError`].
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `record` - The input record: code, optional version, property payload
//! - `schema` - Schema handle trait and the bundled field-rule schemas
//! - `store` - Store trait, failure classification, in-memory registry
//! - `validation` - The `Flexible` core and the normalized error surface
//! - `logging` - Structured logging with per-validation context
//!
//! ## Example
//!
//! ```
//! use flexible_core::{Flexible, Record, SchemaRegistry};
//! use serde_json::{Map, Value};
//!
//! let registry = SchemaRegistry::new();
//! registry
//!     .register_json(r#"{
//!         "code": "04",
//!         "version": "001",
//!         "fields": {"m": {"type": "string", "required": true}}
//!     }"#)
//!     .unwrap();
//!
//! let mut properties = Map::new();
//! properties.insert("m".to_string(), Value::String("this is text".into()));
//!
//! let record = Record::new("04", properties);
//! Flexible::new(record, &registry).validate().unwrap();
//! ```

pub mod logging;
pub mod record;
pub mod schema;
pub mod store;
pub mod validation;

pub use record::{Record, LATEST_VERSION};
pub use schema::{FieldRule, FieldType, Schema, SchemaDef, SchemaError, SchemaSpec};
pub use store::{RegistryError, SchemaRegistry, SchemaStore, StoreError};
pub use validation::{Flexible, FlexibleError, ValidationError};
