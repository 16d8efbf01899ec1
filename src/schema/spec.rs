//! Field-rule schemas.
//!
//! The bundled concrete schema shape: a flat set of per-field rules over a
//! JSON object. Definitions arrive as serde-friendly rows ([`SchemaDef`]) and
//! compile into [`SchemaSpec`] handles with pattern rules pre-compiled.

use std::collections::BTreeMap;

use chrono::DateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::{Schema, SchemaError};

/// Expected type of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Int,
    Float,
    Bool,
    Object,
    Array,
    /// RFC 3339 timestamp carried as a string.
    Timestamp,
    /// Any non-null value.
    Any,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Bool => "bool",
            FieldType::Object => "object",
            FieldType::Array => "array",
            FieldType::Timestamp => "timestamp",
            FieldType::Any => "any",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
            FieldType::Int => value.is_i64() || value.is_u64(),
            // Integer values are acceptable where a float is expected.
            FieldType::Float => value.is_number(),
            FieldType::Bool => value.is_boolean(),
            FieldType::Object => value.is_object(),
            FieldType::Array => value.is_array(),
            FieldType::Timestamp => value
                .as_str()
                .map(|s| DateTime::parse_from_rfc3339(s).is_ok())
                .unwrap_or(false),
            FieldType::Any => !value.is_null(),
        }
    }
}

/// Rule for a single property.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub data_type: FieldType,
    pub required: bool,
    pattern: Option<Regex>,
}

impl FieldRule {
    pub fn required(data_type: FieldType) -> Self {
        Self {
            data_type,
            required: true,
            pattern: None,
        }
    }

    pub fn optional(data_type: FieldType) -> Self {
        Self {
            data_type,
            required: false,
            pattern: None,
        }
    }

    /// Constrain string values to a regular expression.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(|re| re.as_str())
    }
}

/// A compiled schema for one `(code, version)` pair.
///
/// Validation is deterministic: unknown fields are checked first (in property
/// order), then declared fields in name order, and the first violation wins.
#[derive(Debug, Clone)]
pub struct SchemaSpec {
    code: String,
    version: String,
    fields: BTreeMap<String, FieldRule>,
    allow_unknown: bool,
    fingerprint: String,
}

impl SchemaSpec {
    pub fn new(
        code: impl Into<String>,
        version: impl Into<String>,
        fields: BTreeMap<String, FieldRule>,
    ) -> Self {
        Self::build(code.into(), version.into(), fields, false)
    }

    /// Accept properties no rule covers instead of rejecting them.
    pub fn allow_unknown(self) -> Self {
        Self::build(self.code, self.version, self.fields, true)
    }

    fn build(
        code: String,
        version: String,
        fields: BTreeMap<String, FieldRule>,
        allow_unknown: bool,
    ) -> Self {
        let fingerprint = fingerprint(&code, &version, &fields, allow_unknown);
        Self {
            code,
            version,
            fields,
            allow_unknown,
            fingerprint,
        }
    }

    /// SHA-256 over the canonical rule listing, hex-encoded.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl Schema for SchemaSpec {
    fn code(&self) -> &str {
        &self.code
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn validate(&self, properties: &Map<String, Value>) -> Result<(), SchemaError> {
        if !self.allow_unknown {
            for key in properties.keys() {
                if !self.fields.contains_key(key) {
                    return Err(SchemaError::violation(format!(
                        "field '{}': not declared by schema {}@{}",
                        key, self.code, self.version
                    )));
                }
            }
        }

        for (name, rule) in &self.fields {
            match properties.get(name) {
                Some(value) => {
                    if !rule.data_type.matches(value) {
                        return Err(SchemaError::violation(format!(
                            "field '{}': expected {}, got {}",
                            name,
                            rule.data_type.as_str(),
                            json_type_name(value)
                        )));
                    }
                    if let (Some(re), Some(text)) = (&rule.pattern, value.as_str()) {
                        if !re.is_match(text) {
                            return Err(SchemaError::violation(format!(
                                "field '{}': value does not match pattern '{}'",
                                name, re
                            )));
                        }
                    }
                }
                None if rule.required => {
                    return Err(SchemaError::violation(format!(
                        "field '{}': required but missing",
                        name
                    )));
                }
                None => {}
            }
        }

        Ok(())
    }
}

/// Serde-facing schema definition row.
///
/// This is the shape schema tables serialize; it compiles into a
/// [`SchemaSpec`] via `TryFrom`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDef {
    pub code: String,
    pub version: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDef>,
    #[serde(default)]
    pub allow_unknown: bool,
}

/// Serde-facing rule for a single property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDef {
    #[serde(rename = "type")]
    pub data_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl TryFrom<SchemaDef> for SchemaSpec {
    type Error = regex::Error;

    fn try_from(def: SchemaDef) -> Result<Self, Self::Error> {
        let mut fields = BTreeMap::new();
        for (name, field) in def.fields {
            let mut rule = if field.required {
                FieldRule::required(field.data_type)
            } else {
                FieldRule::optional(field.data_type)
            };
            if let Some(pattern) = &field.pattern {
                rule = rule.with_pattern(pattern)?;
            }
            fields.insert(name, rule);
        }

        let spec = SchemaSpec::new(def.code, def.version, fields);
        Ok(if def.allow_unknown {
            spec.allow_unknown()
        } else {
            spec
        })
    }
}

/// Returns the JSON type name for violation messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn fingerprint(
    code: &str,
    version: &str,
    fields: &BTreeMap<String, FieldRule>,
    allow_unknown: bool,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hasher.update(b"@");
    hasher.update(version.as_bytes());
    hasher.update([allow_unknown as u8]);
    for (name, rule) in fields {
        hasher.update(name.as_bytes());
        hasher.update([0u8, rule.required as u8]);
        hasher.update(rule.data_type.as_str().as_bytes());
        if let Some(pattern) = rule.pattern() {
            hasher.update(pattern.as_bytes());
        }
        hasher.update([0xff]);
    }
    hex::encode(hasher.finalize())
}
