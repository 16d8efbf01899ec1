//! Structured logging utilities.
//!
//! Provides context-aware logging with a per-validation correlation id and
//! the schema coordinates included in every log message.

use std::fmt;

use uuid::Uuid;

/// Logging context for one validation run.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub validation_id: String,
    pub schema: Option<String>,
}

impl LogContext {
    pub fn new() -> Self {
        Self {
            validation_id: format!("validate-{}", &Uuid::new_v4().to_string()[..8]),
            schema: None,
        }
    }

    pub fn with_schema(&self, code: &str, version: &str) -> Self {
        Self {
            validation_id: self.validation_id.clone(),
            schema: Some(format!("{}@{}", code, version)),
        }
    }
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "[validate={}] [schema={}]", self.validation_id, schema),
            None => write!(f, "[validate={}]", self.validation_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context_display() {
        let ctx = LogContext {
            validation_id: "validate-abc12345".to_string(),
            schema: None,
        };
        assert_eq!(format!("{}", ctx), "[validate=validate-abc12345]");

        let ctx_with_schema = ctx.with_schema("06", "latest");
        assert_eq!(
            format!("{}", ctx_with_schema),
            "[validate=validate-abc12345] [schema=06@latest]"
        );
    }

    #[test]
    fn test_unique_validation_ids() {
        let a = LogContext::new();
        let b = LogContext::new();
        assert_ne!(a.validation_id, b.validation_id);
    }
}
