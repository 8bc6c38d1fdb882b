//! Error taxonomy shared by both API clients.

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinabError {
    /// A credential or endpoint value is missing or unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The response body violates the documented contract, e.g. a non-array
    /// top level where an array is required.
    #[error("Unexpected response format: expected {expected}, got {found}")]
    Format {
        expected: &'static str,
        found: String,
    },

    /// A single record failed schema coercion. This fails the whole batch;
    /// silently dropping financial records is worse than failing loudly.
    #[error("Invalid record ({context}): {reason}")]
    Validation { context: String, reason: String },

    /// Network or HTTP failure from the underlying client, passed through.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, FinabError>;

/// Human-readable JSON type name, for `Format` error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
