// File: crates/line-core/src/error.rs
// Summary: Error type shared by normalization, domain computation and plugin emit.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LineError {
    #[error("series must be a JSON array, got {0}")]
    NotASeries(&'static str),

    #[error("series is empty")]
    EmptySeries,

    #[error("series has no finite values to compute a domain from")]
    NoFiniteValues,

    /// First element is an `[x, y]` pair whose x is neither epoch seconds nor millis.
    #[error("cannot infer series shape from first element: {0}")]
    UnrecognizedShape(String),

    #[error("marker index {index} out of range ({len} markers)")]
    MarkerOutOfRange { index: usize, len: usize },

    #[error("chart index {index} out of range ({len} charts mounted)")]
    ChartOutOfRange { index: usize, len: usize },

    #[error("no plugin registered for item type `{0}`")]
    UnknownPlugin(String),

    #[error("data source failed: {0}")]
    DataSource(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LineError>;

/// Name of a JSON value's kind, for error messages.
pub(crate) fn kind_of(v: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
