//! Boundary parameter values
//!
//! Parameters cross the host boundary as primitives only: text, numbers,
//! and flags. Structured data never flows *into* an invocation; it only
//! comes back out as records.

use serde::{Deserialize, Serialize};

/// A primitive value bound as a named argument of one invocation.
///
/// Untagged on the wire so config defaults can be written as plain JSON
/// literals (`"C:"`, `42`, `true`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean switch argument
    Flag(bool),
    /// Numeric argument
    Number(f64),
    /// Text argument
    Text(String),
}

impl ParamValue {
    /// Render the value the way the host expects it on the command line.
    pub fn as_argument(&self) -> String {
        match self {
            ParamValue::Text(s) => s.clone(),
            ParamValue::Number(n) => n.to_string(),
            ParamValue::Flag(b) => b.to_string(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self {
        ParamValue::Number(n)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Flag(b)
    }
}
