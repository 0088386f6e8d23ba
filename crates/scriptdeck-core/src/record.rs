//! Raw output records and the uniform stringification rule
//!
//! One invocation yields zero or more records whose shape is unknown in
//! advance: objects (associative maps or field-bearing structures),
//! arrays (nested sequences), or bare scalars. Records are carried as
//! `serde_json::Value` with insertion order preserved, because field
//! order is part of the normalization contract.

use serde_json::Value;

/// The unconstrained result of one invocation: an ordered sequence of
/// zero or more opaque records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawOutput {
    records: Vec<Value>,
}

impl RawOutput {
    /// An explicitly empty output (success with zero returned records)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap a sequence of records
    pub fn from_records(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the invocation returned no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records, in the order the host returned them
    pub fn records(&self) -> &[Value] {
        &self.records
    }
}

impl From<Vec<Value>> for RawOutput {
    fn from(records: Vec<Value>) -> Self {
        Self::from_records(records)
    }
}

/// Stringify one raw value for display.
///
/// Null and absent values become the empty string; strings are taken
/// verbatim (no quoting); numbers and booleans use their default textual
/// form; nested arrays and objects fall back to compact JSON. No locale
/// formatting is applied here.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_output() {
        let raw = RawOutput::empty();
        assert!(raw.is_empty());
        assert_eq!(raw.len(), 0);
    }

    #[test]
    fn test_from_records_preserves_order() {
        let raw = RawOutput::from_records(vec![json!(1), json!(2), json!(3)]);
        assert_eq!(raw.len(), 3);
        assert_eq!(raw.records()[0], json!(1));
        assert_eq!(raw.records()[2], json!(3));
    }

    #[test]
    fn test_stringify_null_is_empty() {
        assert_eq!(stringify(&Value::Null), "");
    }

    #[test]
    fn test_stringify_string_is_verbatim() {
        // No JSON quoting on plain strings
        assert_eq!(stringify(&json!("C:")), "C:");
    }

    #[test]
    fn test_stringify_scalars() {
        assert_eq!(stringify(&json!(42)), "42");
        assert_eq!(stringify(&json!(1.5)), "1.5");
        assert_eq!(stringify(&json!(true)), "true");
    }

    #[test]
    fn test_stringify_nested_falls_back_to_json() {
        assert_eq!(stringify(&json!([1, 2])), "[1,2]");
        assert_eq!(stringify(&json!({"a": 1})), "{\"a\":1}");
    }
}
