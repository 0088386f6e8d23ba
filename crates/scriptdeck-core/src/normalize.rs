//! Result normalization
//!
//! Maps the shape-unknown output of one invocation into a closed,
//! renderable form. Classification follows a strict, ordered decision
//! procedure; the ordering of the checks is itself part of the contract:
//!
//! 1. zero records → [`DisplayResult::Empty`]
//! 2. one record: object → `Pairs`; array → collection-to-table;
//!    anything else → `Scalar`
//! 3. more than one record → collection-to-table over the full sequence
//!
//! Normalization never fails: ambiguous shapes degrade to the most
//! conservative classification instead of raising.

use serde_json::Value;

use crate::record::{stringify, RawOutput};

/// Column name used when a collection holds bare scalars instead of
/// field-bearing records.
const SCALAR_COLUMN: &str = "Value";

/// Label attached to a single non-decomposable result value.
const SCALAR_LABEL: &str = "Result";

/// One labeled value of a `Pairs` result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub label: String,
    pub value: String,
}

impl Pair {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The normalized, UI-agnostic renderable shape of one invocation's output.
///
/// Exactly one case is ever populated. A `Table`'s every row has exactly
/// `columns.len()` cells; missing fields are padded with the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayResult {
    /// No output
    Empty,
    /// A single associative or field-bearing record
    Pairs(Vec<Pair>),
    /// A collection of records
    Table {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// A single non-decomposable value
    Scalar { label: String, value: String },
}

impl DisplayResult {
    /// Build the scalar case with the canonical label.
    fn scalar(value: &Value) -> Self {
        DisplayResult::Scalar {
            label: SCALAR_LABEL.to_string(),
            value: stringify(value),
        }
    }

    /// Name of the populated case, for logging.
    pub fn shape_name(&self) -> &'static str {
        match self {
            DisplayResult::Empty => "empty",
            DisplayResult::Pairs(_) => "pairs",
            DisplayResult::Table { .. } => "table",
            DisplayResult::Scalar { .. } => "scalar",
        }
    }
}

/// Normalize the raw output of one invocation into a [`DisplayResult`].
///
/// Pure and total: every input shape maps to exactly one case, and
/// repeated calls on the same input yield identical results.
pub fn normalize(raw: &RawOutput) -> DisplayResult {
    let records = raw.records();
    let result = match records {
        [] => DisplayResult::Empty,
        [record] => normalize_single(record),
        many => collection_to_table(many),
    };
    tracing::debug!(
        records = records.len(),
        shape = result.shape_name(),
        "normalized invocation output"
    );
    result
}

/// Classify a single returned record.
fn normalize_single(record: &Value) -> DisplayResult {
    match record {
        Value::Object(entries) => {
            // Associative maps and field-bearing records are the same
            // shape at this boundary; entry order is preserved.
            let pairs = entries
                .iter()
                .map(|(label, value)| Pair::new(label.clone(), stringify(value)))
                .collect();
            DisplayResult::Pairs(pairs)
        }
        Value::Array(elements) => collection_to_table(elements),
        other => DisplayResult::scalar(other),
    }
}

/// Reshape a sequence of elements into a table.
///
/// The first element governs the column set: later elements with
/// different shapes never extend it; their missing fields pad to `""`.
/// A sequence of bare scalars becomes single-cell rows under one
/// synthetic column. An empty sequence carries no renderable content
/// and degrades to `Empty`.
fn collection_to_table(elements: &[Value]) -> DisplayResult {
    let Some(first) = elements.first() else {
        return DisplayResult::Empty;
    };

    match first {
        Value::Object(first_fields) => {
            let columns: Vec<String> = first_fields.keys().cloned().collect();
            let rows = elements
                .iter()
                .map(|element| {
                    columns
                        .iter()
                        .map(|column| match element {
                            Value::Object(fields) => {
                                fields.get(column).map(stringify).unwrap_or_default()
                            }
                            // Non-object elements expose no fields at all
                            _ => String::new(),
                        })
                        .collect()
                })
                .collect();
            DisplayResult::Table { columns, rows }
        }
        _ => {
            // Bare scalars: one single-cell row per element
            let rows = elements
                .iter()
                .map(|element| vec![stringify(element)])
                .collect();
            DisplayResult::Table {
                columns: vec![SCALAR_COLUMN.to_string()],
                rows,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(records: Vec<Value>) -> RawOutput {
        RawOutput::from_records(records)
    }

    #[test]
    fn test_zero_records_is_empty() {
        assert_eq!(normalize(&RawOutput::empty()), DisplayResult::Empty);
    }

    #[test]
    fn test_single_scalar_is_result_labeled() {
        let result = normalize(&raw(vec![json!("42 GB free")]));
        assert_eq!(
            result,
            DisplayResult::Scalar {
                label: "Result".to_string(),
                value: "42 GB free".to_string(),
            }
        );
    }

    #[test]
    fn test_single_null_record_is_empty_scalar() {
        // Null is not an object, array, or meaningful scalar text; it
        // degrades to the conservative Scalar case with an empty value.
        let result = normalize(&raw(vec![json!(null)]));
        assert_eq!(
            result,
            DisplayResult::Scalar {
                label: "Result".to_string(),
                value: String::new(),
            }
        );
    }

    #[test]
    fn test_single_map_preserves_entry_order() {
        let result = normalize(&raw(vec![json!({
            "DeviceID": "C:",
            "FreeSpace": "1000",
            "Note": null,
        })]));
        assert_eq!(
            result,
            DisplayResult::Pairs(vec![
                Pair::new("DeviceID", "C:"),
                Pair::new("FreeSpace", "1000"),
                Pair::new("Note", ""),
            ])
        );
    }

    #[test]
    fn test_single_nested_array_delegates_to_table() {
        let result = normalize(&raw(vec![json!([
            {"Name": "a", "Size": "1"},
            {"Name": "b", "Size": "2"},
        ])]));
        assert_eq!(
            result,
            DisplayResult::Table {
                columns: vec!["Name".to_string(), "Size".to_string()],
                rows: vec![
                    vec!["a".to_string(), "1".to_string()],
                    vec!["b".to_string(), "2".to_string()],
                ],
            }
        );
    }

    #[test]
    fn test_single_empty_array_is_empty() {
        assert_eq!(normalize(&raw(vec![json!([])])), DisplayResult::Empty);
    }

    #[test]
    fn test_multi_record_columns_come_from_first() {
        // The second record's extra field never extends the column set
        let result = normalize(&raw(vec![
            json!({"Name": "a"}),
            json!({"Name": "b", "Size": "2"}),
        ]));
        assert_eq!(
            result,
            DisplayResult::Table {
                columns: vec!["Name".to_string()],
                rows: vec![vec!["a".to_string()], vec!["b".to_string()]],
            }
        );
    }

    #[test]
    fn test_missing_fields_pad_with_empty_string() {
        let result = normalize(&raw(vec![
            json!({"Name": "a", "Size": "1"}),
            json!({"Name": "b"}),
        ]));
        let DisplayResult::Table { columns, rows } = result else {
            panic!("expected table");
        };
        assert_eq!(columns.len(), 2);
        assert_eq!(rows[1], vec!["b".to_string(), String::new()]);
    }

    #[test]
    fn test_scalar_collection_uses_synthetic_column() {
        let result = normalize(&raw(vec![json!("C:"), json!("D:")]));
        assert_eq!(
            result,
            DisplayResult::Table {
                columns: vec!["Value".to_string()],
                rows: vec![vec!["C:".to_string()], vec!["D:".to_string()]],
            }
        );
    }

    #[test]
    fn test_mixed_shapes_after_first_become_blank_rows() {
        let result = normalize(&raw(vec![json!({"Name": "a"}), json!("stray")]));
        let DisplayResult::Table { rows, .. } = result else {
            panic!("expected table");
        };
        assert_eq!(rows[1], vec![String::new()]);
    }

    #[test]
    fn test_normalize_is_stateless() {
        let input = raw(vec![
            json!({"Name": "a", "Size": "1"}),
            json!({"Name": "b", "Size": "2"}),
        ]);
        assert_eq!(normalize(&input), normalize(&input));
    }
}
