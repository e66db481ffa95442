//! Document loading and analyzer indexing.
//!
//! A session document is plain JSON: the root object carries a `data`
//! object which holds the session `name` and the `analyzers` list. The
//! index is deliberately forgiving about individual entries (a malformed
//! analyzer is dropped, not reported) but strict about the root shape and
//! about lookups the caller asked for by id.

use crate::error::TemplateError;
use crate::template::types::AnalyzerRecord;
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Name of the session metadata entry inside a `.sal` archive.
pub const META_ENTRY: &str = "meta.json";

/// Parse a session document directly from a JSON file.
pub fn load_json(path: &Path) -> Result<Value> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse JSON from {}", path.display()))
}

/// Parse the `meta.json` entry out of a `.sal` session archive.
///
/// A `.sal` file is an ordinary zip; nothing else in the archive is read.
pub fn load_session_archive(path: &Path) -> Result<Value> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut archive = zip::ZipArchive::new(file)
        .with_context(|| format!("failed to read archive {}", path.display()))?;
    let entry = archive
        .by_name(META_ENTRY)
        .with_context(|| format!("no {} entry in {}", META_ENTRY, path.display()))?;
    serde_json::from_reader(BufReader::new(entry))
        .with_context(|| format!("failed to parse {} from {}", META_ENTRY, path.display()))
}

/// Index all structurally valid analyzers in a document.
///
/// Errors only when the document root is not an object. A missing or
/// ill-typed `data`/`analyzers` level yields an empty vec. Individual
/// entries that are not objects, or whose id/type/name fields do not have
/// the expected types, are silently excluded.
pub fn analyzers(doc: &Value) -> Result<Vec<AnalyzerRecord>, TemplateError> {
    let root = doc
        .as_object()
        .ok_or_else(|| TemplateError::InvalidDocumentShape(json_type_name(doc)))?;

    let Some(entries) = root
        .get("data")
        .and_then(|data| data.get("analyzers"))
        .and_then(Value::as_array)
    else {
        return Ok(Vec::new());
    };

    Ok(entries.iter().filter_map(analyzer_record).collect())
}

/// Filtering constructor: `None` is the discard marker for a malformed
/// candidate entry, never an error.
fn analyzer_record(entry: &Value) -> Option<AnalyzerRecord> {
    let obj = entry.as_object()?;
    let node_id = as_int(obj.get("nodeId")?)?;
    let analyzer_type = obj.get("type")?.as_str()?.to_string();
    let name = obj.get("name")?.as_str()?.to_string();
    let settings = obj
        .get("settings")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    Some(AnalyzerRecord {
        node_id,
        analyzer_type,
        name,
        settings,
    })
}

/// Look up one analyzer by its nodeId.
pub fn find_analyzer(
    records: &[AnalyzerRecord],
    node_id: i64,
) -> Result<&AnalyzerRecord, TemplateError> {
    records
        .iter()
        .find(|record| record.node_id == node_id)
        .ok_or(TemplateError::AnalyzerNotFound(node_id))
}

/// Session display name from `data.name`, falling back when absent/blank.
pub fn session_name(doc: &Value, fallback: &str) -> String {
    doc.get("data")
        .and_then(|data| data.get("name"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .unwrap_or_else(|| fallback.to_string())
}

/// Normalize a JSON value to an integer.
///
/// Accepts integral numbers and floats with no fractional part. Booleans
/// are rejected outright; they must never leak into settings as 0/1.
pub fn as_int(value: &Value) -> Option<i64> {
    let number = value.as_number()?;
    if let Some(int) = number.as_i64() {
        return Some(int);
    }
    let float = number.as_f64()?;
    if float.is_finite()
        && float.fract() == 0.0
        && float >= i64::MIN as f64
        && float <= i64::MAX as f64
    {
        Some(float as i64)
    } else {
        None
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_drops_malformed_entries() {
        let doc = json!({
            "data": {
                "analyzers": [
                    {"nodeId": 1, "type": "SPI", "name": "SPI", "settings": []},
                    "not an object",
                    {"nodeId": true, "type": "SPI", "name": "bool id"},
                    {"nodeId": 2.5, "type": "SPI", "name": "fractional id"},
                    {"nodeId": 3, "type": 7, "name": "non-string type"},
                    {"nodeId": 4, "type": "I2C", "name": "I2C"}
                ]
            }
        });

        let records = analyzers(&doc).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].node_id, 1);
        assert_eq!(records[1].node_id, 4);
        assert_eq!(records[1].analyzer_type, "I2C");
    }

    #[test]
    fn test_index_accepts_integral_float_node_id() {
        let doc = json!({
            "data": {
                "analyzers": [
                    {"nodeId": 10028.0, "type": "Async Serial", "name": "UART"}
                ]
            }
        });

        let records = analyzers(&doc).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].node_id, 10028);
    }

    #[test]
    fn test_index_tolerates_missing_levels() {
        assert!(analyzers(&json!({})).unwrap().is_empty());
        assert!(analyzers(&json!({"data": {}})).unwrap().is_empty());
        assert!(analyzers(&json!({"data": {"analyzers": "nope"}}))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_index_rejects_non_object_root() {
        let err = analyzers(&json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidDocumentShape("array")));
    }

    #[test]
    fn test_find_analyzer() {
        let doc = json!({
            "data": {
                "analyzers": [
                    {"nodeId": 7, "type": "SPI", "name": "SPI", "settings": []}
                ]
            }
        });
        let records = analyzers(&doc).unwrap();

        assert_eq!(find_analyzer(&records, 7).unwrap().name, "SPI");
        let err = find_analyzer(&records, 8).unwrap_err();
        assert!(matches!(err, TemplateError::AnalyzerNotFound(8)));
    }

    #[test]
    fn test_session_name_fallback() {
        assert_eq!(
            session_name(&json!({"data": {"name": " Session 6 "}}), "fb"),
            "Session 6"
        );
        assert_eq!(session_name(&json!({"data": {"name": "  "}}), "fb"), "fb");
        assert_eq!(session_name(&json!({}), "fb"), "fb");
    }

    #[test]
    fn test_as_int_normalization() {
        assert_eq!(as_int(&json!(3)), Some(3));
        assert_eq!(as_int(&json!(3.0)), Some(3));
        assert_eq!(as_int(&json!(-2.0)), Some(-2));
        assert_eq!(as_int(&json!(3.5)), None);
        assert_eq!(as_int(&json!(true)), None);
        assert_eq!(as_int(&json!("3")), None);
        assert_eq!(as_int(&json!(null)), None);
    }
}
