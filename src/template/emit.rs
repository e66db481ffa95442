//! Template emission: resolved settings -> deterministic text.
//!
//! Keys are always emitted in lexicographic order, no matter what order
//! resolution inserted them in. YAML output quotes every string with
//! JSON-style escaping so the values survive YAML's own type inference
//! ("ON", "1.0", "null" and friends stay strings).

use crate::template::types::{OutputFormat, ResolvedSettings};
use anyhow::Result;
use serde_json::Value;

/// Fixed container key used when wrapping is enabled.
pub const WRAPPER_KEY: &str = "settings";

/// Render a resolved settings mapping. Output always ends with a newline.
pub fn emit_template(
    settings: &ResolvedSettings,
    wrapper: bool,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(emit_yaml(settings, wrapper)),
        OutputFormat::Json => emit_json(settings, wrapper),
    }
}

fn emit_yaml(settings: &ResolvedSettings, wrapper: bool) -> String {
    if settings.is_empty() {
        return if wrapper {
            format!("{WRAPPER_KEY}: {{}}\n")
        } else {
            "{}\n".to_string()
        };
    }

    let mut lines = Vec::with_capacity(settings.len() + 1);
    let indent = if wrapper {
        lines.push(format!("{WRAPPER_KEY}:"));
        "  "
    } else {
        ""
    };

    let mut keys: Vec<&String> = settings.keys().collect();
    keys.sort();
    for key in keys {
        lines.push(format!("{indent}{key}: {}", yaml_scalar(&settings[key])));
    }

    lines.join("\n") + "\n"
}

fn emit_json(settings: &ResolvedSettings, wrapper: bool) -> Result<String> {
    let payload = if wrapper {
        let mut outer = ResolvedSettings::new();
        outer.insert(WRAPPER_KEY.to_string(), Value::Object(settings.clone()));
        Value::Object(outer)
    } else {
        Value::Object(settings.clone())
    };
    Ok(serde_json::to_string_pretty(&payload)? + "\n")
}

/// Encode one scalar for the YAML-like format.
///
/// serde_json's rendering already matches what we want: quoted/escaped
/// strings with non-ASCII preserved, bare true/false, plain decimal
/// integers, round-trippable floats, and a bare null. Non-scalar values
/// never reach this point from the resolver; anything else is emitted as
/// its quoted JSON text.
fn yaml_scalar(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => value.to_string(),
        other => Value::String(other.to_string()).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(pairs: &[(&str, Value)]) -> ResolvedSettings {
        let mut map = ResolvedSettings::new();
        for (key, value) in pairs {
            map.insert(key.to_string(), value.clone());
        }
        map
    }

    #[test]
    fn test_yaml_keys_sorted() {
        let map = settings(&[("b", json!(2)), ("a", json!(1)), ("c", json!(3))]);
        let text = emit_template(&map, false, OutputFormat::Yaml).unwrap();
        assert_eq!(text, "a: 1\nb: 2\nc: 3\n");
    }

    #[test]
    fn test_yaml_wrapped() {
        let map = settings(&[("Bit Rate", json!("115200"))]);
        let text = emit_template(&map, true, OutputFormat::Yaml).unwrap();
        assert_eq!(text, "settings:\n  Bit Rate: \"115200\"\n");
    }

    #[test]
    fn test_yaml_scalar_encoding() {
        let map = settings(&[
            ("bool", json!(true)),
            ("float", json!(2.5)),
            ("int", json!(-7)),
            ("null", json!(null)),
            ("text", json!("a \"quoted\" value")),
            ("unicode", json!("münchen")),
        ]);
        let text = emit_template(&map, false, OutputFormat::Yaml).unwrap();
        assert_eq!(
            text,
            concat!(
                "bool: true\n",
                "float: 2.5\n",
                "int: -7\n",
                "null: null\n",
                "text: \"a \\\"quoted\\\" value\"\n",
                "unicode: \"münchen\"\n",
            )
        );
    }

    #[test]
    fn test_empty_mapping_output() {
        let empty = ResolvedSettings::new();
        assert_eq!(
            emit_template(&empty, true, OutputFormat::Yaml).unwrap(),
            "settings: {}\n"
        );
        assert_eq!(
            emit_template(&empty, false, OutputFormat::Yaml).unwrap(),
            "{}\n"
        );
        assert_eq!(
            emit_template(&empty, false, OutputFormat::Json).unwrap(),
            "{}\n"
        );
    }

    #[test]
    fn test_json_round_trip() {
        let map = settings(&[
            ("Bit Rate", json!("115200")),
            ("Input Channel", json!(3)),
            ("Inverted", json!(false)),
        ]);
        let text = emit_template(&map, false, OutputFormat::Json).unwrap();
        let reparsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed, Value::Object(map));
    }

    #[test]
    fn test_json_wrapper_sole_top_level_key() {
        let map = settings(&[("Input Channel", json!(0))]);
        let text = emit_template(&map, true, OutputFormat::Json).unwrap();
        let reparsed: Value = serde_json::from_str(&text).unwrap();
        let root = reparsed.as_object().unwrap();
        assert_eq!(root.len(), 1);
        assert_eq!(root[WRAPPER_KEY], json!({"Input Channel": 0}));
    }
}
