//! Setting resolution: raw setting rows -> canonical (title, value) pairs.
//!
//! A raw row looks like one of:
//!
//! ```json
//! {"title": "Input Channel", "setting": {"type": "Channel", "value": 0}}
//! {"title": "Bit Rate", "setting": {"type": "NumberList", "value": 1,
//!     "options": [{"dropdownText": "9600", "value": 0},
//!                 {"dropdownText": "115200", "value": 1}]}}
//! ```
//!
//! Rows without a title are UI chrome (group headers, separators) and are
//! skipped. The fallback chain for dropdowns is: exact option match ->
//! numeric fallback with a warning -> error. Rows of unknown type get a
//! best-effort scalar passthrough.

use crate::error::TemplateError;
use crate::template::document::as_int;
use crate::template::types::{AnalyzerRecord, DropdownMode, ResolvedSettings, RowPolicy};
use serde_json::Value;

/// Outcome of resolving a single raw row.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// A canonical (title, scalar value) pair.
    Entry(String, Value),
    /// Row carries no setting (blank title, non-object row).
    Skip,
}

/// Resolved mapping for one analyzer plus any advisory warnings collected
/// along the way. Warnings never affect success; callers decide where to
/// print them.
#[derive(Debug, Default)]
pub struct ResolveOutcome {
    pub settings: ResolvedSettings,
    pub warnings: Vec<String>,
}

/// Resolve every setting row of one analyzer into a mapping.
///
/// Duplicate titles are last-wins in row order. Under
/// [`RowPolicy::Lenient`] a row error becomes a warning and the row is
/// skipped; under [`RowPolicy::Strict`] it aborts the extraction.
pub fn resolve_settings(
    analyzer: &AnalyzerRecord,
    mode: DropdownMode,
    policy: RowPolicy,
) -> Result<ResolveOutcome, TemplateError> {
    let mut outcome = ResolveOutcome::default();

    for row in &analyzer.settings {
        match resolve_row(row, mode, &mut outcome.warnings) {
            Ok(Resolved::Entry(title, value)) => {
                outcome.settings.insert(title, value);
            }
            Ok(Resolved::Skip) => {}
            Err(err) => match policy {
                RowPolicy::Strict => return Err(err),
                RowPolicy::Lenient => {
                    outcome.warnings.push(format!("skipping setting row: {err}"));
                }
            },
        }
    }

    Ok(outcome)
}

/// Resolve one raw setting row.
///
/// Advisory notices (e.g. a dropdown value with no matching option text)
/// are pushed onto `warnings`; they accompany a successful resolution.
pub fn resolve_row(
    row: &Value,
    mode: DropdownMode,
    warnings: &mut Vec<String>,
) -> Result<Resolved, TemplateError> {
    let Some(row) = row.as_object() else {
        return Ok(Resolved::Skip);
    };

    // Blank or missing title marks a non-setting UI row.
    let title = match row.get("title").and_then(Value::as_str) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().to_string(),
        _ => return Ok(Resolved::Skip),
    };

    let Some(setting) = row.get("setting").and_then(Value::as_object) else {
        return Err(TemplateError::MalformedSetting { title });
    };
    let Some(setting_type) = setting.get("type").and_then(Value::as_str) else {
        return Err(TemplateError::MalformedSetting { title });
    };

    let current = setting.get("value").unwrap_or(&Value::Null);

    match setting_type {
        "Channel" => {
            let channel = as_int(current).ok_or_else(|| TemplateError::InvalidChannelValue {
                title: title.clone(),
                value: current.clone(),
            })?;
            Ok(Resolved::Entry(title, channel.into()))
        }
        "NumberList" => resolve_number_list(title, setting, current, mode, warnings),
        other => resolve_fallback(title, other, current),
    }
}

/// Dropdown resolution. In text mode the numeric code is mapped to its
/// UI-visible dropdownText; in numeric mode the code itself is emitted.
fn resolve_number_list(
    title: String,
    setting: &serde_json::Map<String, Value>,
    current: &Value,
    mode: DropdownMode,
    warnings: &mut Vec<String>,
) -> Result<Resolved, TemplateError> {
    if mode == DropdownMode::Numeric {
        let code = as_int(current).ok_or_else(|| TemplateError::InvalidDropdownValue {
            title: title.clone(),
            value: current.clone(),
        })?;
        return Ok(Resolved::Entry(title, code.into()));
    }

    if let Some(options) = setting.get("options").and_then(Value::as_array) {
        for option in options {
            let Some(option) = option.as_object() else {
                continue;
            };
            let Some(text) = option.get("dropdownText").and_then(Value::as_str) else {
                continue;
            };
            if text.trim().is_empty() {
                continue;
            }
            if values_equal(option.get("value").unwrap_or(&Value::Null), current) {
                return Ok(Resolved::Entry(title, Value::String(text.to_string())));
            }
        }
    }

    // No option matched: keep the raw value rather than failing, since the
    // template stays usable for numeric-mode consumers.
    if let Some(code) = as_int(current) {
        warnings.push(format!(
            "NumberList {title:?} has no dropdownText match; emitting numeric {code}"
        ));
        return Ok(Resolved::Entry(title, code.into()));
    }
    if is_scalar(current) {
        warnings.push(format!(
            "NumberList {title:?} has no dropdownText match; emitting raw value {current}"
        ));
        return Ok(Resolved::Entry(title, current.clone()));
    }

    Err(TemplateError::InvalidDropdownValue {
        title,
        value: current.clone(),
    })
}

/// Best-effort passthrough for setting types without a dedicated rule.
/// Integral floats are normalized to integers for stable output.
fn resolve_fallback(
    title: String,
    setting_type: &str,
    current: &Value,
) -> Result<Resolved, TemplateError> {
    if let Some(int) = as_int(current) {
        return Ok(Resolved::Entry(title, int.into()));
    }
    if is_scalar(current) {
        return Ok(Resolved::Entry(title, current.clone()));
    }
    Err(TemplateError::UnsupportedSettingType {
        title,
        setting_type: setting_type.to_string(),
    })
}

fn is_scalar(value: &Value) -> bool {
    matches!(
        value,
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
    )
}

/// Option-code equality: integer comparison when both sides normalize to
/// integers, string-form comparison otherwise.
fn values_equal(a: &Value, b: &Value) -> bool {
    if let (Some(a), Some(b)) = (as_int(a), as_int(b)) {
        return a == b;
    }
    scalar_text(a) == scalar_text(b)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
