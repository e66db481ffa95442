//! Batch template generation: one YAML file per analyzer.
//!
//! Filenames combine a caller-supplied prefix with slugged analyzer
//! identity so a whole session extracts without collisions. The output
//! directory must already exist; this module never creates directories.

use crate::template::document::META_ENTRY;
use crate::template::emit::emit_template;
use crate::template::resolve::resolve_settings;
use crate::template::types::{AnalyzerRecord, DropdownMode, OutputFormat, RowPolicy};
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Slug token used when a component normalizes to nothing.
pub const EMPTY_SLUG: &str = "unnamed";

/// Normalize one filename component: lowercase, `&` -> `and`,
/// non-alphanumeric runs collapsed to single dashes, bounded length.
pub fn slugify(text: &str, max_len: usize) -> String {
    let lowered = text.trim().to_lowercase().replace('&', "and");
    let mut slug = NON_ALNUM
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string();
    if slug.is_empty() {
        return EMPTY_SLUG.to_string();
    }
    if slug.len() > max_len {
        // Slugs are pure ASCII at this point, so byte truncation is safe.
        slug.truncate(max_len);
        while slug.ends_with('-') {
            slug.pop();
        }
    }
    slug
}

/// Collision-resistant template filename for one analyzer.
pub fn template_filename(prefix: &str, analyzer: &AnalyzerRecord) -> String {
    format!(
        "{}-{}-{}-nodeid-{}.yaml",
        prefix,
        slugify(&analyzer.analyzer_type, 20),
        slugify(&analyzer.name, 60),
        analyzer.node_id
    )
}

/// Comment block recording where a template came from.
pub fn provenance_header(source: &Path, session: &str, analyzer: &AnalyzerRecord) -> String {
    format!(
        "#\n\
         # Generated from: {} ({})\n\
         # Session: {}\n\
         # Analyzer: {}\n\
         #\n\
         # Notes:\n\
         # - Keys and option strings must match the Logic 2 UI labels exactly.\n\
         # - Dropdown selections are emitted as UI-visible strings (dropdownText) by default.\n\
         #\n",
        source.display(),
        META_ENTRY,
        session,
        analyzer.summary()
    )
}

/// Write one wrapped YAML template per analyzer into `out_dir`.
///
/// `out_dir` must already exist; a missing directory surfaces as the write
/// error it causes. Resolution warnings go to stderr. Returns the number
/// of files written.
pub fn write_templates(
    analyzers: &[AnalyzerRecord],
    source: &Path,
    session: &str,
    out_dir: &Path,
    prefix: &str,
    dropdown: DropdownMode,
    policy: RowPolicy,
) -> Result<usize> {
    let mut written = 0;

    for analyzer in analyzers {
        let outcome = resolve_settings(analyzer, dropdown, policy)
            .with_context(|| format!("failed to resolve {}", analyzer.summary()))?;
        for warning in &outcome.warnings {
            eprintln!("warning: {warning}");
        }

        let body = emit_template(&outcome.settings, true, OutputFormat::Yaml)?;
        let path = out_dir.join(template_filename(prefix, analyzer));
        let mut content = provenance_header(source, session, analyzer);
        content.push_str(&body);
        fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written += 1;
    }

    Ok(written)
}

/// Prefix used when the caller supplies none: the slugged session name.
pub fn default_prefix(session: &str) -> String {
    slugify(session, 40)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analyzer() -> AnalyzerRecord {
        AnalyzerRecord {
            node_id: 10028,
            analyzer_type: "Async Serial".to_string(),
            name: "UART (debug & trace)".to_string(),
            settings: vec![
                json!({"title": "Input Channel", "setting": {"type": "Channel", "value": 2}}),
            ],
        }
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Async Serial", 20), "async-serial");
        assert_eq!(slugify("UART (debug & trace)", 60), "uart-debug-and-trace");
        assert_eq!(slugify("  --spaced--  ", 20), "spaced");
        assert_eq!(slugify("###", 20), "unnamed");
        assert_eq!(slugify("", 20), "unnamed");
    }

    #[test]
    fn test_slugify_truncation_strips_trailing_dash() {
        assert_eq!(slugify("abc def", 4), "abc");
        assert_eq!(slugify("abcdef", 4), "abcd");
    }

    #[test]
    fn test_template_filename() {
        assert_eq!(
            template_filename("session6", &analyzer()),
            "session6-async-serial-uart-debug-and-trace-nodeid-10028.yaml"
        );
    }

    #[test]
    fn test_provenance_header_contents() {
        let header = provenance_header(Path::new("/tmp/Session 6.sal"), "Session 6", &analyzer());
        assert!(header.starts_with("#\n"));
        assert!(header.contains("# Generated from: /tmp/Session 6.sal (meta.json)"));
        assert!(header.contains("# Session: Session 6"));
        assert!(header.contains("nodeId=10028"));
        for line in header.lines() {
            assert!(line.is_empty() || line.starts_with('#'));
        }
    }

    #[test]
    fn test_write_templates() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![analyzer()];

        let written = write_templates(
            &records,
            Path::new("session.sal"),
            "Session 6",
            dir.path(),
            "session6",
            DropdownMode::Text,
            RowPolicy::Lenient,
        )
        .unwrap();
        assert_eq!(written, 1);

        let path = dir
            .path()
            .join("session6-async-serial-uart-debug-and-trace-nodeid-10028.yaml");
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("# Session: Session 6"));
        assert!(content.ends_with("settings:\n  Input Channel: 2\n"));
    }

    #[test]
    fn test_write_templates_missing_dir_fails_without_creating() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let result = write_templates(
            &[analyzer()],
            Path::new("session.sal"),
            "Session 6",
            &missing,
            "p",
            DropdownMode::Text,
            RowPolicy::Lenient,
        );
        assert!(result.is_err());
        assert!(!missing.exists());
    }
}
