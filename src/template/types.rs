use clap::ValueEnum;
use serde::Serialize;
use serde_json::{Map, Value};

/// One analyzer as recorded in a session document.
///
/// Construction happens once, during the indexing pass over the document;
/// records are immutable afterwards. `settings` keeps the raw rows exactly
/// as they appear in the source so the resolver can apply its own rules.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerRecord {
    /// Numeric identifier assigned by the session (`nodeId`).
    pub node_id: i64,

    /// Analyzer type tag, e.g. "Async Serial" or "SPI".
    #[serde(rename = "type")]
    pub analyzer_type: String,

    /// User-visible analyzer name.
    pub name: String,

    /// Raw setting rows, in document order.
    pub settings: Vec<Value>,
}

impl AnalyzerRecord {
    /// One-line listing row, e.g. `nodeId=10028 type="SPI" name="SPI"`.
    pub fn summary(&self) -> String {
        format!(
            "nodeId={} type={:?} name={:?}",
            self.node_id, self.analyzer_type, self.name
        )
    }
}

/// Resolved settings for one analyzer: UI title -> scalar value.
///
/// `serde_json::Map` gives last-wins semantics on duplicate titles and
/// sorted iteration for emission.
pub type ResolvedSettings = Map<String, Value>;

/// How enumerated (dropdown) settings are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DropdownMode {
    /// Emit the UI-visible dropdownText string (what the apply API wants).
    #[default]
    Text,
    /// Emit the raw numeric option code.
    Numeric,
}

/// What happens when a single setting row cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowPolicy {
    /// Skip the offending row with a warning and keep going.
    #[default]
    Lenient,
    /// Abort the whole extraction on the first row error.
    Strict,
}

/// Template serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Whether the emitted mapping is nested under the `settings:` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WrapperMode {
    /// Wrap the mapping under a top-level `settings` key (recommended).
    #[default]
    Settings,
    /// Emit the bare mapping.
    None,
}

impl WrapperMode {
    pub fn enabled(self) -> bool {
        matches!(self, WrapperMode::Settings)
    }
}

/// Configuration for a full extract-and-render pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateOptions {
    pub dropdown: DropdownMode,
    pub policy: RowPolicy,
    pub format: OutputFormat,
    pub wrapper: WrapperMode,
}
