//! # Salvage - Analyzer Settings Template Extractor
//!
//! Logic 2 `.sal` session files carry a `meta.json` describing every
//! analyzer configured in the UI, including setting titles, selected
//! values, and the full option lists for dropdowns. The automation API
//! offers no way to read those settings back from a running session, so
//! salvage recovers them from saved sessions and re-serializes them as
//! reusable YAML/JSON templates.
//!
//! ## Modules
//!
//! - **template**: document loading, analyzer indexing, setting
//!   resolution, template emission, and batch file generation
//! - **error**: typed failures for malformed or unresolvable settings
//!
//! ## Quick Start
//!
//! ```rust
//! use salvage::{extract_template, TemplateOptions};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let doc = json!({
//!     "data": {
//!         "name": "Session 6",
//!         "analyzers": [{
//!             "nodeId": 10028,
//!             "type": "Async Serial",
//!             "name": "UART",
//!             "settings": [
//!                 {"title": "Input Channel", "setting": {"type": "Channel", "value": 3}}
//!             ]
//!         }]
//!     }
//! });
//!
//! let (template, warnings) = extract_template(&doc, 10028, &TemplateOptions::default())?;
//! assert_eq!(template, "settings:\n  Input Channel: 3\n");
//! assert!(warnings.is_empty());
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use serde_json::Value;

pub mod error;
pub mod template;

// Re-export commonly used types for convenience
pub use error::TemplateError;
pub use template::{
    AnalyzerRecord, DropdownMode, OutputFormat, ResolvedSettings, RowPolicy, TemplateOptions,
    WrapperMode,
};

/// Main entry point: render the settings template for one analyzer in an
/// already-parsed session document.
///
/// Returns the rendered template together with any advisory warnings
/// collected during resolution.
pub fn extract_template(
    doc: &Value,
    node_id: i64,
    options: &TemplateOptions,
) -> Result<(String, Vec<String>)> {
    let records = template::analyzers(doc)?;
    let analyzer = template::find_analyzer(&records, node_id)?;
    let outcome = template::resolve_settings(analyzer, options.dropdown, options.policy)?;
    let text = template::emit_template(
        &outcome.settings,
        options.wrapper.enabled(),
        options.format,
    )?;
    Ok((text, outcome.warnings))
}
