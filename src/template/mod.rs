//! Analyzer template extraction.
//!
//! This module turns the analyzer entries of a session document into
//! reusable settings templates: index the analyzers, resolve each raw
//! setting row into a canonical (title, value) pair, then emit the mapping
//! as YAML-like or JSON text.

pub mod batch;
pub mod document;
pub mod emit;
pub mod resolve;
pub mod types;

pub use batch::{default_prefix, provenance_header, slugify, template_filename, write_templates};
pub use document::{
    analyzers, as_int, find_analyzer, load_json, load_session_archive, session_name, META_ENTRY,
};
pub use emit::{emit_template, WRAPPER_KEY};
pub use resolve::{resolve_row, resolve_settings, Resolved, ResolveOutcome};
pub use types::{
    AnalyzerRecord, DropdownMode, OutputFormat, ResolvedSettings, RowPolicy, TemplateOptions,
    WrapperMode,
};
