//! Error types for template extraction.

use serde_json::Value;
use thiserror::Error;

/// Failures produced while indexing a session document or resolving
/// individual setting rows.
///
/// Structural absence inside the document (missing `data`, missing
/// `analyzers`) is not an error; those paths return empty collections
/// instead. These variants cover the cases where the caller asked for
/// something specific, or where a row is present but unusable.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The document root was not a JSON object. Carries the actual JSON
    /// type name for the message.
    #[error("document root must be an object, got {0}")]
    InvalidDocumentShape(&'static str),

    /// The requested analyzer nodeId does not exist in the document.
    #[error("analyzer nodeId {0} not found")]
    AnalyzerNotFound(i64),

    /// A titled row has no usable `setting` descriptor object.
    #[error("setting {title:?} is missing its setting object")]
    MalformedSetting { title: String },

    /// A Channel setting whose value does not normalize to an integer.
    #[error("Channel setting {title:?} has non-integer value {value}")]
    InvalidChannelValue { title: String, value: Value },

    /// A NumberList setting whose current value cannot be rendered in the
    /// requested dropdown mode.
    #[error("NumberList setting {title:?} has unusable current value {value}")]
    InvalidDropdownValue { title: String, value: Value },

    /// A setting type the resolver has no rule for and whose value is not
    /// a plain scalar.
    #[error("unsupported setting type {setting_type:?} for {title:?}")]
    UnsupportedSettingType { title: String, setting_type: String },
}
