use thiserror::Error;

/// Markup no longer has the shape an extractor expects
///
/// Every variant keeps the raw text that was being parsed so a change on the
/// site can be diagnosed from the error alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// A detail page has no cell with this label
    #[error("label '{label}' not found on page")]
    MissingLabel { label: String, page: String },

    /// A cutoff string was not found in the remaining chunk text
    #[error("marker '{marker}' not found in chunk")]
    MissingMarker { marker: String, chunk: String },

    /// A field was located but its text could not be parsed
    #[error("invalid {field} value '{value}'")]
    InvalidValue {
        field: String,
        value: String,
        chunk: String,
    },
}

impl ExtractionError {
    pub(crate) fn missing_label(label: &str, page: &str) -> Self {
        Self::MissingLabel {
            label: label.to_string(),
            page: page.to_string(),
        }
    }

    pub(crate) fn missing_marker(marker: &str, chunk: &str) -> Self {
        Self::MissingMarker {
            marker: marker.to_string(),
            chunk: chunk.to_string(),
        }
    }

    pub(crate) fn invalid_value(field: &str, value: &str, chunk: &str) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            chunk: chunk.to_string(),
        }
    }

    /// The raw markup the extractor was working on when it failed
    pub fn context(&self) -> &str {
        match self {
            Self::MissingLabel { page, .. } => page,
            Self::MissingMarker { chunk, .. } | Self::InvalidValue { chunk, .. } => chunk,
        }
    }
}

/// Result type for extraction operations
pub type ExtractResult<T> = Result<T, ExtractionError>;
