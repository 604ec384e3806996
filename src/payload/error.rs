//! Payload parsing errors.

use std::path::PathBuf;

/// Errors that can occur while reading an annotation payload.
///
/// `Io` and `Json` reject the whole payload. Every other variant describes a
/// single entry that is skipped while the rest of the payload is kept.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Failed to read payload {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Entry is not a JSON object")]
    NotAnObject,

    #[error("Missing field '{0}'")]
    MissingField(&'static str),

    #[error("Field '{field}' is not a number: {value}")]
    InvalidTime { field: &'static str, value: String },

    #[error("Field '{field}' must be a finite, non-negative time (got {value})")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("End {end} is before start {start}")]
    EndBeforeStart { start: f64, end: f64 },

    #[error("Skip event has no end time")]
    SkipWithoutEnd,

    #[error("Unknown event type '{0}'")]
    UnknownKind(String),
}

impl PayloadError {
    /// True if the error rejects the whole payload rather than one entry.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Json(_))
    }
}
