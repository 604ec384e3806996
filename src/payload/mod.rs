//! Annotation payload parsing
//!
//! A payload is the static, per-video data handed over by the content
//! management side:
//!
//! ```json
//! {
//!   "title": "Ixcanul",
//!   "events": [
//!     { "type": "Mute", "start": 10, "end": 20 },
//!     { "type": "Pause", "start": 42.5, "message": "Discuss this scene" },
//!     { "type": "Skip", "start": "948.57", "end": "983.13" }
//!   ],
//!   "subtitles": [
//!     { "language": "en", "content": [ { "start": 2, "end": 4, "text": "Hello" } ] }
//!   ]
//! }
//! ```
//!
//! Times may be JSON numbers or numeric strings. Only a structurally broken
//! file is rejected as a whole; individual bad entries are logged, reported
//! and skipped.

mod error;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use error::PayloadError;

use crate::player::playback::{Cue, EventKind, PlaybackEvent, SubtitleTrack};

/// Raw payload as read from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub events: Vec<Value>,
    #[serde(default)]
    pub subtitles: Vec<Value>,
}

/// A payload entry that could not be used.
#[derive(Debug)]
pub struct Rejected {
    /// Position of the entry in its list
    pub index: usize,
    pub reason: PayloadError,
}

/// Result of interpreting one payload list.
#[derive(Debug)]
pub struct Parsed<T> {
    pub items: Vec<T>,
    pub rejected: Vec<Rejected>,
}

impl<T> Parsed<T> {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(rename = "type", default)]
    kind: Value,
    #[serde(default)]
    start: Value,
    #[serde(default)]
    end: Value,
    #[serde(default)]
    message: Value,
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    #[serde(default)]
    language: Value,
    #[serde(default)]
    content: Value,
}

#[derive(Debug, Deserialize)]
struct RawCue {
    #[serde(default)]
    start: Value,
    #[serde(default)]
    end: Value,
    #[serde(default)]
    text: Value,
}

impl AnnotationPayload {
    /// Parse a payload from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a payload file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PayloadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PayloadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Interpret the event list, keeping payload order.
    ///
    /// Each rejected entry is logged with `warn!`.
    pub fn parse_events(&self) -> Parsed<PlaybackEvent> {
        let mut parsed = Parsed::new();
        for (index, value) in self.events.iter().enumerate() {
            match parse_event(index, value) {
                Ok(event) => parsed.items.push(event),
                Err(reason) => {
                    tracing::warn!(index, %reason, "skipping malformed event");
                    parsed.rejected.push(Rejected { index, reason });
                }
            }
        }
        parsed
    }

    /// Interpret the subtitle list.
    ///
    /// Rejected tracks are reported with their track index. Rejected cues
    /// are only logged; the rest of their track is kept.
    pub fn parse_subtitles(&self) -> Parsed<SubtitleTrack> {
        let mut parsed = Parsed::new();
        for (index, value) in self.subtitles.iter().enumerate() {
            match parse_track(value) {
                Ok(track) => parsed.items.push(track),
                Err(reason) => {
                    tracing::warn!(index, %reason, "skipping malformed subtitle track");
                    parsed.rejected.push(Rejected { index, reason });
                }
            }
        }
        parsed
    }
}

fn parse_event(index: usize, value: &Value) -> Result<PlaybackEvent, PayloadError> {
    if !value.is_object() {
        return Err(PayloadError::NotAnObject);
    }
    let raw: RawEvent = serde_json::from_value(value.clone())?;

    let kind_name = raw.kind.as_str().ok_or(PayloadError::MissingField("type"))?;
    let kind =
        EventKind::parse(kind_name).ok_or_else(|| PayloadError::UnknownKind(kind_name.into()))?;

    let start = parse_seconds(&raw.start, "start")?;
    let end = parse_optional_seconds(&raw.end, "end")?;
    if let Some(end) = end {
        if end < start {
            return Err(PayloadError::EndBeforeStart { start, end });
        }
    }
    if kind == EventKind::Skip && end.is_none() {
        return Err(PayloadError::SkipWithoutEnd);
    }

    let message = match (kind, raw.message) {
        (EventKind::Pause, Value::String(text)) if !text.is_empty() => Some(text),
        _ => None,
    };

    let mut event = PlaybackEvent::new(kind, start, end).with_index(index);
    event.message = message;
    Ok(event)
}

fn parse_track(value: &Value) -> Result<SubtitleTrack, PayloadError> {
    if !value.is_object() {
        return Err(PayloadError::NotAnObject);
    }
    let raw: RawTrack = serde_json::from_value(value.clone())?;
    let language = raw
        .language
        .as_str()
        .filter(|lang| !lang.is_empty())
        .ok_or(PayloadError::MissingField("language"))?
        .to_string();

    // A track without a cue list is kept with no cues
    let entries = raw.content.as_array().map(Vec::as_slice).unwrap_or(&[]);
    let mut cues = Vec::with_capacity(entries.len());
    for (index, cue) in entries.iter().enumerate() {
        match parse_cue(cue) {
            Ok(cue) => cues.push(cue),
            Err(reason) => {
                tracing::warn!(%language, index, %reason, "skipping malformed cue");
            }
        }
    }

    Ok(SubtitleTrack { language, cues })
}

fn parse_cue(value: &Value) -> Result<Cue, PayloadError> {
    if !value.is_object() {
        return Err(PayloadError::NotAnObject);
    }
    let raw: RawCue = serde_json::from_value(value.clone())?;
    let start = parse_seconds(&raw.start, "start")?;
    let end = parse_optional_seconds(&raw.end, "end")?;
    if let Some(end) = end {
        if end < start {
            return Err(PayloadError::EndBeforeStart { start, end });
        }
    }
    let text = raw
        .text
        .as_str()
        .ok_or(PayloadError::MissingField("text"))?
        .to_string();
    Ok(Cue { start, end, text })
}

/// Read a time in seconds from a JSON number or numeric string.
fn parse_seconds(value: &Value, field: &'static str) -> Result<f64, PayloadError> {
    let seconds = match value {
        Value::Null => return Err(PayloadError::MissingField(field)),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| PayloadError::InvalidTime {
        field,
        value: value.to_string(),
    })?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(PayloadError::OutOfRange {
            field,
            value: seconds,
        });
    }
    Ok(seconds)
}

fn parse_optional_seconds(value: &Value, field: &'static str) -> Result<Option<f64>, PayloadError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        other => parse_seconds(other, field).map(Some),
    }
}
