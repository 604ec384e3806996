//! Annotated playback intervals.

use std::fmt;

/// What an annotated interval does when playback enters it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Mute audio for the duration of the window
    Mute,
    /// Pause playback once, optionally showing a message
    Pause,
    /// Jump to the end of the window
    Skip,
}

impl EventKind {
    /// Name as written in payloads.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mute => "Mute",
            Self::Pause => "Pause",
            Self::Skip => "Skip",
        }
    }

    /// Parse a payload type name (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mute" => Some(Self::Mute),
            "pause" => Some(Self::Pause),
            "skip" => Some(Self::Skip),
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One annotated interval plus its engine-owned `active` flag.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackEvent {
    /// Position of the entry in the source payload
    pub index: usize,
    pub kind: EventKind,
    /// Window start in seconds
    pub start: f64,
    /// Window end in seconds (always present for Skip)
    pub end: Option<f64>,
    /// Text shown when a Pause fires
    pub message: Option<String>,
    /// Armed (true) or fired (false)
    pub active: bool,
}

impl PlaybackEvent {
    /// Create an armed event at payload position 0.
    pub fn new(kind: EventKind, start: f64, end: Option<f64>) -> Self {
        Self {
            index: 0,
            kind,
            start,
            end,
            message: None,
            active: true,
        }
    }

    pub fn mute(start: f64, end: f64) -> Self {
        Self::new(EventKind::Mute, start, Some(end))
    }

    pub fn pause(start: f64) -> Self {
        Self::new(EventKind::Pause, start, None)
    }

    pub fn skip(start: f64, end: f64) -> Self {
        Self::new(EventKind::Skip, start, Some(end))
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// End of the window; a missing end collapses the window to `start`.
    pub fn effective_end(&self) -> f64 {
        self.end.unwrap_or(self.start)
    }

    /// Whether `time` lies inside the closed window `[start, effective_end]`.
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.effective_end()
    }
}
