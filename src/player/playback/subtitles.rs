//! Caption track selection.
//!
//! Holds every caption track of the session keyed by language and resolves
//! the cue to display for a playback time.

/// Display time for a cue that has no explicit end.
pub const DEFAULT_CUE_SECONDS: f64 = 5.0;

/// A single caption cue.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds (`start + 5` when absent)
    pub end: Option<f64>,
    pub text: String,
}

impl Cue {
    pub fn new(start: f64, end: Option<f64>, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn effective_end(&self) -> f64 {
        self.end.unwrap_or(self.start + DEFAULT_CUE_SECONDS)
    }

    /// Check if this cue is shown at the given time (inclusive bounds).
    pub fn is_active_at(&self, time: f64) -> bool {
        self.start <= time && time <= self.effective_end()
    }
}

/// Caption cues for one language, in evaluation order.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleTrack {
    pub language: String,
    pub cues: Vec<Cue>,
}

impl SubtitleTrack {
    pub fn new(language: impl Into<String>, cues: Vec<Cue>) -> Self {
        Self {
            language: language.into(),
            cues,
        }
    }
}

/// Tracks plus the currently selected one.
#[derive(Debug, Default)]
pub struct SubtitleSelector {
    tracks: Vec<SubtitleTrack>,
    active: Option<usize>,
}

impl SubtitleSelector {
    pub fn new(tracks: Vec<SubtitleTrack>) -> Self {
        Self {
            tracks,
            active: None,
        }
    }

    /// Select a track by language, or turn captions off with `None`.
    ///
    /// The language `"off"` also turns captions off. Returns false if the
    /// language is unknown, in which case captions end up off.
    pub fn select_track(&mut self, language: Option<&str>) -> bool {
        let language = language.filter(|lang| *lang != "off");
        match language {
            None => {
                self.active = None;
                true
            }
            Some(lang) => {
                self.active = self.tracks.iter().position(|t| t.language == lang);
                if self.active.is_none() {
                    tracing::debug!(language = lang, "no caption track for language");
                }
                self.active.is_some()
            }
        }
    }

    pub fn active_track(&self) -> Option<&SubtitleTrack> {
        self.active.and_then(|i| self.tracks.get(i))
    }

    pub fn active_language(&self) -> Option<&str> {
        self.active_track().map(|t| t.language.as_str())
    }

    /// Languages available for selection, in payload order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.tracks.iter().map(|t| t.language.as_str())
    }

    /// Index of the first cue of the active track shown at `time`.
    pub fn cue_index_for_time(&self, time: f64) -> Option<usize> {
        self.active_track()?
            .cues
            .iter()
            .position(|cue| cue.is_active_at(time))
    }

    /// The cue to display at `time`, if any.
    pub fn cue_for_time(&self, time: f64) -> Option<&Cue> {
        let index = self.cue_index_for_time(time)?;
        self.active_track()?.cues.get(index)
    }
}
