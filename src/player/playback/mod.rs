//! Playback logic for the annotated player.
//!
//! This module holds the annotated intervals, the engine that fires them
//! against the playback clock, and caption track selection.

pub mod engine;
mod event;
mod subtitles;

pub use engine::{EffectPort, EventEngine};
pub use event::{EventKind, PlaybackEvent};
pub use subtitles::{Cue, SubtitleSelector, SubtitleTrack, DEFAULT_CUE_SECONDS};
