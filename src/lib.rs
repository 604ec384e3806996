//! cueplay - annotated media playback
//!
//! Timed annotations for a media element: Mute, Pause and Skip intervals
//! fired against the playback clock, language-selectable captions, and the
//! player chrome around them (controls visibility, scrubber with skip
//! regions, keyboard shortcuts). A terminal host drives it all over a
//! simulated media clock.

pub mod cli;
pub mod config;
pub mod payload;
pub mod player;
pub mod timer;

pub use config::Config;
pub use payload::AnnotationPayload;
