//! Annotated media player
//!
//! Plays media with timed annotations layered on top: mute, pause and skip
//! intervals fire as the playback clock reaches them, captions follow the
//! selected language track, and the controls hide while the pointer rests.
//!
//! # Architecture
//!
//! The player is organized into submodules:
//! - `media`: the `TimeSource` view of a media element, and a simulated clock
//! - `playback/`: annotation events, the event engine and caption tracks
//! - `session`: `PlaybackSession`, which wires one media element to the rest
//! - `state`: UI flags of a session (menus, panels, pause message)
//! - `visibility`: the controls visibility state machine
//! - `fullscreen`, `layout`: host capabilities and picture geometry
//! - `input/`: keyboard and mouse dispatch
//! - `render/`: terminal rendering (surface, captions, scrubber, status bar, menus)
//!
//! # Usage
//!
//! ```no_run
//! use cueplay::payload::AnnotationPayload;
//! use cueplay::player::{play_session, PlayOptions, PlaybackResult};
//! use cueplay::Config;
//!
//! let payload = AnnotationPayload::load("annotations.json").unwrap();
//! let options = PlayOptions { duration: 5400.0, language: None, rate: None, autoplay: true };
//! let config = Config::load().unwrap();
//! match play_session(payload, &config.player, &options).unwrap() {
//!     PlaybackResult::Finished => println!("Finished"),
//!     PlaybackResult::Quit { position } => println!("Stopped at {:.1}s", position),
//! }
//! ```

mod error;
pub mod fullscreen;
pub mod input;
pub mod layout;
pub mod media;
mod native;
pub mod playback;
pub mod render;
pub mod session;
pub mod state;
pub mod visibility;

pub use error::PlayerError;
pub use media::{SimulatedMedia, TimeSource};
pub use native::{
    build_session, check_terminal_size, play_session, run_loop, CrosstermEventSource,
    EventSource, PlayOptions, PlaybackResult,
};
pub use session::{PlaybackSession, PlayerView, SessionOptions};
pub use state::{InputResult, PlayerState};
