//! Input handling for the annotated player.
//!
//! This module handles keyboard and mouse input events, dispatching
//! them to the session and returning control flow signals.

pub mod keyboard;
mod mouse;

pub use keyboard::{
    handle_key_event, map_key, step_rate, Key, KeyAction, KeyInput, KeyOutcome, SeekSteps,
    RATE_LADDER,
};
pub use mouse::{handle_mouse_event, pointer_target, PointerTarget};

use std::time::Instant;

use crossterm::event::{Event, KeyEventKind};

use crate::player::media::TimeSource;
use crate::player::session::PlaybackSession;
use crate::player::state::InputResult;

/// Handle any terminal input event, dispatching to the appropriate handler.
///
/// # Arguments
/// * `event` - The crossterm event to handle
/// * `session` - The playback session receiving the input
/// * `term_size` - Current terminal size as (cols, rows), updated on resize
/// * `now` - Current instant, used to restart pointer timers
///
/// # Returns
/// `InputResult` indicating whether to continue or quit
pub fn handle_event<M: TimeSource>(
    event: Event,
    session: &mut PlaybackSession<M>,
    term_size: &mut (u16, u16),
    now: Instant,
) -> InputResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(key, session),
        Event::Mouse(mouse) => handle_mouse_event(mouse, session, term_size.0, term_size.1, now),
        Event::FocusGained => {
            session.set_hovering(true);
            session.on_pointer_move(now);
            InputResult::Continue
        }
        Event::FocusLost => {
            session.set_hovering(false);
            session.set_controls_hovering(false);
            InputResult::Continue
        }
        Event::Resize(cols, rows) => {
            *term_size = (cols, rows);
            session.state_mut().needs_render = true;
            InputResult::Continue
        }
        _ => InputResult::Continue,
    }
}
