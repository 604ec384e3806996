//! Mouse input handling for the terminal host.
//!
//! Maps crossterm mouse events onto the player's pointer model: any movement
//! is pointer activity, the bottom rows are the controls strip, the scrubber
//! row seeks on click and scrubs on drag.

use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::player::media::TimeSource;
use crate::player::render::{bar_width, BAR_START_COL, CONTROL_ROWS};
use crate::player::session::PlaybackSession;
use crate::player::state::InputResult;

/// Where a pointer position falls in the terminal layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerTarget {
    /// Picture area above the controls
    Surface,
    /// Controls strip, outside the scrubber bar
    Controls,
    /// On the scrubber bar; offset in cells from the bar start, and bar width
    Scrubber { offset: f64, width: f64 },
}

/// Classify a terminal cell for a terminal of `term_cols` x `term_rows`.
pub fn pointer_target(column: u16, row: u16, term_cols: u16, term_rows: u16) -> PointerTarget {
    let controls_top = term_rows.saturating_sub(CONTROL_ROWS);
    if row < controls_top {
        return PointerTarget::Surface;
    }

    let progress_row = term_rows.saturating_sub(2);
    let width = bar_width(term_cols);
    if row == progress_row
        && column >= BAR_START_COL
        && ((column - BAR_START_COL) as usize) < width
    {
        return PointerTarget::Scrubber {
            offset: (column - BAR_START_COL) as f64,
            width: width as f64,
        };
    }

    PointerTarget::Controls
}

/// Handle a mouse event.
pub fn handle_mouse_event<M: TimeSource>(
    mouse: MouseEvent,
    session: &mut PlaybackSession<M>,
    term_cols: u16,
    term_rows: u16,
    now: Instant,
) -> InputResult {
    let target = pointer_target(mouse.column, mouse.row, term_cols, term_rows);
    // Mouse reports only arrive while the pointer is over the terminal
    session.set_hovering(true);
    session.set_controls_hovering(target != PointerTarget::Surface);

    match mouse.kind {
        MouseEventKind::Moved => session.on_pointer_move(now),
        MouseEventKind::Down(MouseButton::Left) => {
            session.on_pointer_move(now);
            match target {
                PointerTarget::Scrubber { offset, width } => {
                    session.seek_from_pointer(offset, width);
                }
                PointerTarget::Surface => {
                    if session.state().any_menu_open() {
                        session.close_menus();
                    } else {
                        session.toggle_play();
                    }
                }
                PointerTarget::Controls => {}
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            session.on_pointer_move(now);
            if let PointerTarget::Scrubber { offset, width } = target {
                session.scrub_to_pointer(offset, width, now);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => session.commit_scrub(),
        _ => {}
    }

    InputResult::Continue
}
