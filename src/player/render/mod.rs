//! Rendering components for the annotated player.
//!
//! The screen is the playback surface (letterboxed frame, caption, pause
//! message), an optional transcript panel on the right, and a controls strip
//! of `CONTROL_ROWS` rows at the bottom: separator, scrubber, status bar.

mod captions;
mod menu;
pub mod progress;
mod status;
mod surface;

use std::io::Write;

use anyhow::Result;

pub use captions::{
    centered_col, render_caption, render_pause_message, render_transcript, transcript_scroll,
    truncate_to_width,
};
pub use menu::{boxed, captions_menu_lines, render_menu, speed_menu_lines};
pub use progress::{
    bar_width, build_progress_bar_chars, format_elapsed, progress_fraction, render_progress_bar,
    seek_time_from_pointer, skip_regions, SkipRegion, BAR_START_COL,
};
pub use status::{build_status_line, format_rate, render_separator_line, render_status_bar};
pub use surface::{clear_rows, picture_cells, render_surface, CellRect};

use crate::player::media::TimeSource;
use crate::player::session::PlaybackSession;

/// Rows taken by the controls strip.
pub const CONTROL_ROWS: u16 = 3;

/// Smallest terminal the player can lay out.
pub const MIN_COLS: u16 = 40;
pub const MIN_ROWS: u16 = 10;

/// Narrowest transcript panel.
const MIN_TRANSCRIPT_WIDTH: u16 = 24;

/// Transcript panel width for a terminal `cols` wide.
pub fn transcript_width(cols: u16) -> u16 {
    (cols / 3).max(MIN_TRANSCRIPT_WIDTH).min(cols / 2)
}

/// Draw the whole player for a terminal of `cols` x `rows`.
pub fn render_frame<W: Write, M: TimeSource>(
    out: &mut W,
    session: &PlaybackSession<M>,
    cols: u16,
    rows: u16,
) -> Result<()> {
    let view = session.view();
    let surface_rows = rows.saturating_sub(CONTROL_ROWS);

    let (surface_cols, panel) = if view.show_transcript {
        let panel = transcript_width(cols);
        (cols - panel, Some(panel))
    } else {
        (cols, None)
    };

    render_surface(out, surface_cols, surface_rows, session.title(), &view)?;

    if let Some(panel) = panel {
        let cues = session
            .subtitles()
            .active_track()
            .map(|track| track.cues.as_slice())
            .unwrap_or(&[]);
        render_transcript(out, surface_cols, 0, panel, surface_rows, cues, view.cue_index)?;
    }

    let controls_top = rows.saturating_sub(CONTROL_ROWS);
    if view.controls_visible {
        let current_time = view
            .scrub_preview
            .unwrap_or_else(|| session.media().current_time());
        render_separator_line(out, cols, controls_top)?;
        render_progress_bar(
            out,
            cols,
            controls_top + 1,
            current_time,
            session.media().duration(),
            view.skip_regions,
        )?;
        render_status_bar(out, cols, controls_top + 2, &view)?;
    } else {
        clear_rows(out, cols, controls_top, CONTROL_ROWS)?;
    }

    if view.speed_menu_open {
        render_menu(out, cols, controls_top.saturating_sub(1), &speed_menu_lines(view.playback_rate))?;
    } else if view.captions_menu_open {
        let lines = captions_menu_lines(session.subtitles().languages(), view.caption_language);
        render_menu(out, cols, controls_top.saturating_sub(1), &lines)?;
    }

    Ok(())
}
