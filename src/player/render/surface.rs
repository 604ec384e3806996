//! Playback surface: the letterboxed picture frame and its overlays.
//!
//! The terminal has no picture to show, so the surface draws the 16:9 frame
//! the picture would occupy and places the caption and pause message inside
//! it, the same way the overlay follows the picture in a graphical host.

use std::io::Write;

use anyhow::Result;

use crate::player::layout::overlay_rect;
use crate::player::render::captions::{
    centered_col, render_caption, render_pause_message, truncate_to_width,
};
use crate::player::session::PlayerView;

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

const FRAME: &str = "\x1b[90m";
const TITLE: &str = "\x1b[1;97m";
const RESET: &str = "\x1b[0m";

/// Picture frame in cells, 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

/// Letterboxed picture frame for a surface of `cols` x `rows` cells.
pub fn picture_cells(cols: u16, rows: u16) -> CellRect {
    let rect = overlay_rect(cols as f64, rows as f64 * CELL_ASPECT);
    CellRect {
        col: rect.x.round() as u16,
        row: (rect.y / CELL_ASPECT).round() as u16,
        width: rect.width.round() as u16,
        height: (rect.height / CELL_ASPECT).round() as u16,
    }
}

/// Clear rows `top..top + rows` in columns `0..cols`.
pub fn clear_rows<W: Write>(out: &mut W, cols: u16, top: u16, rows: u16) -> Result<()> {
    let blank = " ".repeat(cols as usize);
    for row in top..top + rows {
        write!(out, "\x1b[{};1H{}", row + 1, blank)?;
    }
    Ok(())
}

/// Draw the surface in columns `0..cols`, rows `0..rows`.
pub fn render_surface<W: Write>(
    out: &mut W,
    cols: u16,
    rows: u16,
    title: Option<&str>,
    view: &PlayerView<'_>,
) -> Result<()> {
    clear_rows(out, cols, 0, rows)?;

    let frame = picture_cells(cols, rows);
    if frame.width < 4 || frame.height < 3 {
        return Ok(());
    }
    draw_frame(out, frame)?;

    let inner_width = frame.width - 2;
    if let Some(title) = title {
        let title = truncate_to_width(title, inner_width.saturating_sub(2) as usize);
        let col = frame.col + 1 + centered_col(&title, inner_width);
        write!(out, "\x1b[{};{}H{}{}{}", frame.row + 2, col + 1, TITLE, title, RESET)?;
    }

    if !view.started {
        let hint = "▶ space to play";
        let col = frame.col + 1 + centered_col(hint, inner_width);
        write!(out, "\x1b[{};{}H{}", frame.row + frame.height / 2 + 1, col + 1, hint)?;
    }

    let left = frame.col + 1;
    if let Some(message) = view.pause_message {
        let row = frame.row + frame.height / 2;
        render_pause_message(out, left, inner_width, row, message)?;
    }

    // Caption sits on the last row inside the frame
    let row = frame.row + frame.height - 2;
    render_caption(out, left, inner_width, row, view.caption)?;

    Ok(())
}

fn draw_frame<W: Write>(out: &mut W, frame: CellRect) -> Result<()> {
    let horizontal = "─".repeat(frame.width as usize - 2);
    let col = frame.col + 1;
    write!(out, "{}", FRAME)?;
    write!(out, "\x1b[{};{}H┌{}┐", frame.row + 1, col, horizontal)?;
    for row in frame.row + 1..frame.row + frame.height - 1 {
        write!(out, "\x1b[{};{}H│", row + 1, col)?;
        write!(out, "\x1b[{};{}H│", row + 1, col + frame.width - 1)?;
    }
    write!(out, "\x1b[{};{}H└{}┘", frame.row + frame.height, col, horizontal)?;
    write!(out, "{}", RESET)?;
    Ok(())
}
