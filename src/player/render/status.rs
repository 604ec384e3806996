//! Status bar rendering for the annotated player.
//!
//! Displays playback state, rate, mute and caption indicators, and keyboard
//! shortcuts.

use std::io::Write;

use anyhow::Result;
use unicode_width::UnicodeWidthStr;

use crate::player::session::PlayerView;

const WHITE: &str = "\x1b[97m";
const GREEN: &str = "\x1b[32m";
const DARK_GREY: &str = "\x1b[90m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Shortcut hints shown after the indicators, as (key, action).
const HINTS: &[(&str, &str)] = &[
    ("space", "play"),
    ("←→", "seek"),
    ("<>", "rate"),
    ("s", "spd"),
    ("l", "cc"),
    ("c", "txt"),
    ("f", "full"),
    ("q", "quit"),
];

/// Colored line that tracks its visible width.
#[derive(Debug, Default)]
struct Line {
    text: String,
    width: usize,
}

impl Line {
    fn push(&mut self, color: &str, segment: &str) {
        self.text.push_str(color);
        self.text.push_str(segment);
        self.width += segment.width();
    }
}

/// Format a playback rate the way the menu lists it (`1x`, `1.25x`).
pub fn format_rate(rate: f64) -> String {
    let formatted = format!("{:.2}", rate);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{}x", trimmed)
}

/// Build the status line text and its visible width.
pub fn build_status_line(view: &PlayerView<'_>) -> (String, usize) {
    let mut line = Line::default();
    line.push(WHITE, " ");
    line.push(WHITE, if view.playing { "⏸ " } else { "▶ " });

    line.push(DARK_GREY, "spd:");
    line.push(WHITE, &format!("{} ", format_rate(view.playback_rate)));

    if view.muted {
        line.push(RED, "[muted] ");
    }

    match view.caption_language {
        Some(language) => line.push(GREEN, &format!("[cc:{}] ", language)),
        None => line.push(DARK_GREY, "[cc:off] "),
    }

    if !view.skip_regions.is_empty() {
        line.push(YELLOW, &format!("░{} ", view.skip_regions.len()));
    }

    line.push(DARK_GREY, "│");
    for (key, action) in HINTS {
        line.push(CYAN, &format!(" {}", key));
        line.push(DARK_GREY, &format!(":{}", action));
    }

    (line.text, line.width)
}

/// Render a separator line.
pub fn render_separator_line<W: Write>(out: &mut W, width: u16, row: u16) -> Result<()> {
    let mut output = String::with_capacity(width as usize * 3 + 20);
    output.push_str(&format!("\x1b[{};1H{}", row + 1, DARK_GREY));
    for _ in 0..width {
        output.push('─');
    }
    output.push_str(RESET);
    write!(out, "{}", output)?;
    Ok(())
}

/// Render the status/controls bar.
///
/// # Arguments
/// * `out` - Writer to render to
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
/// * `view` - Current player view
pub fn render_status_bar<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    view: &PlayerView<'_>,
) -> Result<()> {
    let (line, visible_len) = build_status_line(view);

    let mut output = String::with_capacity(line.len() + width as usize + 16);
    output.push_str(&format!("\x1b[{};1H", row + 1));
    output.push_str(&line);

    // Pad to full width to overwrite any leftover content
    let padding = (width as usize).saturating_sub(visible_len);
    output.extend(std::iter::repeat(' ').take(padding));

    output.push_str(RESET);
    write!(out, "{}", output)?;
    Ok(())
}
