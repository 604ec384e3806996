//! Caption line, pause message and transcript panel.

use std::io::Write;

use anyhow::Result;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::player::playback::Cue;
use crate::player::render::progress::format_elapsed;

const CAPTION_STYLE: &str = "\x1b[1;97;40m";
const MESSAGE_STYLE: &str = "\x1b[30;103m";
const ACTIVE_STYLE: &str = "\x1b[7m";
const DIM: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

/// Truncate `text` to at most `max_width` columns, adding `…` when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Column at which `text` starts when centered in `width` columns.
pub fn centered_col(text: &str, width: u16) -> u16 {
    ((width as usize).saturating_sub(text.width()) / 2) as u16
}

/// Render the active caption centered on `row` within the `width` columns
/// starting at `left`. Nothing is drawn for an empty caption.
pub fn render_caption<W: Write>(
    out: &mut W,
    left: u16,
    width: u16,
    row: u16,
    caption: &str,
) -> Result<()> {
    let caption = caption.trim();
    if caption.is_empty() {
        return Ok(());
    }
    // Multi-line cues are joined; the terminal has one caption row.
    let joined = caption.lines().map(str::trim).collect::<Vec<_>>().join(" ");
    let text = truncate_to_width(&joined, (width as usize).saturating_sub(2));
    let col = left + centered_col(&text, width);
    write!(
        out,
        "\x1b[{};{}H{}{}{}",
        row + 1,
        col + 1,
        CAPTION_STYLE,
        text,
        RESET
    )?;
    Ok(())
}

/// Render the message of a fired Pause event centered on `row`.
pub fn render_pause_message<W: Write>(
    out: &mut W,
    left: u16,
    width: u16,
    row: u16,
    message: &str,
) -> Result<()> {
    let hint = "  [enter]";
    let body = truncate_to_width(
        message,
        (width as usize).saturating_sub(hint.width() + 4),
    );
    let text = format!(" {}{} ", body, hint);
    let col = left + centered_col(&text, width);
    write!(
        out,
        "\x1b[{};{}H{}{}{}",
        row + 1,
        col + 1,
        MESSAGE_STYLE,
        text,
        RESET
    )?;
    Ok(())
}

/// First cue to show so that `active` stays visible in `rows` lines.
pub fn transcript_scroll(cue_count: usize, active: Option<usize>, rows: usize) -> usize {
    if rows == 0 || cue_count <= rows {
        return 0;
    }
    let max_start = cue_count - rows;
    match active {
        Some(index) => index.saturating_sub(rows / 2).min(max_start),
        None => 0,
    }
}

/// Render the transcript panel in the columns right of `left`, rows
/// `top..top + rows`, highlighting the active cue.
pub fn render_transcript<W: Write>(
    out: &mut W,
    left: u16,
    top: u16,
    panel_width: u16,
    rows: u16,
    cues: &[Cue],
    active: Option<usize>,
) -> Result<()> {
    if panel_width < 4 || rows == 0 {
        return Ok(());
    }
    let inner = panel_width as usize - 2;
    let start = transcript_scroll(cues.len(), active, rows as usize);

    for line in 0..rows {
        let mut output = format!("\x1b[{};{}H{}│{}", top + line + 1, left + 1, DIM, RESET);
        let index = start + line as usize;
        let (text, style) = match cues.get(index) {
            Some(cue) => {
                let entry = format!("{} {}", format_elapsed(cue.start), cue.text.replace('\n', " "));
                let style = if Some(index) == active { ACTIVE_STYLE } else { "" };
                (truncate_to_width(&entry, inner), style)
            }
            None if index == 0 => ("(no captions)".to_string(), DIM),
            None => (String::new(), ""),
        };
        let pad = inner.saturating_sub(text.width());
        output.push_str(style);
        output.push(' ');
        output.push_str(&text);
        output.push_str(&" ".repeat(pad));
        output.push_str(RESET);
        write!(out, "{}", output)?;
    }
    Ok(())
}
