//! Speed and captions menus.
//!
//! Menus are small boxes drawn above the controls strip at the right edge.
//! Entries are numbered; pressing the number picks the entry.

use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use unicode_width::UnicodeWidthStr;

use crate::player::input::keyboard::RATE_LADDER;
use crate::player::render::status::format_rate;

/// Marker for the current entry.
const CURRENT: &str = "●";

/// Lines of the speed menu, current rate marked.
pub fn speed_menu_lines(current_rate: f64) -> Vec<String> {
    let mut lines = vec!["Speed".to_string()];
    for (i, &rate) in RATE_LADDER.iter().enumerate() {
        let marker = if (rate - current_rate).abs() < f64::EPSILON {
            CURRENT
        } else {
            " "
        };
        lines.push(format!("{} {} {}", i + 1, marker, format_rate(rate)));
    }
    lines
}

/// Lines of the captions menu, `0` is off, active language marked.
pub fn captions_menu_lines<'a>(
    languages: impl Iterator<Item = &'a str>,
    active: Option<&str>,
) -> Vec<String> {
    let mark = |selected: bool| if selected { CURRENT } else { " " };
    let mut lines = vec![
        "Captions".to_string(),
        format!("0 {} off", mark(active.is_none())),
    ];
    for (i, language) in languages.enumerate() {
        lines.push(format!(
            "{} {} {}",
            i + 1,
            mark(active == Some(language)),
            language
        ));
    }
    lines
}

/// Wrap lines in a box, padding to the widest line.
pub fn boxed(lines: &[String]) -> Vec<String> {
    let inner = lines.iter().map(|l| l.width()).max().unwrap_or(0);
    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!("┌{}┐", "─".repeat(inner + 2)));
    for line in lines {
        let pad = inner - line.width();
        out.push(format!("│ {}{} │", line, " ".repeat(pad)));
    }
    out.push(format!("└{}┘", "─".repeat(inner + 2)));
    out
}

/// Draw a menu box whose bottom edge sits on `bottom_row`, right-aligned.
pub fn render_menu<W: Write>(
    out: &mut W,
    width: u16,
    bottom_row: u16,
    lines: &[String],
) -> Result<()> {
    let boxed = boxed(lines);
    let box_width = boxed.first().map(|l| l.width()).unwrap_or(0) as u16;
    let col = width.saturating_sub(box_width + 1);
    let top = (bottom_row + 1).saturating_sub(boxed.len() as u16);

    for (i, line) in boxed.iter().enumerate() {
        queue!(
            out,
            MoveTo(col, top + i as u16),
            SetForegroundColor(Color::White),
            Print(line),
            ResetColor,
        )?;
    }
    Ok(())
}
