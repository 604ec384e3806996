//! Scrubber rendering for the annotated player.
//!
//! Displays playback progress with skip regions, and converts pointer
//! positions on the scrubber back into playback times.

use std::io::Write;

use anyhow::Result;

use crate::player::playback::{EventKind, PlaybackEvent};

/// Column where the bar starts (after one cell of padding).
pub const BAR_START_COL: u16 = 1;

/// Columns taken by padding and the " HH:MM:SS/HH:MM:SS " time display.
const BAR_CHROME: usize = 20;

/// A rendered marker over a Skip event's interval, in percent of duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkipRegion {
    pub left_percent: f64,
    pub width_percent: f64,
}

/// Format seconds as `HH:MM:SS` (floored).
///
/// # Arguments
/// * `seconds` - Playback time in seconds
///
/// # Returns
/// A string in HH:MM:SS format; negative or non-finite input gives `00:00:00`
pub fn format_elapsed(seconds: f64) -> String {
    let total_secs = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}

/// Fraction of the media played, in `[0, 1]`.
///
/// Resolves to 0 while the duration is unknown, zero or invalid.
pub fn progress_fraction(current_time: f64, duration: Option<f64>) -> f64 {
    match duration {
        Some(d) if d.is_finite() && d > 0.0 && current_time.is_finite() => {
            (current_time / d).clamp(0.0, 1.0)
        }
        _ => 0.0,
    }
}

/// Skip region geometry for every Skip event.
///
/// Computed once when the duration becomes known; percentages keep it valid
/// at any rendered width. Empty while the duration is unknown or zero.
pub fn skip_regions(events: &[PlaybackEvent], duration: Option<f64>) -> Vec<SkipRegion> {
    let duration = match duration {
        Some(d) if d.is_finite() && d > 0.0 => d,
        _ => return Vec::new(),
    };

    events
        .iter()
        .filter(|event| event.kind == EventKind::Skip)
        .map(|event| {
            let start_percent = event.start / duration * 100.0;
            let end_percent = event.effective_end() / duration * 100.0;
            SkipRegion {
                left_percent: start_percent,
                width_percent: end_percent - start_percent,
            }
        })
        .collect()
}

/// Convert a pointer offset within the scrubber into a playback time.
///
/// # Arguments
/// * `offset` - Pointer position relative to the scrubber's left edge
/// * `width` - Scrubber width in the same units
/// * `duration` - Media duration, if known
pub fn seek_time_from_pointer(offset: f64, width: f64, duration: Option<f64>) -> f64 {
    let duration = match duration {
        Some(d) if d.is_finite() && d > 0.0 => d,
        _ => return 0.0,
    };
    if width <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    (offset / width * duration).clamp(0.0, duration)
}

/// Width of the bar for a terminal of `term_cols` columns.
pub fn bar_width(term_cols: u16) -> usize {
    (term_cols as usize).saturating_sub(BAR_CHROME)
}

/// Build the progress bar character array.
///
/// Creates a visual representation of the progress bar including
/// the playhead position and skip regions.
///
/// # Returns
/// A tuple of (bar_chars, filled_count) where bar_chars contains the visual
/// representation and filled_count is the number of filled positions.
pub fn build_progress_bar_chars(
    bar_width: usize,
    current_time: f64,
    duration: Option<f64>,
    regions: &[SkipRegion],
) -> (Vec<char>, usize) {
    let progress = progress_fraction(current_time, duration);
    let filled = (bar_width as f64 * progress) as usize;

    let mut bar: Vec<char> = vec!['─'; bar_width];

    for region in regions {
        let first = (region.left_percent / 100.0 * bar_width as f64).floor().max(0.0) as usize;
        let last = ((region.left_percent + region.width_percent) / 100.0 * bar_width as f64)
            .ceil()
            .max(0.0) as usize;
        for cell in bar.iter_mut().take(last.min(bar_width)).skip(first) {
            *cell = '░';
        }
    }

    // Playhead takes precedence over regions
    if filled < bar_width {
        bar[filled] = '⏺';
    }

    (bar, filled)
}

/// Render the scrubber row.
///
/// # Arguments
/// * `out` - Writer to render to
/// * `width` - Terminal width
/// * `row` - Row to render at (0-indexed)
/// * `current_time` - Current playback time
/// * `duration` - Media duration, if known
/// * `regions` - Skip regions computed at load
pub fn render_progress_bar<W: Write>(
    out: &mut W,
    width: u16,
    row: u16,
    current_time: f64,
    duration: Option<f64>,
    regions: &[SkipRegion],
) -> Result<()> {
    let bar_width = bar_width(width);
    let (bar, filled) = build_progress_bar_chars(bar_width, current_time, duration, regions);

    let time_display = format!(
        " {}/{}",
        format_elapsed(current_time),
        format_elapsed(duration.unwrap_or(0.0))
    );

    let mut output = String::with_capacity(width as usize * 4);
    output.push_str(&format!("\x1b[{};1H", row + 1)); // Move cursor
    output.push_str("\x1b[48;5;236m "); // Dark gray background + padding

    // ANSI color codes
    const GREEN: &str = "\x1b[32m";
    const YELLOW: &str = "\x1b[33m";
    const WHITE: &str = "\x1b[97m";
    const DARK_GREY: &str = "\x1b[90m";
    const GREY: &str = "\x1b[37m";

    for (i, &c) in bar.iter().enumerate() {
        if i < filled {
            output.push_str(GREEN);
            output.push('━');
        } else if c == '░' {
            output.push_str(YELLOW);
            output.push(c);
        } else if i == filled {
            output.push_str(WHITE);
            output.push(c);
        } else {
            output.push_str(DARK_GREY);
            output.push(c);
        }
    }

    output.push_str(GREY);
    output.push_str(&time_display);

    // Fill remaining width
    let used_width = 1 + bar_width + time_display.len();
    let remaining = (width as usize).saturating_sub(used_width);
    for _ in 0..remaining {
        output.push(' ');
    }

    output.push_str("\x1b[0m"); // Reset
    write!(out, "{}", output)?;

    Ok(())
}
