//! Check command handler
//!
//! Prints what the player would load from a payload, and what it would skip.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, Result};

use cueplay::payload::Rejected;
use cueplay::player::playback::PlaybackEvent;
use cueplay::player::render::{format_elapsed, skip_regions};
use cueplay::AnnotationPayload;

/// Validate a payload and print a summary.
pub fn handle(payload_path: &Path, duration: Option<f64>, strict: bool) -> Result<()> {
    let payload = AnnotationPayload::load(payload_path)?;
    let events = payload.parse_events();
    let tracks = payload.parse_subtitles();

    let mut out = String::new();
    writeln!(out, "Payload: {}", payload_path.display())?;
    if let Some(title) = &payload.title {
        writeln!(out, "Title: {}", title)?;
    }

    writeln!(out, "Events: {}", events.items.len())?;
    for event in &events.items {
        writeln!(out, "  {}", describe_event(event))?;
    }

    writeln!(out, "Subtitles: {} track(s)", tracks.items.len())?;
    for track in &tracks.items {
        writeln!(out, "  {:<4} {} cue(s)", track.language, track.cues.len())?;
    }

    if let Some(duration) = duration {
        let regions = skip_regions(&events.items, Some(duration));
        writeln!(out, "Skip regions: {}", regions.len())?;
        for region in regions {
            writeln!(
                out,
                "  {:.1}% +{:.1}%",
                region.left_percent, region.width_percent
            )?;
        }
    }

    let rejected = events.rejected.len() + tracks.rejected.len();
    if rejected > 0 {
        writeln!(out, "Rejected: {}", rejected)?;
        write_rejected(&mut out, "event", &events.rejected)?;
        write_rejected(&mut out, "track", &tracks.rejected)?;
    }

    print!("{}", out);

    if strict && rejected > 0 {
        bail!("{} entr{} rejected", rejected, if rejected == 1 { "y" } else { "ies" });
    }
    Ok(())
}

fn describe_event(event: &PlaybackEvent) -> String {
    let mut line = format!(
        "#{:<3} {:<5} {}",
        event.index,
        event.kind.name(),
        format_elapsed(event.start)
    );
    if let Some(end) = event.end {
        line.push_str(&format!(" - {}", format_elapsed(end)));
    }
    if let Some(message) = &event.message {
        line.push_str(&format!("  \"{}\"", message));
    }
    line
}

fn write_rejected(out: &mut String, what: &str, rejected: &[Rejected]) -> std::fmt::Result {
    for entry in rejected {
        writeln!(out, "  {} #{}: {}", what, entry.index, entry.reason)?;
    }
    Ok(())
}
