//! Play command handler

use std::path::Path;

use anyhow::{Context, Result};

use cueplay::player::render::format_elapsed;
use cueplay::player::{play_session, PlayOptions, PlaybackResult};
use cueplay::{AnnotationPayload, Config};

/// Play a payload in the terminal.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    config: &Config,
    payload_path: &Path,
    duration: f64,
    lang: Option<String>,
    rate: Option<f64>,
    autoplay: bool,
) -> Result<()> {
    if !duration.is_finite() || duration <= 0.0 {
        anyhow::bail!("Duration must be a positive number of seconds (got {})", duration);
    }

    let payload = AnnotationPayload::load(payload_path)?;
    tracing::info!(path = %payload_path.display(), duration, "starting playback");

    let options = PlayOptions {
        duration,
        language: lang,
        rate,
        autoplay,
    };
    let result = play_session(payload, &config.player, &options)
        .with_context(|| format!("Failed to play {}", payload_path.display()))?;

    match result {
        PlaybackResult::Finished => println!("Finished {}", payload_path.display()),
        PlaybackResult::Quit { position } => println!(
            "Stopped {} at {}",
            payload_path.display(),
            format_elapsed(position)
        ),
    }
    Ok(())
}
