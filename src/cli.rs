//! CLI definitions for cueplay
//!
//! This module is separate from main.rs so xtask can build man pages from
//! the same definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Version string: package version, plus the git SHA on dev builds.
pub fn version() -> &'static str {
    match option_env!("VERGEN_GIT_SHA") {
        Some(sha) if !sha.is_empty() && sha != "unknown" => {
            concat!(env!("CARGO_PKG_VERSION"), "-dev")
        }
        _ => env!("CARGO_PKG_VERSION"),
    }
}

/// Long version with build metadata.
pub fn long_version() -> String {
    format!(
        "{} (commit {}, built {})",
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_SHA").unwrap_or("release"),
        option_env!("CUEPLAY_BUILD_DATE").unwrap_or("unknown")
    )
}

#[derive(Parser, Debug)]
#[command(name = "cueplay")]
#[command(about = "Annotated playback in the terminal: mute, pause and skip intervals with captions")]
#[command(version = version(), long_version = long_version())]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play an annotation payload against a simulated media clock
    #[command(long_about = "Play an annotation payload in the terminal.

The media clock runs for --duration seconds. Mute, Pause and Skip
events fire as the clock reaches them and captions follow the
selected language.

KEYS:
    space        Play / pause
    ←/→          Seek -/+ 10s
    ,/.          Seek -/+ 1s
    </>          Slower / faster
    s, l         Speed menu, captions menu (pick with digits)
    c            Transcript panel
    f            Fullscreen
    0, Home      Start over
    Enter        Dismiss a pause message
    q, Esc       Quit

EXAMPLES:
    cueplay play lesson.json --duration 5400
    cueplay play lesson.json --duration 90 --lang es --rate 1.5")]
    Play {
        /// Annotation payload (JSON)
        payload: PathBuf,
        /// Media length in seconds
        #[arg(short, long)]
        duration: f64,
        /// Caption language to start with (overrides config)
        #[arg(short, long)]
        lang: Option<String>,
        /// Initial playback rate
        #[arg(short, long)]
        rate: Option<f64>,
        /// Start paused instead of playing
        #[arg(long)]
        paused: bool,
    },

    /// Validate a payload and list its annotations
    #[command(long_about = "Validate an annotation payload.

Prints every event and subtitle track, and the entries that would be
skipped with the reason. Exits with an error if the file cannot be
read or is not a JSON payload, or if any entry is rejected when
--strict is given.

EXAMPLES:
    cueplay check lesson.json
    cueplay check lesson.json --duration 5400 --strict")]
    Check {
        /// Annotation payload (JSON)
        payload: PathBuf,
        /// Media length in seconds, to report skip regions
        #[arg(short, long)]
        duration: Option<f64>,
        /// Fail if any entry is rejected
        #[arg(long)]
        strict: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the config file path
    Path,
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
