//! cueplay CLI entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cueplay::cli::{Cli, Commands, ConfigCommands};
use cueplay::Config;

/// Environment variable that overrides the configured log filter.
const LOG_ENV: &str = "CUEPLAY_LOG";

/// Send logs to the configured file; the terminal belongs to the player.
///
/// Logging is best effort: if the file cannot be opened the CLI runs without it.
#[cfg(not(tarpaulin_include))]
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));

    let file = config.logging.file_path().and_then(|path| {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?)
    });

    match file {
        Ok(file) => {
            let _ = tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::sync::Mutex::new(file))
                        .with_ansi(false),
                )
                .try_init();
        }
        Err(e) => eprintln!("warning: logging disabled: {:#}", e),
    }
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    init_logging(&config);

    match cli.command {
        Commands::Play {
            payload,
            duration,
            lang,
            rate,
            paused,
        } => commands::play::handle(&config, &payload, duration, lang, rate, !paused),
        Commands::Check {
            payload,
            duration,
            strict,
        } => commands::check::handle(&payload, duration, strict),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(&config),
            ConfigCommands::Path => commands::config::handle_path(),
            ConfigCommands::Init { force } => commands::config::handle_init(force),
        },
        Commands::Completions { shell } => commands::completions::handle(shell),
    }
}
