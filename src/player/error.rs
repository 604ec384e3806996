use std::io;

use thiserror::Error;

/// Failures that stop the player.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The host cannot run the player at all
    #[error("player setup failed: {0}")]
    Setup(String),

    #[error("terminal I/O failed")]
    Io(#[from] io::Error),

    #[error("rendering failed")]
    Render(#[source] anyhow::Error),
}
