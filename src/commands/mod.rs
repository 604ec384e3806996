//! Command handlers for the cueplay CLI

pub mod check;
pub mod completions;
pub mod config;
pub mod play;
