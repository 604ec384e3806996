//! Integration tests for cueplay

mod helpers;

mod cli_test;
mod engine_test;
mod session_test;
