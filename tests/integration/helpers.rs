//! Shared helpers for integration tests

use std::fs;
use std::path::PathBuf;

use cueplay::AnnotationPayload;

/// Directory holding the JSON fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Path of a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Read a fixture as text.
pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

/// Parse a fixture as a payload.
pub fn load_payload(name: &str) -> AnnotationPayload {
    AnnotationPayload::from_json(&load_fixture(name))
        .unwrap_or_else(|e| panic!("Fixture {} is not a payload: {}", name, e))
}
