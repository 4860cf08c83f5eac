//! CLI help output specs

use crate::prelude::*;

#[test]
fn fl_help_shows_usage() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("--config")
        .stdout_has("--file");
}

#[test]
fn fl_write_help_shows_usage() {
    cli()
        .args(&["write", "--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("<FILE>");
}

#[test]
fn fl_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn fl_binary_is_built_for_specs() {
    let path = fl_binary();
    assert!(path.exists(), "fl binary not found at {}", path.display());
}
