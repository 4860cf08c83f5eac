//! CLI error specs

use crate::prelude::*;

#[test]
fn missing_config_file_fails() {
    let project = Project::empty();
    project
        .fl()
        .args(&["--config", "missing.toml"])
        .fails()
        .stderr_has("Error: failed to load config missing.toml");
}

#[test]
fn invalid_counter_format_fails() {
    let project = Project::empty();
    project.file("fl.toml", "max_file_size = 10\ncounter_format = \"0x0\"\n");
    project
        .fl()
        .args(&["--config", "fl.toml"])
        .fails()
        .stderr_has("0x0");
}

#[test]
fn unknown_level_fails() {
    cli().args(&["--level", "loud"]).fails().stderr_has("loud");
}

#[test]
fn write_without_message_fails() {
    cli().args(&["write", "app.log"]).fails();
}
