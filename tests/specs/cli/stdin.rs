//! Logging lines read from stdin

use crate::prelude::*;

#[test]
fn stdin_lines_become_entries_in_order() {
    let project = Project::empty();
    project
        .fl()
        .args(&["--single-line"])
        .stdin("alpha\nbeta\ngamma\n")
        .passes()
        .stderr_empty();

    assert_eq!(project.messages("fl.log"), vec!["alpha", "beta", "gamma"]);
}

#[test]
fn empty_stdin_writes_nothing() {
    let project = Project::empty();
    project.fl().passes();
    assert!(!project.exists("fl.log"));
}

#[test]
fn entries_go_to_every_requested_file() {
    let project = Project::empty();
    project
        .fl()
        .args(&["--single-line", "-f", "a.log", "-f", "nested/b.log"])
        .stdin("shared\n")
        .passes();

    assert_eq!(project.messages("a.log"), vec!["shared"]);
    assert_eq!(project.messages("nested/b.log"), vec!["shared"]);
}

#[test]
fn multi_line_format_by_default() {
    let project = Project::empty();
    project
        .fl()
        .args(&["--category", "svc", "--scope", "req 1"])
        .stdin("hello\n")
        .passes();

    let content = project.read("fl.log");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3, "{}", content);
    assert!(lines[0].starts_with("info: "));
    assert!(lines[0].ends_with(" svc[0]"));
    assert_eq!(lines[1], "      => req 1");
    assert_eq!(lines[2], "      hello");
}

#[test]
fn json_lines() {
    let project = Project::empty();
    project
        .fl()
        .args(&["--json", "--level", "warn"])
        .stdin("one\ntwo\n")
        .passes();

    let content = project.read("fl.log");
    let records: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["level"], "warning");
    assert_eq!(records[0]["message"], "one");
    assert_eq!(records[1]["message"], "two");
}

#[test]
fn config_from_environment() {
    let project = Project::empty();
    project.file(
        "fl.toml",
        "base_path = \"logs\"\n\n[[files]]\npath = \"svc.log\"\n",
    );
    project
        .fl()
        .env("FL_CONFIG", project.path().join("fl.toml"))
        .args(&["--single-line"])
        .stdin("configured\n")
        .passes();

    assert_eq!(project.messages("logs/svc.log"), vec!["configured"]);
}
