//! `fl write` specs

use crate::prelude::*;

#[test]
fn write_logs_each_message() {
    let project = Project::empty();
    project
        .fl()
        .args(&["--single-line", "write", "audit.log", "first", "second"])
        .passes();

    assert_eq!(project.messages("audit.log"), vec!["first", "second"]);
}

#[test]
fn write_appends_across_runs() {
    let project = Project::empty();
    for message in ["run 1", "run 2"] {
        project
            .fl()
            .args(&["--single-line", "write", "audit.log", message])
            .passes();
    }

    assert_eq!(project.messages("audit.log"), vec!["run 1", "run 2"]);
}

#[test]
fn write_creates_directories() {
    let project = Project::empty();
    project
        .fl()
        .args(&["--single-line", "write", "deep/er/app.log", "x"])
        .passes();

    assert!(project.exists("deep/er/app.log"));
}
