//! Size-based splitting

use crate::prelude::*;

#[test]
fn size_limit_moves_to_next_counter_file() {
    let project = Project::empty();
    project.file(
        "fl.toml",
        "max_file_size = 10\ncounter_format = \"000\"\n\n[[files]]\npath = \"a.log\"\n",
    );
    // Each JSON entry is far larger than the limit, so every entry gets
    // its own file.
    project
        .fl()
        .args(&["--config", "fl.toml", "--json"])
        .stdin("one\ntwo\nthree\n")
        .passes();

    for (n, message) in ["one", "two", "three"].iter().enumerate() {
        let content = project.read(format!("a-{:03}.log", n));
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains(&format!("\"message\":\"{}\"", message)));
    }
    assert!(!project.exists("a-003.log"));
}

#[test]
fn counter_continues_after_full_files() {
    let project = Project::empty();
    let full = "x".repeat(200);
    project.file("a-0.log", &full);
    project.file(
        "fl.toml",
        "max_file_size = 200\n\n[[files]]\npath = \"a.log\"\n",
    );
    project
        .fl()
        .args(&["--config", "fl.toml", "--single-line"])
        .stdin("next\n")
        .passes();

    assert_eq!(project.read("a-0.log"), full);
    assert_eq!(project.messages("a-1.log"), vec!["next"]);
}
