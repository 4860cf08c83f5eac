// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use fl_adapters::MemoryFileAppender;

#[test]
fn unknown_ids_use_defaults() {
    let frozen = FrozenSettings::new(FileSettings {
        max_file_size: 42,
        ..FileSettings::default()
    })
    .with_file("./special.log", FileSettings::default());

    assert_eq!(frozen.get("other.log").max_file_size, 42);
    assert_eq!(frozen.get("special.log").max_file_size, 0);
    assert_eq!(frozen.file_ids(), vec!["special.log".to_string()]);
}

#[test]
fn freeze_resolves_overrides() {
    let options = LoggerOptions::parse(
        r#"
base_path = "logs"
max_queue_size = 16

[[files]]
path = "app.log"
max_file_size = 100
counter_format = "00"
"#,
    )
    .unwrap();

    let frozen = FrozenSettings::freeze(&options, None).unwrap();
    let app = frozen.get("app.log");
    assert_eq!(app.base_path, PathBuf::from("logs"));
    assert_eq!(app.max_file_size, 100);
    assert_eq!(app.counter_format, "00");
    assert_eq!(app.max_queue_size, 16);
    assert!(app.appender.is_none());
    assert_eq!(frozen.defaults().max_file_size, 0);
}

#[test]
fn freeze_applies_appender_everywhere() {
    let options = LoggerOptions::parse("[[files]]\npath = \"a.log\"\n").unwrap();
    let appender: Arc<dyn FileAppender> = Arc::new(MemoryFileAppender::new());

    let frozen = FrozenSettings::freeze(&options, Some(appender)).unwrap();
    assert!(frozen.get("a.log").appender.is_some());
    assert!(frozen.get("b.log").appender.is_some());
}

#[test]
fn has_postfix_when_date_or_size_configured() {
    let mut settings = FileSettings::default();
    assert!(!settings.has_postfix());

    settings.max_file_size = 1;
    assert!(settings.has_postfix());

    settings.max_file_size = 0;
    settings.date_format = Some("%Y".to_string());
    assert!(settings.has_postfix());
}

#[test]
fn snapshots_are_independent() {
    let first = FrozenSettings::new(FileSettings::default());
    let second = first.clone().with_file("a.log", FileSettings {
        max_file_size: 5,
        ..FileSettings::default()
    });

    assert_eq!(first.get("a.log").max_file_size, 0);
    assert_eq!(second.get("a.log").max_file_size, 5);
}
