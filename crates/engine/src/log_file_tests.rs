// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::Utc;
use fl_adapters::{AppenderCall, FakeAppender, MemoryFileAppender};
use fl_core::TextEncoding;
use yare::parameterized;

fn log_file(id: &str, settings: FileSettings, appender: Arc<dyn FileAppender>) -> LogFile {
    LogFile::new(id, Arc::new(settings), appender)
}

fn entry(text: &str) -> LogFileEntry {
    LogFileEntry::new(text, Utc::now())
}

#[parameterized(
    plain = { "app.log", "", "app", ".log" },
    nested = { "audit/ops.log", "audit", "ops", ".log" },
    no_extension = { "app", "", "app", "" },
    two_dots = { "app.v2.log", "", "app.v2", ".log" },
)]
fn splits_file_id(id: &str, dir: &str, stem: &str, extension: &str) {
    let file = log_file(id, FileSettings::default(), Arc::new(MemoryFileAppender::new()));
    assert_eq!(file.base_path(), Path::new(dir));
    assert_eq!(file.stem(), stem);
    assert_eq!(file.extension(), extension);
    assert_eq!(file.id(), id);
}

#[test]
fn file_path_inserts_postfix_before_extension() {
    let settings = FileSettings {
        base_path: PathBuf::from("logs"),
        ..FileSettings::default()
    };
    let file = log_file("a.log", settings, Arc::new(MemoryFileAppender::new()));
    assert_eq!(file.file_path(""), PathBuf::from("logs/a.log"));
    assert_eq!(file.file_path("-001"), PathBuf::from("logs/a-001.log"));
}

#[test]
fn counter_saturates() {
    let mut file = log_file("a.log", FileSettings::default(), Arc::new(MemoryFileAppender::new()));
    file.set_counter(u64::MAX);
    file.increment_counter();
    assert_eq!(file.counter(), u64::MAX);
}

#[tokio::test]
async fn reuses_open_target_for_same_path() {
    let appender = FakeAppender::new();
    let mut file = log_file("a.log", FileSettings::default(), Arc::new(appender.clone()));

    file.write_entry(Path::new("a.log"), &entry("one\n")).await.unwrap();
    file.write_entry(Path::new("a.log"), &entry("two\n")).await.unwrap();

    assert_eq!(appender.open_count("a.log"), 1);
    assert_eq!(
        appender.storage().read_to_string("a.log").unwrap(),
        "one\ntwo\n"
    );
    assert_eq!(file.open_path(), Some(Path::new("a.log")));
}

#[tokio::test]
async fn switching_path_reopens() {
    let appender = FakeAppender::new();
    let mut file = log_file("a.log", FileSettings::default(), Arc::new(appender.clone()));

    file.write_entry(Path::new("a-0.log"), &entry("one\n")).await.unwrap();
    file.write_entry(Path::new("a-1.log"), &entry("two\n")).await.unwrap();

    assert_eq!(appender.open_count("a-0.log"), 1);
    assert_eq!(appender.open_count("a-1.log"), 1);
    assert_eq!(appender.storage().read_to_string("a-1.log").unwrap(), "two\n");
}

#[tokio::test]
async fn preamble_written_once_per_new_file() {
    let storage = MemoryFileAppender::new();
    let settings = FileSettings {
        encoding: TextEncoding::Utf8Bom,
        ..FileSettings::default()
    };
    let mut file = log_file("a.log", settings, Arc::new(storage.clone()));

    file.write_entry(Path::new("a.log"), &entry("x\n")).await.unwrap();
    file.close().await.unwrap();
    file.write_entry(Path::new("a.log"), &entry("y\n")).await.unwrap();

    assert_eq!(
        storage.read("a.log").unwrap(),
        b"\xEF\xBB\xBFx\ny\n".to_vec()
    );
}

#[tokio::test]
async fn stat_prefers_open_stream_length() {
    let appender = FakeAppender::new();
    let mut file = log_file("a.log", FileSettings::default(), Arc::new(appender.clone()));
    file.write_entry(Path::new("a.log"), &entry("12345\n")).await.unwrap();

    let stat = file.stat(Path::new("a.log")).await.unwrap().unwrap();
    assert_eq!(stat.len, 6);
    assert!(!appender
        .calls()
        .iter()
        .any(|call| matches!(call, AppenderCall::Stat { .. })));

    assert!(file.stat(Path::new("b.log")).await.unwrap().is_none());
}

#[tokio::test]
async fn failed_write_discards_target() {
    let appender = FakeAppender::new();
    let mut file = log_file("a.log", FileSettings::default(), Arc::new(appender.clone()));
    file.write_entry(Path::new("a.log"), &entry("one\n")).await.unwrap();

    appender.fail_writes(1, io::ErrorKind::Other);
    assert!(file.write_entry(Path::new("a.log"), &entry("two\n")).await.is_err());
    assert!(file.open_path().is_none());

    file.write_entry(Path::new("a.log"), &entry("three\n")).await.unwrap();
    assert_eq!(appender.open_count("a.log"), 2);
    assert_eq!(
        appender.storage().read_to_string("a.log").unwrap(),
        "one\nthree\n"
    );
}

#[tokio::test]
async fn ensure_base_path_creates_directory() {
    let storage = MemoryFileAppender::new();
    let settings = FileSettings {
        base_path: PathBuf::from("logs"),
        ..FileSettings::default()
    };
    let file = log_file("audit/a.log", settings, Arc::new(storage.clone()));

    assert!(file.ensure_base_path().await.unwrap());
    assert!(!file.ensure_base_path().await.unwrap());
    assert!(storage.dir_exists("logs/audit"));
}
