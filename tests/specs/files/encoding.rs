//! Output encodings

use crate::prelude::*;

#[test]
fn bom_written_once_per_file() {
    let project = Project::empty();
    project.file("fl.toml", "encoding = \"utf8-bom\"\n");
    for message in ["a", "b"] {
        project
            .fl()
            .args(&["--config", "fl.toml", "--single-line", "write", "bom.log", message])
            .passes();
    }

    let bytes = project.read_bytes("bom.log");
    assert!(bytes.starts_with(&[0xEF, 0xBB, 0xBF]));
    let boms = bytes.windows(3).filter(|w| w == &[0xEF, 0xBB, 0xBF]).count();
    assert_eq!(boms, 1);
}

#[test]
fn utf16_output() {
    let project = Project::empty();
    project.file("fl.toml", "encoding = \"utf16-le\"\n");
    project
        .fl()
        .args(&["--config", "fl.toml", "--single-line", "write", "wide.log", "hi"])
        .passes();

    let bytes = project.read_bytes("wide.log");
    assert_eq!(&bytes[..2], &[0xFF, 0xFE]);
    let units: Vec<u16> = bytes[2..]
        .chunks(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    let text = String::from_utf16(&units).unwrap();
    assert!(text.ends_with("] hi\n"), "{}", text);
}
