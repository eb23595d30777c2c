//! Tests for raw file reading and decoding.

use bdsice_decode::{SourceError, decode_file, list_xer_files};
use std::fs;
use tempfile::TempDir;

fn latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).expect("latin-1 character"))
        .collect()
}

#[test]
fn decodes_latin1_file_with_crlf() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("200020.xer");
    let text = "COD: 200020\r\nTIT: ÍNDICE DE PRECIOS DE CONSUMO. AÑO BASE\r\nFRE: 1\r\nINI: 2018\r\nNOB: 3\r\n 1 2 3\r\n#\r\n";
    fs::write(&path, latin1(text)).unwrap();

    let series = decode_file(&path).expect("decode file");
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].code, "200020");
    assert_eq!(series[0].title, "INDICE DE PRECIOS DE CONSUMO. ANO BASE");
}

#[test]
fn code_falls_back_to_file_stem() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("400000.xer");
    fs::write(&path, "TIT: SIN CODIGO\nFRE: 1\nINI: 2018\nNOB: 1\n 7\n#\n").unwrap();

    let series = decode_file(&path).expect("decode file");
    assert_eq!(series[0].code, "400000");
}

#[test]
fn reports_path_of_failing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.xer");
    fs::write(&path, "COD: 1\nQQQ: ?\n#\n").unwrap();

    match decode_file(&path) {
        Err(SourceError::Decode { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn empty_file_has_no_block() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.xer");
    fs::write(&path, "\n\n").unwrap();

    assert!(matches!(
        decode_file(&path),
        Err(SourceError::EmptyFile { .. })
    ));
}

#[test]
fn note_starting_with_hash_stays_in_its_block() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("1.xer");
    fs::write(
        &path,
        "COD: 1\nNOT:\n# numbered note\n@\nFRE: 1\nINI: 2000\nNOB: 1\n 5\n#\n",
    )
    .unwrap();

    let series = decode_file(&path).expect("decode file");
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].notes, vec!["# numbered note"]);
    assert_eq!(series[0].observations.values, vec![5.0]);
}

#[test]
fn lists_only_xer_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("b.xer"), "#").unwrap();
    fs::write(dir.path().join("A.XER"), "#").unwrap();
    fs::write(dir.path().join("a.json"), "{}").unwrap();
    fs::create_dir(dir.path().join("nested.xer")).unwrap();

    let files = list_xer_files(dir.path()).unwrap();
    assert_eq!(files, vec![dir.path().join("A.XER"), dir.path().join("b.xer")]);
}

#[test]
fn listing_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        list_xer_files(&dir.path().join("absent")),
        Err(SourceError::DirectoryNotFound { .. })
    ));
    let file = dir.path().join("plain.xer");
    fs::write(&file, "#").unwrap();
    assert!(matches!(
        list_xer_files(&file),
        Err(SourceError::DirectoryNotFound { .. })
    ));
}
