//! Round trips through the database directory and the batch rebuild.

use std::fs;
use std::path::Path;

use bdsice_model::MISSING_VALUE_SENTINEL;
use bdsice_store::{
    RebuildPolicy, StoreError, index_path, load_index, load_series, rebuild, save_series,
};
use tempfile::tempdir;

const GOOD: &str = "\
COD: 100010
TIT: PRODUCTO INTERIOR BRUTO
UNI: MILLONES DE EUROS
FUE: INE
DEC: 1
FRE: 4
INI: 2020 1
NOB: 4
 100.5 101.2 OM 103.9
#
";

const OTHER: &str = "\
COD: 200020
TIT: ÍNDICE DE PRECIOS
FRE: 12
INI: 2021 1
NOB: 2
 1.5 1.7
#
";

const BROKEN: &str = "COD: 300030\nFRE: 12\nINI: 2021 1\nNOB: 3\n 1 2\n#\n";

fn write_raw(dir: &Path, name: &str, text: &str) {
    fs::write(dir.join(name), text).unwrap();
}

#[test]
fn rebuild_writes_records_and_index() {
    let dir = tempdir().unwrap();
    write_raw(dir.path(), "100010.xer", GOOD);
    write_raw(dir.path(), "200020.xer", OTHER);

    let report = rebuild(dir.path(), RebuildPolicy::Abort).expect("rebuild");
    assert_eq!(report.files, 2);
    assert_eq!(report.series_saved, 2);
    assert!(report.skipped.is_empty());
    assert_eq!(report.index_path, index_path(dir.path()));

    let index = load_index(dir.path()).expect("load index");
    assert_eq!(index, report.index);
    assert_eq!(index.title("200020"), Some("INDICE DE PRECIOS"));

    let series = load_series(dir.path(), "100010").expect("load series");
    assert_eq!(series.observations.values[2], MISSING_VALUE_SENTINEL);
    assert!(series.contains_missing);
    assert_eq!(series.units, "MILLONES DE EUROS");
}

#[test]
fn skip_policy_reports_bad_files() {
    let dir = tempdir().unwrap();
    write_raw(dir.path(), "100010.xer", GOOD);
    write_raw(dir.path(), "300030.xer", BROKEN);

    let report = rebuild(dir.path(), RebuildPolicy::SkipInvalid).expect("rebuild");
    assert_eq!(report.series_saved, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].path, dir.path().join("300030.xer"));
    assert!(!report.index.contains("300030"));
}

#[test]
fn abort_policy_leaves_directory_untouched() {
    let dir = tempdir().unwrap();
    write_raw(dir.path(), "100010.xer", GOOD);
    write_raw(dir.path(), "300030.xer", BROKEN);

    let err = rebuild(dir.path(), RebuildPolicy::Abort).unwrap_err();
    assert!(matches!(err, StoreError::Decode(_)));
    assert!(!index_path(dir.path()).exists());
    assert!(!dir.path().join("100010.json").exists());
}

#[test]
fn saved_record_keeps_historical_field_names() {
    let dir = tempdir().unwrap();
    write_raw(dir.path(), "100010.xer", GOOD);
    rebuild(dir.path(), RebuildPolicy::Abort).unwrap();

    let series = load_series(dir.path(), "100010").unwrap();
    let path = save_series(dir.path(), &series).unwrap();
    let record: serde_json::Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
    assert_eq!(record["SerieCode"], "100010");
    assert_eq!(record["Frequency"], 4);
    assert_eq!(record["ContainsNaN"], true);
}

#[test]
fn missing_series_and_index() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        load_series(dir.path(), "999999"),
        Err(StoreError::SeriesNotFound { .. })
    ));
    assert!(matches!(
        load_index(dir.path()),
        Err(StoreError::Io { .. })
    ));

    fs::write(index_path(dir.path()), b"{\"Series\": 3}").unwrap();
    let err = load_index(dir.path()).unwrap_err();
    assert!(matches!(err, StoreError::Format { .. }));
    assert!(err.suggestion().is_some());
}
