//! Text output of the commands.

use std::collections::BTreeMap;
use std::fs;

use bdsice_cli::render::{render_matches, render_rebuild, render_series_info};
use bdsice_model::{Frequency, MISSING_VALUE_SENTINEL, TimeSeries};
use bdsice_store::{RebuildPolicy, rebuild};
use chrono::{TimeZone, Utc};

fn quarterly_series() -> TimeSeries {
    let mut series = TimeSeries::new("100010", Frequency::Quarterly);
    series.title = "PRODUCTO INTERIOR BRUTO".to_string();
    series.units = "MILLONES DE EUROS".to_string();
    series.source = "INE".to_string();
    series.decimals = 1;
    series.observations.dates = [3, 6, 9, 12]
        .into_iter()
        .map(|m| Utc.with_ymd_and_hms(2020, m, 1, 0, 0, 0).unwrap())
        .collect();
    series.observations.values = vec![100.5, 101.2, MISSING_VALUE_SENTINEL, 103.9];
    series.observation_count = 4;
    series.start = series.observations.dates.first().copied();
    series.end = series.observations.dates.last().copied();
    series.contains_missing = true;
    series
}

#[test]
fn series_info_summary() {
    insta::assert_snapshot!(render_series_info(&quarterly_series()), @r"
    BDSICE Serie 100010 -- PRODUCTO INTERIOR BRUTO
    Range: 2020-03-01 to 2020-12-01
    Number of observations: 4
    Source: INE
    Units: MILLONES DE EUROS
    Number of decimals: 1
    Frequency: 4 (quarterly)
    Max: 103.9 (2020-12-01)
    Min: 100.5 (2020-03-01)
    Average: 101.9
    Missing values: yes
    ");
}

#[test]
fn empty_series_info_has_no_statistics() {
    let mut series = TimeSeries::new("9", Frequency::Annual);
    series.title = "SERIE VACIA".to_string();
    series.source = "BDSICE".to_string();
    series.units = "UNIDADES".to_string();
    insta::assert_snapshot!(render_series_info(&series), @r"
    BDSICE Serie 9 -- SERIE VACIA
    Range: - to -
    Number of observations: 0
    Source: BDSICE
    Units: UNIDADES
    Number of decimals: 0
    Frequency: 1 (annual)
    ");
}

#[test]
fn matches_are_tab_separated_in_code_order() {
    let matches: BTreeMap<String, String> = [
        ("200021", "INDICE DE PRECIOS INDUSTRIALES"),
        ("200020", "INDICE DE PRECIOS"),
    ]
    .into_iter()
    .map(|(c, t)| (c.to_string(), t.to_string()))
    .collect();
    assert_eq!(
        render_matches(&matches),
        "200020\tINDICE DE PRECIOS\n200021\tINDICE DE PRECIOS INDUSTRIALES\n"
    );
    assert_eq!(render_matches(&BTreeMap::new()), "");
}

#[test]
fn rebuild_summary_lists_skipped_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("100010.xer"),
        "COD: 100010\nTIT: PIB\nFRE: 1\nINI: 2020\nNOB: 2\n 1 2\n#\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("300030.xer"),
        "COD: 300030\nFRE: 12\nINI: 2021 1\nNOB: 3\n 1 2\n#\n",
    )
    .unwrap();

    let report = rebuild(dir.path(), RebuildPolicy::SkipInvalid).unwrap();
    let text = render_rebuild(&report).replace(&dir.path().display().to_string(), "[DB]");
    insta::assert_snapshot!(text, @r#"
    Raw files: 2
    Series saved: 1
    Files skipped: 1
      failed to decode [DB]/300030.xer: line 4: malformed NOB field "3": declared 3 observations but found 2
    Index: [DB]/db.json (1 entries)
    "#);
}

#[test]
fn summaries_end_with_a_single_newline() {
    let mut series = TimeSeries::new("9", Frequency::Annual);
    series.title = "SERIE VACIA".to_string();
    assert_eq!(
        render_series_info(&series),
        "BDSICE Serie 9 -- SERIE VACIA\n\
         Range: - to -\n\
         Number of observations: 0\n\
         Source: \n\
         Units: \n\
         Number of decimals: 0\n\
         Frequency: 1 (annual)\n"
    );

    let text = render_series_info(&quarterly_series());
    assert_eq!(text.lines().count(), 11);
    assert!(text.ends_with("Missing values: yes\n"));
}
