//! Snapshot persistence of the series index.

use bdsice_index::{IndexError, SeriesIndex};
use bdsice_model::{Frequency, TimeSeries};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

#[test]
fn loads_historical_snapshot() {
    let raw = br#"{
        "Path": "/var/lib/bdsice",
        "Series": {"100010": "PRODUCTO INTERIOR BRUTO", "200020": "INDICE DE PRECIOS"},
        "Codes": ["200020", "100010"],
        "LastUpdate": "2021-05-02T12:30:00.123456789+02:00"
    }"#;
    let index = SeriesIndex::from_slice(raw).expect("load");
    assert_eq!(index.len(), 2);
    assert_eq!(index.codes(), ["200020", "100010"]);
    assert_eq!(index.title("200020"), Some("INDICE DE PRECIOS"));
    assert_eq!(
        index.last_build_time().timestamp(),
        Utc.with_ymd_and_hms(2021, 5, 2, 10, 30, 0).unwrap().timestamp()
    );
}

#[test]
fn accepts_lower_case_field_names() {
    let raw = br#"{"entries": {"1": "A"}, "codes": ["1"], "lastBuildTime": "2020-01-01T00:00:00Z"}"#;
    assert_eq!(SeriesIndex::from_slice(raw).unwrap().title("1"), Some("A"));
}

#[test]
fn garbage_is_a_format_error() {
    for raw in [&b"not json"[..], br#"{"Series": {}}"#, b""] {
        assert!(matches!(
            SeriesIndex::from_slice(raw),
            Err(IndexError::Format { .. })
        ));
    }
}

fn series_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[0-9]{1,6}", "[A-Z ]{0,20}"), 0..40)
}

proptest! {
    #[test]
    fn snapshot_restores_same_index(pairs in series_strategy(), secs in 0i64..4_000_000_000) {
        let series: Vec<TimeSeries> = pairs
            .iter()
            .map(|(code, title)| {
                let mut serie = TimeSeries::new(code.clone(), Frequency::Annual);
                serie.title = title.clone();
                serie
            })
            .collect();
        let built = Utc.timestamp_opt(secs, 0).unwrap();
        let index = SeriesIndex::build_at(&series, built);

        let restored = SeriesIndex::from_slice(&index.to_vec().unwrap()).unwrap();
        prop_assert_eq!(&restored, &index);
        prop_assert_eq!(restored.codes().len(), restored.entries().len());
        for serie in &series {
            prop_assert!(restored.contains(&serie.code));
        }
    }
}

#[test]
fn snapshot_uses_historical_field_names() {
    let mut serie = TimeSeries::new("100010", Frequency::Quarterly);
    serie.title = "PRODUCTO INTERIOR BRUTO".to_string();
    let built = Utc.with_ymd_and_hms(2021, 5, 2, 10, 0, 0).unwrap();
    let index = SeriesIndex::build_at(&[serie], built);

    insta::assert_json_snapshot!(index, @r#"
    {
      "Series": {
        "100010": "PRODUCTO INTERIOR BRUTO"
      },
      "Codes": [
        "100010"
      ],
      "LastUpdate": "2021-05-02T10:00:00Z"
    }
    "#);
}
