//! Plain-text output of the commands.

use std::collections::BTreeMap;

use bdsice_model::TimeSeries;
use bdsice_store::RebuildReport;
use chrono::{DateTime, Utc};

fn day(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn optional_day(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(|| "-".to_string(), day)
}

/// One `code<TAB>title` line per match, in code order.
pub fn render_matches(matches: &BTreeMap<String, String>) -> String {
    matches
        .iter()
        .map(|(code, title)| format!("{code}\t{title}\n"))
        .collect()
}

/// Metadata summary of a series.
pub fn render_series_info(series: &TimeSeries) -> String {
    let decimals = series.decimals as usize;
    let mut lines = vec![
        format!("BDSICE Serie {} -- {}", series.code, series.title),
        format!(
            "Range: {} to {}",
            optional_day(series.start),
            optional_day(series.end)
        ),
        format!("Number of observations: {}", series.observation_count),
        format!("Source: {}", series.source),
        format!("Units: {}", series.units),
        format!("Number of decimals: {}", series.decimals),
        format!(
            "Frequency: {} ({})",
            series.frequency,
            series.frequency.as_str()
        ),
    ];
    if let Some((value, date)) = series.max() {
        lines.push(format!("Max: {value:.decimals$} ({})", day(date)));
    }
    if let Some((value, date)) = series.min() {
        lines.push(format!("Min: {value:.decimals$} ({})", day(date)));
    }
    if let Some(mean) = series.mean() {
        lines.push(format!("Average: {mean:.decimals$}"));
    }
    if series.contains_missing {
        lines.push("Missing values: yes".to_string());
    }
    join_lines(&lines)
}

/// Counts of a finished rebuild, with the reason for every skipped file.
pub fn render_rebuild(report: &RebuildReport) -> String {
    let mut lines = vec![
        format!("Raw files: {}", report.files),
        format!("Series saved: {}", report.series_saved),
        format!("Files skipped: {}", report.skipped.len()),
    ];
    lines.extend(report.skipped.iter().map(|skipped| format!("  {}", skipped.error)));
    lines.push(format!(
        "Index: {} ({} entries)",
        report.index_path.display(),
        report.index.len()
    ));
    join_lines(&lines)
}

/// Newline-terminated lines.
fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}
