//! Plain-text report rendering for the `stats` subcommand.

use std::fmt::Write as _;

use clearview_io::TabularDataset;

use crate::summary::ColumnSummary;

/// Render a dataset and its column summaries as a plain-text report.
///
/// One header block (shape and time span, with calendar timestamps when
/// the start year is known) followed by one table row per summary.
pub fn render_report(dataset: &TabularDataset, summaries: &[ColumnSummary]) -> String {
    let mut out = String::new();

    let time = dataset.time();
    writeln!(
        out,
        "{} rows x {} column(s), time axis '{}'",
        dataset.n_rows(),
        dataset.n_cols(),
        dataset.time_name()
    )
    .ok();

    let first = time[0];
    let last = time[time.len() - 1];
    match dataset.timestamps() {
        Ok(stamps) => writeln!(
            out,
            "time span: day {first:.3} to {last:.3} ({} to {})",
            stamps[0].format("%Y-%m-%d %H:%M"),
            stamps[stamps.len() - 1].format("%Y-%m-%d %H:%M"),
        )
        .ok(),
        Err(_) => writeln!(out, "time span: day {first:.3} to {last:.3}").ok(),
    };

    let omitted = dataset.n_cols() - summaries.len();
    if omitted > 0 {
        writeln!(out, "{omitted} column(s) not summarised (text or all-missing)").ok();
    }

    writeln!(out).ok();
    writeln!(
        out,
        "{:<12} {:>8} {:>12} {:>12} {:>12} {:>12}",
        "column", "count", "mean", "std", "min", "max"
    )
    .ok();
    for s in summaries {
        writeln!(
            out,
            "{:<12} {:>8} {:>12.4} {:>12.4} {:>12.4} {:>12.4}",
            s.name, s.count, s.mean, s.std, s.min, s.max
        )
        .ok();
    }

    out
}
