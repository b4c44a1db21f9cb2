//! Delimited row parsing via the csv crate.

use tracing::debug;

use crate::dataset::parse_field;
use crate::error::IoError;
use crate::reader::Mode;

/// Parse all data rows of a delimited file.
///
/// `lines` is the whole file; parsing starts at `data_start` (zero-based
/// line index). Rows with a single trailing empty field — the model's
/// habitual trailing comma — are tolerated; any other field-count
/// mismatch, and any row whose time field is not a number, is malformed.
/// Strict mode aborts on the first malformed row, lenient mode skips and
/// counts. Blank rows are dropped silently.
pub(crate) fn parse_data_rows(
    lines: &[&str],
    data_start: usize,
    expected: usize,
    mode: Mode,
) -> Result<(Vec<Vec<String>>, usize), IoError> {
    let chunk = lines.get(data_start..).unwrap_or_default().join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(chunk.as_bytes());

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = result.map_err(|e| IoError::MalformedRow {
            line: data_start + 1,
            reason: e.to_string(),
        })?;

        // One-based line number in the original file.
        let line = data_start + record.position().map_or(1, |p| p.line() as usize);

        let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
        if fields.len() == 1 && fields[0].is_empty() {
            // Whitespace-only row.
            continue;
        }
        if fields.len() == expected + 1 && fields.last().is_some_and(String::is_empty) {
            fields.pop();
        }
        if fields.len() != expected {
            note_malformed(
                mode,
                line,
                format!("expected {expected} field(s), got {}", fields.len()),
                &mut skipped,
            )?;
            continue;
        }
        if !parse_field(&fields[0]).is_some_and(f64::is_finite) {
            note_malformed(
                mode,
                line,
                format!("time value '{}' is not a number", fields[0]),
                &mut skipped,
            )?;
            continue;
        }

        rows.push(fields);
    }

    Ok((rows, skipped))
}

/// Record a malformed row: fatal in strict mode, counted in lenient mode.
pub(crate) fn note_malformed(
    mode: Mode,
    line: usize,
    reason: String,
    skipped: &mut usize,
) -> Result<(), IoError> {
    match mode {
        Mode::Strict => Err(IoError::MalformedRow { line, reason }),
        Mode::Lenient => {
            debug!(line, %reason, "skipping malformed row");
            *skipped += 1;
            Ok(())
        }
    }
}
