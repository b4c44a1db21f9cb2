//! File type detection: extension first, content sniffing as fallback.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::IoError;

/// How many leading non-blank lines the content sniffer inspects.
const SNIFF_LINES: usize = 20;

/// Closed classification of CE-QUAL-W2 output file layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Fixed-width positional text (`.npt` convention, 8-character fields).
    FixedWidth,
    /// Delimiter-separated text (`.csv` / `.opt`).
    Delimited,
    /// Neither heuristic matched.
    Unknown,
}

/// Classify a file as fixed-width or delimited.
///
/// Extensions decide first: `.npt` is fixed-width, `.csv` and `.opt` are
/// delimited. Any other extension falls back to sniffing the first
/// data-bearing lines: consistent comma counts mean delimited, while
/// comma-free lines wide enough to hold several 8-character fields mean
/// fixed-width. Files that match neither are [`FileType::Unknown`];
/// callers loading such a file get [`IoError::UnsupportedFormat`].
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the path does not exist and
/// [`IoError::Io`] if the file cannot be read during sniffing.
pub fn detect_file_type(path: &Path) -> Result<FileType, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "npt" => Ok(FileType::FixedWidth),
        "csv" | "opt" => Ok(FileType::Delimited),
        _ => {
            debug!(path = %path.display(), ext, "extension inconclusive, sniffing content");
            sniff_content(path)
        }
    }
}

/// Inspect the first data-bearing lines of an unclassified file.
fn sniff_content(path: &Path) -> Result<FileType, IoError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
        if lines.len() >= SNIFF_LINES {
            break;
        }
    }

    // Data rows sit at the bottom of the sample, below any metadata.
    let data_rows: Vec<&String> = lines.iter().rev().take(5).collect();
    if data_rows.len() < 2 {
        return Ok(FileType::Unknown);
    }

    let comma_counts: Vec<usize> = data_rows
        .iter()
        .map(|l| l.matches(',').count())
        .collect();
    if comma_counts[0] > 0 && comma_counts.iter().all(|&c| c == comma_counts[0]) {
        return Ok(FileType::Delimited);
    }

    // The sample is in reverse file order, so data rows come first and
    // any header/unit rows trail; the run of data-shaped rows decides.
    let fixed_run = data_rows
        .iter()
        .take_while(|l| is_fixed_width_data_row(l))
        .count();
    if fixed_run >= 2 {
        return Ok(FileType::FixedWidth);
    }

    Ok(FileType::Unknown)
}

/// A fixed-width data row: no commas, wide enough for at least two
/// 8-character fields, and the first field parses as a day number.
fn is_fixed_width_data_row(line: &str) -> bool {
    let bytes = line.as_bytes();
    bytes.len() >= 16
        && !line.contains(',')
        && String::from_utf8_lossy(&bytes[..8])
            .trim()
            .parse::<f64>()
            .is_ok()
}
