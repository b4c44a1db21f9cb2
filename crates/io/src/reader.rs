//! High-level load orchestration: detect, discover the header, parse
//! rows, coerce columns.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::dataset::{Column, TabularDataset, coerce_values, parse_field};
use crate::delimited::{self, note_malformed};
use crate::detect::{FileType, detect_file_type};
use crate::error::IoError;
use crate::fixed_width;
use crate::header::{
    ColumnLayout, DEFAULT_FIELD_WIDTH, FieldSpec, MAX_HEADER_LOOKAHEAD, delimited_names,
    discover_header, fixed_width_fields,
};

// ---------------------------------------------------------------------------
// LoadConfig
// ---------------------------------------------------------------------------

/// How malformed data rows are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Abort the load at the first malformed row.
    #[default]
    Strict,
    /// Skip malformed rows and count them for the caller.
    Lenient,
}

/// Configuration for loading a CE-QUAL-W2 output file.
///
/// Use the builder methods (`with_*`) to attach a simulation start year,
/// downgrade malformed rows to skips, or override the automatic header
/// discovery. The [`Default`] implementation suits well-formed model
/// output.
#[derive(Debug, Clone, Default)]
pub struct LoadConfig {
    /// Simulation start year attached to the dataset for timestamping.
    start_year: Option<i32>,
    /// Malformed-row policy.
    mode: Mode,
    /// Explicit zero-based index of the label row, skipping discovery.
    header_row: Option<usize>,
    /// Caller-supplied column names (time column first); the file's
    /// label row is then ignored entirely.
    column_names: Option<Vec<String>>,
    /// With `column_names`: zero-based index of the first data row.
    skip_rows: Option<usize>,
    /// Field width for fixed-width files. Zero means the 8-byte default.
    field_width: usize,
    /// Header discovery window. Zero means the 10-row default.
    header_lookahead: usize,
}

impl LoadConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the simulation start year used for timestamp conversion.
    pub fn with_start_year(mut self, year: i32) -> Self {
        self.start_year = Some(year);
        self
    }

    /// Set the malformed-row policy.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Pin the label row instead of discovering it.
    pub fn with_header_row(mut self, row: usize) -> Self {
        self.header_row = Some(row);
        self
    }

    /// Supply column names directly (time column first), bypassing the
    /// file's label row. Combine with [`with_skip_rows`](Self::with_skip_rows)
    /// to say where data begins.
    pub fn with_column_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the first data row index used with explicit column names.
    pub fn with_skip_rows(mut self, rows: usize) -> Self {
        self.skip_rows = Some(rows);
        self
    }

    /// Set the fixed-width field width.
    pub fn with_field_width(mut self, width: usize) -> Self {
        self.field_width = width;
        self
    }

    /// Set the header discovery window.
    pub fn with_header_lookahead(mut self, rows: usize) -> Self {
        self.header_lookahead = rows;
        self
    }

    fn field_width_or_default(&self) -> usize {
        if self.field_width == 0 {
            DEFAULT_FIELD_WIDTH
        } else {
            self.field_width
        }
    }

    fn lookahead_or_default(&self) -> usize {
        if self.header_lookahead == 0 {
            MAX_HEADER_LOOKAHEAD
        } else {
            self.header_lookahead
        }
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidConfig`] if explicit column names are
    /// empty, or if both a header row and explicit names are given.
    pub fn validate(&self) -> Result<(), IoError> {
        if let Some(names) = &self.column_names {
            if names.is_empty() {
                return Err(IoError::InvalidConfig {
                    reason: "explicit column names must not be empty".to_string(),
                });
            }
            if self.header_row.is_some() {
                return Err(IoError::InvalidConfig {
                    reason: "header_row and column_names are mutually exclusive; \
                             use skip_rows with explicit names"
                        .to_string(),
                });
            }
        } else if self.skip_rows.is_some() {
            return Err(IoError::InvalidConfig {
                reason: "skip_rows requires explicit column names".to_string(),
            });
        }
        Ok(())
    }
}

/// Result of a successful load: the dataset plus bookkeeping.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// The loaded dataset.
    pub dataset: TabularDataset,
    /// Number of malformed rows skipped (always zero in strict mode).
    pub skipped_rows: usize,
}

// ---------------------------------------------------------------------------
// read_file
// ---------------------------------------------------------------------------

/// Load a CE-QUAL-W2 output file into a [`TabularDataset`].
///
/// Classifies the file, locates the header, parses the data rows, and
/// coerces each non-time column to numeric where every value allows it
/// (otherwise the column keeps its text verbatim). The caller receives
/// either a complete dataset or an error, never a partial one.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for unclassifiable files,
/// [`IoError::HeaderNotFound`] when discovery exhausts its window,
/// [`IoError::MalformedRow`] for row-shape mismatches in strict mode,
/// and [`IoError::EmptyDataset`] when no data rows survive.
pub fn read_file(path: &Path, config: &LoadConfig) -> Result<LoadReport, IoError> {
    config.validate()?;

    let kind = detect_file_type(path)?;
    if kind == FileType::Unknown {
        return Err(IoError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();

    let (mut layout, data_start) = resolve_header(path, &lines, kind, config)?;

    // Real-world .npt files are sometimes delimited in disguise; sniff
    // the first data row for commas before committing to offsets.
    if matches!(layout, ColumnLayout::FixedWidth(_)) {
        let first_data = lines[data_start.min(lines.len())..]
            .iter()
            .find(|l| !l.trim().is_empty());
        if first_data.is_some_and(|l| l.contains(',')) {
            warn!(
                path = %path.display(),
                "fixed-width file carries delimited rows; switching parsers"
            );
            let names: Vec<String> = match &layout {
                ColumnLayout::FixedWidth(fields) => {
                    fields.iter().map(|f| f.name.clone()).collect()
                }
                ColumnLayout::Delimited(names) => names.clone(),
            };
            layout = ColumnLayout::Delimited(names);
        }
    }

    let (rows, skipped_rows) = match &layout {
        ColumnLayout::FixedWidth(fields) => {
            parse_fixed_rows(&lines, data_start, fields, config.mode)?
        }
        ColumnLayout::Delimited(names) => {
            delimited::parse_data_rows(&lines, data_start, names.len(), config.mode)?
        }
    };

    if rows.is_empty() {
        return Err(IoError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }

    let names: Vec<String> = match &layout {
        ColumnLayout::FixedWidth(fields) => fields.iter().map(|f| f.name.clone()).collect(),
        ColumnLayout::Delimited(names) => names.clone(),
    };

    let n_cols = names.len();
    let mut time = Vec::with_capacity(rows.len());
    let mut raw_columns: Vec<Vec<String>> = vec![Vec::with_capacity(rows.len()); n_cols - 1];

    for mut row in rows {
        // Validated during parsing; NaN can no longer occur here.
        time.push(parse_field(&row[0]).unwrap_or(f64::NAN));
        for (j, value) in row.drain(..).skip(1).enumerate() {
            raw_columns[j].push(value);
        }
    }

    let columns: Vec<Column> = names[1..]
        .iter()
        .zip(raw_columns)
        .map(|(name, values)| Column::new(name.clone(), coerce_values(values)))
        .collect();

    let mut dataset = TabularDataset::new(names[0].clone(), time, columns)?;
    if let Some(year) = config.start_year {
        dataset = dataset.with_start_year(year);
    }

    info!(
        path = %path.display(),
        rows = dataset.n_rows(),
        cols = dataset.n_cols(),
        skipped_rows,
        "loaded dataset"
    );

    Ok(LoadReport {
        dataset,
        skipped_rows,
    })
}

// ---------------------------------------------------------------------------
// Header resolution
// ---------------------------------------------------------------------------

/// Work out the column layout and the first data row.
///
/// Three paths, most explicit first: caller-supplied names, a pinned
/// header row, or bounded discovery.
fn resolve_header(
    path: &Path,
    lines: &[&str],
    kind: FileType,
    config: &LoadConfig,
) -> Result<(ColumnLayout, usize), IoError> {
    let width = config.field_width_or_default();

    if let Some(names) = &config.column_names {
        let layout = match kind {
            FileType::FixedWidth => ColumnLayout::FixedWidth(specs_from_names(names, width)),
            _ => ColumnLayout::Delimited(names.clone()),
        };
        return Ok((layout, config.skip_rows.unwrap_or(0)));
    }

    if let Some(row) = config.header_row {
        let line = lines.get(row).ok_or_else(|| IoError::HeaderNotFound {
            path: path.to_path_buf(),
            rows_scanned: lines.len(),
        })?;
        let layout = match kind {
            FileType::FixedWidth => ColumnLayout::FixedWidth(fixed_width_fields(line, width)),
            _ => ColumnLayout::Delimited(delimited_names(line)),
        };
        return Ok((layout, row + 1));
    }

    let lookahead = config.lookahead_or_default();
    match discover_header(lines, kind, width, lookahead) {
        Some(header) => {
            let data_start = header.row + 1;
            Ok((header.layout, data_start))
        }
        None => Err(IoError::HeaderNotFound {
            path: path.to_path_buf(),
            rows_scanned: lookahead.min(lines.len()),
        }),
    }
}

fn specs_from_names(names: &[String], width: usize) -> Vec<FieldSpec> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| FieldSpec {
            name: name.clone(),
            start: i * width,
            width,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Fixed-width data rows
// ---------------------------------------------------------------------------

fn parse_fixed_rows(
    lines: &[&str],
    data_start: usize,
    fields: &[FieldSpec],
    mode: Mode,
) -> Result<(Vec<Vec<String>>, usize), IoError> {
    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (idx, line) in lines.iter().enumerate().skip(data_start) {
        if line.trim().is_empty() {
            continue;
        }
        let lineno = idx + 1;
        match fixed_width::parse_row(line, fields) {
            Ok(values) => {
                if !parse_field(&values[0]).is_some_and(f64::is_finite) {
                    note_malformed(
                        mode,
                        lineno,
                        format!("time value '{}' is not a number", values[0]),
                        &mut skipped,
                    )?;
                    continue;
                }
                rows.push(values);
            }
            Err(reason) => {
                note_malformed(mode, lineno, reason, &mut skipped)?;
            }
        }
    }

    Ok((rows, skipped))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
