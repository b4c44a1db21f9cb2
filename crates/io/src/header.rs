//! Header row and column-layout discovery.
//!
//! CE-QUAL-W2 files put a varying number of title and unit-annotation
//! rows ahead of the column labels: TSR output starts with the labels on
//! the first row, while meteorology files carry two metadata rows first.
//! Discovery scans a bounded window of leading rows for the first row
//! that looks like labels rather than units, numbers, or prose.

use crate::dataset::parse_field;
use crate::detect::FileType;

/// Default bound on how many leading rows are scanned for the header.
pub const MAX_HEADER_LOOKAHEAD: usize = 10;

/// Default field width of fixed-width CE-QUAL-W2 files.
pub const DEFAULT_FIELD_WIDTH: usize = 8;

/// Tokens that mark a row as unit annotation rather than column labels.
/// Matched against whole fields after normalisation.
const UNIT_TOKENS: &[&str] = &[
    "days", "day", "hours", "deg c", "degc", "c", "f", "m/s", "m", "w/m^2", "w/m2", "fraction",
    "frac", "radians", "rad", "g/m^3", "g/m3", "mg/l",
];

/// One column of a fixed-width layout: label plus character extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Column label.
    pub name: String,
    /// Byte offset where the field starts.
    pub start: usize,
    /// Field width in bytes.
    pub width: usize,
}

/// Column layout discovered from the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnLayout {
    /// Fixed character extents per column.
    FixedWidth(Vec<FieldSpec>),
    /// Column names split on the delimiter.
    Delimited(Vec<String>),
}

/// A located header: its row index and the column layout it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLayout {
    /// Zero-based row index of the label row; data starts on the next row.
    pub row: usize,
    /// Column layout, time column first.
    pub layout: ColumnLayout,
}

impl HeaderLayout {
    /// Column names in file order, time column first.
    pub fn names(&self) -> Vec<&str> {
        match &self.layout {
            ColumnLayout::FixedWidth(fields) => fields.iter().map(|f| f.name.as_str()).collect(),
            ColumnLayout::Delimited(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Total number of columns, time column included.
    pub fn n_fields(&self) -> usize {
        match &self.layout {
            ColumnLayout::FixedWidth(fields) => fields.len(),
            ColumnLayout::Delimited(names) => names.len(),
        }
    }
}

/// Scan the leading `lookahead` rows for the header.
///
/// Returns `None` when no row within the window passes the label
/// heuristic; the caller maps that to `HeaderNotFound`.
pub(crate) fn discover_header(
    lines: &[&str],
    kind: FileType,
    field_width: usize,
    lookahead: usize,
) -> Option<HeaderLayout> {
    for (row, line) in lines.iter().take(lookahead).enumerate() {
        if line.trim().is_empty() || is_comment(line) {
            continue;
        }
        match kind {
            FileType::FixedWidth => {
                let fields = fixed_width_fields(line, field_width);
                if is_fixed_width_header(&fields) {
                    return Some(HeaderLayout {
                        row,
                        layout: ColumnLayout::FixedWidth(fields),
                    });
                }
            }
            FileType::Delimited => {
                let names = delimited_names(line);
                if is_delimited_header(&names) {
                    return Some(HeaderLayout {
                        row,
                        layout: ColumnLayout::Delimited(names),
                    });
                }
            }
            FileType::Unknown => return None,
        }
    }
    None
}

/// Split a header line into fixed-width field specs, dropping blank
/// fields but keeping each label's true character extent.
pub(crate) fn fixed_width_fields(line: &str, width: usize) -> Vec<FieldSpec> {
    let bytes = line.as_bytes();
    let mut fields = Vec::new();
    let mut start = 0;
    while start < bytes.len() {
        let end = (start + width).min(bytes.len());
        let name = String::from_utf8_lossy(&bytes[start..end]).trim().to_string();
        if !name.is_empty() {
            fields.push(FieldSpec { name, start, width });
        }
        start += width;
    }
    dedup_fixed(fields)
}

/// Split a delimited header line into column names: trimmed, trailing
/// empty name (from a trailing comma) dropped, duplicates suffixed.
pub(crate) fn delimited_names(line: &str) -> Vec<String> {
    let mut names: Vec<String> = line.split(',').map(|f| f.trim().to_string()).collect();
    while names.len() > 1 && names.last().is_some_and(String::is_empty) {
        names.pop();
    }
    dedup_names(names)
}

/// Disambiguate duplicate names with a numeric suffix (`_2`, `_3`, ...).
fn dedup_names(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(&name) {
            out.push(name);
            continue;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{name}_{n}");
            if !out.contains(&candidate) {
                out.push(candidate);
                break;
            }
            n += 1;
        }
    }
    out
}

fn dedup_fixed(fields: Vec<FieldSpec>) -> Vec<FieldSpec> {
    let names = dedup_names(fields.iter().map(|f| f.name.clone()).collect());
    fields
        .into_iter()
        .zip(names)
        .map(|(f, name)| FieldSpec { name, ..f })
        .collect()
}

/// Comment or title rows: `#` per delimited convention, `$` per the
/// fixed-width card convention.
fn is_comment(line: &str) -> bool {
    matches!(line.trim_start().as_bytes().first(), Some(b'#') | Some(b'$'))
}

/// Normalise a field for unit-token comparison: lowercase, parentheses
/// and currency markers stripped.
fn normalise(field: &str) -> String {
    field
        .to_ascii_lowercase()
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '$'))
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_unit_token(field: &str) -> bool {
    UNIT_TOKENS.contains(&normalise(field).as_str())
}

fn starts_alphabetic(field: &str) -> bool {
    field.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
}

/// Label heuristic for fixed-width rows: at least two single-token
/// fields, alphabetic leads, nothing numeric, nothing unit-like. A title
/// row sliced into 8-character chunks produces fields with internal
/// spaces and fails the single-token requirement.
fn is_fixed_width_header(fields: &[FieldSpec]) -> bool {
    if fields.len() < 2 {
        return false;
    }
    fields.iter().all(|f| {
        starts_alphabetic(&f.name)
            && !f.name.contains(char::is_whitespace)
            && f.name.parse::<f64>().is_err()
            && !is_unit_token(&f.name)
    })
}

/// Label heuristic for delimited rows. Labels may contain spaces
/// ("Air Temperature (C)"), so only numeric fields and unit tokens
/// disqualify a row.
fn is_delimited_header(names: &[String]) -> bool {
    if names.len() < 2 || !starts_alphabetic(&names[0]) {
        return false;
    }
    names
        .iter()
        .filter(|n| !n.is_empty())
        .all(|n| parse_field(n).is_none() && !is_unit_token(n))
}
