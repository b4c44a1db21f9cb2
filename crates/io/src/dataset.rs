//! The in-memory tabular dataset handed to statistics, persistence, and
//! display code.

use chrono::NaiveDateTime;

use crate::error::IoError;

/// Values of one data column: either fully numeric or verbatim text.
///
/// A column is numeric only when every value in it parses as a float
/// (plain decimal or `E`-exponent scientific notation). A single
/// unparsable value keeps the whole column as text, so downstream code
/// can branch on the tag instead of inspecting individual values.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    /// All values parsed as floats. Blank fields become NaN.
    Numeric(Vec<f64>),
    /// At least one value failed to parse; originals kept verbatim.
    Text(Vec<String>),
}

impl ColumnValues {
    /// Number of values in the column.
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    /// Whether the column holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the column coerced to numeric values.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnValues::Numeric(_))
    }
}

/// A named measurement series.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: ColumnValues,
}

impl Column {
    /// Creates a column from a name and tagged values.
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tagged values.
    pub fn values(&self) -> &ColumnValues {
        &self.values
    }
}

/// An immutable snapshot of one loaded model output file.
///
/// The first column is always the time axis: model Julian day numbers,
/// fractional, in file order. Remaining columns are measurement series.
/// Construction enforces the structural invariants; afterwards the
/// dataset is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularDataset {
    time_name: String,
    time: Vec<f64>,
    columns: Vec<Column>,
    start_year: Option<i32>,
}

impl TabularDataset {
    /// Creates a dataset from a time axis and data columns.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidDataset`] if the time axis is empty, a
    /// column's length differs from the time axis, or column names
    /// (including the time name) are not unique.
    pub fn new(
        time_name: impl Into<String>,
        time: Vec<f64>,
        columns: Vec<Column>,
    ) -> Result<Self, IoError> {
        let time_name = time_name.into();

        if time.is_empty() {
            return Err(IoError::InvalidDataset {
                reason: "time axis has no rows".to_string(),
            });
        }

        for col in &columns {
            if col.values().len() != time.len() {
                return Err(IoError::InvalidDataset {
                    reason: format!(
                        "column '{}' has {} value(s) but the time axis has {} row(s)",
                        col.name(),
                        col.values().len(),
                        time.len()
                    ),
                });
            }
        }

        let mut seen = vec![time_name.as_str()];
        for col in &columns {
            if seen.contains(&col.name()) {
                return Err(IoError::InvalidDataset {
                    reason: format!("duplicate column name '{}'", col.name()),
                });
            }
            seen.push(col.name());
        }

        Ok(Self {
            time_name,
            time,
            columns,
            start_year: None,
        })
    }

    /// Attaches the simulation start year used for timestamp conversion.
    pub fn with_start_year(mut self, year: i32) -> Self {
        self.start_year = Some(year);
        self
    }

    /// Name of the time column.
    pub fn time_name(&self) -> &str {
        &self.time_name
    }

    /// The time axis as model Julian day numbers.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Simulation start year, if known.
    pub fn start_year(&self) -> Option<i32> {
        self.start_year
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.time.len()
    }

    /// Number of data columns (the time axis not included).
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// All data columns in file order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a data column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Data column names in file order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Converts the time axis to calendar timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Calendar`] if no start year is attached or a
    /// day number cannot be converted.
    pub fn timestamps(&self) -> Result<Vec<NaiveDateTime>, IoError> {
        let year = self.start_year.ok_or_else(|| IoError::Calendar {
            reason: "dataset has no start year".to_string(),
        })?;
        Ok(clearview_calendar::days_to_datetimes(year, &self.time)?)
    }
}

/// Parse a single raw field as a float.
///
/// Blank fields are treated as missing values (NaN) so that a numeric
/// column with trailing blanks stays numeric; anything else must satisfy
/// Rust float syntax, which covers both plain decimal and `E`-exponent
/// scientific notation.
pub(crate) fn parse_field(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(f64::NAN);
    }
    trimmed.parse::<f64>().ok()
}

/// Coerce raw column values to numeric, falling back to text.
///
/// The fallback is per column, not per value: one unparsable entry keeps
/// every value verbatim.
pub(crate) fn coerce_values(raw: Vec<String>) -> ColumnValues {
    let parsed: Option<Vec<f64>> = raw.iter().map(|v| parse_field(v)).collect();
    match parsed {
        Some(numbers) => ColumnValues::Numeric(numbers),
        None => ColumnValues::Text(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(name: &str, values: Vec<f64>) -> Column {
        Column::new(name, ColumnValues::Numeric(values))
    }

    #[test]
    fn new_valid_dataset() {
        let ds = TabularDataset::new(
            "JDAY",
            vec![1.0, 2.0],
            vec![numeric("TIN", vec![4.5, 4.6])],
        )
        .unwrap();
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.n_cols(), 1);
        assert_eq!(ds.time_name(), "JDAY");
        assert_eq!(ds.column_names(), vec!["TIN"]);
    }

    #[test]
    fn new_rejects_empty_time_axis() {
        let err = TabularDataset::new("JDAY", vec![], vec![]).unwrap_err();
        assert!(matches!(err, IoError::InvalidDataset { .. }));
    }

    #[test]
    fn new_rejects_length_mismatch() {
        let err = TabularDataset::new(
            "JDAY",
            vec![1.0, 2.0, 3.0],
            vec![numeric("TIN", vec![4.5])],
        )
        .unwrap_err();
        assert!(err.to_string().contains("TIN"));
    }

    #[test]
    fn new_rejects_duplicate_names() {
        let err = TabularDataset::new(
            "JDAY",
            vec![1.0],
            vec![numeric("TIN", vec![4.5]), numeric("TIN", vec![4.6])],
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn new_rejects_column_shadowing_time_name() {
        let err =
            TabularDataset::new("JDAY", vec![1.0], vec![numeric("JDAY", vec![4.5])]).unwrap_err();
        assert!(matches!(err, IoError::InvalidDataset { .. }));
    }

    #[test]
    fn column_lookup() {
        let ds = TabularDataset::new(
            "JDAY",
            vec![1.0],
            vec![numeric("TIN", vec![4.5]), numeric("TOUT", vec![5.5])],
        )
        .unwrap();
        assert!(ds.column("TOUT").is_some());
        assert!(ds.column("TMAX").is_none());
    }

    #[test]
    fn timestamps_require_start_year() {
        let ds = TabularDataset::new("JDAY", vec![1.0], vec![]).unwrap();
        assert!(ds.timestamps().is_err());

        let ds = ds.with_start_year(2006);
        let ts = ds.timestamps().unwrap();
        assert_eq!(ts[0].to_string(), "2006-01-01 00:00:00");
    }

    // -- coercion -----------------------------------------------------------

    #[test]
    fn coerce_scientific_notation() {
        let values = coerce_values(vec!["0.480E-01".to_string(), "0.485E-01".to_string()]);
        match values {
            ColumnValues::Numeric(v) => {
                assert!((v[0] - 0.0480).abs() < 1e-12);
                assert!((v[1] - 0.0485).abs() < 1e-12);
            }
            ColumnValues::Text(_) => panic!("scientific notation should coerce"),
        }
    }

    #[test]
    fn coerce_mixed_notation_in_one_column() {
        let values = coerce_values(vec!["0.48".to_string(), "4.8e-1".to_string()]);
        assert!(values.is_numeric());
    }

    #[test]
    fn sentinel_keeps_column_as_text() {
        let values = coerce_values(vec!["0.48".to_string(), "N/A".to_string()]);
        match values {
            ColumnValues::Text(v) => assert_eq!(v, vec!["0.48", "N/A"]),
            ColumnValues::Numeric(_) => panic!("sentinel value must keep the column textual"),
        }
    }

    #[test]
    fn blank_field_becomes_nan_not_text() {
        let values = coerce_values(vec!["1.5".to_string(), "".to_string()]);
        match values {
            ColumnValues::Numeric(v) => {
                assert_eq!(v[0], 1.5);
                assert!(v[1].is_nan());
            }
            ColumnValues::Text(_) => panic!("blank fields should read as missing values"),
        }
    }

    #[test]
    fn parse_field_trims_whitespace() {
        assert_eq!(parse_field("  4.50  "), Some(4.5));
        assert_eq!(parse_field("bad"), None);
    }
}
