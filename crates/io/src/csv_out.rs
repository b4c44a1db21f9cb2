//! Delimited text export, the inverse of loading a `.csv` file.

use std::path::Path;

use tracing::info;

use crate::dataset::{ColumnValues, TabularDataset};
use crate::error::IoError;

/// Write a dataset as delimited text with a single header row.
///
/// NaN values are written as empty fields, which read back as missing
/// values. Text columns are written verbatim.
///
/// # Errors
///
/// Returns [`IoError::WriteTargetError`] if the destination cannot be
/// created and [`IoError::Io`] for write failures.
pub fn write_csv(dataset: &TabularDataset, path: &Path) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| IoError::WriteTargetError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut header = vec![dataset.time_name()];
    header.extend(dataset.column_names());
    writer
        .write_record(&header)
        .map_err(|e| IoError::Io(std::io::Error::other(e)))?;

    for row in 0..dataset.n_rows() {
        let mut record = Vec::with_capacity(dataset.n_cols() + 1);
        record.push(format_value(dataset.time()[row]));
        for col in dataset.columns() {
            record.push(match col.values() {
                ColumnValues::Numeric(v) => format_value(v[row]),
                ColumnValues::Text(v) => v[row].clone(),
            });
        }
        writer
            .write_record(&record)
            .map_err(|e| IoError::Io(std::io::Error::other(e)))?;
    }
    writer
        .flush()
        .map_err(IoError::Io)?;

    info!(
        path = %path.display(),
        rows = dataset.n_rows(),
        "wrote csv file"
    );
    Ok(())
}

fn format_value(v: f64) -> String {
    if v.is_nan() { String::new() } else { v.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nan_formats_as_empty_field() {
        assert_eq!(format_value(f64::NAN), "");
        assert_eq!(format_value(4.5), "4.5");
        assert_eq!(format_value(0.048), "0.048");
    }
}
