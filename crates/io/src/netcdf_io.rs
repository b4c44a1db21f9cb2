//! NetCDF persistence: one `time` dimension, one variable per column.
//!
//! NetCDF is the numeric-array target; a dataset holding a text column
//! cannot be represented and is rejected up front. Global attributes
//! record the time-variable name and the start year.

use std::path::Path;

use netcdf::AttributeValue;
use tracing::info;

use crate::dataset::{Column, ColumnValues, TabularDataset};
use crate::error::IoError;

const TIME_DIM: &str = "time";
const ATTR_TIME_NAME: &str = "time_name";
const ATTR_START_YEAR: &str = "start_year";

/// Write a dataset to a NetCDF file.
///
/// Every column becomes an `f64` variable over the shared `time`
/// dimension; the time axis is written under its own name with a
/// `units` attribute of `days since <year>-01-01` when the start year
/// is known (day 1.0 falls on January 1st).
///
/// # Errors
///
/// Returns [`IoError::WriteTargetError`] if the dataset holds a text
/// column or the file cannot be created, and [`IoError::Netcdf`] for
/// failures inside the library.
pub fn write_netcdf(dataset: &TabularDataset, path: &Path) -> Result<(), IoError> {
    if let Some(col) = dataset.columns().iter().find(|c| !c.values().is_numeric()) {
        return Err(IoError::WriteTargetError {
            path: path.to_path_buf(),
            reason: format!("text column '{}' not representable", col.name()),
        });
    }

    let mut file = netcdf::create(path).map_err(|e| IoError::WriteTargetError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    file.add_dimension(TIME_DIM, dataset.n_rows())?;

    let mut time_var = file.add_variable::<f64>(dataset.time_name(), &[TIME_DIM])?;
    time_var.put_values(dataset.time(), ..)?;
    if let Some(year) = dataset.start_year() {
        time_var.put_attribute("units", format!("days since {year}-01-01"))?;
    } else {
        time_var.put_attribute("units", "days")?;
    }

    for col in dataset.columns() {
        let ColumnValues::Numeric(values) = col.values() else {
            unreachable!("text columns rejected above");
        };
        let mut var = file.add_variable::<f64>(col.name(), &[TIME_DIM])?;
        var.put_values(values, ..)?;
    }

    file.add_attribute(ATTR_TIME_NAME, dataset.time_name())?;
    if let Some(year) = dataset.start_year() {
        file.add_attribute(ATTR_START_YEAR, year)?;
    }

    info!(
        path = %path.display(),
        rows = dataset.n_rows(),
        cols = dataset.n_cols(),
        "wrote netcdf file"
    );
    Ok(())
}

/// Read a dataset back from a NetCDF file written by [`write_netcdf`].
///
/// The `time_name` global attribute names the time variable; without it
/// the first variable in definition order is taken as the time axis.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist and
/// [`IoError::MissingColumn`] if the time variable is absent.
pub fn read_netcdf(path: &Path) -> Result<TabularDataset, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = netcdf::open(path)?;

    let time_name = match file.attribute(ATTR_TIME_NAME) {
        Some(attr) => match attr.value()? {
            AttributeValue::Str(s) => s,
            _ => {
                return Err(IoError::InvalidDataset {
                    reason: "time_name attribute is not a string".to_string(),
                });
            }
        },
        None => file
            .variables()
            .next()
            .map(|v| v.name().to_string())
            .ok_or_else(|| IoError::InvalidDataset {
                reason: format!("no variables in {}", path.display()),
            })?,
    };

    let time = file
        .variable(&time_name)
        .ok_or_else(|| IoError::MissingColumn {
            name: time_name.clone(),
            path: path.to_path_buf(),
        })?
        .get_values::<f64, _>(..)?;

    let mut columns = Vec::new();
    for var in file.variables() {
        if var.name() == time_name {
            continue;
        }
        let values = var.get_values::<f64, _>(..)?;
        columns.push(Column::new(
            var.name().to_string(),
            ColumnValues::Numeric(values),
        ));
    }

    let mut dataset = TabularDataset::new(time_name, time, columns)?;
    if let Some(attr) = file.attribute(ATTR_START_YEAR)
        && let AttributeValue::Int(year) = attr.value()?
    {
        dataset = dataset.with_start_year(year);
    }
    Ok(dataset)
}
