//! HDF5 persistence: one group per dataset, one 1-D array per column.
//!
//! The group carries the time axis under its own name, every data column
//! under its name, and a formatted `Date` string array when the dataset
//! knows its start year. Group attributes record the time-column name,
//! the column order (HDF5 iterates members alphabetically), and the
//! start year.

use std::path::Path;

use hdf5::types::{TypeDescriptor, VarLenUnicode};
use tracing::info;

use crate::dataset::{Column, ColumnValues, TabularDataset};
use crate::error::IoError;

const ATTR_TIME_NAME: &str = "time_name";
const ATTR_COLUMN_ORDER: &str = "column_order";
const ATTR_START_YEAR: &str = "start_year";
const DATE_DATASET: &str = "Date";

/// Write a dataset into a group of an HDF5 file.
///
/// The file is created if absent and extended otherwise, so several
/// datasets can share one file under different group names. An existing
/// group of the same name is replaced.
///
/// # Errors
///
/// Returns [`IoError::WriteTargetError`] if the file cannot be opened
/// for writing and [`IoError::Hdf5`] for layout-level failures.
pub fn write_hdf5(dataset: &TabularDataset, path: &Path, group: &str) -> Result<(), IoError> {
    let file = hdf5::File::append(path).map_err(|e| IoError::WriteTargetError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if file.link_exists(group) {
        file.unlink(group)?;
    }
    let g = file.create_group(group)?;

    g.new_dataset_builder()
        .with_data(dataset.time())
        .create(dataset.time_name())?;

    for col in dataset.columns() {
        match col.values() {
            ColumnValues::Numeric(v) => {
                g.new_dataset_builder().with_data(v).create(col.name())?;
            }
            ColumnValues::Text(v) => {
                let strings = unicode_values(v)?;
                g.new_dataset_builder()
                    .with_data(&strings)
                    .create(col.name())?;
            }
        }
    }

    if dataset.start_year().is_some() {
        let dates: Vec<String> = dataset
            .timestamps()?
            .iter()
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .collect();
        let strings = unicode_values(&dates)?;
        g.new_dataset_builder()
            .with_data(&strings)
            .create(DATE_DATASET)?;
    }

    let time_name: VarLenUnicode = parse_unicode(dataset.time_name())?;
    g.new_attr::<VarLenUnicode>()
        .create(ATTR_TIME_NAME)?
        .write_scalar(&time_name)?;

    let order = unicode_values(
        &dataset
            .column_names()
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>(),
    )?;
    g.new_attr_builder()
        .with_data(&order)
        .create(ATTR_COLUMN_ORDER)?;

    if let Some(year) = dataset.start_year() {
        g.new_attr::<i32>()
            .create(ATTR_START_YEAR)?
            .write_scalar(&year)?;
    }

    info!(
        path = %path.display(),
        group,
        rows = dataset.n_rows(),
        cols = dataset.n_cols(),
        "wrote hdf5 group"
    );
    Ok(())
}

/// Read a dataset back from an HDF5 group written by [`write_hdf5`].
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist,
/// [`IoError::MissingColumn`] if the group is absent, and
/// [`IoError::Hdf5`] for anything the library rejects.
pub fn read_hdf5(path: &Path, group: &str) -> Result<TabularDataset, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = hdf5::File::open(path)?;
    let g = file.group(group).map_err(|_| IoError::MissingColumn {
        name: group.to_string(),
        path: path.to_path_buf(),
    })?;

    let time_name = g
        .attr(ATTR_TIME_NAME)?
        .read_scalar::<VarLenUnicode>()?
        .to_string();
    let order: Vec<String> = g
        .attr(ATTR_COLUMN_ORDER)?
        .read_1d::<VarLenUnicode>()?
        .iter()
        .map(|n| n.to_string())
        .collect();

    let time = g.dataset(&time_name)?.read_1d::<f64>()?.to_vec();

    let mut columns = Vec::with_capacity(order.len());
    for name in &order {
        let ds = g.dataset(name).map_err(|_| IoError::MissingColumn {
            name: name.clone(),
            path: path.to_path_buf(),
        })?;
        let values = match ds.dtype()?.to_descriptor()? {
            TypeDescriptor::VarLenUnicode => ColumnValues::Text(
                ds.read_1d::<VarLenUnicode>()?
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
            _ => ColumnValues::Numeric(ds.read_1d::<f64>()?.to_vec()),
        };
        columns.push(Column::new(name.clone(), values));
    }

    let mut dataset = TabularDataset::new(time_name, time, columns)?;
    if g.attr(ATTR_START_YEAR).is_ok() {
        let year = g.attr(ATTR_START_YEAR)?.read_scalar::<i32>()?;
        dataset = dataset.with_start_year(year);
    }
    Ok(dataset)
}

fn parse_unicode(s: &str) -> Result<VarLenUnicode, IoError> {
    s.parse::<VarLenUnicode>().map_err(|e| IoError::Hdf5 {
        reason: format!("string '{s}' not storable: {e}"),
    })
}

fn unicode_values(values: &[String]) -> Result<Vec<VarLenUnicode>, IoError> {
    values.iter().map(|s| parse_unicode(s)).collect()
}
