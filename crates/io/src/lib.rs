//! # clearview-io
//!
//! Load CE-QUAL-W2 model output files (fixed-width `.npt`, delimited
//! `.csv`/`.opt`) into tabular datasets and persist them to SQLite,
//! HDF5, NetCDF, or delimited text.

mod csv_out;
mod dataset;
mod delimited;
mod detect;
mod error;
mod fixed_width;
mod hdf5_io;
mod header;
mod netcdf_io;
mod reader;
mod sqlite;

pub use csv_out::write_csv;
pub use dataset::{Column, ColumnValues, TabularDataset};
pub use detect::{FileType, detect_file_type};
pub use error::IoError;
pub use hdf5_io::{read_hdf5, write_hdf5};
pub use header::{
    ColumnLayout, DEFAULT_FIELD_WIDTH, FieldSpec, HeaderLayout, MAX_HEADER_LOOKAHEAD,
};
pub use netcdf_io::{read_netcdf, write_netcdf};
pub use reader::{LoadConfig, LoadReport, Mode, read_file};
pub use sqlite::{read_sqlite, write_sqlite};
