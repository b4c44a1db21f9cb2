//! Error types for clearview-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the clearview-io crate.
///
/// This enum covers file-type detection, header discovery, row parsing,
/// and the SQLite/HDF5/NetCDF persistence targets. Detection and header
/// failures are fatal to a load; per-value coercion failures never appear
/// here because they degrade a column to text instead.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when neither the extension nor content sniffing can
    /// classify a file as fixed-width or delimited.
    #[error("unsupported file format: {}", path.display())]
    UnsupportedFormat {
        /// Path to the unclassifiable file.
        path: PathBuf,
    },

    /// Returned when no header row is found within the lookahead window.
    #[error("no header row found in the first {rows_scanned} row(s) of {}", path.display())]
    HeaderNotFound {
        /// Path to the file that was scanned.
        path: PathBuf,
        /// Number of leading rows inspected before giving up.
        rows_scanned: usize,
    },

    /// Returned in strict mode when a data row does not match the header
    /// layout.
    #[error("malformed row at line {line}: {reason}")]
    MalformedRow {
        /// One-based line number of the offending row.
        line: usize,
        /// Description of the shape mismatch.
        reason: String,
    },

    /// Returned when a destination is unwritable or rejects the dataset
    /// shape.
    #[error("write target error for {}: {reason}", path.display())]
    WriteTargetError {
        /// Destination path.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Returned when a file yields no data rows at all.
    #[error("no data rows in {}", path.display())]
    EmptyDataset {
        /// Path to the empty file.
        path: PathBuf,
    },

    /// Returned when a dataset violates a structural invariant.
    #[error("invalid dataset: {reason}")]
    InvalidDataset {
        /// Description of the violated invariant.
        reason: String,
    },

    /// Returned when a load configuration is internally inconsistent.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration problem.
        reason: String,
    },

    /// Returned when a named column or variable is absent from a container.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the container that was inspected.
        path: PathBuf,
    },

    /// Wraps an ordinary I/O error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Wraps an error originating from the SQLite library.
    #[error("sqlite error: {reason}")]
    Sqlite {
        /// Description of the underlying SQLite failure.
        reason: String,
    },

    /// Wraps an error originating from the HDF5 library.
    #[error("hdf5 error: {reason}")]
    Hdf5 {
        /// Description of the underlying HDF5 failure.
        reason: String,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps an error originating from the clearview-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },
}

impl From<rusqlite::Error> for IoError {
    fn from(e: rusqlite::Error) -> Self {
        IoError::Sqlite {
            reason: e.to_string(),
        }
    }
}

impl From<hdf5::Error> for IoError {
    fn from(e: hdf5::Error) -> Self {
        IoError::Hdf5 {
            reason: e.to_string(),
        }
    }
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<clearview_calendar::CalendarError> for IoError {
    fn from(e: clearview_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}
