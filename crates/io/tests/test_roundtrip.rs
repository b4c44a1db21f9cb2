//! Persistence round trips through every storage target.

use approx::assert_relative_eq;
use clearview_io::{
    Column, ColumnValues, IoError, LoadConfig, TabularDataset, read_file, read_hdf5, read_netcdf,
    read_sqlite, write_csv, write_hdf5, write_netcdf, write_sqlite,
};

fn sample_dataset() -> TabularDataset {
    TabularDataset::new(
        "JDAY",
        vec![1.0, 1.5, 2.0],
        vec![
            Column::new("TIN", ColumnValues::Numeric(vec![4.5, f64::NAN, 4.7])),
            Column::new("PO4", ColumnValues::Numeric(vec![0.048, 0.0485, 0.049])),
            Column::new(
                "NOTE",
                ColumnValues::Text(vec![
                    "ok".to_string(),
                    "iced over".to_string(),
                    "ok".to_string(),
                ]),
            ),
        ],
    )
    .expect("sample dataset")
    .with_start_year(2006)
}

fn assert_numeric_eq(ds: &TabularDataset, name: &str, expected: &[f64]) {
    match ds.column(name).expect("column present").values() {
        ColumnValues::Numeric(v) => {
            assert_eq!(v.len(), expected.len());
            for (got, want) in v.iter().zip(expected) {
                if want.is_nan() {
                    assert!(got.is_nan(), "{name}: expected NaN, got {got}");
                } else {
                    assert_relative_eq!(got, want, epsilon = 1e-12);
                }
            }
        }
        ColumnValues::Text(_) => panic!("{name} should read back numeric"),
    }
}

// -- SQLite ----------------------------------------------------------------

#[test]
fn sqlite_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("out.sqlite");

    let ds = sample_dataset();
    write_sqlite(&ds, &db, "tsr_1_seg37").expect("write sqlite");
    let back = read_sqlite(&db, "tsr_1_seg37").expect("read sqlite");

    assert_eq!(back.time_name(), "JDAY");
    assert_eq!(back.time(), ds.time());
    assert_eq!(back.column_names(), ds.column_names());
    assert_eq!(back.start_year(), Some(2006));
    assert_numeric_eq(&back, "TIN", &[4.5, f64::NAN, 4.7]);
    match back.column("NOTE").expect("NOTE").values() {
        ColumnValues::Text(v) => assert_eq!(v[1], "iced over"),
        ColumnValues::Numeric(_) => panic!("NOTE should read back textual"),
    }
}

#[test]
fn sqlite_replaces_existing_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("out.sqlite");

    write_sqlite(&sample_dataset(), &db, "t").expect("first write");
    let smaller = TabularDataset::new(
        "JDAY",
        vec![10.0],
        vec![Column::new("TIN", ColumnValues::Numeric(vec![1.0]))],
    )
    .expect("smaller dataset");
    write_sqlite(&smaller, &db, "t").expect("second write");

    let back = read_sqlite(&db, "t").expect("read back");
    assert_eq!(back.n_rows(), 1);
    assert_eq!(back.column_names(), vec!["TIN"]);
}

#[test]
fn sqlite_missing_table_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db = dir.path().join("out.sqlite");
    write_sqlite(&sample_dataset(), &db, "t").expect("write");

    let err = read_sqlite(&db, "nope").expect_err("missing table");
    assert!(matches!(err, IoError::MissingColumn { .. }));
}

// -- HDF5 ------------------------------------------------------------------

#[test]
fn hdf5_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let h5 = dir.path().join("out.h5");

    let ds = sample_dataset();
    write_hdf5(&ds, &h5, "tsr_1_seg37").expect("write hdf5");
    let back = read_hdf5(&h5, "tsr_1_seg37").expect("read hdf5");

    assert_eq!(back.time_name(), "JDAY");
    assert_eq!(back.time(), ds.time());
    assert_eq!(back.column_names(), ds.column_names());
    assert_eq!(back.start_year(), Some(2006));
    assert_numeric_eq(&back, "PO4", &[0.048, 0.0485, 0.049]);
    match back.column("NOTE").expect("NOTE").values() {
        ColumnValues::Text(v) => assert_eq!(v[0], "ok"),
        ColumnValues::Numeric(_) => panic!("NOTE should read back textual"),
    }
}

#[test]
fn hdf5_two_groups_share_one_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let h5 = dir.path().join("out.h5");

    let ds = sample_dataset();
    write_hdf5(&ds, &h5, "met").expect("write met");
    write_hdf5(&ds, &h5, "tsr").expect("write tsr");

    assert_eq!(read_hdf5(&h5, "met").expect("read met").n_rows(), 3);
    assert_eq!(read_hdf5(&h5, "tsr").expect("read tsr").n_rows(), 3);
}

#[test]
fn hdf5_rewrite_replaces_group() {
    let dir = tempfile::tempdir().expect("tempdir");
    let h5 = dir.path().join("out.h5");

    write_hdf5(&sample_dataset(), &h5, "g").expect("first write");
    let smaller = TabularDataset::new(
        "JDAY",
        vec![10.0],
        vec![Column::new("TIN", ColumnValues::Numeric(vec![1.0]))],
    )
    .expect("smaller dataset");
    write_hdf5(&smaller, &h5, "g").expect("second write");

    let back = read_hdf5(&h5, "g").expect("read back");
    assert_eq!(back.n_rows(), 1);
    assert_eq!(back.column_names(), vec!["TIN"]);
    assert_eq!(back.start_year(), None);
}

// -- NetCDF ----------------------------------------------------------------

#[test]
fn netcdf_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nc = dir.path().join("out.nc");

    let numeric_only = TabularDataset::new(
        "JDAY",
        vec![1.0, 1.5, 2.0],
        vec![
            Column::new("TIN", ColumnValues::Numeric(vec![4.5, f64::NAN, 4.7])),
            Column::new("PO4", ColumnValues::Numeric(vec![0.048, 0.0485, 0.049])),
        ],
    )
    .expect("numeric dataset")
    .with_start_year(2006);

    write_netcdf(&numeric_only, &nc).expect("write netcdf");
    let back = read_netcdf(&nc).expect("read netcdf");

    assert_eq!(back.time_name(), "JDAY");
    assert_eq!(back.time(), numeric_only.time());
    assert_eq!(back.column_names(), vec!["TIN", "PO4"]);
    assert_eq!(back.start_year(), Some(2006));
    assert_numeric_eq(&back, "TIN", &[4.5, f64::NAN, 4.7]);
}

#[test]
fn netcdf_rejects_text_columns() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nc = dir.path().join("out.nc");

    let err = write_netcdf(&sample_dataset(), &nc).expect_err("text column must be rejected");
    match err {
        IoError::WriteTargetError { reason, .. } => assert!(reason.contains("NOTE")),
        other => panic!("expected WriteTargetError, got {other}"),
    }
}

// -- CSV -------------------------------------------------------------------

#[test]
fn csv_round_trip_through_loader() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv = dir.path().join("out.csv");

    let ds = sample_dataset();
    write_csv(&ds, &csv).expect("write csv");
    let back = read_file(&csv, &LoadConfig::new().with_start_year(2006))
        .expect("read csv back")
        .dataset;

    assert_eq!(back.time_name(), "JDAY");
    assert_eq!(back.time(), ds.time());
    assert_eq!(back.column_names(), ds.column_names());
    assert_numeric_eq(&back, "TIN", &[4.5, f64::NAN, 4.7]);
    match back.column("NOTE").expect("NOTE").values() {
        ColumnValues::Text(v) => assert_eq!(v[1], "iced over"),
        ColumnValues::Numeric(_) => panic!("NOTE should read back textual"),
    }
}
