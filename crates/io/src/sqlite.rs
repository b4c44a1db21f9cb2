//! SQLite persistence: one dataset per table, plus a small metadata
//! table carrying what the schema cannot (the simulation start year).

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, params};
use tracing::info;

use crate::dataset::{Column, ColumnValues, TabularDataset};
use crate::error::IoError;

/// Metadata side table shared by every dataset in the database.
const META_TABLE: &str = "_clearview_meta";

/// Write a dataset to a table in an SQLite database.
///
/// An existing table of the same name is replaced. The time axis becomes
/// the first column (REAL), numeric columns become REAL, text columns
/// become TEXT. NaN values are stored as NULL.
///
/// # Errors
///
/// Returns [`IoError::WriteTargetError`] if the database cannot be
/// opened and [`IoError::Sqlite`] for statement-level failures.
pub fn write_sqlite(dataset: &TabularDataset, path: &Path, table: &str) -> Result<(), IoError> {
    let mut conn = Connection::open(path).map_err(|e| IoError::WriteTargetError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let tx = conn.transaction()?;

    tx.execute_batch(&format!("DROP TABLE IF EXISTS {}", quote_ident(table)))?;

    let mut column_defs = vec![format!("{} REAL", quote_ident(dataset.time_name()))];
    for col in dataset.columns() {
        let sql_type = if col.values().is_numeric() { "REAL" } else { "TEXT" };
        column_defs.push(format!("{} {sql_type}", quote_ident(col.name())));
    }
    tx.execute_batch(&format!(
        "CREATE TABLE {} ({})",
        quote_ident(table),
        column_defs.join(", ")
    ))?;
    tx.execute_batch(&format!(
        "CREATE INDEX {} ON {} ({})",
        quote_ident(&format!("{table}_time_idx")),
        quote_ident(table),
        quote_ident(dataset.time_name())
    ))?;

    let placeholders = vec!["?"; dataset.n_cols() + 1].join(", ");
    let insert = format!("INSERT INTO {} VALUES ({placeholders})", quote_ident(table));
    {
        let mut stmt = tx.prepare(&insert)?;
        for row in 0..dataset.n_rows() {
            let mut values = Vec::with_capacity(dataset.n_cols() + 1);
            values.push(real_or_null(dataset.time()[row]));
            for col in dataset.columns() {
                values.push(match col.values() {
                    ColumnValues::Numeric(v) => real_or_null(v[row]),
                    ColumnValues::Text(v) => Value::Text(v[row].clone()),
                });
            }
            stmt.execute(rusqlite::params_from_iter(values))?;
        }
    }

    tx.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {META_TABLE} \
         (table_name TEXT PRIMARY KEY, start_year INTEGER)"
    ))?;
    tx.execute(
        &format!("INSERT OR REPLACE INTO {META_TABLE} VALUES (?, ?)"),
        params![table, dataset.start_year()],
    )?;

    tx.commit()?;
    info!(
        path = %path.display(),
        table,
        rows = dataset.n_rows(),
        "wrote sqlite table"
    );
    Ok(())
}

/// Read a dataset back from an SQLite table written by [`write_sqlite`].
///
/// The first column of the table is taken as the time axis; NULL values
/// in numeric columns come back as NaN.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the database does not exist,
/// [`IoError::MissingColumn`] if the table is absent, and
/// [`IoError::InvalidDataset`] if the time column is not numeric.
pub fn read_sqlite(path: &Path, table: &str) -> Result<TabularDataset, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;

    let mut stmt = conn
        .prepare(&format!("SELECT * FROM {}", quote_ident(table)))
        .map_err(|_| IoError::MissingColumn {
            name: table.to_string(),
            path: path.to_path_buf(),
        })?;
    let names: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

    let mut raw: Vec<Vec<Value>> = vec![Vec::new(); names.len()];
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        for (i, slot) in raw.iter_mut().enumerate() {
            slot.push(row.get::<_, Value>(i)?);
        }
    }

    let mut iter = raw.into_iter();
    let time_values = iter.next().unwrap_or_default();
    let time: Vec<f64> = time_values
        .iter()
        .map(|v| value_as_f64(v))
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| IoError::InvalidDataset {
            reason: format!("time column '{}' holds non-numeric values", names[0]),
        })?;

    let columns: Vec<Column> = names[1..]
        .iter()
        .zip(iter)
        .map(|(name, values)| Column::new(name.clone(), values_from_sql(&values)))
        .collect();

    let mut dataset = TabularDataset::new(names[0].clone(), time, columns)?;
    if let Some(year) = read_start_year(&conn, table)? {
        dataset = dataset.with_start_year(year);
    }
    Ok(dataset)
}

fn read_start_year(conn: &Connection, table: &str) -> Result<Option<i32>, IoError> {
    let mut stmt = match conn.prepare(&format!(
        "SELECT start_year FROM {META_TABLE} WHERE table_name = ?"
    )) {
        Ok(stmt) => stmt,
        // Databases written by other tools carry no metadata table.
        Err(_) => return Ok(None),
    };
    let year = stmt
        .query_row(params![table], |row| row.get::<_, Option<i32>>(0))
        .unwrap_or(None);
    Ok(year)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn real_or_null(v: f64) -> Value {
    if v.is_nan() { Value::Null } else { Value::Real(v) }
}

fn value_as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Real(f) => Some(*f),
        Value::Integer(i) => Some(*i as f64),
        Value::Null => Some(f64::NAN),
        _ => None,
    }
}

fn values_from_sql(values: &[Value]) -> ColumnValues {
    if values.iter().any(|v| matches!(v, Value::Text(_))) {
        ColumnValues::Text(
            values
                .iter()
                .map(|v| match v {
                    Value::Text(s) => s.clone(),
                    Value::Real(f) => f.to_string(),
                    Value::Integer(i) => i.to_string(),
                    _ => String::new(),
                })
                .collect(),
        )
    } else {
        ColumnValues::Numeric(
            values
                .iter()
                .map(|v| value_as_f64(v).unwrap_or(f64::NAN))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("T2(C)"), "\"T2(C)\"");
        assert_eq!(quote_ident("bad\"name"), "\"bad\"\"name\"");
    }

    #[test]
    fn nan_maps_to_null_and_back() {
        assert_eq!(real_or_null(f64::NAN), Value::Null);
        assert!(value_as_f64(&Value::Null).unwrap().is_nan());
        assert_eq!(value_as_f64(&Value::Real(4.5)), Some(4.5));
    }

    #[test]
    fn text_values_refuse_numeric_reading() {
        assert_eq!(value_as_f64(&Value::Text("N/A".to_string())), None);
    }

    #[test]
    fn mixed_sql_column_reads_as_text() {
        let values = vec![Value::Real(1.0), Value::Text("N/A".to_string())];
        match values_from_sql(&values) {
            ColumnValues::Text(v) => assert_eq!(v, vec!["1", "N/A"]),
            ColumnValues::Numeric(_) => panic!("text entry must keep the column textual"),
        }
    }
}
