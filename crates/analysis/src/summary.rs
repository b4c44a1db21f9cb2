//! Per-column summary statistics.

use clearview_io::{ColumnValues, TabularDataset};

/// Summary statistics of one numeric column, NaN values excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    /// Column name.
    pub name: String,
    /// Number of non-NaN values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (N-1 denominator); 0.0 below two values.
    pub std: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

/// Summarise every numeric column of a dataset.
///
/// Text columns and columns that are entirely NaN are omitted; order
/// otherwise follows the dataset.
pub fn summarize(dataset: &TabularDataset) -> Vec<ColumnSummary> {
    dataset
        .columns()
        .iter()
        .filter_map(|col| match col.values() {
            ColumnValues::Numeric(values) => summarize_column(col.name(), values),
            ColumnValues::Text(_) => None,
        })
        .collect()
}

fn summarize_column(name: &str, values: &[f64]) -> Option<ColumnSummary> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if finite.is_empty() {
        return None;
    }

    let count = finite.len();
    let mean = finite.iter().sum::<f64>() / count as f64;
    let std = if count < 2 {
        0.0
    } else {
        (finite.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (count as f64 - 1.0)).sqrt()
    };
    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(ColumnSummary {
        name: name.to_string(),
        count,
        mean,
        std,
        min,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use clearview_io::Column;

    fn dataset(columns: Vec<Column>) -> TabularDataset {
        let n = columns[0].values().len();
        let time: Vec<f64> = (1..=n).map(|i| i as f64).collect();
        TabularDataset::new("JDAY", time, columns).unwrap()
    }

    #[test]
    fn basic_aggregates() {
        let ds = dataset(vec![Column::new(
            "TIN",
            ColumnValues::Numeric(vec![4.0, 5.0, 6.0]),
        )]);
        let summaries = summarize(&ds);
        assert_eq!(summaries.len(), 1);

        let s = &summaries[0];
        assert_eq!(s.name, "TIN");
        assert_eq!(s.count, 3);
        assert_relative_eq!(s.mean, 5.0);
        assert_relative_eq!(s.std, 1.0);
        assert_relative_eq!(s.min, 4.0);
        assert_relative_eq!(s.max, 6.0);
    }

    #[test]
    fn nan_values_are_excluded() {
        let ds = dataset(vec![Column::new(
            "TIN",
            ColumnValues::Numeric(vec![4.0, f64::NAN, 6.0]),
        )]);
        let s = &summarize(&ds)[0];
        assert_eq!(s.count, 2);
        assert_relative_eq!(s.mean, 5.0);
    }

    #[test]
    fn all_nan_column_is_omitted() {
        let ds = dataset(vec![
            Column::new("GAP", ColumnValues::Numeric(vec![f64::NAN, f64::NAN])),
            Column::new("TIN", ColumnValues::Numeric(vec![4.0, 5.0])),
        ]);
        let summaries = summarize(&ds);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "TIN");
    }

    #[test]
    fn text_column_is_omitted() {
        let ds = dataset(vec![
            Column::new(
                "NOTE",
                ColumnValues::Text(vec!["ok".to_string(), "iced".to_string()]),
            ),
            Column::new("TIN", ColumnValues::Numeric(vec![4.0, 5.0])),
        ]);
        assert_eq!(summarize(&ds).len(), 1);
    }

    #[test]
    fn single_value_has_zero_std() {
        let ds = dataset(vec![Column::new("TIN", ColumnValues::Numeric(vec![4.5]))]);
        let s = &summarize(&ds)[0];
        assert_eq!(s.count, 1);
        assert_relative_eq!(s.std, 0.0);
        assert_relative_eq!(s.min, 4.5);
        assert_relative_eq!(s.max, 4.5);
    }
}
