//! Fixed-width row parsing.

use crate::header::FieldSpec;

/// Slice one data row into its fields by character extent.
///
/// A field may be truncated by the end of the line (trailing spaces are
/// routinely stripped by the model), but a line that ends before a
/// field *starts* is malformed; the error carries the reason for the
/// caller's `MalformedRow`.
pub(crate) fn parse_row(line: &str, fields: &[FieldSpec]) -> Result<Vec<String>, String> {
    let bytes = line.as_bytes();
    let mut values = Vec::with_capacity(fields.len());

    for field in fields {
        if field.start >= bytes.len() {
            return Err(format!(
                "line ends at byte {} before column '{}' (offset {})",
                bytes.len(),
                field.name,
                field.start
            ));
        }
        let end = (field.start + field.width).min(bytes.len());
        let value = String::from_utf8_lossy(&bytes[field.start..end])
            .trim()
            .to_string();
        values.push(value);
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Vec<FieldSpec> {
        ["JDAY", "TAIR", "TDEW"]
            .iter()
            .enumerate()
            .map(|(i, name)| FieldSpec {
                name: (*name).to_string(),
                start: i * 8,
                width: 8,
            })
            .collect()
    }

    #[test]
    fn parses_full_row() {
        let values = parse_row("1.000   -5.00   -7.00   ", &layout()).unwrap();
        assert_eq!(values, vec!["1.000", "-5.00", "-7.00"]);
    }

    #[test]
    fn truncated_final_field_is_accepted() {
        // Trailing spaces stripped: the last field is only 5 bytes wide.
        let values = parse_row("1.000   -5.00   -7.00", &layout()).unwrap();
        assert_eq!(values[2], "-7.00");
    }

    #[test]
    fn short_row_is_rejected() {
        let err = parse_row("1.000", &layout()).unwrap_err();
        assert!(err.contains("TAIR"), "unexpected reason: {err}");
    }

    #[test]
    fn blank_interior_field_reads_as_empty() {
        let values = parse_row("1.000           -7.00   ", &layout()).unwrap();
        assert_eq!(values[1], "");
    }
}
