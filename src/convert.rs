//! Pure conversion functions: TOML config structs -> crate API config types.

use std::path::Path;

use anyhow::{Result, bail};

use clearview_io::{LoadConfig, Mode};

use crate::config::LoadToml;

/// Destination formats the `convert` subcommand can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Sqlite,
    Hdf5,
    Netcdf,
    Csv,
}

/// Chooses the output format from the destination extension.
pub fn parse_output_format(path: &Path) -> Result<OutputFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "sqlite" | "db" => Ok(OutputFormat::Sqlite),
        "h5" | "hdf5" => Ok(OutputFormat::Hdf5),
        "nc" => Ok(OutputFormat::Netcdf),
        "csv" => Ok(OutputFormat::Csv),
        other => bail!(
            "unsupported output extension {other:?} for {}: \
             use .sqlite/.db, .h5/.hdf5, .nc, or .csv",
            path.display()
        ),
    }
}

/// Builds a [`LoadConfig`] from the TOML load section plus CLI overrides.
pub fn build_load_config(
    load: &LoadToml,
    year_override: Option<i32>,
    lenient_override: bool,
) -> LoadConfig {
    let mut cfg = LoadConfig::new();
    if let Some(year) = year_override.or(load.start_year) {
        cfg = cfg.with_start_year(year);
    }
    if lenient_override || load.lenient {
        cfg = cfg.with_mode(Mode::Lenient);
    }
    if let Some(row) = load.header_row {
        cfg = cfg.with_header_row(row);
    }
    if let Some(width) = load.field_width {
        cfg = cfg.with_field_width(width);
    }
    if let Some(rows) = load.header_lookahead {
        cfg = cfg.with_header_lookahead(rows);
    }
    cfg
}

/// Table or group name: explicit key, config key, or the input file stem.
pub fn resolve_key(cli_key: Option<&str>, config_key: Option<&str>, input: &Path) -> String {
    cli_key
        .or(config_key)
        .map(str::to_string)
        .unwrap_or_else(|| {
            input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("dataset")
                .to_string()
        })
}
