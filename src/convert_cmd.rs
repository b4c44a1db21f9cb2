use anyhow::{Context, Result};
use tracing::warn;

use clearview_io::{read_file, write_csv, write_hdf5, write_netcdf, write_sqlite};

use crate::cli::ConvertArgs;
use crate::config;
use crate::convert::{OutputFormat, build_load_config, parse_output_format, resolve_key};

/// Run the `convert` subcommand.
pub fn run(args: ConvertArgs) -> Result<()> {
    let format = parse_output_format(&args.output)?;
    let cfg = config::load(args.config.as_deref())?;
    let load_cfg = build_load_config(&cfg.load, args.year, args.lenient);

    let report = read_file(&args.input, &load_cfg)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    if report.skipped_rows > 0 {
        warn!(skipped = report.skipped_rows, "malformed rows were skipped");
    }

    let dataset = &report.dataset;
    let key = resolve_key(args.key.as_deref(), cfg.output.key.as_deref(), &args.input);

    match format {
        OutputFormat::Sqlite => write_sqlite(dataset, &args.output, &key),
        OutputFormat::Hdf5 => write_hdf5(dataset, &args.output, &key),
        OutputFormat::Netcdf => write_netcdf(dataset, &args.output),
        OutputFormat::Csv => write_csv(dataset, &args.output),
    }
    .with_context(|| format!("failed to write {}", args.output.display()))?;

    println!(
        "wrote {} ({} rows, {} columns)",
        args.output.display(),
        dataset.n_rows(),
        dataset.n_cols()
    );
    Ok(())
}
