use anyhow::{Context, Result};
use tracing::warn;

use clearview_analysis::{render_report, summarize};
use clearview_io::read_file;

use crate::cli::StatsArgs;
use crate::config;
use crate::convert::build_load_config;

/// Run the `stats` subcommand.
pub fn run(args: StatsArgs) -> Result<()> {
    let cfg = config::load(args.config.as_deref())?;
    let load_cfg = build_load_config(&cfg.load, args.year, args.lenient);

    let report = read_file(&args.input, &load_cfg)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    if report.skipped_rows > 0 {
        warn!(skipped = report.skipped_rows, "malformed rows were skipped");
    }

    let summaries = summarize(&report.dataset);
    print!("{}", render_report(&report.dataset, &summaries));
    Ok(())
}
