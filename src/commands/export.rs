//! Export SLA records for reporting and backup.

use crate::libs::{
    calendar::BusinessCalendar,
    config::Config,
    export::{ExportData, ExportFormat, Exporter},
};
use anyhow::Result;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;

/// Command-line arguments for the export command.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// What to export
    #[arg(long, short, value_enum, default_value = "report", help = "Data to export")]
    data: ExportData,

    /// Output format
    #[arg(long, short, value_enum, default_value = "csv", help = "Output format")]
    format: ExportFormat,

    /// Output file path (defaults to slat_<data>_<date>.<ext>)
    #[arg(long, short, help = "Output file path")]
    output: Option<PathBuf>,
}

/// Executes the export command.
pub fn cmd(args: ExportArgs) -> Result<()> {
    let config = Config::read()?;
    let calendar = BusinessCalendar::from_config(&config.business.unwrap_or_default())?;
    let thresholds = config.warning.unwrap_or_default();
    let now = Utc::now();

    Exporter::new(args.format, args.data, args.output, now).export(args.data, &calendar, &thresholds, now)
}
