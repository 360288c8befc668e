//! List tracked requests with their computed SLA state.
//!
//! Shows open records by default; `--all` includes terminal ones and
//! `--status` filters to a single state. Each row carries the computed
//! elapsed/remaining hours and warning level for the current instant.

use crate::{
    db::records::SlaRecords,
    libs::{calendar::BusinessCalendar, config::Config, messages::Message, sla::SlaStatus, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::Utc;
use clap::Args;

/// Command-line arguments for the list command.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Include met and violated records
    #[arg(long, short, help = "Include terminal records")]
    all: bool,

    /// Only records with this status (active, paused, met, violated)
    #[arg(long, short, help = "Filter by status")]
    status: Option<String>,
}

/// Executes the list command.
pub fn cmd(args: ListArgs) -> Result<()> {
    let config = Config::read()?;
    let calendar = BusinessCalendar::from_config(&config.business.unwrap_or_default())?;
    let thresholds = config.warning.unwrap_or_default();
    let now = Utc::now();
    let store = SlaRecords::new()?;

    let records = match &args.status {
        Some(status) => {
            let status: SlaStatus = status.parse()?;
            let records = store.fetch_with_status(status)?;
            if records.is_empty() {
                msg_info!(Message::NoRecordsForStatus(status.to_string()));
                return Ok(());
            }
            records
        }
        None if args.all => store.fetch_all()?,
        None => store.fetch_open_all()?,
    };

    if records.is_empty() {
        msg_info!(Message::NoOpenRecords);
        return Ok(());
    }

    let rows: Vec<_> = records
        .into_iter()
        .map(|record| {
            let snapshot = record.status_at(&calendar, &thresholds, now);
            (record, snapshot)
        })
        .collect();

    msg_print!(Message::ListTitle, true);
    View::records(&rows, calendar.timezone())?;

    Ok(())
}
