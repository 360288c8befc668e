//! Show the computed SLA status for a request.
//!
//! Displays the engine's full snapshot — elapsed and remaining business
//! hours, progress percentage, and warning level — for the most recent
//! record of a request. Works for open and completed records alike; a
//! request that was never tracked is reported as not found, which is a
//! different thing than a violated SLA.

use crate::{
    db::records::SlaRecords,
    libs::{
        calendar::BusinessCalendar,
        config::Config,
        formatter::format_hours,
        messages::Message,
        sla::WarningLevel,
        view::View,
    },
    msg_bail_anyhow, msg_print, msg_warning,
};
use anyhow::Result;
use chrono::Utc;
use clap::Args;

/// Command-line arguments for the status command.
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Request identifier to inspect
    #[arg(long, short, help = "Request identifier")]
    request: String,
}

/// Executes the status command.
pub fn cmd(args: StatusArgs) -> Result<()> {
    let config = Config::read()?;
    let calendar = BusinessCalendar::from_config(&config.business.clone().unwrap_or_default())?;
    let thresholds = config.warning.unwrap_or_default();
    let now = Utc::now();

    let record = match SlaRecords::new()?.fetch_latest(&args.request)? {
        Some(record) => record,
        None => msg_bail_anyhow!(Message::SlaNotFound(args.request)),
    };

    let snapshot = record.status_at(&calendar, &thresholds, now);

    msg_print!(Message::StatusTitle(record.request_id.clone()), true);
    View::status(&record, &snapshot, calendar.timezone())?;

    if snapshot.hours_remaining < 0.0 {
        msg_warning!(Message::OverdueBy(format_hours(-snapshot.hours_remaining)));
    } else if snapshot.warning_level != WarningLevel::None {
        msg_warning!(Message::WarningLine(snapshot.warning_level.to_string()));
    }

    Ok(())
}
