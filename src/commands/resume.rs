//! Resume the SLA clock for a paused request.
//!
//! The business hours spent paused are folded into the record's cumulative
//! pause total, so elapsed time picks up exactly where it stopped.

use crate::{
    db::records::SlaRecords,
    libs::{calendar::BusinessCalendar, config::Config, messages::Message},
    msg_bail_anyhow, msg_success,
};
use anyhow::Result;
use chrono::Utc;
use clap::Args;

/// Command-line arguments for the resume command.
#[derive(Debug, Args)]
pub struct ResumeArgs {
    /// Request identifier whose clock should restart
    #[arg(long, short, help = "Request identifier")]
    request: String,
}

/// Executes the resume command.
pub fn cmd(args: ResumeArgs) -> Result<()> {
    let config = Config::read()?;
    let calendar = BusinessCalendar::from_config(&config.business.unwrap_or_default())?;
    let now = Utc::now();
    let records = SlaRecords::new()?;

    let record = match records.fetch_open(&args.request)? {
        Some(record) => record,
        None => msg_bail_anyhow!(Message::SlaNotFound(args.request)),
    };

    let resumed = record.resume(&calendar, now)?;
    records.update(&resumed)?;

    msg_success!(Message::SlaResumed(resumed.request_id.clone()));
    Ok(())
}
