//! Start tracking a request against an SLA target.
//!
//! Creates a new active SLA record for a request identifier. The business
//! clock starts at the moment the command runs; the target defaults to the
//! configured standard turnaround when `--target` is omitted.

use crate::{
    db::records::SlaRecords,
    libs::{config::Config, messages::Message, sla::SlaRecord},
    msg_success,
};
use anyhow::Result;
use chrono::Utc;
use clap::Args;

/// Command-line arguments for the create command.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Request identifier to track (ticket key, project slug, ...)
    #[arg(long, short, help = "Request identifier to track")]
    request: String,

    /// Target turnaround in business hours
    ///
    /// Falls back to the configured default target when omitted.
    #[arg(long, short, help = "Target turnaround in business hours")]
    target: Option<f64>,

    /// Free-form note stored in the record metadata
    #[arg(long, help = "Note stored in the record metadata")]
    note: Option<String>,
}

/// Executes the create command.
///
/// The duplicate-open-record check happens in the store at insert time, so
/// racing creates for the same request cannot both succeed.
pub fn cmd(args: CreateArgs) -> Result<()> {
    let config = Config::read()?;
    let target = args.target.unwrap_or(config.sla.unwrap_or_default().target_hours);
    let now = Utc::now();

    let mut record = SlaRecord::start(&args.request, target, now)?;
    if let Some(note) = args.note {
        record.metadata.insert("note".to_string(), note);
    }

    let record = SlaRecords::new()?.insert(&record)?;

    msg_success!(Message::SlaCreated(
        record.request_id.clone(),
        format!("{:.1}", record.target_hours)
    ));
    Ok(())
}
