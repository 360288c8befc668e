//! Pause the SLA clock for a request.
//!
//! Typical use is waiting on client feedback: the work is blocked on the
//! other side, so blocked time should not count against the turnaround
//! target. The pause reason lands in the record metadata for later review.

use crate::{
    db::records::SlaRecords,
    libs::messages::Message,
    msg_bail_anyhow, msg_success,
};
use anyhow::Result;
use chrono::Utc;
use clap::Args;

/// Command-line arguments for the pause command.
#[derive(Debug, Args)]
pub struct PauseArgs {
    /// Request identifier whose clock should stop
    #[arg(long, short, help = "Request identifier")]
    request: String,

    /// Why the clock is being paused (e.g. "awaiting client assets")
    #[arg(long, help = "Reason recorded in the record metadata")]
    reason: Option<String>,
}

/// Executes the pause command.
pub fn cmd(args: PauseArgs) -> Result<()> {
    let now = Utc::now();
    let records = SlaRecords::new()?;

    let record = match records.fetch_open(&args.request)? {
        Some(record) => record,
        None => msg_bail_anyhow!(Message::SlaNotFound(args.request)),
    };

    let paused = record.pause(args.reason.as_deref(), now)?;
    records.update(&paused)?;

    msg_success!(Message::SlaPaused(paused.request_id.clone()));
    Ok(())
}
