//! Complete a request and record the SLA verdict.
//!
//! Folds any still-open pause, fixes the elapsed business hours at the
//! completion instant, and marks the record `met` or `violated`. Terminal
//! records never change again.

use crate::{
    db::records::SlaRecords,
    libs::{calendar::BusinessCalendar, config::Config, messages::Message, sla::SlaStatus},
    msg_bail_anyhow, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::Utc;
use clap::Args;

/// Command-line arguments for the complete command.
#[derive(Debug, Args)]
pub struct CompleteArgs {
    /// Request identifier to finish
    #[arg(long, short, help = "Request identifier")]
    request: String,
}

/// Executes the complete command.
pub fn cmd(args: CompleteArgs) -> Result<()> {
    let config = Config::read()?;
    let calendar = BusinessCalendar::from_config(&config.business.unwrap_or_default())?;
    let now = Utc::now();
    let records = SlaRecords::new()?;

    let record = match records.fetch_open(&args.request)? {
        Some(record) => record,
        None => msg_bail_anyhow!(Message::SlaNotFound(args.request)),
    };

    let completed = record.complete(&calendar, now)?;
    let elapsed = completed.elapsed_business_hours(&calendar, now);
    records.update(&completed)?;

    match completed.status {
        SlaStatus::Met => {
            msg_success!(Message::SlaMet(completed.request_id.clone(), format!("{:.1}", elapsed)));
        }
        _ => {
            let severity = completed
                .violation_severity
                .map(|s| s.to_string())
                .unwrap_or_default();
            msg_warning!(Message::SlaViolated(
                completed.request_id.clone(),
                format!("{:.1}", elapsed),
                severity
            ));
        }
    }
    Ok(())
}
