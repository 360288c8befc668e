use crate::libs::formatter::{format_hours, format_local};
use crate::libs::sla::{SlaRecord, SlaSnapshot};
use anyhow::Result;
use chrono_tz::Tz;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn records(rows: &[(SlaRecord, SlaSnapshot)], tz: Tz) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["REQUEST", "STATUS", "TARGET", "ELAPSED", "REMAINING", "WARNING", "STARTED"]);
        for (record, snapshot) in rows {
            table.add_row(row![
                record.request_id,
                record.status,
                format_hours(record.target_hours),
                format_hours(snapshot.total_elapsed_hours),
                format_hours(snapshot.hours_remaining),
                snapshot.warning_level,
                format_local(&record.started_at, &tz)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn status(record: &SlaRecord, snapshot: &SlaSnapshot, tz: Tz) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["Request", record.request_id]);
        table.add_row(row!["Status", record.status]);
        table.add_row(row!["Started", format_local(&record.started_at, &tz)]);
        if let Some(paused_at) = &record.paused_at {
            table.add_row(row!["Paused since", format_local(paused_at, &tz)]);
        }
        if let Some(completed_at) = &record.completed_at {
            table.add_row(row!["Completed", format_local(completed_at, &tz)]);
        }
        table.add_row(row!["Target", format_hours(record.target_hours)]);
        table.add_row(row!["Elapsed", format_hours(snapshot.total_elapsed_hours)]);
        table.add_row(row!["Remaining", format_hours(snapshot.hours_remaining)]);
        table.add_row(row!["Progress", format!("{:.0}%", snapshot.percentage_complete)]);
        table.add_row(row!["Paused total", format_hours(record.pause_duration_hours)]);
        if let Some(severity) = &record.violation_severity {
            table.add_row(row!["Severity", severity]);
        }
        if let Some(reason) = &record.violation_reason {
            table.add_row(row!["Reason", reason]);
        }
        table.printstd();

        Ok(())
    }
}
