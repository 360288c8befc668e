//! Data export for external analysis and client reporting.
//!
//! Extracts SLA records in CSV or JSON form, either as the raw persisted
//! fields or as a computed turnaround report with elapsed/remaining hours
//! and warning levels. Account managers feed these files into client-facing
//! reporting, so column names stay stable.

use crate::{
    db::records::SlaRecords,
    libs::{calendar::BusinessCalendar, config::SlaWarningThresholds, messages::Message, sla::SlaRecord},
    msg_info, msg_success,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::PathBuf;

/// Supported export output formats.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values for spreadsheets and ad-hoc analysis.
    Csv,
    /// Pretty-printed JSON preserving types and structure.
    Json,
}

/// What gets exported.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportData {
    /// Persisted record fields as stored.
    Records,
    /// Computed turnaround report: elapsed, remaining, progress, warning.
    Report,
}

/// Serializable row for a raw record export.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportRecord {
    pub request_id: String,
    pub status: String,
    pub target_hours: f64,
    pub started_at: String,
    pub completed_at: String,
    pub pause_duration_hours: f64,
    pub violation_severity: String,
    pub violation_reason: String,
}

/// Serializable row for the computed turnaround report.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportReportRow {
    pub request_id: String,
    pub status: String,
    pub target_hours: f64,
    pub elapsed_hours: f64,
    pub hours_remaining: f64,
    pub percentage_complete: f64,
    pub warning_level: String,
}

/// Export handler holding the chosen format and output destination.
pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Creates an exporter. Without an explicit path, the file lands in the
    /// current directory as `slat_<data>_<date>.<ext>`.
    pub fn new(format: ExportFormat, data: ExportData, output: Option<PathBuf>, now: DateTime<Utc>) -> Self {
        let output_path = output.unwrap_or_else(|| {
            let ext = match format {
                ExportFormat::Csv => "csv",
                ExportFormat::Json => "json",
            };
            let name = match data {
                ExportData::Records => "records",
                ExportData::Report => "report",
            };
            PathBuf::from(format!("slat_{}_{}.{}", name, now.format("%Y-%m-%d"), ext))
        });
        Exporter { format, output_path }
    }

    /// Fetches all records and writes the requested export.
    pub fn export(
        &self,
        data: ExportData,
        calendar: &BusinessCalendar,
        thresholds: &SlaWarningThresholds,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let records = SlaRecords::new()?.fetch_all()?;
        if records.is_empty() {
            msg_info!(Message::ExportEmpty);
            return Ok(());
        }

        match data {
            ExportData::Records => {
                let rows: Vec<ExportRecord> = records.iter().map(record_row).collect();
                self.write(&rows)?;
            }
            ExportData::Report => {
                let rows: Vec<ExportReportRow> = records
                    .iter()
                    .map(|record| {
                        let snapshot = record.status_at(calendar, thresholds, now);
                        ExportReportRow {
                            request_id: record.request_id.clone(),
                            status: record.status.to_string(),
                            target_hours: record.target_hours,
                            elapsed_hours: snapshot.total_elapsed_hours,
                            hours_remaining: snapshot.hours_remaining,
                            percentage_complete: snapshot.percentage_complete,
                            warning_level: snapshot.warning_level.to_string(),
                        }
                    })
                    .collect();
                self.write(&rows)?;
            }
        }

        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(())
    }

    fn write<T: Serialize>(&self, rows: &[T]) -> Result<()> {
        match self.format {
            ExportFormat::Csv => {
                let mut writer = csv::Writer::from_path(&self.output_path)?;
                for row in rows {
                    writer.serialize(row)?;
                }
                writer.flush()?;
            }
            ExportFormat::Json => {
                let file = File::create(&self.output_path)?;
                serde_json::to_writer_pretty(file, rows)?;
            }
        }
        Ok(())
    }
}

fn record_row(record: &SlaRecord) -> ExportRecord {
    ExportRecord {
        request_id: record.request_id.clone(),
        status: record.status.to_string(),
        target_hours: record.target_hours,
        started_at: record.started_at.to_rfc3339(),
        completed_at: record.completed_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        pause_duration_hours: record.pause_duration_hours,
        violation_severity: record
            .violation_severity
            .map(|s| s.to_string())
            .unwrap_or_default(),
        violation_reason: record.violation_reason.clone().unwrap_or_default(),
    }
}
