//! Database operations for SLA records.
//!
//! Stores one row per tracked request and applies engine results under
//! optimistic concurrency. Every update is a compare-and-swap on the row's
//! `version` counter, so two processes racing on the same request cannot
//! both apply a transition computed from the same prior snapshot.
//!
//! ## Invariants enforced here
//!
//! - At most one active-or-paused record per `request_id` (`insert` rejects
//!   a second open record with `DuplicateActiveSla`).
//! - Transitions apply to a single consistent prior state: `update` affects
//!   zero rows when the stored version moved, and the caller refetches.

use crate::db::db::Db;
use crate::libs::messages::Message;
use crate::libs::sla::{SlaError, SlaRecord, SlaStatus};
use crate::msg_error_anyhow;
use anyhow::Result;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use std::sync::Arc;

/// SQL schema for the SLA records table.
///
/// Timestamps are RFC 3339 UTC strings; `metadata` is a JSON object. The
/// `version` column carries the optimistic-concurrency counter.
const SCHEMA_RECORDS: &str = "CREATE TABLE IF NOT EXISTS sla_records (
    id INTEGER NOT NULL PRIMARY KEY,
    request_id TEXT NOT NULL,
    target_hours REAL NOT NULL,
    started_at TEXT NOT NULL,
    paused_at TEXT,
    resumed_at TEXT,
    pause_duration_hours REAL NOT NULL DEFAULT 0,
    completed_at TEXT,
    status TEXT NOT NULL,
    violation_reason TEXT,
    violation_severity TEXT,
    metadata TEXT NOT NULL DEFAULT '{}',
    version INTEGER NOT NULL DEFAULT 0
)";

const SCHEMA_RECORDS_INDEX: &str = "CREATE INDEX IF NOT EXISTS idx_sla_records_request ON sla_records (request_id)";

const INSERT_RECORD: &str = "INSERT INTO sla_records
    (request_id, target_hours, started_at, paused_at, resumed_at, pause_duration_hours,
     completed_at, status, violation_reason, violation_severity, metadata, version)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 0)";

/// Compare-and-swap update: only applies when the stored version matches the
/// snapshot the transition was computed from.
const UPDATE_RECORD: &str = "UPDATE sla_records SET
    paused_at = ?1, resumed_at = ?2, pause_duration_hours = ?3, completed_at = ?4,
    status = ?5, violation_reason = ?6, violation_severity = ?7, metadata = ?8,
    version = version + 1
    WHERE id = ?9 AND version = ?10";

const SELECT_FIELDS: &str = "SELECT id, request_id, target_hours, started_at, paused_at, resumed_at,
    pause_duration_hours, completed_at, status, violation_reason, violation_severity, metadata, version
    FROM sla_records";

const SELECT_OPEN_BY_REQUEST: &str = "WHERE request_id = ?1 AND status IN ('active', 'paused') ORDER BY id DESC LIMIT 1";
const SELECT_LATEST_BY_REQUEST: &str = "WHERE request_id = ?1 ORDER BY id DESC LIMIT 1";
const SELECT_BY_ID: &str = "WHERE id = ?1";
const SELECT_OPEN: &str = "WHERE status IN ('active', 'paused') ORDER BY started_at";
const SELECT_BY_STATUS: &str = "WHERE status = ?1 ORDER BY started_at";
const SELECT_ALL: &str = "ORDER BY started_at";

/// Database manager for SLA record storage.
///
/// The connection is wrapped in `Arc<Mutex<>>` so a store handle can be
/// shared across threads; the serialization guarantee against *other
/// processes* comes from the version column, not from this lock.
pub struct SlaRecords {
    pub conn: Arc<Mutex<Connection>>,
}

impl SlaRecords {
    /// Opens the store and ensures the schema exists.
    pub fn new() -> Result<SlaRecords> {
        let db_conn = Db::new()?.conn;

        db_conn.execute(SCHEMA_RECORDS, [])?;
        db_conn.execute(SCHEMA_RECORDS_INDEX, [])?;

        Ok(SlaRecords {
            conn: Arc::new(Mutex::new(db_conn)),
        })
    }

    /// Inserts a freshly started record.
    ///
    /// Rejects the insert with [`SlaError::DuplicateActiveSla`] if an
    /// active-or-paused record already exists for the request, preserving
    /// the one-open-record-per-request invariant.
    pub fn insert(&self, record: &SlaRecord) -> Result<SlaRecord> {
        let conn_guard = self.conn.lock();

        let query = format!("{} {}", SELECT_FIELDS, SELECT_OPEN_BY_REQUEST);
        let existing = conn_guard
            .query_row(&query, params![record.request_id], map_record)
            .optional()?;
        if existing.is_some() {
            return Err(SlaError::DuplicateActiveSla(record.request_id.clone()).into());
        }

        conn_guard.execute(
            INSERT_RECORD,
            params![
                record.request_id,
                record.target_hours,
                record.started_at.to_rfc3339(),
                record.paused_at.map(|t| t.to_rfc3339()),
                record.resumed_at.map(|t| t.to_rfc3339()),
                record.pause_duration_hours,
                record.completed_at.map(|t| t.to_rfc3339()),
                record.status.as_str(),
                record.violation_reason,
                record.violation_severity.map(|s| s.as_str()),
                serde_json::to_string(&record.metadata)?,
            ],
        )?;

        let mut inserted = record.clone();
        inserted.id = Some(conn_guard.last_insert_rowid());
        inserted.version = 0;
        Ok(inserted)
    }

    /// Applies a transitioned snapshot with compare-and-swap semantics.
    ///
    /// Zero affected rows means the stored record moved on since the
    /// snapshot was read; the caller should refetch and re-run the
    /// transition rather than have the store guess.
    pub fn update(&self, record: &SlaRecord) -> Result<SlaRecord> {
        let id = record
            .id
            .ok_or_else(|| msg_error_anyhow!(Message::SlaNotFound(record.request_id.clone())))?;
        let conn_guard = self.conn.lock();

        let affected = conn_guard.execute(
            UPDATE_RECORD,
            params![
                record.paused_at.map(|t| t.to_rfc3339()),
                record.resumed_at.map(|t| t.to_rfc3339()),
                record.pause_duration_hours,
                record.completed_at.map(|t| t.to_rfc3339()),
                record.status.as_str(),
                record.violation_reason,
                record.violation_severity.map(|s| s.as_str()),
                serde_json::to_string(&record.metadata)?,
                id,
                record.version,
            ],
        )?;

        if affected == 0 {
            return Err(msg_error_anyhow!(Message::SlaConflict(record.request_id.clone())));
        }

        let mut updated = record.clone();
        updated.version += 1;
        Ok(updated)
    }

    /// Fetches the open (active or paused) record for a request, if any.
    pub fn fetch_open(&self, request_id: &str) -> Result<Option<SlaRecord>> {
        let conn_guard = self.conn.lock();
        let query = format!("{} {}", SELECT_FIELDS, SELECT_OPEN_BY_REQUEST);
        let record = conn_guard.query_row(&query, params![request_id], map_record).optional()?;
        Ok(record)
    }

    /// Fetches the most recent record for a request regardless of status.
    pub fn fetch_latest(&self, request_id: &str) -> Result<Option<SlaRecord>> {
        let conn_guard = self.conn.lock();
        let query = format!("{} {}", SELECT_FIELDS, SELECT_LATEST_BY_REQUEST);
        let record = conn_guard.query_row(&query, params![request_id], map_record).optional()?;
        Ok(record)
    }

    /// Fetches a record by its store identifier.
    pub fn fetch(&self, id: i64) -> Result<Option<SlaRecord>> {
        let conn_guard = self.conn.lock();
        let query = format!("{} {}", SELECT_FIELDS, SELECT_BY_ID);
        let record = conn_guard.query_row(&query, params![id], map_record).optional()?;
        Ok(record)
    }

    /// All open records, oldest started first.
    pub fn fetch_open_all(&self) -> Result<Vec<SlaRecord>> {
        self.fetch_where(SELECT_OPEN, params![])
    }

    /// All records with the given status.
    pub fn fetch_with_status(&self, status: SlaStatus) -> Result<Vec<SlaRecord>> {
        self.fetch_where(SELECT_BY_STATUS, params![status.as_str()])
    }

    /// Every record in the store.
    pub fn fetch_all(&self) -> Result<Vec<SlaRecord>> {
        self.fetch_where(SELECT_ALL, params![])
    }

    fn fetch_where(&self, clause: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<SlaRecord>> {
        let conn_guard = self.conn.lock();
        let query = format!("{} {}", SELECT_FIELDS, clause);
        let mut stmt = conn_guard.prepare(&query)?;
        let record_iter = stmt.query_map(params, map_record)?;

        let mut records = Vec::new();
        for record in record_iter {
            records.push(record?);
        }
        Ok(records)
    }
}

/// Maps a database row to an [`SlaRecord`].
fn map_record(row: &Row<'_>) -> rusqlite::Result<SlaRecord> {
    let metadata: HashMap<String, String> =
        serde_json::from_str(&row.get::<_, String>(11)?).unwrap_or_default();
    Ok(SlaRecord {
        id: Some(row.get(0)?),
        request_id: row.get(1)?,
        target_hours: row.get(2)?,
        started_at: parse_instant(&row.get::<_, String>(3)?),
        paused_at: row.get::<_, Option<String>>(4)?.map(|s| parse_instant(&s)),
        resumed_at: row.get::<_, Option<String>>(5)?.map(|s| parse_instant(&s)),
        pause_duration_hours: row.get(6)?,
        completed_at: row.get::<_, Option<String>>(7)?.map(|s| parse_instant(&s)),
        status: row.get::<_, String>(8)?.parse().unwrap_or(SlaStatus::Active),
        violation_reason: row.get(9)?,
        violation_severity: row.get::<_, Option<String>>(10)?.and_then(|s| s.parse().ok()),
        metadata,
        version: row.get(12)?,
    })
}

fn parse_instant(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}
