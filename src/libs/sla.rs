//! SLA record lifecycle and turnaround calculation.
//!
//! An [`SlaRecord`] tracks one client request against a committed
//! business-hour target. The record moves through a small state machine:
//!
//! ```text
//! active ──pause──▶ paused ──resume──▶ active ──complete──▶ met | violated
//! ```
//!
//! `met` and `violated` are terminal. Every transition is a pure function
//! from a record snapshot and an explicit `now` to the next snapshot or a
//! typed error — nothing here reads the clock, performs I/O, or retries.
//! The store applies the returned snapshot under optimistic concurrency.

use crate::libs::calendar::BusinessCalendar;
use crate::libs::config::SlaWarningThresholds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors returned by SLA transitions and configuration validation.
///
/// All of these are deterministic caller errors, never transient failures:
/// retrying the same call with the same inputs will fail the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SlaError {
    /// An active or paused record already exists for the request.
    #[error("an active or paused SLA already exists for request '{0}'")]
    DuplicateActiveSla(String),

    /// The requested transition is not legal from the record's current state.
    #[error("cannot {operation} an SLA in the '{status}' state")]
    InvalidTransition { operation: &'static str, status: SlaStatus },

    /// The record has already reached `met` or `violated`.
    #[error("SLA for request '{0}' is already terminal")]
    AlreadyTerminal(String),

    /// Malformed business-hours configuration or target.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Lifecycle state of an SLA record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlaStatus {
    Active,
    Paused,
    Met,
    Violated,
}

impl SlaStatus {
    /// `met` and `violated` records accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SlaStatus::Met | SlaStatus::Violated)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SlaStatus::Active => "active",
            SlaStatus::Paused => "paused",
            SlaStatus::Met => "met",
            SlaStatus::Violated => "violated",
        }
    }
}

impl fmt::Display for SlaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlaStatus {
    type Err = SlaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(SlaStatus::Active),
            "paused" => Ok(SlaStatus::Paused),
            "met" => Ok(SlaStatus::Met),
            "violated" => Ok(SlaStatus::Violated),
            other => Err(SlaError::InvalidConfig(format!("unknown SLA status '{}'", other))),
        }
    }
}

/// How far past target a violated record landed.
///
/// Cutoffs are fixed and monotone in the overrun: `minor` up to 25% over
/// target, `major` up to 100% over, `critical` beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationSeverity {
    Minor,
    Major,
    Critical,
}

impl ViolationSeverity {
    /// Classifies a final elapsed time against its target.
    pub fn classify(elapsed_hours: f64, target_hours: f64) -> Self {
        let ratio = elapsed_hours / target_hours;
        if ratio <= 1.25 {
            ViolationSeverity::Minor
        } else if ratio <= 2.0 {
            ViolationSeverity::Major
        } else {
            ViolationSeverity::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationSeverity::Minor => "minor",
            ViolationSeverity::Major => "major",
            ViolationSeverity::Critical => "critical",
        }
    }
}

impl fmt::Display for ViolationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViolationSeverity {
    type Err = SlaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minor" => Ok(ViolationSeverity::Minor),
            "major" => Ok(ViolationSeverity::Major),
            "critical" => Ok(ViolationSeverity::Critical),
            other => Err(SlaError::InvalidConfig(format!("unknown severity '{}'", other))),
        }
    }
}

/// Discrete urgency classification derived from remaining hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningLevel {
    None,
    Yellow,
    Red,
}

impl WarningLevel {
    /// Pure classification of remaining hours against the thresholds.
    ///
    /// Independent of record status: a paused record reports the level of
    /// its frozen elapsed time, because business time is not advancing.
    pub fn classify(hours_remaining: f64, thresholds: &SlaWarningThresholds) -> Self {
        if hours_remaining <= thresholds.red_hours_remaining {
            WarningLevel::Red
        } else if hours_remaining <= thresholds.yellow_hours_remaining {
            WarningLevel::Yellow
        } else {
            WarningLevel::None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WarningLevel::None => "none",
            WarningLevel::Yellow => "yellow",
            WarningLevel::Red => "red",
        }
    }
}

impl fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tracked request and its SLA budget.
///
/// Timestamps are absolute instants (UTC); business-hour interpretation
/// happens only inside the [`BusinessCalendar`]. The `version` field belongs
/// to the store's compare-and-swap protocol and is never touched by
/// transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlaRecord {
    /// Store-assigned identifier; `None` until first inserted.
    pub id: Option<i64>,
    /// External key of the request being timed.
    pub request_id: String,
    /// Business-hour budget, fixed at creation.
    pub target_hours: f64,
    /// When the timer began. Immutable after creation.
    pub started_at: DateTime<Utc>,
    /// Most recent pause start, while paused.
    pub paused_at: Option<DateTime<Utc>>,
    /// Most recent resume, if any.
    pub resumed_at: Option<DateTime<Utc>>,
    /// Cumulative business hours spent paused across all cycles.
    pub pause_duration_hours: f64,
    /// When the underlying work finished.
    pub completed_at: Option<DateTime<Utc>>,
    pub status: SlaStatus,
    pub violation_reason: Option<String>,
    pub violation_severity: Option<ViolationSeverity>,
    /// Free-form annotations (pause reason, actor). Opaque to the engine.
    pub metadata: HashMap<String, String>,
    /// Optimistic-concurrency counter, owned by the store.
    pub version: i64,
}

/// Computed view of a record at a point in time, for dashboards and alerts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlaSnapshot {
    pub total_elapsed_hours: f64,
    pub hours_remaining: f64,
    /// May exceed 100 to signal overrun; never silently capped.
    pub percentage_complete: f64,
    pub warning_level: WarningLevel,
    pub is_at_risk: bool,
    pub is_violated: bool,
}

impl SlaRecord {
    /// Starts tracking a request with the given business-hour budget.
    ///
    /// The "at most one active-or-paused record per request" invariant is
    /// enforced by the store at insert time, since it requires knowledge of
    /// other records.
    pub fn start(request_id: &str, target_hours: f64, now: DateTime<Utc>) -> Result<Self, SlaError> {
        if !target_hours.is_finite() || target_hours <= 0.0 {
            return Err(SlaError::InvalidConfig(format!(
                "target hours must be a positive number, got {}",
                target_hours
            )));
        }
        Ok(SlaRecord {
            id: None,
            request_id: request_id.to_string(),
            target_hours,
            started_at: now,
            paused_at: None,
            resumed_at: None,
            pause_duration_hours: 0.0,
            completed_at: None,
            status: SlaStatus::Active,
            violation_reason: None,
            violation_severity: None,
            metadata: HashMap::new(),
            version: 0,
        })
    }

    /// `active` → `paused`. Stops the business clock at `now`.
    pub fn pause(&self, reason: Option<&str>, now: DateTime<Utc>) -> Result<Self, SlaError> {
        self.guard("pause", SlaStatus::Active)?;
        let mut next = self.clone();
        next.paused_at = Some(now);
        next.status = SlaStatus::Paused;
        if let Some(reason) = reason {
            next.metadata.insert("pause_reason".to_string(), reason.to_string());
        }
        Ok(next)
    }

    /// `paused` → `active`. Folds the pause interval into the cumulative
    /// pause total so the elapsed clock picks up exactly where it stopped.
    pub fn resume(&self, calendar: &BusinessCalendar, now: DateTime<Utc>) -> Result<Self, SlaError> {
        self.guard("resume", SlaStatus::Paused)?;
        let mut next = self.clone();
        next.fold_pause(calendar, now);
        next.resumed_at = Some(now);
        next.status = SlaStatus::Active;
        Ok(next)
    }

    /// `active` or `paused` → `met` or `violated`.
    ///
    /// A still-open pause is folded first, same as resume, but the record
    /// terminates instead of reactivating. The verdict compares final
    /// elapsed business hours against the target.
    pub fn complete(&self, calendar: &BusinessCalendar, now: DateTime<Utc>) -> Result<Self, SlaError> {
        if self.status.is_terminal() {
            return Err(SlaError::AlreadyTerminal(self.request_id.clone()));
        }
        let mut next = self.clone();
        next.fold_pause(calendar, now);
        next.completed_at = Some(now);

        let elapsed = next.elapsed_business_hours(calendar, now);
        if elapsed <= next.target_hours {
            next.status = SlaStatus::Met;
        } else {
            next.status = SlaStatus::Violated;
            next.violation_severity = Some(ViolationSeverity::classify(elapsed, next.target_hours));
            next.violation_reason = Some(format!(
                "turnaround of {:.1} business hours exceeded the {:.1} hour target",
                elapsed, next.target_hours
            ));
        }
        Ok(next)
    }

    /// Business hours elapsed against the target as of `now`.
    ///
    /// Gross hours from start to the effective end, minus all completed
    /// pause time, minus the still-open pause if the record is paused. The
    /// effective end is `completed_at` for terminal records, so a finished
    /// record's elapsed time never drifts.
    pub fn elapsed_business_hours(&self, calendar: &BusinessCalendar, now: DateTime<Utc>) -> f64 {
        let effective_end = self.completed_at.unwrap_or(now);
        let gross = calendar.business_hours_between(self.started_at, effective_end);
        let open_pause = match self.paused_at {
            Some(paused_at) => calendar.business_hours_between(paused_at, now),
            None => 0.0,
        };
        gross - self.pause_duration_hours - open_pause
    }

    /// Computes the full status snapshot used for live queries.
    pub fn status_at(
        &self,
        calendar: &BusinessCalendar,
        thresholds: &SlaWarningThresholds,
        now: DateTime<Utc>,
    ) -> SlaSnapshot {
        let elapsed = self.elapsed_business_hours(calendar, now);
        let hours_remaining = self.target_hours - elapsed;
        // Clamped below only; callers rely on values over 100 to see overrun.
        let percentage_complete = (elapsed / self.target_hours * 100.0).max(0.0);
        let warning_level = WarningLevel::classify(hours_remaining, thresholds);
        SlaSnapshot {
            total_elapsed_hours: elapsed,
            hours_remaining,
            percentage_complete,
            warning_level,
            is_at_risk: warning_level != WarningLevel::None,
            is_violated: self.status == SlaStatus::Violated || hours_remaining < 0.0,
        }
    }

    /// Accumulates a still-open pause interval and clears `paused_at`.
    fn fold_pause(&mut self, calendar: &BusinessCalendar, now: DateTime<Utc>) {
        if let Some(paused_at) = self.paused_at.take() {
            self.pause_duration_hours += calendar.business_hours_between(paused_at, now);
        }
    }

    /// Rejects the transition unless the record is exactly in `expected`.
    fn guard(&self, operation: &'static str, expected: SlaStatus) -> Result<(), SlaError> {
        if self.status.is_terminal() {
            return Err(SlaError::AlreadyTerminal(self.request_id.clone()));
        }
        if self.status != expected {
            return Err(SlaError::InvalidTransition {
                operation,
                status: self.status,
            });
        }
        Ok(())
    }
}
