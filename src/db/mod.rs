//! Database layer for the slat application.
//!
//! Provides SQLite-backed persistence for SLA records. The engine itself is
//! pure and never touches the database; these modules are the store adapter
//! that fetches record snapshots and applies the engine's results under
//! optimistic concurrency.

/// Core database connection and initialization module.
pub mod db;

/// SLA record storage and compare-and-swap updates.
pub mod records;
