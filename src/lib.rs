//! # Slat - SLA Turnaround Tracking
//!
//! A command-line utility for tracking client request turnaround against
//! business-hour SLA targets.
//!
//! ## Features
//!
//! - **Business Calendar**: Elapsed-time math over a configurable work week,
//!   work-hour window, and IANA timezone (DST-correct)
//! - **SLA Lifecycle**: Pause/resume cycles that stop the clock while work is
//!   blocked, with met/violated verdicts on completion
//! - **Warning Levels**: Yellow/red urgency classification from remaining hours
//! - **Record Store**: SQLite persistence with optimistic concurrency
//! - **Data Export**: CSV and JSON turnaround reports
//!
//! ## Usage
//!
//! ```rust,no_run
//! use slat::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
