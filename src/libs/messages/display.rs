//! Display implementation for slat application messages.
//!
//! Converts structured [`Message`] values into the human-readable text shown
//! on the terminal. Keeping every user-facing string in one place gives the
//! whole application a consistent voice and keeps format arguments typed.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === SLA LIFECYCLE MESSAGES ===
            Message::SlaCreated(request, target) => {
                format!("Tracking request '{}' against a {} business-hour target", request, target)
            }
            Message::SlaPaused(request) => format!("SLA clock paused for request '{}'", request),
            Message::SlaResumed(request) => format!("SLA clock resumed for request '{}'", request),
            Message::SlaMet(request, elapsed) => {
                format!("Request '{}' completed in {} business hours — target met", request, elapsed)
            }
            Message::SlaViolated(request, elapsed, severity) => format!(
                "Request '{}' completed in {} business hours — target violated ({})",
                request, elapsed, severity
            ),
            Message::SlaNotFound(request) => {
                format!("No active or paused SLA found for request '{}'", request)
            }
            Message::SlaConflict(request) => format!(
                "Record for request '{}' was changed by another process, please retry",
                request
            ),
            Message::NoOpenRecords => "No open SLA records".to_string(),
            Message::NoRecordsForStatus(status) => format!("No SLA records with status '{}'", status),

            // === STATUS MESSAGES ===
            Message::StatusTitle(request) => format!("SLA status for request '{}'", request),
            Message::ListTitle => "Tracked requests".to_string(),
            Message::WarningLine(level) => format!("Warning level: {}", level),
            Message::OverdueBy(hours) => format!("Overdue by {} business hours", hours),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleBusiness => "Business hours configuration".to_string(),
            Message::ConfigModuleWarning => "Warning threshold configuration".to_string(),
            Message::ConfigModuleDefaults => "SLA defaults configuration".to_string(),
            Message::PromptSelectModules => "Select configuration sections".to_string(),
            Message::PromptWorkdays => "Business days".to_string(),
            Message::PromptStartHour => "Work day starts at (hour, 24h)".to_string(),
            Message::PromptEndHour => "Work day ends at (hour, 24h)".to_string(),
            Message::PromptTimezone => "Timezone (IANA name)".to_string(),
            Message::PromptYellowThreshold => "Yellow warning at hours remaining".to_string(),
            Message::PromptRedThreshold => "Red warning at hours remaining".to_string(),
            Message::PromptTargetHours => "Default target (business hours)".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("Exported to {}", path),
            Message::ExportEmpty => "Nothing to export".to_string(),

            // === GENERIC MESSAGES ===
            Message::InvalidInput(what) => format!("Invalid input: {}", what),
        };
        write!(f, "{}", text)
    }
}
