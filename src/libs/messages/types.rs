#[derive(Debug, Clone)]
pub enum Message {
    // === SLA LIFECYCLE MESSAGES ===
    SlaCreated(String, String),   // request, target hours
    SlaPaused(String),            // request
    SlaResumed(String),           // request
    SlaMet(String, String),       // request, elapsed hours
    SlaViolated(String, String, String), // request, elapsed hours, severity
    SlaNotFound(String),          // request
    SlaConflict(String),          // request
    NoOpenRecords,
    NoRecordsForStatus(String),

    // === STATUS MESSAGES ===
    StatusTitle(String),     // request
    ListTitle,
    WarningLine(String),     // warning level
    OverdueBy(String),       // formatted hours

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleBusiness,
    ConfigModuleWarning,
    ConfigModuleDefaults,
    PromptSelectModules,
    PromptWorkdays,
    PromptStartHour,
    PromptEndHour,
    PromptTimezone,
    PromptYellowThreshold,
    PromptRedThreshold,
    PromptTargetHours,

    // === EXPORT MESSAGES ===
    ExportCompleted(String), // path
    ExportEmpty,

    // === GENERIC MESSAGES ===
    InvalidInput(String),
}
