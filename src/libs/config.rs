//! Configuration management for the slat application.
//!
//! Handles the business-hours calendar, warning thresholds, and SLA defaults
//! that every command needs. Configuration is stored as JSON in the
//! platform-specific application data directory and can be built through an
//! interactive setup wizard.
//!
//! ## Configuration Structure
//!
//! Each concern gets its own optional section, so a fresh install works with
//! built-in defaults and users only configure what they want to change:
//!
//! - **Business**: work week, work-hour window, and IANA timezone
//! - **Warning**: remaining-hour cutoffs for yellow and red urgency
//! - **Sla**: default turnaround target for new records
//!
//! The engine itself never reads this file; commands load it, validate the
//! business section into a [`crate::libs::calendar::BusinessCalendar`], and
//! pass the result in.

use super::data_storage::DataStorage;
use crate::libs::calendar::weekday_name;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

/// Configuration file name used for storing application settings.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Work week and daily window that count as business time.
///
/// Weekdays use the 0 = Sunday .. 6 = Saturday convention. The window is a
/// half-open `[start_hour, end_hour)` range in the configured timezone's
/// local wall-clock time.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BusinessHoursConfig {
    /// Weekdays considered business days (0 = Sunday .. 6 = Saturday).
    pub workdays: Vec<u8>,

    /// First hour of the business day, 24-hour local time.
    pub start_hour: u32,

    /// End of the business day, exclusive. May be 24 for midnight.
    pub end_hour: u32,

    /// IANA timezone name used to interpret the window, e.g.
    /// "Europe/Amsterdam". Daylight-saving shifts follow this zone's rules.
    pub timezone: String,
}

/// Remaining-hour cutoffs that map continuous time to a discrete urgency.
///
/// A record turns `yellow` once its remaining budget drops to
/// `yellow_hours_remaining`, and `red` at `red_hours_remaining` (zero means
/// at or past the deadline).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SlaWarningThresholds {
    pub yellow_hours_remaining: f64,
    pub red_hours_remaining: f64,
}

/// Defaults applied when a new record is created without explicit values.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SlaDefaults {
    /// Business-hour budget for new records when `--target` is omitted.
    pub target_hours: f64,
}

/// Main configuration container for the entire application.
///
/// All sections are optional; a missing section means built-in defaults.
/// `skip_serializing_if` keeps unconfigured sections out of the JSON file.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    /// Business calendar settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<BusinessHoursConfig>,

    /// Warning level thresholds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<SlaWarningThresholds>,

    /// Defaults for new SLA records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla: Option<SlaDefaults>,
}

impl Default for BusinessHoursConfig {
    /// Monday through Friday, 9:00-17:00, UTC.
    fn default() -> Self {
        BusinessHoursConfig {
            workdays: vec![1, 2, 3, 4, 5],
            start_hour: 9,
            end_hour: 17,
            timezone: "UTC".to_string(),
        }
    }
}

impl Default for SlaWarningThresholds {
    /// Yellow at 12 business hours remaining, red at the deadline.
    fn default() -> Self {
        SlaWarningThresholds {
            yellow_hours_remaining: 12.0,
            red_hours_remaining: 0.0,
        }
    }
}

impl Default for SlaDefaults {
    /// The agency's standard 48-business-hour turnaround commitment.
    fn default() -> Self {
        SlaDefaults { target_hours: 48.0 }
    }
}

impl Config {
    /// Reads configuration from the filesystem.
    ///
    /// A missing file is not an error; it yields the default configuration
    /// so the application runs without any setup.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Saves the current configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Runs an interactive configuration setup wizard.
    ///
    /// Presents the available sections, pre-filling current values as
    /// defaults, and returns the updated configuration for saving. Sections
    /// the user does not select keep their existing values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let sections = ["Business hours", "Warning thresholds", "SLA defaults"];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&sections)
            .interact()?;

        for &section in &selected {
            match section {
                0 => {
                    let default = config.business.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleBusiness);

                    let day_names: Vec<&str> = (0u8..7).map(weekday_name).collect();
                    let checked: Vec<bool> = (0u8..7).map(|d| default.workdays.contains(&d)).collect();
                    let picked = MultiSelect::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptWorkdays.to_string())
                        .items(&day_names)
                        .defaults(&checked)
                        .interact()?;

                    config.business = Some(BusinessHoursConfig {
                        workdays: picked.iter().map(|&i| i as u8).collect(),
                        start_hour: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptStartHour.to_string())
                            .default(default.start_hour)
                            .interact_text()?,
                        end_hour: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptEndHour.to_string())
                            .default(default.end_hour)
                            .interact_text()?,
                        timezone: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTimezone.to_string())
                            .default(default.timezone)
                            .interact_text()?,
                    });
                }
                1 => {
                    let default = config.warning.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleWarning);
                    config.warning = Some(SlaWarningThresholds {
                        yellow_hours_remaining: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptYellowThreshold.to_string())
                            .default(default.yellow_hours_remaining)
                            .interact_text()?,
                        red_hours_remaining: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptRedThreshold.to_string())
                            .default(default.red_hours_remaining)
                            .interact_text()?,
                    });
                }
                2 => {
                    let default = config.sla.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleDefaults);
                    config.sla = Some(SlaDefaults {
                        target_hours: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTargetHours.to_string())
                            .default(default.target_hours)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
