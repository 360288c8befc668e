//! Business-hours calendar arithmetic.
//!
//! Converts wall-clock intervals into elapsed business hours for a configured
//! work week, work-hour window, and IANA timezone. All arithmetic is done in
//! the configured zone's local wall-clock rules, so days with a DST change
//! still yield the correct number of business hours for their local window.
//!
//! Every function here is pure: the same inputs always produce the same
//! output, and nothing reads the system clock.

use crate::libs::config::BusinessHoursConfig;
use crate::libs::sla::SlaError;
use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

/// A validated business calendar, resolved from [`BusinessHoursConfig`].
///
/// Construction parses the timezone and checks the work-hour window once, so
/// the hot calculation path never has to re-validate or re-parse.
#[derive(Debug, Clone)]
pub struct BusinessCalendar {
    tz: Tz,
    workdays: Vec<Weekday>,
    start_hour: u32,
    end_hour: u32,
}

impl BusinessCalendar {
    /// Builds a calendar from configuration, validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns `SlaError::InvalidConfig` if the work week is empty, the hour
    /// window is inverted or out of range, or the timezone is not a known
    /// IANA name.
    pub fn from_config(config: &BusinessHoursConfig) -> Result<Self, SlaError> {
        if config.workdays.is_empty() {
            return Err(SlaError::InvalidConfig("work week has no business days".to_string()));
        }
        if config.start_hour >= config.end_hour {
            return Err(SlaError::InvalidConfig(format!(
                "work window start ({}) must be before end ({})",
                config.start_hour, config.end_hour
            )));
        }
        if config.start_hour > 23 || config.end_hour > 24 {
            return Err(SlaError::InvalidConfig(format!(
                "work window {}..{} is outside the 24-hour day",
                config.start_hour, config.end_hour
            )));
        }
        let mut workdays = Vec::with_capacity(config.workdays.len());
        for &day in &config.workdays {
            workdays.push(weekday_from_index(day)?);
        }
        workdays.dedup();
        let tz: Tz = config
            .timezone
            .parse()
            .map_err(|_| SlaError::InvalidConfig(format!("unknown timezone '{}'", config.timezone)))?;

        Ok(BusinessCalendar {
            tz,
            workdays,
            start_hour: config.start_hour,
            end_hour: config.end_hour,
        })
    }

    /// Computes the business hours contained in the interval `[start, end)`.
    ///
    /// Walks the calendar days the interval touches, intersects the interval
    /// with each day's business window, and sums the overlaps. Non-business
    /// days and off-hours contribute nothing; an empty or inverted interval
    /// yields 0.
    pub fn business_hours_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
        if end <= start {
            return 0.0;
        }

        let mut total = Duration::zero();
        let first = start.with_timezone(&self.tz).date_naive();
        let last = end.with_timezone(&self.tz).date_naive();

        let mut day = first;
        while day <= last {
            if self.workdays.contains(&day.weekday()) {
                let open = self.local_instant(day, self.start_hour);
                let close = self.local_instant(day, self.end_hour);
                let lo = start.max(open);
                let hi = end.min(close);
                if hi > lo {
                    total = total + (hi - lo);
                }
            }
            day = match day.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        total.num_milliseconds() as f64 / 3_600_000.0
    }

    /// Resolves an hour boundary on a local calendar date to an absolute
    /// instant.
    ///
    /// Wall-clock times erased by a spring-forward gap map to the first valid
    /// instant after the gap; ambiguous fall-back times take the earlier
    /// offset.
    fn local_instant(&self, date: NaiveDate, hour: u32) -> DateTime<Utc> {
        // An end hour of 24 is midnight at the start of the following day.
        let (date, hour) = if hour == 24 {
            (date.succ_opt().unwrap_or(date), 0)
        } else {
            (date, hour)
        };
        let naive = date.and_hms_opt(hour, 0, 0).unwrap();

        match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
            LocalResult::None => {
                let mut probe = naive;
                loop {
                    probe = probe + Duration::minutes(15);
                    if let LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) = self.tz.from_local_datetime(&probe) {
                        break dt.with_timezone(&Utc);
                    }
                }
            }
        }
    }

    /// The configured timezone.
    pub fn timezone(&self) -> Tz {
        self.tz
    }
}

/// Maps a numeric weekday (0 = Sunday .. 6 = Saturday) to `chrono::Weekday`.
pub fn weekday_from_index(day: u8) -> Result<Weekday, SlaError> {
    match day {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        _ => Err(SlaError::InvalidConfig(format!("weekday index {} is out of range", day))),
    }
}

/// Short display name for a numeric weekday, used by the config wizard and
/// list views.
pub fn weekday_name(day: u8) -> &'static str {
    match day {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "?",
    }
}
