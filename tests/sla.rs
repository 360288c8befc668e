#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use slat::libs::calendar::BusinessCalendar;
    use slat::libs::config::{BusinessHoursConfig, SlaWarningThresholds};
    use slat::libs::sla::{SlaError, SlaRecord, SlaStatus, ViolationSeverity, WarningLevel};

    // 2025-06-02 is a Monday; the default calendar is Mon-Fri 9-17 UTC.
    fn utc(d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, h, min, 0).unwrap()
    }

    fn calendar() -> BusinessCalendar {
        BusinessCalendar::from_config(&BusinessHoursConfig::default()).unwrap()
    }

    fn thresholds() -> SlaWarningThresholds {
        SlaWarningThresholds::default()
    }

    #[test]
    fn test_start_creates_active_record() {
        let record = SlaRecord::start("REQ-1", 48.0, utc(2, 9, 0)).unwrap();
        assert_eq!(record.status, SlaStatus::Active);
        assert_eq!(record.request_id, "REQ-1");
        assert_eq!(record.target_hours, 48.0);
        assert_eq!(record.started_at, utc(2, 9, 0));
        assert_eq!(record.pause_duration_hours, 0.0);
        assert!(record.paused_at.is_none());
        assert!(record.completed_at.is_none());
        assert!(record.id.is_none());
    }

    #[test]
    fn test_start_rejects_bad_targets() {
        assert!(matches!(SlaRecord::start("REQ-1", 0.0, utc(2, 9, 0)), Err(SlaError::InvalidConfig(_))));
        assert!(matches!(SlaRecord::start("REQ-1", -4.0, utc(2, 9, 0)), Err(SlaError::InvalidConfig(_))));
        assert!(matches!(
            SlaRecord::start("REQ-1", f64::NAN, utc(2, 9, 0)),
            Err(SlaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_pause_sets_state_and_reason() {
        let record = SlaRecord::start("REQ-1", 48.0, utc(2, 9, 0)).unwrap();
        let paused = record.pause(Some("awaiting client assets"), utc(2, 12, 0)).unwrap();
        assert_eq!(paused.status, SlaStatus::Paused);
        assert_eq!(paused.paused_at, Some(utc(2, 12, 0)));
        assert_eq!(paused.metadata.get("pause_reason").map(String::as_str), Some("awaiting client assets"));
        // The original snapshot is untouched.
        assert_eq!(record.status, SlaStatus::Active);
    }

    #[test]
    fn test_pause_requires_active() {
        let record = SlaRecord::start("REQ-1", 48.0, utc(2, 9, 0)).unwrap();
        let paused = record.pause(None, utc(2, 12, 0)).unwrap();
        assert!(matches!(
            paused.pause(None, utc(2, 13, 0)),
            Err(SlaError::InvalidTransition { operation: "pause", .. })
        ));
    }

    #[test]
    fn test_resume_requires_paused() {
        let record = SlaRecord::start("REQ-1", 48.0, utc(2, 9, 0)).unwrap();
        assert!(matches!(
            record.resume(&calendar(), utc(2, 12, 0)),
            Err(SlaError::InvalidTransition { operation: "resume", .. })
        ));
    }

    #[test]
    fn test_resume_accumulates_pause_hours() {
        let calendar = calendar();
        let record = SlaRecord::start("REQ-1", 48.0, utc(2, 9, 0)).unwrap();
        // Paused Monday noon, resumed Tuesday noon: 5h Monday + 3h Tuesday.
        let paused = record.pause(None, utc(2, 12, 0)).unwrap();
        let resumed = paused.resume(&calendar, utc(3, 12, 0)).unwrap();
        assert_eq!(resumed.status, SlaStatus::Active);
        assert_eq!(resumed.pause_duration_hours, 8.0);
        assert_eq!(resumed.resumed_at, Some(utc(3, 12, 0)));
        assert!(resumed.paused_at.is_none());
    }

    #[test]
    fn test_pause_resume_conserves_elapsed() {
        let calendar = calendar();
        let record = SlaRecord::start("REQ-1", 48.0, utc(2, 9, 0)).unwrap();

        let before_pause = record.elapsed_business_hours(&calendar, utc(4, 9, 0));
        let paused = record.pause(None, utc(4, 9, 0)).unwrap();
        // While paused the clock is frozen regardless of how long passes.
        assert_eq!(paused.elapsed_business_hours(&calendar, utc(4, 15, 0)), before_pause);
        assert_eq!(paused.elapsed_business_hours(&calendar, utc(5, 9, 0)), before_pause);

        let resumed = paused.resume(&calendar, utc(5, 9, 0)).unwrap();
        assert_eq!(resumed.elapsed_business_hours(&calendar, utc(5, 9, 0)), before_pause);
    }

    #[test]
    fn test_scenario_paused_business_day_is_met() {
        // Created Monday 09:00 with a 48h target, paused Wednesday 09:00,
        // resumed Thursday 09:00, completed Friday 17:00. Four business
        // days ran for 32 elapsed hours; the paused day does not count.
        let calendar = calendar();
        let record = SlaRecord::start("REQ-1", 48.0, utc(2, 9, 0)).unwrap();
        let paused = record.pause(None, utc(4, 9, 0)).unwrap();
        let resumed = paused.resume(&calendar, utc(5, 9, 0)).unwrap();
        let completed = resumed.complete(&calendar, utc(6, 17, 0)).unwrap();

        assert_eq!(completed.status, SlaStatus::Met);
        assert_eq!(completed.completed_at, Some(utc(6, 17, 0)));
        assert_eq!(completed.elapsed_business_hours(&calendar, utc(6, 17, 0)), 32.0);
        assert!(completed.violation_severity.is_none());
    }

    #[test]
    fn test_scenario_overrun_goes_red_then_violated() {
        // Target of 8 business hours, created Monday 09:00, never paused.
        // The budget runs out exactly at Monday 17:00.
        let calendar = calendar();
        let thresholds = thresholds();
        let record = SlaRecord::start("REQ-2", 8.0, utc(2, 9, 0)).unwrap();

        // Queried Tuesday 09:00: exactly 8 elapsed hours, nothing remaining.
        let snapshot = record.status_at(&calendar, &thresholds, utc(3, 9, 0));
        assert_eq!(snapshot.total_elapsed_hours, 8.0);
        assert_eq!(snapshot.hours_remaining, 0.0);
        assert_eq!(snapshot.warning_level, WarningLevel::Red);

        // Strictly negative shortly after; live overrun shows as violated.
        let snapshot = record.status_at(&calendar, &thresholds, utc(3, 10, 0));
        assert_eq!(snapshot.hours_remaining, -1.0);
        assert!(snapshot.percentage_complete > 100.0);
        assert!(snapshot.is_violated);

        let completed = record.complete(&calendar, utc(3, 10, 0)).unwrap();
        assert_eq!(completed.status, SlaStatus::Violated);
        assert_eq!(completed.violation_severity, Some(ViolationSeverity::Minor));
        assert!(completed.violation_reason.is_some());
        let snapshot = completed.status_at(&calendar, &thresholds, utc(3, 10, 0));
        assert!(snapshot.is_violated);
    }

    #[test]
    fn test_complete_folds_open_pause() {
        let calendar = calendar();
        let record = SlaRecord::start("REQ-1", 48.0, utc(2, 9, 0)).unwrap();
        let paused = record.pause(None, utc(2, 13, 0)).unwrap();
        // Completed Tuesday 13:00 while still paused: only Monday 9-13 counts.
        let completed = paused.complete(&calendar, utc(3, 13, 0)).unwrap();
        assert_eq!(completed.status, SlaStatus::Met);
        assert!(completed.paused_at.is_none());
        assert_eq!(completed.pause_duration_hours, 8.0);
        assert_eq!(completed.elapsed_business_hours(&calendar, utc(3, 13, 0)), 4.0);
    }

    #[test]
    fn test_terminal_records_reject_all_transitions() {
        let calendar = calendar();
        let record = SlaRecord::start("REQ-1", 48.0, utc(2, 9, 0)).unwrap();
        let completed = record.complete(&calendar, utc(2, 17, 0)).unwrap();

        assert!(matches!(completed.pause(None, utc(3, 9, 0)), Err(SlaError::AlreadyTerminal(_))));
        assert!(matches!(
            completed.resume(&calendar, utc(3, 9, 0)),
            Err(SlaError::AlreadyTerminal(_))
        ));
        assert!(matches!(
            completed.complete(&calendar, utc(3, 9, 0)),
            Err(SlaError::AlreadyTerminal(_))
        ));
    }

    #[test]
    fn test_terminal_elapsed_does_not_drift() {
        let calendar = calendar();
        let record = SlaRecord::start("REQ-1", 48.0, utc(2, 9, 0)).unwrap();
        let completed = record.complete(&calendar, utc(2, 13, 0)).unwrap();
        // Days later the elapsed time still reads from completed_at.
        assert_eq!(completed.elapsed_business_hours(&calendar, utc(6, 17, 0)), 4.0);
    }

    #[test]
    fn test_severity_cutoffs_are_monotone() {
        assert_eq!(ViolationSeverity::classify(50.0, 48.0), ViolationSeverity::Minor);
        assert_eq!(ViolationSeverity::classify(60.0, 48.0), ViolationSeverity::Minor);
        assert_eq!(ViolationSeverity::classify(61.0, 48.0), ViolationSeverity::Major);
        assert_eq!(ViolationSeverity::classify(96.0, 48.0), ViolationSeverity::Major);
        assert_eq!(ViolationSeverity::classify(97.0, 48.0), ViolationSeverity::Critical);
    }

    #[test]
    fn test_warning_levels_never_step_backward() {
        let thresholds = thresholds();
        let remaining = [30.0, 20.0, 12.0, 6.0, 0.0, -2.0, -10.0];
        let mut worst = WarningLevel::None;
        for hours in remaining {
            let level = WarningLevel::classify(hours, &thresholds);
            let rank = |l: WarningLevel| match l {
                WarningLevel::None => 0,
                WarningLevel::Yellow => 1,
                WarningLevel::Red => 2,
            };
            assert!(rank(level) >= rank(worst), "level regressed at {} remaining", hours);
            worst = level;
        }
        assert_eq!(worst, WarningLevel::Red);
    }

    #[test]
    fn test_paused_record_keeps_truthful_warning() {
        let calendar = calendar();
        let thresholds = thresholds();
        // 10h target: after 4 elapsed hours, 6 remain -> yellow.
        let record = SlaRecord::start("REQ-1", 10.0, utc(2, 9, 0)).unwrap();
        let paused = record.pause(None, utc(2, 13, 0)).unwrap();

        let at_pause = paused.status_at(&calendar, &thresholds, utc(2, 13, 0));
        assert_eq!(at_pause.warning_level, WarningLevel::Yellow);

        // Days later the frozen record reports the same level and hours.
        let much_later = paused.status_at(&calendar, &thresholds, utc(6, 16, 0));
        assert_eq!(much_later.warning_level, WarningLevel::Yellow);
        assert_eq!(much_later.hours_remaining, at_pause.hours_remaining);
        assert!(much_later.is_at_risk);
    }

    #[test]
    fn test_percentage_not_capped_at_hundred() {
        let calendar = calendar();
        let record = SlaRecord::start("REQ-1", 4.0, utc(2, 9, 0)).unwrap();
        let snapshot = record.status_at(&calendar, &thresholds(), utc(2, 17, 0));
        assert_eq!(snapshot.total_elapsed_hours, 8.0);
        assert_eq!(snapshot.percentage_complete, 200.0);
    }

    #[test]
    fn test_percentage_floor_is_zero() {
        let calendar = calendar();
        let record = SlaRecord::start("REQ-1", 4.0, utc(2, 9, 0)).unwrap();
        // Queried before any business time has passed.
        let snapshot = record.status_at(&calendar, &thresholds(), utc(2, 9, 0));
        assert_eq!(snapshot.percentage_complete, 0.0);
        assert!(!snapshot.is_at_risk);
    }

    #[test]
    fn test_transitions_are_pure() {
        let calendar = calendar();
        let record = SlaRecord::start("REQ-1", 48.0, utc(2, 9, 0)).unwrap();
        let a = record.pause(Some("x"), utc(2, 12, 0)).unwrap();
        let b = record.pause(Some("x"), utc(2, 12, 0)).unwrap();
        assert_eq!(a.paused_at, b.paused_at);
        assert_eq!(a.status, b.status);
        assert_eq!(a.metadata, b.metadata);

        let s1 = record.status_at(&calendar, &thresholds(), utc(3, 12, 0));
        let s2 = record.status_at(&calendar, &thresholds(), utc(3, 12, 0));
        assert_eq!(s1.total_elapsed_hours, s2.total_elapsed_hours);
        assert_eq!(s1.warning_level, s2.warning_level);
    }

    #[test]
    fn test_multiple_pause_cycles_accumulate() {
        let calendar = calendar();
        let record = SlaRecord::start("REQ-1", 48.0, utc(2, 9, 0)).unwrap();
        // Two one-hour pauses on Monday.
        let record = record.pause(None, utc(2, 10, 0)).unwrap();
        let record = record.resume(&calendar, utc(2, 11, 0)).unwrap();
        let record = record.pause(None, utc(2, 14, 0)).unwrap();
        let record = record.resume(&calendar, utc(2, 15, 0)).unwrap();

        assert_eq!(record.pause_duration_hours, 2.0);
        assert_eq!(record.elapsed_business_hours(&calendar, utc(2, 17, 0)), 6.0);
    }
}
