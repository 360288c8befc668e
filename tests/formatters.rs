#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use chrono_tz::Tz;
    use slat::libs::formatter::{format_hours, format_local};

    #[test]
    fn test_format_hours_zero() {
        assert_eq!(format_hours(0.0), "00:00");
    }

    #[test]
    fn test_format_hours_whole() {
        assert_eq!(format_hours(8.0), "08:00");
        assert_eq!(format_hours(48.0), "48:00");
        assert_eq!(format_hours(100.0), "100:00");
    }

    #[test]
    fn test_format_hours_fractional() {
        assert_eq!(format_hours(1.5), "01:30");
        assert_eq!(format_hours(0.25), "00:15");
        assert_eq!(format_hours(8.75), "08:45");
    }

    #[test]
    fn test_format_hours_rounds_to_minutes() {
        // 2.999h is 179.94 minutes, rounding up to a full three hours.
        assert_eq!(format_hours(2.999), "03:00");
        assert_eq!(format_hours(0.008), "00:00");
    }

    #[test]
    fn test_format_hours_negative_keeps_sign() {
        assert_eq!(format_hours(-2.25), "-02:15");
        assert_eq!(format_hours(-0.5), "-00:30");
    }

    #[test]
    fn test_format_local_renders_in_zone() {
        let instant = Utc.with_ymd_and_hms(2025, 6, 2, 13, 0, 0).unwrap();
        let tz: Tz = "America/New_York".parse().unwrap();
        assert_eq!(format_local(&instant, &tz), "2025-06-02 09:00");
        let utc: Tz = "UTC".parse().unwrap();
        assert_eq!(format_local(&instant, &utc), "2025-06-02 13:00");
    }
}
