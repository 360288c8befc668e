#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use slat::db::records::SlaRecords;
    use slat::libs::sla::{SlaError, SlaRecord, SlaStatus, ViolationSeverity};
    use std::sync::{Mutex, MutexGuard, OnceLock};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    // Tests redirect HOME to a private temp dir, so they must not overlap.
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    struct RecordsTestContext {
        _guard: MutexGuard<'static, ()>,
        _temp_dir: TempDir,
    }

    impl TestContext for RecordsTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK
                .get_or_init(|| Mutex::new(()))
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            RecordsTestContext {
                _guard: guard,
                _temp_dir: temp_dir,
            }
        }
    }

    fn sample_record(request_id: &str) -> SlaRecord {
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap();
        SlaRecord::start(request_id, 48.0, now).unwrap()
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_insert_and_fetch_roundtrip(_ctx: &mut RecordsTestContext) {
        let store = SlaRecords::new().unwrap();
        let mut record = sample_record("REQ-1");
        record.metadata.insert("note".to_string(), "homepage redesign".to_string());

        let inserted = store.insert(&record).unwrap();
        assert!(inserted.id.is_some());
        assert_eq!(inserted.version, 0);

        let fetched = store.fetch_open("REQ-1").unwrap().unwrap();
        assert_eq!(fetched.id, inserted.id);
        let by_id = store.fetch(inserted.id.unwrap()).unwrap().unwrap();
        assert_eq!(by_id.request_id, "REQ-1");
        assert_eq!(fetched.request_id, "REQ-1");
        assert_eq!(fetched.target_hours, 48.0);
        assert_eq!(fetched.started_at, record.started_at);
        assert_eq!(fetched.status, SlaStatus::Active);
        assert_eq!(fetched.metadata.get("note").map(String::as_str), Some("homepage redesign"));
        assert!(fetched.violation_severity.is_none());
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_duplicate_open_record_rejected(_ctx: &mut RecordsTestContext) {
        let store = SlaRecords::new().unwrap();
        store.insert(&sample_record("REQ-1")).unwrap();

        let err = store.insert(&sample_record("REQ-1")).unwrap_err();
        let sla_err = err.downcast_ref::<SlaError>().unwrap();
        assert_eq!(*sla_err, SlaError::DuplicateActiveSla("REQ-1".to_string()));
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_paused_record_still_blocks_duplicates(_ctx: &mut RecordsTestContext) {
        let store = SlaRecords::new().unwrap();
        let inserted = store.insert(&sample_record("REQ-1")).unwrap();

        let paused = inserted
            .pause(None, Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap())
            .unwrap();
        store.update(&paused).unwrap();

        assert!(store.insert(&sample_record("REQ-1")).is_err());
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_terminal_record_does_not_block_new_tracking(_ctx: &mut RecordsTestContext) {
        let store = SlaRecords::new().unwrap();
        let mut record = sample_record("REQ-1");
        record.status = SlaStatus::Met;
        record.completed_at = Some(Utc.with_ymd_and_hms(2025, 6, 3, 12, 0, 0).unwrap());
        store.insert(&record).unwrap();

        // A finished engagement can be re-opened under a fresh record.
        assert!(store.insert(&sample_record("REQ-1")).is_ok());
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_update_bumps_version(_ctx: &mut RecordsTestContext) {
        let store = SlaRecords::new().unwrap();
        let inserted = store.insert(&sample_record("REQ-1")).unwrap();

        let paused = inserted
            .pause(Some("client review"), Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap())
            .unwrap();
        let updated = store.update(&paused).unwrap();
        assert_eq!(updated.version, 1);

        let fetched = store.fetch_open("REQ-1").unwrap().unwrap();
        assert_eq!(fetched.status, SlaStatus::Paused);
        assert_eq!(fetched.version, 1);
        assert_eq!(fetched.metadata.get("pause_reason").map(String::as_str), Some("client review"));
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_stale_snapshot_update_conflicts(_ctx: &mut RecordsTestContext) {
        let store = SlaRecords::new().unwrap();
        let inserted = store.insert(&sample_record("REQ-1")).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();

        // Two callers transition from the same snapshot; only one wins.
        let first = inserted.pause(None, now).unwrap();
        let second = inserted.pause(Some("other process"), now).unwrap();
        store.update(&first).unwrap();
        assert!(store.update(&second).is_err());

        // The losing transition is not partially applied.
        let fetched = store.fetch_open("REQ-1").unwrap().unwrap();
        assert!(fetched.metadata.get("pause_reason").is_none());
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_violated_record_roundtrip(_ctx: &mut RecordsTestContext) {
        let store = SlaRecords::new().unwrap();
        let mut record = sample_record("REQ-9");
        record.status = SlaStatus::Violated;
        record.completed_at = Some(Utc.with_ymd_and_hms(2025, 6, 9, 10, 0, 0).unwrap());
        record.violation_severity = Some(ViolationSeverity::Major);
        record.violation_reason = Some("turnaround of 70.0 business hours exceeded the 48.0 hour target".to_string());
        store.insert(&record).unwrap();

        let fetched = store.fetch_latest("REQ-9").unwrap().unwrap();
        assert_eq!(fetched.status, SlaStatus::Violated);
        assert_eq!(fetched.violation_severity, Some(ViolationSeverity::Major));
        assert!(fetched.violation_reason.unwrap().contains("exceeded"));
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_fetch_filters(_ctx: &mut RecordsTestContext) {
        let store = SlaRecords::new().unwrap();
        store.insert(&sample_record("REQ-1")).unwrap();
        store.insert(&sample_record("REQ-2")).unwrap();
        let mut done = sample_record("REQ-3");
        done.status = SlaStatus::Met;
        done.completed_at = Some(Utc.with_ymd_and_hms(2025, 6, 3, 12, 0, 0).unwrap());
        store.insert(&done).unwrap();

        assert_eq!(store.fetch_open_all().unwrap().len(), 2);
        assert_eq!(store.fetch_all().unwrap().len(), 3);
        assert_eq!(store.fetch_with_status(SlaStatus::Met).unwrap().len(), 1);
        assert_eq!(store.fetch_with_status(SlaStatus::Violated).unwrap().len(), 0);
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_fetch_latest_prefers_newest_record(_ctx: &mut RecordsTestContext) {
        let store = SlaRecords::new().unwrap();
        let mut old = sample_record("REQ-1");
        old.status = SlaStatus::Met;
        old.completed_at = Some(Utc.with_ymd_and_hms(2025, 6, 3, 12, 0, 0).unwrap());
        store.insert(&old).unwrap();
        store.insert(&sample_record("REQ-1")).unwrap();

        let latest = store.fetch_latest("REQ-1").unwrap().unwrap();
        assert_eq!(latest.status, SlaStatus::Active);
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_fetch_missing_request(_ctx: &mut RecordsTestContext) {
        let store = SlaRecords::new().unwrap();
        assert!(store.fetch_open("REQ-404").unwrap().is_none());
        assert!(store.fetch_latest("REQ-404").unwrap().is_none());
    }
}
