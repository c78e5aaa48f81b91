//! Integration tests for the SQLite record store.

use chrono::{NaiveDate, NaiveTime};
use studyplan_core::{
    AvailabilityWindow, Course, Planner, RecordStore, ScheduleOptions, SqliteStore, Table, Task,
    TimeBlock,
};
use tempfile::tempdir;

fn week() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 12).unwrap()
}

fn seed(store: &mut SqliteStore) {
    Table::<Course>::add(
        store,
        Course {
            id: "bio".to_string(),
            name: "Biology".to_string(),
            color: Some("#2e7d32".to_string()),
        },
    )
    .unwrap();
    Table::<AvailabilityWindow>::add(
        store,
        AvailabilityWindow::new(
            4,
            NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
        ),
    )
    .unwrap();
    let mut task = Task::new("Cell structure notes", 100);
    task.course_id = Some("bio".to_string());
    Table::<Task>::add(store, task).unwrap();
}

#[test]
fn test_records_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("studyplan.db");

    let outcome = {
        let mut store = SqliteStore::open_at(&path).unwrap();
        seed(&mut store);
        let mut planner = Planner::new(store);
        planner
            .generate_weekly_schedule(&ScheduleOptions::new(week()))
            .unwrap()
    };

    let store = SqliteStore::open_at(&path).unwrap();
    assert_eq!(store.courses().unwrap().len(), 1);
    assert_eq!(store.tasks().unwrap()[0].title, "Cell structure notes");
    assert_eq!(store.blocks_by_week(week()).unwrap(), outcome.blocks);
}

#[test]
fn test_regenerate_and_record_on_disk() {
    let dir = tempdir().unwrap();
    let mut store = SqliteStore::open_at(dir.path().join("plan.db")).unwrap();
    seed(&mut store);

    let mut planner = Planner::new(store);
    planner
        .generate_weekly_schedule(&ScheduleOptions::new(week()))
        .unwrap();
    let outcome = planner
        .generate_weekly_schedule(&ScheduleOptions::new(week()))
        .unwrap();

    // 100 minutes on Thursday evening, a single block
    assert_eq!(outcome.blocks.len(), 1);
    assert_eq!(
        Table::<TimeBlock>::get_all(planner.store()).unwrap().len(),
        1
    );

    let recorded = planner.record_session(&outcome.blocks[0].id, 95).unwrap();
    assert!(recorded.completed);
    assert_eq!(planner.store().tasks().unwrap()[0].actual_minutes, Some(95));

    let summary = planner.generate_weekly_summary(week()).unwrap();
    assert_eq!(summary.time_per_course.get("bio"), Some(&95));
}

#[test]
fn test_missing_directory_fails_to_open() {
    let dir = tempdir().unwrap();
    let result = SqliteStore::open_at(dir.path().join("missing").join("plan.db"));
    let err = studyplan_core::CoreError::from(result.err().unwrap());
    assert_eq!(err.code(), "STORE_UNAVAILABLE");
}
