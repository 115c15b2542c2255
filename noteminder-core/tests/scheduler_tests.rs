use chrono::{Duration, NaiveDate};
use noteminder_core::{CoreError, IntervalSchedule, DEFAULT_OFFSETS, MAX_OFFSET_DAYS};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

#[test]
fn table_entries_map_one_to_one() {
    let s = IntervalSchedule::default();
    for (streak, days) in [1, 3, 7, 14, 30, 60].iter().enumerate() {
        assert_eq!(
            s.next_review_date(streak as u32, day()),
            day() + Duration::days(*days)
        );
    }
}

#[test]
fn streak_past_table_clamps_to_last_offset() {
    let s = IntervalSchedule::default();
    let cap = s.next_review_date(5, day());
    assert_eq!(cap, day() + Duration::days(60));
    for streak in [6, 7, 12, 100, u32::MAX] {
        assert_eq!(s.next_review_date(streak, day()), cap);
    }
}

#[test]
fn lookup_is_pure() {
    let s = IntervalSchedule::default();
    assert_eq!(s.next_review_date(2, day()), s.next_review_date(2, day()));
    assert_eq!(s.offsets(), &DEFAULT_OFFSETS);
}

#[test]
fn custom_table() {
    let s = IntervalSchedule::new(vec![2, 5]).unwrap();
    assert_eq!(s.offset_days(0), 2);
    assert_eq!(s.offset_days(1), 5);
    assert_eq!(s.offset_days(9), 5);
    assert!(IntervalSchedule::new(vec![]).is_err());
}

#[test]
fn oversized_offsets_are_rejected() {
    assert!(matches!(
        IntervalSchedule::new(vec![1, u32::MAX]),
        Err(CoreError::Validation(_))
    ));
    assert!(IntervalSchedule::new(vec![MAX_OFFSET_DAYS + 1]).is_err());
    assert!(IntervalSchedule::new(vec![MAX_OFFSET_DAYS]).is_ok());
}

#[test]
fn lookup_near_calendar_end_saturates() {
    let s = IntervalSchedule::new(vec![MAX_OFFSET_DAYS]).unwrap();
    assert_eq!(s.next_review_date(0, NaiveDate::MAX), NaiveDate::MAX);
    assert_eq!(
        IntervalSchedule::default().next_review_date(3, NaiveDate::MAX),
        NaiveDate::MAX
    );
}
