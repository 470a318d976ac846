use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime};

use booking_cell::models::WeekDirection;
use booking_cell::services::SlotSelector;
use booking_cell::BookingError;
use doctor_cell::services::{ScheduleAvailability, SlotGenerator};

// Wednesday
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 17).unwrap()
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn generator() -> SlotGenerator {
    let booked = ScheduleAvailability::new()
        .with_booking("doc-1", today(), NaiveTime::from_hms_opt(9, 0, 0).unwrap())
        .with_booking("doc-1", date(18), NaiveTime::from_hms_opt(19, 0, 0).unwrap());
    SlotGenerator::scheduled(booked)
}

fn selector() -> SlotSelector {
    SlotSelector::new("doc-1", today(), generator())
}

#[test]
fn test_initial_state() {
    let selector = selector();

    assert_eq!(selector.current_week(), date(14));
    assert_eq!(selector.selected_date(), today());
    assert_eq!(selector.time_slots().len(), 18);
    assert!(selector.selected_slot().is_none());
}

#[test]
fn test_week_days_flags() {
    let selector = selector();
    let days = selector.week_days(today());

    assert_eq!(days.len(), 7);
    assert_eq!(days[0].date, date(14));
    assert_eq!(days[6].date, date(20));
    assert!(days[0].is_past && days[2].is_past);
    assert!(days[3].is_today && days[3].is_selected && !days[3].is_past);
    assert!(days[4..].iter().all(|d| !d.is_past && !d.is_today && !d.is_selected));
}

#[test]
fn test_navigate_week_moves_seven_days_without_bound() {
    let mut selector = selector();

    selector.navigate_week(WeekDirection::Next);
    assert_eq!(selector.current_week(), date(21));

    selector.navigate_week(WeekDirection::Prev);
    selector.navigate_week(WeekDirection::Prev);
    selector.navigate_week(WeekDirection::Prev);
    assert_eq!(selector.current_week(), NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    assert!(selector.week_days(today()).iter().all(|d| d.is_past));

    // Navigation does not touch the selected day.
    assert_eq!(selector.selected_date(), today());
}

#[test]
fn test_past_date_is_rejected() {
    let mut selector = selector();

    assert_matches!(
        selector.select_date(date(16), today()),
        Err(BookingError::DateInPast { date }) if date == NaiveDate::from_ymd_opt(2024, 1, 16).unwrap()
    );
    assert_eq!(selector.selected_date(), today());
    assert!(selector.time_slots().iter().all(|s| s.date == today()));
}

#[test]
fn test_select_date_regenerates_slots() {
    let mut selector = selector();

    selector.select_date(today(), today()).unwrap();
    selector.select_date(date(18), today()).unwrap();

    assert_eq!(selector.selected_date(), date(18));
    assert!(selector.time_slots().iter().all(|s| s.date == date(18)));
    assert_eq!(selector.grouped_slots().evening.len(), 3);
}

#[test]
fn test_grouped_slots_hide_unavailable() {
    let selector = selector();
    let grouped = selector.grouped_slots();

    assert_eq!(grouped.morning.len(), 5);
    assert_eq!(grouped.afternoon.len(), 8);
    assert_eq!(grouped.evening.len(), 4);
    assert!(grouped.morning.iter().all(|s| s.is_available));
}

#[test]
fn test_select_slot() {
    let mut selector = selector();

    let slot = selector.select_slot("slot-doc-1-2024-01-17-10:00").unwrap();
    assert_eq!(slot.start_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());

    // A later choice replaces the earlier one.
    selector.select_slot("slot-doc-1-2024-01-17-15:30").unwrap();
    assert_eq!(selector.selected_slot().unwrap().id, "slot-doc-1-2024-01-17-15:30");
}

#[test]
fn test_select_slot_rejections() {
    let mut selector = selector();

    assert_matches!(
        selector.select_slot("slot-doc-1-2024-01-17-09:00"),
        Err(BookingError::SlotUnavailable(_))
    );
    assert_matches!(
        selector.select_slot("slot-doc-1-2024-01-18-10:00"),
        Err(BookingError::SlotNotFound(_))
    );
    assert!(selector.selected_slot().is_none());
}

#[test]
fn test_selected_slot_survives_date_change() {
    let mut selector = selector();

    selector.select_slot("slot-doc-1-2024-01-17-10:00").unwrap();
    selector.select_date(date(19), today()).unwrap();

    assert_eq!(selector.selected_slot().unwrap().date, today());
}

#[test]
fn test_reset() {
    let mut selector = selector();
    selector.navigate_week(WeekDirection::Next);
    selector.select_date(date(23), today()).unwrap();
    selector.select_slot("slot-doc-1-2024-01-23-11:00").unwrap();

    selector.reset(today());

    assert_eq!(selector.current_week(), date(14));
    assert_eq!(selector.selected_date(), today());
    assert!(selector.selected_slot().is_none());
}
