use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use doctor_cell::models::{GroupedSlots, TimeSlot};
use doctor_cell::services::SlotGenerator;

use crate::error::BookingError;
use crate::models::{WeekDay, WeekDirection};

/// Sunday that opens the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Week strip plus the slot grid for one day.
#[derive(Clone)]
pub struct SlotSelector {
    doctor_id: String,
    generator: SlotGenerator,
    current_week: NaiveDate,
    selected_date: NaiveDate,
    time_slots: Vec<TimeSlot>,
    selected_slot: Option<TimeSlot>,
}

impl SlotSelector {
    pub fn new(doctor_id: &str, today: NaiveDate, generator: SlotGenerator) -> Self {
        let time_slots = generator.generate(doctor_id, today);

        Self {
            doctor_id: doctor_id.to_string(),
            generator,
            current_week: week_start(today),
            selected_date: today,
            time_slots,
            selected_slot: None,
        }
    }

    pub fn doctor_id(&self) -> &str {
        &self.doctor_id
    }

    pub fn current_week(&self) -> NaiveDate {
        self.current_week
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }

    pub fn selected_slot(&self) -> Option<&TimeSlot> {
        self.selected_slot.as_ref()
    }

    // Unbounded in both directions; past weeks just render disabled.
    pub fn navigate_week(&mut self, direction: WeekDirection) {
        let step = match direction {
            WeekDirection::Next => Duration::days(7),
            WeekDirection::Prev => Duration::days(-7),
        };
        self.current_week += step;
    }

    pub fn week_days(&self, today: NaiveDate) -> Vec<WeekDay> {
        (0..7)
            .map(|offset| {
                let date = self.current_week + Duration::days(offset);
                WeekDay {
                    date,
                    is_today: date == today,
                    is_selected: date == self.selected_date,
                    is_past: date < today,
                }
            })
            .collect()
    }

    /// Switches the slot grid to `date`. The chosen slot, if any, is kept.
    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), BookingError> {
        if date < today {
            return Err(BookingError::DateInPast { date });
        }

        debug!("Selecting {} for doctor {}", date, self.doctor_id);
        self.selected_date = date;
        self.time_slots = self.generator.generate(&self.doctor_id, date);
        Ok(())
    }

    pub fn grouped_slots(&self) -> GroupedSlots {
        GroupedSlots::available_only(&self.time_slots)
    }

    pub fn select_slot(&mut self, slot_id: &str) -> Result<TimeSlot, BookingError> {
        let slot = self
            .time_slots
            .iter()
            .find(|slot| slot.id == slot_id)
            .ok_or_else(|| BookingError::SlotNotFound(slot_id.to_string()))?;

        if !slot.is_available {
            return Err(BookingError::SlotUnavailable(slot_id.to_string()));
        }

        self.selected_slot = Some(slot.clone());
        Ok(slot.clone())
    }

    /// Moves a grid left on an earlier day onto `today`. A chosen slot from a
    /// day that has gone by is dropped.
    pub fn roll_forward(&mut self, today: NaiveDate) {
        if self.selected_date >= today {
            return;
        }

        debug!("Moving stale calendar for doctor {} from {} to {}", self.doctor_id, self.selected_date, today);
        self.current_week = week_start(today);
        self.selected_date = today;
        self.time_slots = self.generator.generate(&self.doctor_id, today);
        if self.selected_slot.as_ref().is_some_and(|slot| slot.date < today) {
            self.selected_slot = None;
        }
    }

    /// Back to the initial state: today's week and slots, nothing chosen.
    pub fn reset(&mut self, today: NaiveDate) {
        self.current_week = week_start(today);
        self.selected_date = today;
        self.time_slots = self.generator.generate(&self.doctor_id, today);
        self.selected_slot = None;
    }
}
