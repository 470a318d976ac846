use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use rand::Rng;
use tracing::debug;

use crate::models::{SlotPeriod, TimeSlot};

pub const SLOT_MINUTES: i64 = 30;
pub const MAX_APPOINTMENTS_PER_SLOT: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAvailability {
    pub is_available: bool,
    pub current_appointments: u32,
}

/// Decides whether a generated slot can still be booked.
pub trait AvailabilitySource: Send + Sync {
    fn availability(
        &self,
        doctor_id: &str,
        date: NaiveDate,
        start_time: NaiveTime,
        period: SlotPeriod,
    ) -> SlotAvailability;
}

/// Independent coin flips per slot. Evenings are a little sparser.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomAvailability;

impl RandomAvailability {
    fn odds(period: SlotPeriod) -> (f64, f64) {
        match period {
            SlotPeriod::Morning | SlotPeriod::Afternoon => (0.7, 0.3),
            SlotPeriod::Evening => (0.6, 0.2),
        }
    }
}

impl AvailabilitySource for RandomAvailability {
    fn availability(
        &self,
        _doctor_id: &str,
        _date: NaiveDate,
        _start_time: NaiveTime,
        period: SlotPeriod,
    ) -> SlotAvailability {
        let (p_available, p_booked) = Self::odds(period);
        let mut rng = rand::thread_rng();

        SlotAvailability {
            is_available: rng.gen_bool(p_available),
            current_appointments: u32::from(rng.gen_bool(p_booked)),
        }
    }
}

type BookingKey = (String, NaiveDate, NaiveTime);

/// Availability derived from known bookings.
///
/// A slot is bookable until its count reaches the per-slot capacity; the same
/// inputs always produce the same answer.
#[derive(Debug, Clone)]
pub struct ScheduleAvailability {
    bookings: HashMap<BookingKey, u32>,
    max_appointments: u32,
}

impl Default for ScheduleAvailability {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleAvailability {
    pub fn new() -> Self {
        Self {
            bookings: HashMap::new(),
            max_appointments: MAX_APPOINTMENTS_PER_SLOT,
        }
    }

    pub fn from_bookings<I>(bookings: I) -> Self
    where
        I: IntoIterator<Item = (String, NaiveDate, NaiveTime)>,
    {
        let mut schedule = Self::new();
        for (doctor_id, date, start_time) in bookings {
            schedule.record_booking(&doctor_id, date, start_time);
        }
        schedule
    }

    pub fn with_booking(mut self, doctor_id: &str, date: NaiveDate, start_time: NaiveTime) -> Self {
        self.record_booking(doctor_id, date, start_time);
        self
    }

    pub fn record_booking(&mut self, doctor_id: &str, date: NaiveDate, start_time: NaiveTime) {
        *self
            .bookings
            .entry((doctor_id.to_string(), date, start_time))
            .or_insert(0) += 1;
    }

    pub fn booked(&self, doctor_id: &str, date: NaiveDate, start_time: NaiveTime) -> u32 {
        self.bookings
            .get(&(doctor_id.to_string(), date, start_time))
            .copied()
            .unwrap_or(0)
    }
}

impl AvailabilitySource for ScheduleAvailability {
    fn availability(
        &self,
        doctor_id: &str,
        date: NaiveDate,
        start_time: NaiveTime,
        _period: SlotPeriod,
    ) -> SlotAvailability {
        let current = self.booked(doctor_id, date, start_time);
        SlotAvailability {
            is_available: current < self.max_appointments,
            current_appointments: current,
        }
    }
}

pub fn slot_id(doctor_id: &str, date: NaiveDate, start_time: NaiveTime) -> String {
    format!(
        "slot-{}-{}-{}",
        doctor_id,
        date.format("%Y-%m-%d"),
        start_time.format("%H:%M")
    )
}

/// Builds the fixed daily grid of half-hour slots for one doctor.
#[derive(Clone)]
pub struct SlotGenerator {
    source: Arc<dyn AvailabilitySource>,
}

impl SlotGenerator {
    pub fn new(source: Arc<dyn AvailabilitySource>) -> Self {
        Self { source }
    }

    pub fn random() -> Self {
        Self::new(Arc::new(RandomAvailability))
    }

    pub fn scheduled(schedule: ScheduleAvailability) -> Self {
        Self::new(Arc::new(schedule))
    }

    /// Morning, afternoon, then evening slots in start-time order. Always 18.
    pub fn generate(&self, doctor_id: &str, date: NaiveDate) -> Vec<TimeSlot> {
        let step = Duration::minutes(SLOT_MINUTES);
        let mut slots = Vec::with_capacity(18);

        for period in SlotPeriod::ALL {
            let (open, close) = period.bounds();
            let mut start = open;

            while start < close {
                let end = start + step;
                let availability = self.source.availability(doctor_id, date, start, period);

                slots.push(TimeSlot {
                    id: slot_id(doctor_id, date, start),
                    doctor_id: doctor_id.to_string(),
                    date,
                    start_time: start,
                    end_time: end,
                    is_available: availability.is_available,
                    slot_type: period,
                    max_appointments: MAX_APPOINTMENTS_PER_SLOT,
                    current_appointments: availability.current_appointments,
                });

                start = end;
            }
        }

        debug!(
            "Generated {} slots for doctor {} on {} ({} available)",
            slots.len(),
            doctor_id,
            date,
            slots.iter().filter(|s| s.is_available).count()
        );

        slots
    }
}
