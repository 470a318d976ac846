use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::error::AppError;
use shared_models::profile::UserProfile;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: String,
    pub user_id: String,
    pub specialization: String,
    pub license_number: String,
    pub experience: u32,
    pub education: String,
    pub clinic_address: String,
    pub consultation_fee: u32,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub is_active: bool,
    pub user: UserProfile,
}

impl Doctor {
    pub fn full_name(&self) -> String {
        self.user.full_name()
    }
}

/// Part of the clinic day a slot belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum SlotPeriod {
    Morning,
    Afternoon,
    Evening,
}

impl SlotPeriod {
    pub const ALL: [SlotPeriod; 3] = [SlotPeriod::Morning, SlotPeriod::Afternoon, SlotPeriod::Evening];

    /// Opening and closing time of the period. The closing time is exclusive
    /// for slot starts and doubles as the end of the last slot.
    pub fn bounds(self) -> (NaiveTime, NaiveTime) {
        let hm = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default();
        match self {
            SlotPeriod::Morning => (hm(9, 0), hm(12, 0)),
            SlotPeriod::Afternoon => (hm(14, 0), hm(18, 0)),
            SlotPeriod::Evening => (hm(19, 0), hm(21, 0)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSlot {
    pub id: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub slot_type: SlotPeriod,
    pub max_appointments: u32,
    pub current_appointments: u32,
}

/// Slots bucketed by period, in generation order within each bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GroupedSlots {
    pub morning: Vec<TimeSlot>,
    pub afternoon: Vec<TimeSlot>,
    pub evening: Vec<TimeSlot>,
}

impl GroupedSlots {
    pub fn from_slots<'a, I>(slots: I) -> Self
    where
        I: IntoIterator<Item = &'a TimeSlot>,
    {
        let mut grouped = GroupedSlots::default();
        for slot in slots {
            match slot.slot_type {
                SlotPeriod::Morning => grouped.morning.push(slot.clone()),
                SlotPeriod::Afternoon => grouped.afternoon.push(slot.clone()),
                SlotPeriod::Evening => grouped.evening.push(slot.clone()),
            }
        }
        grouped
    }

    pub fn available_only<'a, I>(slots: I) -> Self
    where
        I: IntoIterator<Item = &'a TimeSlot>,
    {
        Self::from_slots(slots.into_iter().filter(|slot| slot.is_available))
    }

    pub fn len(&self) -> usize {
        self.morning.len() + self.afternoon.len() + self.evening.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DoctorError {
    #[error("Doctor not found: {0}")]
    NotFound(String),

    #[error("Doctor {0} is not accepting appointments")]
    Inactive(String),
}

impl From<DoctorError> for AppError {
    fn from(err: DoctorError) -> Self {
        match err {
            DoctorError::NotFound(_) => AppError::NotFound(err.to_string()),
            DoctorError::Inactive(_) => AppError::Conflict(err.to_string()),
        }
    }
}

/// `"HH:MM"` wire format for clock times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(de::Error::custom)
    }
}
