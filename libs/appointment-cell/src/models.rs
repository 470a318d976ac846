use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use doctor_cell::models::{hhmm, Doctor, TimeSlot};
use shared_models::error::AppError;
use shared_models::profile::UserProfile;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::NoShow => write!(f, "no-show"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentType {
    Consultation,
    FollowUp,
    Emergency,
    Telemedicine,
}

impl AppointmentType {
    pub fn label(self) -> &'static str {
        match self {
            AppointmentType::Consultation => "Initial Consultation",
            AppointmentType::FollowUp => "Follow-up Visit",
            AppointmentType::Emergency => "Emergency Visit",
            AppointmentType::Telemedicine => "Telemedicine",
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentType::Consultation => write!(f, "consultation"),
            AppointmentType::FollowUp => write!(f, "follow-up"),
            AppointmentType::Emergency => write!(f, "emergency"),
            AppointmentType::Telemedicine => write!(f, "telemedicine"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown appointment type: {0}")]
pub struct UnknownAppointmentType(pub String);

impl FromStr for AppointmentType {
    type Err = UnknownAppointmentType;

    // The booking form posts "initial" and "followup"; stored records use the
    // canonical names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consultation" | "initial" => Ok(AppointmentType::Consultation),
            "follow-up" | "followup" | "follow_up" => Ok(AppointmentType::FollowUp),
            "emergency" => Ok(AppointmentType::Emergency),
            "telemedicine" => Ok(AppointmentType::Telemedicine),
            _ => Err(UnknownAppointmentType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: String,
    pub user_id: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub emergency_contact: String,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub current_medications: Option<String>,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub time_slot_id: String,
    pub appointment_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub status: AppointmentStatus,
    pub appointment_type: AppointmentType,
    pub reason_for_visit: String,
    pub notes: Option<String>,
    pub prescriptions: Option<String>,
    pub follow_up_required: Option<bool>,
    pub follow_up_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub patient: Patient,
    pub doctor: Doctor,
    pub time_slot: TimeSlot,
}

impl Appointment {
    /// Midnight of the appointment day. Upcoming/past compare against this,
    /// so a visit later today already counts as past.
    pub fn day_start(&self) -> NaiveDateTime {
        self.appointment_date.and_time(NaiveTime::default())
    }

    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.day_start() >= now && self.status != AppointmentStatus::Cancelled
    }

    /// Past either by the clock or by status; an appointment completed ahead
    /// of its day counts as both upcoming and past.
    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        self.day_start() < now || self.status == AppointmentStatus::Completed
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppointmentStats {
    pub total_appointments: usize,
    pub today_appointments: usize,
    pub pending_appointments: usize,
    pub confirmed_appointments: usize,
    pub completed_appointments: usize,
    pub cancelled_appointments: usize,
    pub revenue: u64,
    pub patient_count: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientStats {
    pub upcoming: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DashboardTab {
    #[default]
    All,
    Today,
    Confirmed,
    Pending,
}

impl FromStr for DashboardTab {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(DashboardTab::All),
            "today" => Ok(DashboardTab::Today),
            "confirmed" => Ok(DashboardTab::Confirmed),
            "pending" => Ok(DashboardTab::Pending),
            other => Err(DashboardError::UnknownTab(other.to_string())),
        }
    }
}

/// Buttons a dashboard card offers. None of them changes anything yet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    ViewDetails,
    Confirm,
    Cancel,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AppointmentCard {
    pub appointment: Appointment,
    pub patient_name: String,
    pub type_label: &'static str,
    pub display_time: String,
    pub is_past: bool,
    pub actions: Vec<CardAction>,
}

#[derive(Debug, Deserialize)]
pub struct TabQuery {
    pub tab: Option<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error("Unknown dashboard tab: {0}")]
    UnknownTab(String),

    #[error("Appointment not found: {0}")]
    NotFound(String),
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::UnknownTab(_) => AppError::BadRequest(err.to_string()),
            DashboardError::NotFound(_) => AppError::NotFound(err.to_string()),
        }
    }
}
