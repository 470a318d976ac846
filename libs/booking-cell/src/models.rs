use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use appointment_cell::models::{AppointmentStatus, AppointmentType, Gender};
use doctor_cell::models::{GroupedSlots, TimeSlot};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStep {
    Calendar,
    Details,
    Confirmation,
}

impl BookingStep {
    pub const ALL: [BookingStep; 3] = [BookingStep::Calendar, BookingStep::Details, BookingStep::Confirmation];

    pub fn label(self) -> &'static str {
        match self {
            BookingStep::Calendar => "Select Time",
            BookingStep::Details => "Appointment Details",
            BookingStep::Confirmation => "Confirmation",
        }
    }

    fn position(self) -> usize {
        match self {
            BookingStep::Calendar => 0,
            BookingStep::Details => 1,
            BookingStep::Confirmation => 2,
        }
    }
}

impl fmt::Display for BookingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStep::Calendar => write!(f, "calendar"),
            BookingStep::Details => write!(f, "details"),
            BookingStep::Confirmation => write!(f, "confirmation"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StepState {
    Current,
    Complete,
    Upcoming,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StepProgress {
    pub step: BookingStep,
    pub label: &'static str,
    pub state: StepState,
}

impl StepProgress {
    /// Progress bar entries as seen from `current`.
    pub fn for_step(current: BookingStep) -> Vec<StepProgress> {
        BookingStep::ALL
            .iter()
            .map(|&step| StepProgress {
                step,
                label: step.label(),
                state: match step.position().cmp(&current.position()) {
                    std::cmp::Ordering::Less => StepState::Complete,
                    std::cmp::Ordering::Equal => StepState::Current,
                    std::cmp::Ordering::Greater => StepState::Upcoming,
                },
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

/// The details form as the patient typed it.
///
/// `appointment_type` stays a raw string until submission so a half-filled
/// form round-trips unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppointmentDetails {
    pub appointment_type: String,
    pub reason_for_visit: String,
    pub symptoms: String,
    pub previous_treatments: String,
    pub urgency: Urgency,
}

impl AppointmentDetails {
    pub fn merge(&mut self, update: DetailsUpdate) {
        if let Some(value) = update.appointment_type {
            self.appointment_type = value;
        }
        if let Some(value) = update.reason_for_visit {
            self.reason_for_visit = value;
        }
        if let Some(value) = update.symptoms {
            self.symptoms = value;
        }
        if let Some(value) = update.previous_treatments {
            self.previous_treatments = value;
        }
        if let Some(value) = update.urgency {
            self.urgency = value;
        }
    }

    pub fn has_required_fields(&self) -> bool {
        !self.appointment_type.trim().is_empty() && !self.reason_for_visit.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetailsUpdate {
    pub appointment_type: Option<String>,
    pub reason_for_visit: Option<String>,
    pub symptoms: Option<String>,
    pub previous_treatments: Option<String>,
    pub urgency: Option<Urgency>,
}

/// What gets handed to a submitter once the form validates.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BookingRequest {
    pub patient_id: String,
    pub slot: TimeSlot,
    pub appointment_type: AppointmentType,
    pub details: AppointmentDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingConfirmation {
    pub reference: String,
    pub slot: TimeSlot,
    pub appointment_type: AppointmentType,
    pub appointment_type_label: String,
    pub urgency: Urgency,
    pub status: AppointmentStatus,
    pub confirmed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeekDirection {
    Next,
    Prev,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_past: bool,
}

/// Snapshot of one patient's booking session.
#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    pub step: BookingStep,
    pub progress: Vec<StepProgress>,
    pub doctor_id: String,
    pub current_week: NaiveDate,
    pub week_days: Vec<WeekDay>,
    pub selected_date: NaiveDate,
    pub available_slots: GroupedSlots,
    pub has_available_slots: bool,
    pub selected_slot: Option<TimeSlot>,
    pub details: AppointmentDetails,
    pub submitting: bool,
    pub confirmation: Option<BookingConfirmation>,
    pub notice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectDateRequest {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct SelectSlotRequest {
    pub slot_id: String,
}

// ==============================================================================
// PUBLIC APPOINTMENT REQUEST
// ==============================================================================

/// The homepage request form as posted. Missing fields deserialize to empty
/// values so validation can report them by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IntakeForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub gender: Option<Gender>,
    pub appointment_type: String,
    pub reason_for_visit: String,
    pub previous_treatments: String,
    pub medications: String,
    pub allergies: String,
    pub emergency_contact: String,
    pub emergency_relation: String,
    pub consent_treatment: bool,
    pub consent_privacy: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// An intake form that passed validation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IntakeRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub appointment_type: AppointmentType,
    pub reason_for_visit: String,
    pub previous_treatments: Option<String>,
    pub medications: Option<String>,
    pub allergies: Option<String>,
    pub emergency_contact: String,
    pub emergency_relation: String,
}

/// Acknowledgement of a request; the practice confirms it later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntakeReceipt {
    pub reference: String,
    pub full_name: String,
    pub email: String,
    pub appointment_type: AppointmentType,
    pub appointment_type_label: String,
    pub status: AppointmentStatus,
    pub submitted_at: DateTime<Utc>,
}
