use chrono::NaiveDate;
use thiserror::Error;

use shared_models::error::AppError;

use crate::models::{BookingStep, FieldError};

/// Why a submitter could not book the slot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Worth another attempt (timeouts, a busy upstream).
    #[error("Booking service temporarily unavailable: {0}")]
    Transient(String),

    #[error("Booking rejected: {0}")]
    Rejected(String),
}

impl SubmissionError {
    pub fn is_transient(&self) -> bool {
        matches!(self, SubmissionError::Transient(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Cannot select {date}: the date is in the past")]
    DateInPast { date: NaiveDate },

    #[error("Time slot not found: {0}")]
    SlotNotFound(String),

    #[error("Time slot is no longer available: {0}")]
    SlotUnavailable(String),

    #[error("Please select a time slot")]
    NoSlotSelected,

    #[error("Please fill in all required fields")]
    MissingRequiredFields,

    #[error("Unknown appointment type: {0}")]
    InvalidAppointmentType(String),

    #[error("{}", field_messages(.0))]
    InvalidIntake(Vec<FieldError>),

    #[error("A booking is already being submitted")]
    SubmissionInProgress,

    #[error("Cannot {action} from the {from} step")]
    InvalidTransition { from: BookingStep, action: &'static str },

    #[error("Failed to book appointment. Please try again. ({0})")]
    Submission(#[from] SubmissionError),
}

fn field_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::DateInPast { .. }
            | BookingError::NoSlotSelected
            | BookingError::MissingRequiredFields
            | BookingError::InvalidAppointmentType(_)
            | BookingError::InvalidIntake(_) => AppError::ValidationError(err.to_string()),
            BookingError::SlotNotFound(_) => AppError::NotFound(err.to_string()),
            BookingError::SlotUnavailable(_)
            | BookingError::SubmissionInProgress
            | BookingError::InvalidTransition { .. } => AppError::Conflict(err.to_string()),
            BookingError::Submission(_) => AppError::ExternalService(err.to_string()),
        }
    }
}
