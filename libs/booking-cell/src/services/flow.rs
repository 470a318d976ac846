use chrono::NaiveDate;
use tracing::{debug, warn};

use appointment_cell::models::AppointmentType;
use doctor_cell::models::TimeSlot;
use doctor_cell::services::SlotGenerator;

use crate::error::{BookingError, SubmissionError};
use crate::models::{
    AppointmentDetails, BookingConfirmation, BookingRequest, BookingStep, BookingView,
    DetailsUpdate, StepProgress, WeekDirection,
};
use crate::services::calendar::SlotSelector;
use crate::services::submission::AppointmentSubmitter;

/// One patient's walk through calendar → details → confirmation.
///
/// Every refused action leaves the flow as it was, apart from `notice`, which
/// carries the message of the most recent failure until the next success.
#[derive(Clone)]
pub struct BookingFlow {
    patient_id: String,
    step: BookingStep,
    selector: SlotSelector,
    details: AppointmentDetails,
    submitting: bool,
    confirmation: Option<BookingConfirmation>,
    notice: Option<String>,
}

impl BookingFlow {
    pub fn new(patient_id: &str, doctor_id: &str, today: NaiveDate, generator: SlotGenerator) -> Self {
        Self {
            patient_id: patient_id.to_string(),
            step: BookingStep::Calendar,
            selector: SlotSelector::new(doctor_id, today, generator),
            details: AppointmentDetails::default(),
            submitting: false,
            confirmation: None,
            notice: None,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn selector(&self) -> &SlotSelector {
        &self.selector
    }

    pub fn selected_slot(&self) -> Option<&TimeSlot> {
        self.selector.selected_slot()
    }

    pub fn details(&self) -> &AppointmentDetails {
        &self.details
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn confirmation(&self) -> Option<&BookingConfirmation> {
        self.confirmation.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn progress(&self) -> Vec<StepProgress> {
        StepProgress::for_step(self.step)
    }

    fn record<T>(&mut self, result: Result<T, BookingError>) -> Result<T, BookingError> {
        self.notice = result.as_ref().err().map(ToString::to_string);
        result
    }

    fn require(&self, step: BookingStep, action: &'static str) -> Result<(), BookingError> {
        if self.step != step {
            return Err(BookingError::InvalidTransition { from: self.step, action });
        }
        Ok(())
    }

    // ==========================================================================
    // CALENDAR STEP
    // ==========================================================================

    pub fn navigate_week(&mut self, direction: WeekDirection) -> Result<(), BookingError> {
        let result = self
            .require(BookingStep::Calendar, "change week")
            .map(|_| self.selector.navigate_week(direction));
        self.record(result)
    }

    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), BookingError> {
        let result = self
            .require(BookingStep::Calendar, "select a date")
            .and_then(|_| self.selector.select_date(date, today));
        self.record(result)
    }

    /// Only the calendar step follows the clock; later steps keep their slot.
    pub fn roll_forward(&mut self, today: NaiveDate) {
        if self.step == BookingStep::Calendar {
            self.selector.roll_forward(today);
        }
    }

    pub fn select_slot(&mut self, slot_id: &str) -> Result<TimeSlot, BookingError> {
        let result = self
            .require(BookingStep::Calendar, "select a slot")
            .and_then(|_| self.selector.select_slot(slot_id));
        self.record(result)
    }

    pub fn continue_to_details(&mut self) -> Result<(), BookingError> {
        let result = self.require(BookingStep::Calendar, "continue").and_then(|_| {
            if self.selector.selected_slot().is_none() {
                return Err(BookingError::NoSlotSelected);
            }
            self.step = BookingStep::Details;
            Ok(())
        });
        self.record(result)
    }

    // ==========================================================================
    // DETAILS STEP
    // ==========================================================================

    pub fn update_details(&mut self, update: DetailsUpdate) -> Result<(), BookingError> {
        let result = self
            .require(BookingStep::Details, "edit details")
            .map(|_| self.details.merge(update));
        self.record(result)
    }

    pub fn back_to_calendar(&mut self) -> Result<(), BookingError> {
        let result = self.require(BookingStep::Details, "go back").and_then(|_| {
            if self.submitting {
                return Err(BookingError::SubmissionInProgress);
            }
            self.step = BookingStep::Calendar;
            Ok(())
        });
        self.record(result)
    }

    /// Validates the form and marks the flow as submitting.
    ///
    /// The returned request is what the submitter should book. Call
    /// `complete_submission` with the submitter's answer afterwards.
    pub fn begin_submission(&mut self) -> Result<BookingRequest, BookingError> {
        let result = self.validate_submission();
        if result.is_ok() {
            self.submitting = true;
        }
        self.record(result)
    }

    fn validate_submission(&self) -> Result<BookingRequest, BookingError> {
        self.require(BookingStep::Details, "submit")?;

        if self.submitting {
            return Err(BookingError::SubmissionInProgress);
        }

        let slot = match self.selector.selected_slot() {
            Some(slot) if self.details.has_required_fields() => slot.clone(),
            _ => return Err(BookingError::MissingRequiredFields),
        };

        let appointment_type = self
            .details
            .appointment_type
            .parse::<AppointmentType>()
            .map_err(|_| BookingError::InvalidAppointmentType(self.details.appointment_type.clone()))?;

        Ok(BookingRequest {
            patient_id: self.patient_id.clone(),
            slot,
            appointment_type,
            details: self.details.clone(),
        })
    }

    /// Applies a submitter's answer. Success moves to confirmation; a failure
    /// stays on details with the form intact.
    pub fn complete_submission(
        &mut self,
        outcome: Result<BookingConfirmation, SubmissionError>,
    ) -> Result<BookingConfirmation, BookingError> {
        self.submitting = false;

        let result = match outcome {
            Ok(confirmation) => {
                debug!("Booking confirmed for patient {}: {}", self.patient_id, confirmation.reference);
                self.step = BookingStep::Confirmation;
                self.confirmation = Some(confirmation.clone());
                Ok(confirmation)
            }
            Err(err) => {
                warn!("Booking failed for patient {}: {}", self.patient_id, err);
                Err(BookingError::from(err))
            }
        };
        self.record(result)
    }

    /// Whole submit round trip for callers that own the flow exclusively.
    pub async fn submit(
        &mut self,
        submitter: &dyn AppointmentSubmitter,
    ) -> Result<BookingConfirmation, BookingError> {
        let request = self.begin_submission()?;
        let outcome = submitter.submit(&request).await;
        self.complete_submission(outcome)
    }

    // ==========================================================================
    // CONFIRMATION STEP
    // ==========================================================================

    /// "Book another appointment": clears the slot and the form.
    pub fn reset(&mut self, today: NaiveDate) -> Result<(), BookingError> {
        let result = self.require(BookingStep::Confirmation, "reset").map(|_| {
            self.selector.reset(today);
            self.details = AppointmentDetails::default();
            self.confirmation = None;
            self.step = BookingStep::Calendar;
        });
        self.record(result)
    }

    pub fn view(&self, today: NaiveDate) -> BookingView {
        let available_slots = self.selector.grouped_slots();

        BookingView {
            step: self.step,
            progress: self.progress(),
            doctor_id: self.selector.doctor_id().to_string(),
            current_week: self.selector.current_week(),
            week_days: self.selector.week_days(today),
            selected_date: self.selector.selected_date(),
            has_available_slots: !available_slots.is_empty(),
            available_slots,
            selected_slot: self.selector.selected_slot().cloned(),
            details: self.details.clone(),
            submitting: self.submitting,
            confirmation: self.confirmation.clone(),
            notice: self.notice.clone(),
        }
    }
}
