use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use appointment_cell::models::AppointmentType;

use crate::error::BookingError;
use crate::models::{FieldError, IntakeForm, IntakeRequest};

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

fn is_valid_email(email: &str) -> bool {
    email.len() <= 254 && Regex::new(EMAIL_PATTERN).is_ok_and(|re| re.is_match(email))
}

fn long_enough(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Checks every field of the request form and reports all failures at once.
pub fn validate_intake(form: &IntakeForm) -> Result<IntakeRequest, BookingError> {
    let mut errors = Vec::new();
    let mut fail = |field, message| errors.push(FieldError { field, message });

    if !long_enough(&form.full_name, 2) {
        fail("full_name", "Full name must be at least 2 characters");
    }
    if !is_valid_email(form.email.trim()) {
        fail("email", "Please enter a valid email address");
    }
    if !long_enough(&form.phone, 10) {
        fail("phone", "Phone number must be at least 10 digits");
    }

    let date_of_birth = match form.date_of_birth.trim() {
        "" => {
            fail("date_of_birth", "Date of birth is required");
            None
        }
        raw => {
            let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
            if parsed.is_none() {
                fail("date_of_birth", "Please enter a valid date of birth");
            }
            parsed
        }
    };

    if form.gender.is_none() {
        fail("gender", "Please select a gender");
    }

    let appointment_type = form.appointment_type.parse::<AppointmentType>().ok();
    if appointment_type.is_none() {
        fail("appointment_type", "Please select an appointment type");
    }

    if !long_enough(&form.reason_for_visit, 10) {
        fail("reason_for_visit", "Please provide more details about your visit");
    }
    if !long_enough(&form.emergency_contact, 10) {
        fail("emergency_contact", "Emergency contact is required");
    }
    if !long_enough(&form.emergency_relation, 1) {
        fail("emergency_relation", "Emergency contact relationship is required");
    }
    if !form.consent_treatment {
        fail("consent_treatment", "Treatment consent is required");
    }
    if !form.consent_privacy {
        fail("consent_privacy", "Privacy policy consent is required");
    }

    match (date_of_birth, form.gender, appointment_type) {
        (Some(date_of_birth), Some(gender), Some(appointment_type)) if errors.is_empty() => {
            Ok(IntakeRequest {
                full_name: form.full_name.trim().to_string(),
                email: form.email.trim().to_string(),
                phone: form.phone.trim().to_string(),
                date_of_birth,
                gender,
                appointment_type,
                reason_for_visit: form.reason_for_visit.trim().to_string(),
                previous_treatments: optional(&form.previous_treatments),
                medications: optional(&form.medications),
                allergies: optional(&form.allergies),
                emergency_contact: form.emergency_contact.trim().to_string(),
                emergency_relation: form.emergency_relation.trim().to_string(),
            })
        }
        _ => {
            debug!("Intake form rejected on {} field(s)", errors.len());
            Err(BookingError::InvalidIntake(errors))
        }
    }
}
