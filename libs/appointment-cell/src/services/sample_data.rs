use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use doctor_cell::models::{Doctor, SlotPeriod, TimeSlot};
use doctor_cell::services::doctor::sample_doctor;
use doctor_cell::services::slots::{slot_id, MAX_APPOINTMENTS_PER_SLOT};
use shared_models::profile::{UserProfile, UserRole};

use crate::models::{Appointment, AppointmentStatus, AppointmentType, Gender, Patient};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn clock(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

fn stamp(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single().unwrap_or_default()
}

fn patient_user(id: &str, email: &str, first: &str, last: &str, phone: &str) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        email: email.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        phone: Some(phone.to_string()),
        role: UserRole::Patient,
        created_at: stamp(2024, 1, 1),
        updated_at: stamp(2024, 1, 1),
    }
}

pub fn sample_patients() -> Vec<Patient> {
    vec![
        Patient {
            id: "pat-1".to_string(),
            user_id: "user-pat-1".to_string(),
            date_of_birth: day(1990, 5, 15),
            gender: Gender::Female,
            emergency_contact: "+92 321 9876543".to_string(),
            medical_history: Some("No significant medical history".to_string()),
            allergies: Some("None known".to_string()),
            current_medications: Some("None".to_string()),
            user: patient_user("user-pat-1", "sarah.ahmed@email.com", "Sarah", "Ahmed", "+92 321 1111111"),
        },
        Patient {
            id: "pat-2".to_string(),
            user_id: "user-pat-2".to_string(),
            date_of_birth: day(1985, 8, 22),
            gender: Gender::Male,
            emergency_contact: "+92 321 8765432".to_string(),
            medical_history: Some("Hypertension".to_string()),
            allergies: Some("Penicillin".to_string()),
            current_medications: Some("Lisinopril 10mg daily".to_string()),
            user: patient_user("user-pat-2", "hassan.m@email.com", "Muhammad", "Hassan", "+92 321 2222222"),
        },
        Patient {
            id: "pat-3".to_string(),
            user_id: "user-pat-3".to_string(),
            date_of_birth: day(1993, 3, 9),
            gender: Gender::Female,
            emergency_contact: "+92 321 7654321".to_string(),
            medical_history: None,
            allergies: None,
            current_medications: None,
            user: patient_user("user-pat-3", "fatima.sheikh@email.com", "Fatima", "Sheikh", "+92 321 3333333"),
        },
    ]
}

struct Booking<'a> {
    id: &'a str,
    patient: &'a Patient,
    date: NaiveDate,
    start: NaiveTime,
    period: SlotPeriod,
    status: AppointmentStatus,
    appointment_type: AppointmentType,
    reason: &'a str,
    notes: &'a str,
    booked_on: DateTime<Utc>,
}

fn build(doctor: &Doctor, booking: Booking<'_>) -> Appointment {
    let end = booking.start + chrono::Duration::minutes(30);
    let time_slot = TimeSlot {
        id: slot_id(&doctor.id, booking.date, booking.start),
        doctor_id: doctor.id.clone(),
        date: booking.date,
        start_time: booking.start,
        end_time: end,
        is_available: false,
        slot_type: booking.period,
        max_appointments: MAX_APPOINTMENTS_PER_SLOT,
        current_appointments: 1,
    };

    Appointment {
        id: booking.id.to_string(),
        patient_id: booking.patient.id.clone(),
        doctor_id: doctor.id.clone(),
        time_slot_id: time_slot.id.clone(),
        appointment_date: booking.date,
        start_time: booking.start,
        end_time: end,
        status: booking.status,
        appointment_type: booking.appointment_type,
        reason_for_visit: booking.reason.to_string(),
        notes: Some(booking.notes.to_string()),
        prescriptions: None,
        follow_up_required: None,
        follow_up_date: None,
        created_at: booking.booked_on,
        updated_at: booking.booked_on,
        patient: booking.patient.clone(),
        doctor: doctor.clone(),
        time_slot,
    }
}

/// The fixed appointment list both dashboards read from.
pub fn sample_appointments() -> Vec<Appointment> {
    let doctor = sample_doctor();
    let patients = sample_patients();

    vec![
        build(&doctor, Booking {
            id: "apt-1",
            patient: &patients[0],
            date: day(2024, 1, 15),
            start: clock(10, 0),
            period: SlotPeriod::Morning,
            status: AppointmentStatus::Confirmed,
            appointment_type: AppointmentType::Consultation,
            reason: "Acne treatment consultation",
            notes: "First-time patient, severe acne condition",
            booked_on: stamp(2024, 1, 10),
        }),
        build(&doctor, Booking {
            id: "apt-2",
            patient: &patients[1],
            date: day(2024, 1, 15),
            start: clock(14, 0),
            period: SlotPeriod::Afternoon,
            status: AppointmentStatus::Pending,
            appointment_type: AppointmentType::FollowUp,
            reason: "Follow-up for eczema treatment",
            notes: "Check progress on topical medications",
            booked_on: stamp(2024, 1, 12),
        }),
        build(&doctor, Booking {
            id: "apt-3",
            patient: &patients[2],
            date: day(2024, 1, 16),
            start: clock(11, 30),
            period: SlotPeriod::Morning,
            status: AppointmentStatus::Confirmed,
            appointment_type: AppointmentType::Telemedicine,
            reason: "Cosmetic consultation for chemical peel",
            notes: "Interested in anti-aging treatments",
            booked_on: stamp(2024, 1, 13),
        }),
    ]
}
