use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

use crate::models::{
    Appointment, AppointmentCard, AppointmentStats, AppointmentStatus, CardAction, DashboardError,
    DashboardTab, PatientStats,
};
use crate::services::sample_data::sample_appointments;

/// Read-only views over a fixed appointment list.
#[derive(Debug, Clone)]
pub struct DashboardService {
    appointments: Arc<Vec<Appointment>>,
}

impl DashboardService {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        Self {
            appointments: Arc::new(appointments),
        }
    }

    pub fn with_sample_data() -> Self {
        Self::new(sample_appointments())
    }

    pub fn all(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn get(&self, appointment_id: &str) -> Result<&Appointment, DashboardError> {
        self.appointments
            .iter()
            .find(|a| a.id == appointment_id)
            .ok_or_else(|| DashboardError::NotFound(appointment_id.to_string()))
    }

    pub fn upcoming(&self, now: NaiveDateTime) -> Vec<&Appointment> {
        self.appointments.iter().filter(|a| a.is_upcoming(now)).collect()
    }

    pub fn past(&self, now: NaiveDateTime) -> Vec<&Appointment> {
        self.appointments.iter().filter(|a| a.is_past(now)).collect()
    }

    pub fn by_tab(&self, tab: DashboardTab, today: NaiveDate) -> Vec<&Appointment> {
        debug!("Filtering {} appointments by tab {:?}", self.appointments.len(), tab);

        self.appointments
            .iter()
            .filter(|a| match tab {
                DashboardTab::All => true,
                DashboardTab::Today => a.appointment_date == today,
                DashboardTab::Confirmed => a.status == AppointmentStatus::Confirmed,
                DashboardTab::Pending => a.status == AppointmentStatus::Pending,
            })
            .collect()
    }

    pub fn practitioner_stats(&self, today: NaiveDate) -> AppointmentStats {
        let count = |status: AppointmentStatus| {
            self.appointments.iter().filter(|a| a.status == status).count()
        };

        let revenue = self
            .appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
            .map(|a| u64::from(a.doctor.consultation_fee))
            .sum();

        let patients: HashSet<&str> = self.appointments.iter().map(|a| a.patient_id.as_str()).collect();

        AppointmentStats {
            total_appointments: self.appointments.len(),
            today_appointments: self.by_tab(DashboardTab::Today, today).len(),
            pending_appointments: count(AppointmentStatus::Pending),
            confirmed_appointments: count(AppointmentStatus::Confirmed),
            completed_appointments: count(AppointmentStatus::Completed),
            cancelled_appointments: count(AppointmentStatus::Cancelled),
            revenue,
            patient_count: patients.len(),
        }
    }

    pub fn patient_stats(&self, now: NaiveDateTime) -> PatientStats {
        PatientStats {
            upcoming: self.upcoming(now).len(),
            completed: self.past(now).len(),
        }
    }

    /// Known bookings as `(doctor, date, start)`, for seeding slot availability.
    pub fn bookings(&self) -> Vec<(String, NaiveDate, NaiveTime)> {
        self.appointments
            .iter()
            .filter(|a| a.status != AppointmentStatus::Cancelled)
            .map(|a| (a.doctor_id.clone(), a.appointment_date, a.start_time))
            .collect()
    }
}

pub fn card(appointment: &Appointment, now: NaiveDateTime) -> AppointmentCard {
    let mut actions = vec![CardAction::ViewDetails];
    if appointment.status == AppointmentStatus::Pending {
        actions.extend([CardAction::Confirm, CardAction::Cancel]);
    }

    AppointmentCard {
        appointment: appointment.clone(),
        patient_name: appointment.patient.user.full_name(),
        type_label: appointment.appointment_type.label(),
        display_time: format!(
            "{} - {}",
            appointment.start_time.format("%-I:%M %p"),
            appointment.end_time.format("%-I:%M %p")
        ),
        is_past: appointment.day_start() < now,
        actions,
    }
}

pub fn cards(appointments: &[&Appointment], now: NaiveDateTime) -> Vec<AppointmentCard> {
    appointments.iter().map(|a| card(a, now)).collect()
}
