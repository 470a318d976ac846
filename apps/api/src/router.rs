use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tracing::info;

use appointment_cell::{
    patient_dashboard_routes, practitioner_dashboard_routes, DashboardService, DashboardState,
};
use auth_cell::router::auth_routes;
use booking_cell::services::{
    AppointmentSubmitter, RetryPolicy, RetryingSubmitter, SessionStore, SimulatedSubmitter,
};
use booking_cell::{booking_routes, intake_routes, BookingState};
use doctor_cell::services::{DoctorService, ScheduleAvailability, SlotGenerator};
use doctor_cell::{doctor_routes, DoctorState};
use shared_config::{AppConfig, SlotAvailabilityMode};

fn slot_generator(config: &AppConfig, dashboard: &DashboardService) -> SlotGenerator {
    match config.slot_availability_mode {
        SlotAvailabilityMode::Random => {
            info!("Slot availability: random");
            SlotGenerator::random()
        }
        SlotAvailabilityMode::Schedule => {
            let bookings = dashboard.bookings();
            info!("Slot availability: schedule ({} known bookings)", bookings.len());
            SlotGenerator::scheduled(ScheduleAvailability::from_bookings(bookings))
        }
    }
}

fn submitter(config: &AppConfig) -> Arc<dyn AppointmentSubmitter> {
    Arc::new(RetryingSubmitter::new(
        Arc::new(SimulatedSubmitter::from_config(config)),
        RetryPolicy::from_config(config),
    ))
}

pub fn create_router(config: Arc<AppConfig>) -> Router {
    let doctors = Arc::new(DoctorService::with_sample_data());
    let dashboard = Arc::new(DashboardService::with_sample_data());
    let generator = slot_generator(&config, &dashboard);

    let booking_state = BookingState {
        config: config.clone(),
        doctors: doctors.clone(),
        sessions: Arc::new(
            SessionStore::new(&config.default_doctor_id, generator.clone())
                .with_idle_timeout(Duration::from_secs(config.booking_session_idle_secs)),
        ),
        submitter: submitter(&config),
    };
    let dashboard_state = DashboardState::new(config.clone(), dashboard);

    Router::new()
        .route("/", get(|| async { "Clinic booking API is running!" }))
        .nest("/auth", auth_routes(config.clone()))
        .nest("/doctors", doctor_routes(DoctorState::new(doctors, generator)))
        .nest("/appointment-requests", intake_routes(booking_state.clone()))
        .nest("/patient/book-appointment", booking_routes(booking_state))
        .nest("/patient/dashboard", patient_dashboard_routes(dashboard_state.clone()))
        .nest("/dashboard", practitioner_dashboard_routes(dashboard_state))
}
