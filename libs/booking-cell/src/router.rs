use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use doctor_cell::services::DoctorService;
use shared_config::AppConfig;
use shared_utils::extractor::signed_in_gate;

use crate::handlers;
use crate::services::{AppointmentSubmitter, SessionStore};

#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub doctors: Arc<DoctorService>,
    pub sessions: Arc<SessionStore>,
    pub submitter: Arc<dyn AppointmentSubmitter>,
}

/// Public appointment request form, mounted under `/appointment-requests`.
pub fn intake_routes(state: BookingState) -> Router {
    Router::new()
        .route("/", post(handlers::submit_intake))
        .with_state(state)
}

/// Patient booking pages, mounted under `/patient/book-appointment`.
pub fn booking_routes(state: BookingState) -> Router {
    Router::new()
        .route("/", get(handlers::get_booking))
        .route("/week/next", post(handlers::next_week))
        .route("/week/prev", post(handlers::prev_week))
        .route("/date", post(handlers::select_date))
        .route("/slot", post(handlers::select_slot))
        .route("/continue", post(handlers::continue_to_details))
        .route("/details", put(handlers::update_details))
        .route("/back", post(handlers::back_to_calendar))
        .route("/submit", post(handlers::submit_booking))
        .route("/reset", post(handlers::reset_booking))
        .layer(middleware::from_fn_with_state(state.config.clone(), signed_in_gate))
        .with_state(state)
}
