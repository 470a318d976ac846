use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::services::{DoctorService, SlotGenerator};

#[derive(Clone)]
pub struct DoctorState {
    pub doctors: Arc<DoctorService>,
    pub generator: SlotGenerator,
}

impl DoctorState {
    pub fn new(doctors: Arc<DoctorService>, generator: SlotGenerator) -> Self {
        Self { doctors, generator }
    }
}

pub fn doctor_routes(state: DoctorState) -> Router {
    // Everything here is public: the calendar header and slot grid are shown
    // before the visitor signs in.
    Router::new()
        .route("/{doctor_id}", get(handlers::get_doctor_public))
        .route("/{doctor_id}/slots", get(handlers::get_available_slots_public))
        .with_state(state)
}
