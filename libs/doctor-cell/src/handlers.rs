use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Local;
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::models::{GroupedSlots, SlotQuery};
use crate::router::DoctorState;

#[axum::debug_handler]
pub async fn get_doctor_public(
    State(state): State<DoctorState>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let doctor = state.doctors.get_doctor(&doctor_id)?;

    Ok(Json(json!({
        "doctor": doctor,
        "full_name": doctor.full_name(),
    })))
}

#[axum::debug_handler]
pub async fn get_available_slots_public(
    State(state): State<DoctorState>,
    Path(doctor_id): Path<String>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Value>, AppError> {
    state.doctors.bookable_doctor(&doctor_id)?;

    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    debug!("Listing slots for doctor {} on {}", doctor_id, date);

    let slots = state.generator.generate(&doctor_id, date);
    let available = GroupedSlots::available_only(&slots);

    Ok(Json(json!({
        "doctor_id": doctor_id,
        "date": date,
        "slots": GroupedSlots::from_slots(&slots),
        "available": available,
        "total_slots": slots.len(),
        "available_slots": available.len(),
        "has_available_slots": !available.is_empty(),
    })))
}
