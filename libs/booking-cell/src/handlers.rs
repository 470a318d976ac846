use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{Local, NaiveDate};
use serde_json::json;
use tracing::debug;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::error::BookingError;
use crate::models::{DetailsUpdate, IntakeForm, SelectDateRequest, SelectSlotRequest, WeekDirection};
use crate::router::BookingState;
use crate::services::{validate_intake, BookingFlow};

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Applies one flow action and answers with the updated session view.
async fn apply<T>(
    state: &BookingState,
    user: &User,
    action: impl FnOnce(&mut BookingFlow, NaiveDate) -> Result<T, BookingError>,
) -> Result<Response, AppError> {
    let today = today();
    let view = state
        .sessions
        .with_flow(&user.id, today, |flow| action(&mut *flow, today).map(|_| flow.view(today)))
        .await?;

    Ok(Json(view).into_response())
}

pub async fn get_booking(
    State(state): State<BookingState>,
    Extension(user): Extension<User>,
) -> Result<Response, AppError> {
    let doctor = state.doctors.get_doctor(state.sessions.doctor_id())?;
    let view = state.sessions.view(&user.id, today()).await;

    Ok(Json(json!({
        "doctor": {
            "id": doctor.id,
            "name": doctor.full_name(),
            "specialization": doctor.specialization,
            "experience": doctor.experience,
            "consultation_fee": doctor.consultation_fee,
            "clinic_address": doctor.clinic_address,
            "profile_image": doctor.profile_image,
        },
        "booking": view,
    }))
    .into_response())
}

pub async fn next_week(
    State(state): State<BookingState>,
    Extension(user): Extension<User>,
) -> Result<Response, AppError> {
    apply(&state, &user, |flow, _| flow.navigate_week(WeekDirection::Next)).await
}

pub async fn prev_week(
    State(state): State<BookingState>,
    Extension(user): Extension<User>,
) -> Result<Response, AppError> {
    apply(&state, &user, |flow, _| flow.navigate_week(WeekDirection::Prev)).await
}

pub async fn select_date(
    State(state): State<BookingState>,
    Extension(user): Extension<User>,
    Json(request): Json<SelectDateRequest>,
) -> Result<Response, AppError> {
    apply(&state, &user, |flow, today| flow.select_date(request.date, today)).await
}

pub async fn select_slot(
    State(state): State<BookingState>,
    Extension(user): Extension<User>,
    Json(request): Json<SelectSlotRequest>,
) -> Result<Response, AppError> {
    debug!("User {} selecting slot {}", user.id, request.slot_id);
    apply(&state, &user, |flow, _| flow.select_slot(&request.slot_id)).await
}

pub async fn continue_to_details(
    State(state): State<BookingState>,
    Extension(user): Extension<User>,
) -> Result<Response, AppError> {
    apply(&state, &user, |flow, _| flow.continue_to_details()).await
}

pub async fn update_details(
    State(state): State<BookingState>,
    Extension(user): Extension<User>,
    Json(update): Json<DetailsUpdate>,
) -> Result<Response, AppError> {
    apply(&state, &user, |flow, _| flow.update_details(update)).await
}

pub async fn back_to_calendar(
    State(state): State<BookingState>,
    Extension(user): Extension<User>,
) -> Result<Response, AppError> {
    apply(&state, &user, |flow, _| flow.back_to_calendar()).await
}

pub async fn submit_booking(
    State(state): State<BookingState>,
    Extension(user): Extension<User>,
) -> Result<Response, AppError> {
    let today = today();
    let confirmation = state
        .sessions
        .submit(&user.id, today, state.submitter.clone())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Appointment booked successfully!",
            "confirmation": confirmation,
        })),
    )
        .into_response())
}

pub async fn reset_booking(
    State(state): State<BookingState>,
    Extension(user): Extension<User>,
) -> Result<Response, AppError> {
    apply(&state, &user, |flow, today| flow.reset(today)).await
}

pub async fn submit_intake(
    State(state): State<BookingState>,
    Json(form): Json<IntakeForm>,
) -> Result<Response, AppError> {
    let intake = validate_intake(&form)?;
    let doctor = state.doctors.get_doctor(state.sessions.doctor_id())?;
    let receipt = state
        .submitter
        .submit_intake(&intake)
        .await
        .map_err(BookingError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Appointment request submitted successfully!",
            "detail": format!(
                "Thank you for choosing {}. We'll confirm your appointment within 24 hours.",
                doctor.full_name()
            ),
            "receipt": receipt,
        })),
    )
        .into_response())
}
