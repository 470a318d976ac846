use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use chrono::{Local, NaiveDateTime};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{DashboardTab, TabQuery};
use crate::router::DashboardState;
use crate::services::dashboard::{card, cards};

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

// ==============================================================================
// PATIENT DASHBOARD
// ==============================================================================

pub async fn patient_overview(
    State(state): State<DashboardState>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    debug!("Patient dashboard for user: {}", user.id);
    let now = now();

    Ok(Json(json!({
        "stats": state.dashboard.patient_stats(now),
        "upcoming": cards(&state.dashboard.upcoming(now), now),
        "past": cards(&state.dashboard.past(now), now),
    })))
}

pub async fn patient_upcoming(
    State(state): State<DashboardState>,
) -> Result<Json<Value>, AppError> {
    let now = now();
    let upcoming = state.dashboard.upcoming(now);

    Ok(Json(json!({
        "appointments": cards(&upcoming, now),
        "total": upcoming.len(),
    })))
}

pub async fn patient_past(
    State(state): State<DashboardState>,
) -> Result<Json<Value>, AppError> {
    let now = now();
    let past = state.dashboard.past(now);

    Ok(Json(json!({
        "appointments": cards(&past, now),
        "total": past.len(),
    })))
}

// ==============================================================================
// PRACTITIONER DASHBOARD
// ==============================================================================

#[axum::debug_handler]
pub async fn practitioner_overview(
    State(state): State<DashboardState>,
    Extension(user): Extension<User>,
    Query(query): Query<TabQuery>,
) -> Result<Json<Value>, AppError> {
    let tab: DashboardTab = query.tab.as_deref().unwrap_or("all").parse()?;
    debug!("Practitioner dashboard for user {} on tab {:?}", user.id, tab);

    let now = now();
    let today = now.date();
    let appointments = state.dashboard.by_tab(tab, today);

    Ok(Json(json!({
        "tab": tab,
        "appointments": cards(&appointments, now),
        "total": appointments.len(),
        "stats": state.dashboard.practitioner_stats(today),
    })))
}

pub async fn practitioner_stats(
    State(state): State<DashboardState>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(json!(state.dashboard.practitioner_stats(now().date()))))
}

pub async fn appointment_details(
    State(state): State<DashboardState>,
    Path(appointment_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let appointment = state.dashboard.get(&appointment_id)?;

    Ok(Json(json!(card(appointment, now()))))
}
