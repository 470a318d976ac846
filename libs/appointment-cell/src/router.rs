use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use shared_config::AppConfig;
use shared_utils::extractor::signed_in_gate;

use crate::handlers;
use crate::services::DashboardService;

#[derive(Clone)]
pub struct DashboardState {
    pub config: Arc<AppConfig>,
    pub dashboard: Arc<DashboardService>,
}

impl DashboardState {
    pub fn new(config: Arc<AppConfig>, dashboard: Arc<DashboardService>) -> Self {
        Self { config, dashboard }
    }
}

/// "My Appointments", mounted under `/patient/dashboard`.
pub fn patient_dashboard_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(handlers::patient_overview))
        .route("/upcoming", get(handlers::patient_upcoming))
        .route("/past", get(handlers::patient_past))
        .route("/appointments/{appointment_id}", get(handlers::appointment_details))
        .layer(middleware::from_fn_with_state(state.config.clone(), signed_in_gate))
        .with_state(state)
}

/// Practitioner dashboard, mounted under `/dashboard`.
pub fn practitioner_dashboard_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(handlers::practitioner_overview))
        .route("/stats", get(handlers::practitioner_stats))
        .route("/appointments/{appointment_id}", get(handlers::appointment_details))
        .layer(middleware::from_fn_with_state(state.config.clone(), signed_in_gate))
        .with_state(state)
}
