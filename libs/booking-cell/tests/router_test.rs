use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration as Days, Local};
use serde_json::{json, Value};
use tower::ServiceExt;

use booking_cell::services::{SessionStore, SimulatedSubmitter};
use booking_cell::{booking_routes, intake_routes, BookingState};
use doctor_cell::services::{DoctorService, ScheduleAvailability, SlotGenerator};
use shared_utils::test_utils::{JwtTestUtils, TestConfig, TestUser};

struct Harness {
    app: Router,
    auth: String,
}

fn state(config: &TestConfig) -> BookingState {
    BookingState {
        config: config.to_arc(),
        doctors: Arc::new(DoctorService::with_sample_data()),
        sessions: Arc::new(SessionStore::new(
            "doc-1",
            SlotGenerator::scheduled(ScheduleAvailability::new()),
        )),
        submitter: Arc::new(SimulatedSubmitter::new(Duration::ZERO)),
    }
}

impl Harness {
    fn new() -> Self {
        let config = TestConfig::default();

        Self {
            app: booking_routes(state(&config)),
            auth: JwtTestUtils::bearer(&TestUser::patient("sarah.ahmed@email.com"), &config),
        }
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", &self.auth);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self.app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }
}

fn tomorrow() -> String {
    (Local::now().date_naive() + Days::days(1)).format("%Y-%m-%d").to_string()
}

#[tokio::test]
async fn test_signed_out_visitor_is_redirected() {
    let harness = Harness::new();

    let response = harness
        .app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get("location").unwrap(), "/");
}

#[tokio::test]
async fn test_initial_view() {
    let harness = Harness::new();

    let (status, json) = harness.send("GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["doctor"]["name"], "Dr. Ayesha Khan");
    assert_eq!(json["booking"]["step"], "calendar");
    assert_eq!(json["booking"]["week_days"].as_array().unwrap().len(), 7);
    assert_eq!(json["booking"]["progress"][0]["state"], "current");
    assert_eq!(json["booking"]["has_available_slots"], true);
    assert!(json["booking"]["selected_slot"].is_null());
}

#[tokio::test]
async fn test_full_booking_journey() {
    let harness = Harness::new();
    let date = tomorrow();
    let slot_id = format!("slot-doc-1-{}-14:30", date);

    let (status, json) = harness.send("POST", "/date", Some(json!({ "date": date }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["selected_date"], date);

    let (status, _) = harness.send("POST", "/continue", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = harness.send("POST", "/slot", Some(json!({ "slot_id": slot_id }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["selected_slot"]["start_time"], "14:30");

    let (status, json) = harness.send("POST", "/continue", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["step"], "details");

    let (status, json) = harness
        .send("PUT", "/details", Some(json!({ "appointment_type": "telemedicine" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["details"]["urgency"], "normal");

    let (status, json) = harness.send("POST", "/submit", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Please fill in all required fields");

    let (_, json) = harness.send("GET", "/", None).await;
    assert_eq!(json["booking"]["step"], "details");
    assert_eq!(json["booking"]["notice"], "Please fill in all required fields");

    harness
        .send("PUT", "/details", Some(json!({ "reason_for_visit": "Video review of treatment" })))
        .await;

    let (status, json) = harness.send("POST", "/submit", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Appointment booked successfully!");
    assert_eq!(json["confirmation"]["status"], "confirmed");
    assert_eq!(json["confirmation"]["appointment_type_label"], "Telemedicine");
    assert_eq!(json["confirmation"]["slot"]["id"], slot_id);

    let (status, json) = harness.send("POST", "/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["step"], "calendar");
    assert!(json["selected_slot"].is_null());
    assert_eq!(json["details"]["reason_for_visit"], "");
}

#[tokio::test]
async fn test_week_navigation() {
    let harness = Harness::new();

    let (_, start) = harness.send("GET", "/", None).await;
    let (status, next) = harness.send("POST", "/week/next", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(next["current_week"], start["booking"]["current_week"]);

    let (_, back) = harness.send("POST", "/week/prev", None).await;
    assert_eq!(back["current_week"], start["booking"]["current_week"]);
}

#[tokio::test]
async fn test_rejected_actions() {
    let harness = Harness::new();

    let (status, _) = harness
        .send("POST", "/date", Some(json!({ "date": "2000-01-01" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = harness
        .send("POST", "/slot", Some(json!({ "slot_id": "slot-doc-1-2000-01-01-09:00" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, json) = harness.send("POST", "/submit", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "Cannot submit from the calendar step");

    let (status, _) = harness.send("POST", "/reset", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

async fn post_intake(form: Value) -> (StatusCode, Value) {
    let app = intake_routes(state(&TestConfig::default()));
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(form.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_appointment_request_without_sign_in() {
    let (status, json) = post_intake(json!({
        "full_name": "Muhammad Hassan",
        "email": "hassan.m@email.com",
        "phone": "+92 321 2222222",
        "date_of_birth": "1985-11-02",
        "gender": "male",
        "appointment_type": "followup",
        "reason_for_visit": "Eczema flare-up on both hands",
        "emergency_contact": "+92 321 9876543",
        "emergency_relation": "Spouse",
        "consent_treatment": true,
        "consent_privacy": true,
    }))
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "Appointment request submitted successfully!");
    assert_eq!(
        json["detail"],
        "Thank you for choosing Dr. Ayesha Khan. We'll confirm your appointment within 24 hours."
    );
    assert_eq!(json["receipt"]["status"], "pending");
    assert_eq!(json["receipt"]["appointment_type"], "follow-up");
}

#[tokio::test]
async fn test_appointment_request_reports_invalid_fields() {
    let (status, json) = post_intake(json!({
        "full_name": "M",
        "email": "hassan.m",
        "consent_treatment": true,
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = json["error"].as_str().unwrap();
    assert!(error.contains("Full name must be at least 2 characters"));
    assert!(error.contains("Please enter a valid email address"));
    assert!(error.contains("Privacy policy consent is required"));
    assert!(!error.contains("Treatment consent is required"));
}
