use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use appointment_cell::models::AppointmentStatus;
use shared_config::AppConfig;

use crate::error::SubmissionError;
use crate::models::{BookingConfirmation, BookingRequest, IntakeReceipt, IntakeRequest};

#[async_trait]
pub trait AppointmentSubmitter: Send + Sync {
    async fn submit(&self, request: &BookingRequest) -> Result<BookingConfirmation, SubmissionError>;

    /// Files a public appointment request for the practice to confirm later.
    async fn submit_intake(&self, intake: &IntakeRequest) -> Result<IntakeReceipt, SubmissionError>;
}

fn short_reference(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, id[..8].to_uppercase())
}

pub fn confirmation_for(request: &BookingRequest) -> BookingConfirmation {
    BookingConfirmation {
        reference: short_reference("BK"),
        slot: request.slot.clone(),
        appointment_type: request.appointment_type,
        appointment_type_label: request.appointment_type.label().to_string(),
        urgency: request.details.urgency,
        status: AppointmentStatus::Confirmed,
        confirmed_at: Utc::now(),
    }
}

pub fn receipt_for(intake: &IntakeRequest) -> IntakeReceipt {
    IntakeReceipt {
        reference: short_reference("REQ"),
        full_name: intake.full_name.clone(),
        email: intake.email.clone(),
        appointment_type: intake.appointment_type,
        appointment_type_label: intake.appointment_type.label().to_string(),
        status: AppointmentStatus::Pending,
        submitted_at: Utc::now(),
    }
}

/// Stand-in for a booking backend: waits, then always confirms.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Duration::from_millis(config.booking_submit_delay_ms))
    }
}

#[async_trait]
impl AppointmentSubmitter for SimulatedSubmitter {
    async fn submit(&self, request: &BookingRequest) -> Result<BookingConfirmation, SubmissionError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let confirmation = confirmation_for(request);
        info!(
            "Booked slot {} for patient {} ({})",
            request.slot.id, request.patient_id, confirmation.reference
        );
        Ok(confirmation)
    }

    async fn submit_intake(&self, intake: &IntakeRequest) -> Result<IntakeReceipt, SubmissionError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let receipt = receipt_for(intake);
        info!(
            "Appointment request {} received for {}",
            receipt.reference, intake.appointment_type
        );
        Ok(receipt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_millis(2000),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_retries: config.booking_submit_max_retries,
            base_delay: Duration::from_millis(config.booking_retry_base_delay_ms),
            max_delay: Duration::from_millis(config.booking_retry_max_delay_ms),
        }
    }

    /// Wait before retry number `retry` (0-based): base * 2^retry, capped.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Retries transient failures of the wrapped submitter with exponential backoff.
#[derive(Clone)]
pub struct RetryingSubmitter {
    inner: Arc<dyn AppointmentSubmitter>,
    policy: RetryPolicy,
}

impl RetryingSubmitter {
    pub fn new(inner: Arc<dyn AppointmentSubmitter>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    async fn with_retries<T, F, Fut>(&self, what: &str, mut attempt: F) -> Result<T, SubmissionError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SubmissionError>>,
    {
        let mut retry = 0;

        loop {
            match attempt().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && retry < self.policy.max_retries => {
                    let delay = self.policy.delay_for(retry);
                    warn!(
                        "{} failed ({}), retry {}/{} in {:?}",
                        what,
                        err,
                        retry + 1,
                        self.policy.max_retries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    retry += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[async_trait]
impl AppointmentSubmitter for RetryingSubmitter {
    async fn submit(&self, request: &BookingRequest) -> Result<BookingConfirmation, SubmissionError> {
        let what = format!("Booking slot {}", request.slot.id);
        self.with_retries(&what, || self.inner.submit(request)).await
    }

    async fn submit_intake(&self, intake: &IntakeRequest) -> Result<IntakeReceipt, SubmissionError> {
        self.with_retries("Appointment request", || self.inner.submit_intake(intake))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_then_caps() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_for(0), Duration::from_millis(250));
        assert_eq!(policy.delay_for(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for(2), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(10), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(40), Duration::from_millis(2000));
    }
}
