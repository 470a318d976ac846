use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::{debug, error, instrument};

use doctor_cell::services::SlotGenerator;

use crate::error::{BookingError, SubmissionError};
use crate::models::{BookingConfirmation, BookingView};
use crate::services::flow::BookingFlow;
use crate::services::submission::AppointmentSubmitter;

pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

struct Session {
    flow: BookingFlow,
    last_seen: Instant,
}

type Sessions = RwLock<HashMap<String, Session>>;

/// In-memory booking flows keyed by signed-in user id. Lost on restart.
///
/// Flows untouched for longer than the idle timeout are dropped on the next
/// access to the store, unless a submission is still running for them.
pub struct SessionStore {
    doctor_id: String,
    generator: SlotGenerator,
    idle_timeout: Duration,
    flows: Arc<Sessions>,
}

impl SessionStore {
    pub fn new(doctor_id: &str, generator: SlotGenerator) -> Self {
        Self {
            doctor_id: doctor_id.to_string(),
            generator,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            flows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn doctor_id(&self) -> &str {
        &self.doctor_id
    }

    /// Runs `action` against the user's flow, starting a fresh one if needed.
    /// A calendar left open on an earlier day is moved onto `today` first.
    pub async fn with_flow<T>(
        &self,
        user_id: &str,
        today: NaiveDate,
        action: impl FnOnce(&mut BookingFlow) -> T,
    ) -> T {
        let mut flows = self.flows.write().await;
        self.evict_idle(&mut flows);

        let session = flows.entry(user_id.to_string()).or_insert_with(|| {
            debug!("Starting booking session for user {}", user_id);
            Session {
                flow: BookingFlow::new(user_id, &self.doctor_id, today, self.generator.clone()),
                last_seen: Instant::now(),
            }
        });
        session.last_seen = Instant::now();
        session.flow.roll_forward(today);

        action(&mut session.flow)
    }

    fn evict_idle(&self, flows: &mut HashMap<String, Session>) {
        flows.retain(|user_id, session| {
            let keep = session.flow.is_submitting() || session.last_seen.elapsed() < self.idle_timeout;
            if !keep {
                debug!("Dropping idle booking session for user {}", user_id);
            }
            keep
        });
    }

    pub async fn view(&self, user_id: &str, today: NaiveDate) -> BookingView {
        self.with_flow(user_id, today, |flow| flow.view(today)).await
    }

    /// Submits the user's booking without holding the lock while the
    /// submitter works. A concurrent submit sees the flow as submitting.
    ///
    /// The submitter call runs on its own task, so the outcome lands in the
    /// flow even when the caller stops waiting for it.
    #[instrument(skip(self, submitter))]
    pub async fn submit(
        &self,
        user_id: &str,
        today: NaiveDate,
        submitter: Arc<dyn AppointmentSubmitter>,
    ) -> Result<BookingConfirmation, BookingError> {
        let request = self
            .with_flow(user_id, today, |flow| flow.begin_submission())
            .await?;

        let flows = Arc::clone(&self.flows);
        let owner = user_id.to_string();
        let task = tokio::spawn(async move {
            let outcome = submitter.submit(&request).await;
            finish_submission(&flows, &owner, outcome).await
        });

        match task.await {
            Ok(result) => result,
            Err(err) => {
                error!("Booking submission task for user {} failed: {}", user_id, err);
                let outcome = Err(SubmissionError::Transient(err.to_string()));
                finish_submission(&self.flows, user_id, outcome).await
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.flows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

async fn finish_submission(
    flows: &Sessions,
    user_id: &str,
    outcome: Result<BookingConfirmation, SubmissionError>,
) -> Result<BookingConfirmation, BookingError> {
    let mut flows = flows.write().await;
    match flows.get_mut(user_id) {
        Some(session) => {
            session.last_seen = Instant::now();
            session.flow.complete_submission(outcome)
        }
        None => outcome.map_err(BookingError::from),
    }
}
