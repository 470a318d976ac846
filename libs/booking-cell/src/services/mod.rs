pub mod calendar;
pub mod flow;
pub mod intake;
pub mod sessions;
pub mod submission;

pub use calendar::SlotSelector;
pub use flow::BookingFlow;
pub use intake::validate_intake;
pub use sessions::SessionStore;
pub use submission::{AppointmentSubmitter, RetryPolicy, RetryingSubmitter, SimulatedSubmitter};
