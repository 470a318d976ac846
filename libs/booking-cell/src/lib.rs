pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use error::{BookingError, SubmissionError};
pub use models::*;
pub use router::{booking_routes, intake_routes, BookingState};
