//! Mutation gate guarding calendar changes
//!
//! Every create, modify and cancel request must carry a verified flag
//! produced by the verification service. Modify and cancel additionally
//! require the acting email to own the target event.

mod config;
mod schedule;
mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::GateConfig;
pub use service::MutationGate;
pub use traits::CalendarBackend;
pub use types::{AppointmentRequest, ModifyOutcome, ModifyRequest};
