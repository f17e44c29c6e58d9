//! Tool surface exposed to the conversational agent
//!
//! Wraps the verification service and the mutation gate in operations that
//! always answer with a descriptive outcome the agent can relay verbatim.

mod tools;


pub use tools::{AppointmentSummary, AppointmentTools, VerificationReply};
