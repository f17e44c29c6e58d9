//! Domain entities representing core business objects.

pub mod calendar_event;
pub mod verification_record;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use calendar_event::{CalendarEvent, EventQuery};
pub use verification_record::{
    VerificationRecord, VerificationSnapshot, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES,
};
