//! Business services containing domain logic and use cases.

pub mod assistant;
pub mod clock;
pub mod code_generator;
pub mod gate;
pub mod verification;

// Re-export commonly used types
pub use assistant::{AppointmentSummary, AppointmentTools, VerificationReply};
pub use clock::{Clock, ManualClock, SystemClock};
pub use code_generator::{CodeGenerator, RandomCodeGenerator};
pub use gate::{
    AppointmentRequest, CalendarBackend, GateConfig, ModifyOutcome, ModifyRequest, MutationGate,
};
pub use verification::{
    Commit, IssuedCode, MemoryVerificationStore, NotificationSender, VerificationService,
    VerificationServiceConfig, VerificationStore, VerifyOutcome,
};
