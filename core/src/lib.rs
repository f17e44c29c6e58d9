//! # Appointment Gate Core
//!
//! Core business logic for the appointment assistant's identity-verification gate.
//! This crate contains the domain entities, the verification and mutation-gate
//! services, the collaborator traits they depend on, and the domain error types.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
