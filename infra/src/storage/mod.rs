//! Durable storage for outstanding verification codes

pub mod file_store;

pub use file_store::FileVerificationStore;
