//! Notification delivery
//!
//! The core services only know the `NotificationSender` trait; this module
//! provides the log-based sender used in development and tests. A real mail
//! relay plugs in behind the same trait.

pub mod log_sender;

pub use log_sender::LogNotificationSender;
