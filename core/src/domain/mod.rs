//! Domain layer containing the entities the gate reasons about.

pub mod entities;

pub use entities::*;
