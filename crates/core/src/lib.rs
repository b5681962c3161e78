//! Zavia Academy domain core.
//!
//! Pure, I/O-free building blocks shared by the persistence and HTTP layers:
//! identifier and timestamp aliases, the [`error::CoreError`] taxonomy, the
//! Canon curriculum, validation utilities, the module progression state
//! machine, assignment submission/review rules, and the payment-to-access
//! mapping.

#[macro_use]
mod macros;

pub mod access;
pub mod cohort;
pub mod curriculum;
pub mod error;
pub mod progress;
pub mod progression;
pub mod status;
pub mod submission;
pub mod types;
pub mod validation;
