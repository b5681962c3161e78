pub mod application;
pub mod assignment;
pub mod cohort;
pub mod fellowship;
pub mod progress;
pub mod purchase;
pub mod stats;
pub mod user;
