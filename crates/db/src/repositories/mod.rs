//! Zero-sized repositories, one per table family.
//!
//! Single-statement reads take `&PgPool`. Statements that participate in a
//! multi-row mutation take `&mut PgConnection` so callers can run them
//! inside a transaction.

pub mod application_repo;
pub mod assignment_repo;
pub mod cohort_repo;
pub mod fellowship_repo;
pub mod progress_repo;
pub mod purchase_repo;
pub mod stats_repo;
pub mod user_repo;

pub use application_repo::ApplicationRepo;
pub use assignment_repo::AssignmentRepo;
pub use cohort_repo::CohortRepo;
pub use fellowship_repo::{FellowshipInviteRepo, FellowshipMemberRepo};
pub use progress_repo::ProgressRepo;
pub use purchase_repo::PurchaseRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
