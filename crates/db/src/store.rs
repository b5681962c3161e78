//! The persistence port used by the workflow engine.
//!
//! Every method that changes more than one row is atomic in each adapter:
//! [`crate::pg_store::PgStore`] wraps it in a transaction and
//! [`crate::memory::MemoryStore`] holds its lock across the whole mutation.
//! Rule checks that depend on current state (locks, eligibility, review
//! once, cohort capacity) are re-run inside that atomic section.

use async_trait::async_trait;
use zavia_core::curriculum::ModuleNumber;
use zavia_core::error::CoreError;
use zavia_core::progress::CanonProgress;
use zavia_core::types::{DbId, Timestamp};

use crate::models::application::{ApplicationReview, GuildApplication, NewApplication};
use crate::models::assignment::{Assignment, AssignmentReview, NewAssignment, ReviewedAssignment};
use crate::models::cohort::{Cohort, NewCohort};
use crate::models::fellowship::{FellowshipInvite, FellowshipMember, NewInvite};
use crate::models::purchase::{NewPurchase, Purchase};
use crate::models::stats::AdminStats;
use crate::models::user::{NewUser, User, UserCredentials};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("{0}")]
    Conflict(String),

    /// A domain rule rejected the mutation after re-reading current state.
    #[error(transparent)]
    Rule(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap round-trip used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    // Accounts

    /// Create a user with default progress. `Conflict` on duplicate email.
    async fn create_user(&self, input: &NewUser) -> Result<User, StoreError>;

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError>;

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError>;

    // Progression

    async fn load_progress(&self, user_id: DbId) -> Result<Option<CanonProgress>, StoreError>;

    /// Add `lesson` to the module's completed set and set `started` if unset.
    ///
    /// Rejects a locked module. Idempotent for an already-completed lesson.
    async fn complete_lesson(
        &self,
        user_id: DbId,
        module: ModuleNumber,
        lesson: i32,
        at: Timestamp,
    ) -> Result<CanonProgress, StoreError>;

    // Assignments

    /// Insert a pending assignment and flip the module's submitted flag,
    /// after re-checking submission eligibility.
    async fn submit_assignment(&self, input: &NewAssignment) -> Result<Assignment, StoreError>;

    async fn find_assignment(&self, id: DbId) -> Result<Option<Assignment>, StoreError>;

    /// Write a terminal review onto the assignment and the owner's module
    /// progress and run the completion cascade. `Conflict` unless pending.
    async fn record_review(&self, review: &AssignmentReview) -> Result<ReviewedAssignment, StoreError>;

    /// Pending assignments, oldest submission first.
    async fn list_pending_assignments(&self) -> Result<Vec<Assignment>, StoreError>;

    /// A user's assignments, newest first.
    async fn list_user_assignments(&self, user_id: DbId) -> Result<Vec<Assignment>, StoreError>;

    // Access and payments

    /// Append a completed purchase and apply the product's access grant in
    /// the same atomic section. A failed grant leaves no ledger row behind,
    /// so a redelivered event runs the whole step again.
    ///
    /// Returns `None` if the processor session was already recorded.
    async fn record_purchase(&self, input: &NewPurchase) -> Result<Option<Purchase>, StoreError>;

    /// A user's purchases, newest first.
    async fn list_user_purchases(&self, user_id: DbId) -> Result<Vec<Purchase>, StoreError>;

    /// Membership records for a user, oldest first.
    async fn list_fellowship_members(
        &self,
        user_id: DbId,
    ) -> Result<Vec<FellowshipMember>, StoreError>;

    async fn create_invite(&self, input: &NewInvite) -> Result<FellowshipInvite, StoreError>;

    // Guild

    async fn create_cohort(&self, input: &NewCohort) -> Result<Cohort, StoreError>;

    async fn find_cohort(&self, id: DbId) -> Result<Option<Cohort>, StoreError>;

    /// Upcoming and active cohorts by start date.
    async fn list_open_cohorts(&self) -> Result<Vec<Cohort>, StoreError>;

    /// Enroll `user_id` and grant guild access with the cohort id.
    ///
    /// `Conflict` when full; a no-op for an already-enrolled user.
    async fn enroll_in_cohort(
        &self,
        cohort_id: DbId,
        user_id: DbId,
        at: Timestamp,
    ) -> Result<Cohort, StoreError>;

    async fn create_application(&self, input: &NewApplication)
        -> Result<GuildApplication, StoreError>;

    /// Pending applications, oldest submission first.
    async fn list_pending_applications(&self) -> Result<Vec<GuildApplication>, StoreError>;

    /// Resolve a pending application. `Conflict` unless pending.
    async fn review_application(
        &self,
        review: &ApplicationReview,
    ) -> Result<GuildApplication, StoreError>;

    // Admin

    /// Dashboard counts. `month_start` bounds the "this month" revenue.
    async fn stats(&self, month_start: Timestamp) -> Result<AdminStats, StoreError>;
}
