//! A [`Store`] that fails its first purchase writes and delegates the rest.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use zavia_core::curriculum::ModuleNumber;
use zavia_core::progress::CanonProgress;
use zavia_core::types::{DbId, Timestamp};
use zavia_db::models::application::{ApplicationReview, GuildApplication, NewApplication};
use zavia_db::models::assignment::{Assignment, AssignmentReview, NewAssignment, ReviewedAssignment};
use zavia_db::models::cohort::{Cohort, NewCohort};
use zavia_db::models::fellowship::{FellowshipInvite, FellowshipMember, NewInvite};
use zavia_db::models::purchase::{NewPurchase, Purchase};
use zavia_db::models::stats::AdminStats;
use zavia_db::models::user::{NewUser, User, UserCredentials};
use zavia_db::{MemoryStore, Store, StoreError};

pub struct FailingPurchaseStore {
    inner: Arc<MemoryStore>,
    failures_left: AtomicUsize,
}

impl FailingPurchaseStore {
    pub fn new(inner: Arc<MemoryStore>, failures: usize) -> Self {
        Self {
            inner,
            failures_left: AtomicUsize::new(failures),
        }
    }
}

#[async_trait]
impl Store for FailingPurchaseStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }

    async fn create_user(&self, input: &NewUser) -> Result<User, StoreError> {
        self.inner.create_user(input).await
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        self.inner.find_user(id).await
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError> {
        self.inner.find_credentials(email).await
    }

    async fn load_progress(&self, user_id: DbId) -> Result<Option<CanonProgress>, StoreError> {
        self.inner.load_progress(user_id).await
    }

    async fn complete_lesson(
        &self,
        user_id: DbId,
        module: ModuleNumber,
        lesson: i32,
        at: Timestamp,
    ) -> Result<CanonProgress, StoreError> {
        self.inner.complete_lesson(user_id, module, lesson, at).await
    }

    async fn submit_assignment(&self, input: &NewAssignment) -> Result<Assignment, StoreError> {
        self.inner.submit_assignment(input).await
    }

    async fn find_assignment(&self, id: DbId) -> Result<Option<Assignment>, StoreError> {
        self.inner.find_assignment(id).await
    }

    async fn record_review(&self, review: &AssignmentReview) -> Result<ReviewedAssignment, StoreError> {
        self.inner.record_review(review).await
    }

    async fn list_pending_assignments(&self) -> Result<Vec<Assignment>, StoreError> {
        self.inner.list_pending_assignments().await
    }

    async fn list_user_assignments(&self, user_id: DbId) -> Result<Vec<Assignment>, StoreError> {
        self.inner.list_user_assignments(user_id).await
    }

    async fn record_purchase(&self, input: &NewPurchase) -> Result<Option<Purchase>, StoreError> {
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner.record_purchase(input).await
    }

    async fn list_user_purchases(&self, user_id: DbId) -> Result<Vec<Purchase>, StoreError> {
        self.inner.list_user_purchases(user_id).await
    }

    async fn list_fellowship_members(
        &self,
        user_id: DbId,
    ) -> Result<Vec<FellowshipMember>, StoreError> {
        self.inner.list_fellowship_members(user_id).await
    }

    async fn create_invite(&self, input: &NewInvite) -> Result<FellowshipInvite, StoreError> {
        self.inner.create_invite(input).await
    }

    async fn create_cohort(&self, input: &NewCohort) -> Result<Cohort, StoreError> {
        self.inner.create_cohort(input).await
    }

    async fn find_cohort(&self, id: DbId) -> Result<Option<Cohort>, StoreError> {
        self.inner.find_cohort(id).await
    }

    async fn list_open_cohorts(&self) -> Result<Vec<Cohort>, StoreError> {
        self.inner.list_open_cohorts().await
    }

    async fn enroll_in_cohort(
        &self,
        cohort_id: DbId,
        user_id: DbId,
        at: Timestamp,
    ) -> Result<Cohort, StoreError> {
        self.inner.enroll_in_cohort(cohort_id, user_id, at).await
    }

    async fn create_application(
        &self,
        input: &NewApplication,
    ) -> Result<GuildApplication, StoreError> {
        self.inner.create_application(input).await
    }

    async fn list_pending_applications(&self) -> Result<Vec<GuildApplication>, StoreError> {
        self.inner.list_pending_applications().await
    }

    async fn review_application(
        &self,
        review: &ApplicationReview,
    ) -> Result<GuildApplication, StoreError> {
        self.inner.review_application(review).await
    }

    async fn stats(&self, month_start: Timestamp) -> Result<AdminStats, StoreError> {
        self.inner.stats(month_start).await
    }
}
