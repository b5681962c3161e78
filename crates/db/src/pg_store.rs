//! PostgreSQL adapter for [`Store`].

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use zavia_core::access::{AccessGrant, Product};
use zavia_core::cohort::ensure_capacity;
use zavia_core::curriculum::ModuleNumber;
use zavia_core::progress::CanonProgress;
use zavia_core::progression;
use zavia_core::status::SubmissionStatus;
use zavia_core::submission::ensure_reviewable;
use zavia_core::types::{DbId, Timestamp};

use crate::models::application::{ApplicationReview, GuildApplication, NewApplication};
use crate::models::assignment::{Assignment, AssignmentReview, NewAssignment, ReviewedAssignment};
use crate::models::cohort::{Cohort, NewCohort};
use crate::models::fellowship::{FellowshipInvite, FellowshipMember, NewFellowshipMember, NewInvite};
use crate::models::progress::{CompletionFlags, ModuleProgressRow};
use crate::models::purchase::{NewPurchase, Purchase};
use crate::models::stats::{AdminStats, RevenueStats};
use crate::models::user::{NewUser, User, UserCredentials};
use crate::repositories::{
    ApplicationRepo, AssignmentRepo, CohortRepo, FellowshipInviteRepo, FellowshipMemberRepo,
    ProgressRepo, PurchaseRepo, StatsRepo, UserRepo,
};
use crate::store::{Store, StoreError};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn assemble_progress(
    flags: CompletionFlags,
    rows: Vec<ModuleProgressRow>,
) -> CanonProgress {
    let mut progress = CanonProgress {
        completed: flags.canon_completed,
        qualified_for_guild: flags.qualified_for_guild,
        ..CanonProgress::default()
    };
    for row in rows {
        let index = row.module_number.index();
        progress.modules[index] = row.into();
    }
    progress
}

/// Lock the user row and its module rows and build the progress snapshot.
async fn lock_progress(
    conn: &mut PgConnection,
    user_id: DbId,
) -> Result<CanonProgress, StoreError> {
    let flags = UserRepo::lock_completion(conn, user_id)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "User",
            id: user_id,
        })?;
    let rows = ProgressRepo::list_for_user(conn, user_id, true).await?;
    Ok(assemble_progress(flags, rows))
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, input: &NewUser) -> Result<User, StoreError> {
        let mut tx = self.pool.begin().await?;
        let user = match UserRepo::create(&mut tx, input).await {
            Ok(user) => user,
            Err(sqlx::Error::Database(db)) if db.constraint() == Some("uq_users_email") => {
                return Err(StoreError::Conflict(
                    "A user with this email already exists".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };
        ProgressRepo::insert_defaults(&mut tx, user.id).await?;
        tx.commit().await?;
        Ok(user)
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError> {
        Ok(UserRepo::find_credentials(&self.pool, email).await?)
    }

    async fn load_progress(&self, user_id: DbId) -> Result<Option<CanonProgress>, StoreError> {
        let Some(flags) = UserRepo::load_completion(&self.pool, user_id).await? else {
            return Ok(None);
        };
        let mut conn = self.pool.acquire().await?;
        let rows = ProgressRepo::list_for_user(&mut conn, user_id, false).await?;
        Ok(Some(assemble_progress(flags, rows)))
    }

    async fn complete_lesson(
        &self,
        user_id: DbId,
        module: ModuleNumber,
        lesson: i32,
        at: Timestamp,
    ) -> Result<CanonProgress, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut progress = lock_progress(&mut tx, user_id).await?;
        progression::ensure_unlocked(&progress, module)?;

        ProgressRepo::add_lesson(&mut tx, user_id, module, lesson, at).await?;
        tx.commit().await?;

        progress.module_mut(module).record_lesson(lesson, at);
        Ok(progress)
    }

    async fn submit_assignment(&self, input: &NewAssignment) -> Result<Assignment, StoreError> {
        let mut tx = self.pool.begin().await?;
        let mut progress = lock_progress(&mut tx, input.user_id).await?;
        progression::record_submission(&mut progress, input.module_number)?;

        ProgressRepo::mark_submitted(&mut tx, input.user_id, input.module_number).await?;
        let assignment = AssignmentRepo::create(&mut tx, input).await?;
        tx.commit().await?;
        Ok(assignment)
    }

    async fn find_assignment(&self, id: DbId) -> Result<Option<Assignment>, StoreError> {
        Ok(AssignmentRepo::find_by_id(&self.pool, id).await?)
    }

    async fn record_review(&self, review: &AssignmentReview) -> Result<ReviewedAssignment, StoreError> {
        let mut tx = self.pool.begin().await?;

        let current = AssignmentRepo::lock(&mut tx, review.assignment_id)
            .await?
            .ok_or(StoreError::NotFound {
                entity: "Assignment",
                id: review.assignment_id,
            })?;
        ensure_reviewable(current.status)?;

        let assignment = AssignmentRepo::apply_review(&mut tx, review)
            .await?
            .ok_or_else(|| StoreError::Conflict("Assignment has already been reviewed".into()))?;

        let status = SubmissionStatus::from(review.decision);
        let mut progress = lock_progress(&mut tx, assignment.user_id).await?;
        let course_completed = progression::apply_review_outcome(
            &mut progress,
            assignment.module_number,
            status,
            &review.feedback,
        );

        ProgressRepo::write_review(
            &mut tx,
            assignment.user_id,
            assignment.module_number,
            status,
            &review.feedback,
        )
        .await?;
        if course_completed {
            UserRepo::raise_completion(
                &mut tx,
                assignment.user_id,
                CompletionFlags {
                    canon_completed: progress.completed,
                    qualified_for_guild: progress.qualified_for_guild,
                },
            )
            .await?;
        }

        tx.commit().await?;
        Ok(ReviewedAssignment {
            assignment,
            progress,
            course_completed,
        })
    }

    async fn list_pending_assignments(&self) -> Result<Vec<Assignment>, StoreError> {
        Ok(AssignmentRepo::list_pending(&self.pool).await?)
    }

    async fn list_user_assignments(&self, user_id: DbId) -> Result<Vec<Assignment>, StoreError> {
        Ok(AssignmentRepo::list_for_user(&self.pool, user_id).await?)
    }

    async fn record_purchase(&self, input: &NewPurchase) -> Result<Option<Purchase>, StoreError> {
        let mut tx = self.pool.begin().await?;
        let Some(purchase) = PurchaseRepo::create_if_new(&mut tx, input).await? else {
            return Ok(None);
        };

        let user_found = match purchase.product.grant() {
            AccessGrant::Canon => UserRepo::grant_canon(&mut tx, purchase.user_id).await?,
            AccessGrant::Fellowship => {
                let granted = UserRepo::grant_fellowship(&mut tx, purchase.user_id).await?;
                if granted {
                    FellowshipMemberRepo::create(
                        &mut tx,
                        &NewFellowshipMember::for_purchase(&purchase),
                    )
                    .await?;
                }
                granted
            }
            AccessGrant::None => true,
        };
        if !user_found {
            return Err(StoreError::NotFound {
                entity: "User",
                id: purchase.user_id,
            });
        }

        tx.commit().await?;
        Ok(Some(purchase))
    }

    async fn list_user_purchases(&self, user_id: DbId) -> Result<Vec<Purchase>, StoreError> {
        Ok(PurchaseRepo::list_for_user(&self.pool, user_id).await?)
    }

    async fn list_fellowship_members(
        &self,
        user_id: DbId,
    ) -> Result<Vec<FellowshipMember>, StoreError> {
        Ok(FellowshipMemberRepo::list_for_user(&self.pool, user_id).await?)
    }

    async fn create_invite(&self, input: &NewInvite) -> Result<FellowshipInvite, StoreError> {
        Ok(FellowshipInviteRepo::create(&self.pool, input).await?)
    }

    async fn create_cohort(&self, input: &NewCohort) -> Result<Cohort, StoreError> {
        Ok(CohortRepo::create(&self.pool, input).await?)
    }

    async fn find_cohort(&self, id: DbId) -> Result<Option<Cohort>, StoreError> {
        Ok(CohortRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_open_cohorts(&self) -> Result<Vec<Cohort>, StoreError> {
        Ok(CohortRepo::list_open(&self.pool).await?)
    }

    async fn enroll_in_cohort(
        &self,
        cohort_id: DbId,
        user_id: DbId,
        at: Timestamp,
    ) -> Result<Cohort, StoreError> {
        let mut tx = self.pool.begin().await?;

        let cohort = CohortRepo::lock(&mut tx, cohort_id)
            .await?
            .ok_or(StoreError::NotFound {
                entity: "Cohort",
                id: cohort_id,
            })?;
        if cohort.enrolled_user_ids.contains(&user_id) {
            return Ok(cohort);
        }
        ensure_capacity(cohort.enrolled_user_ids.len(), cohort.max_students)?;

        if !UserRepo::grant_guild(&mut tx, user_id, cohort_id).await? {
            return Err(StoreError::NotFound {
                entity: "User",
                id: user_id,
            });
        }
        CohortRepo::enroll(&mut tx, cohort_id, user_id, at).await?;
        let updated = CohortRepo::lock(&mut tx, cohort_id)
            .await?
            .ok_or(StoreError::NotFound {
                entity: "Cohort",
                id: cohort_id,
            })?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn create_application(
        &self,
        input: &NewApplication,
    ) -> Result<GuildApplication, StoreError> {
        Ok(ApplicationRepo::create(&self.pool, input).await?)
    }

    async fn list_pending_applications(&self) -> Result<Vec<GuildApplication>, StoreError> {
        Ok(ApplicationRepo::list_pending(&self.pool).await?)
    }

    async fn review_application(
        &self,
        review: &ApplicationReview,
    ) -> Result<GuildApplication, StoreError> {
        if let Some(application) = ApplicationRepo::apply_review(&self.pool, review).await? {
            return Ok(application);
        }
        match ApplicationRepo::find_by_id(&self.pool, review.application_id).await? {
            Some(existing) => Err(StoreError::Conflict(format!(
                "Application has already been reviewed with status '{}'",
                existing.status
            ))),
            None => Err(StoreError::NotFound {
                entity: "GuildApplication",
                id: review.application_id,
            }),
        }
    }

    async fn stats(&self, month_start: Timestamp) -> Result<AdminStats, StoreError> {
        let users = StatsRepo::user_counts(&self.pool).await?;
        let pending_assignments = StatsRepo::pending_assignments(&self.pool).await?;
        let pending_applications = StatsRepo::pending_applications(&self.pool).await?;

        let mut revenue = RevenueStats::empty();
        for (product, cents) in PurchaseRepo::revenue_by_product(&self.pool).await? {
            let product = product.parse::<Product>()?;
            revenue.by_product.insert(product, cents);
            revenue.total_cents += cents;
        }
        revenue.this_month_cents = PurchaseRepo::revenue_since(&self.pool, month_start).await?;

        Ok(AdminStats {
            total_users: users.total_users,
            canon_users: users.canon_users,
            guild_users: users.guild_users,
            fellowship_users: users.fellowship_users,
            pending_assignments,
            pending_applications,
            revenue,
        })
    }
}
