//! In-process adapter for [`Store`].
//!
//! Holds every table in one `tokio::sync::Mutex`, so each trait method is
//! atomic. Used by the `zavia-api` integration tests and for local runs
//! without PostgreSQL.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use zavia_core::access::AccessGrant;
use zavia_core::cohort::ensure_capacity;
use zavia_core::curriculum::ModuleNumber;
use zavia_core::progress::CanonProgress;
use zavia_core::progression;
use zavia_core::status::{
    ApplicationStatus, InviteStatus, MembershipStatus, PurchaseStatus, SubmissionStatus,
};
use zavia_core::submission::ensure_reviewable;
use zavia_core::types::{DbId, Timestamp};

use crate::models::application::{ApplicationReview, GuildApplication, NewApplication};
use crate::models::assignment::{Assignment, AssignmentReview, NewAssignment, ReviewedAssignment};
use crate::models::cohort::{Cohort, NewCohort};
use crate::models::fellowship::{FellowshipInvite, FellowshipMember, NewFellowshipMember, NewInvite};
use crate::models::purchase::{NewPurchase, Purchase};
use crate::models::stats::{AdminStats, RevenueStats};
use crate::models::user::{NewUser, User, UserCredentials};
use crate::store::{Store, StoreError};

struct UserRecord {
    user: User,
    password_hash: String,
    progress: CanonProgress,
}

#[derive(Default)]
struct State {
    last_id: DbId,
    users: BTreeMap<DbId, UserRecord>,
    assignments: BTreeMap<DbId, Assignment>,
    purchases: Vec<Purchase>,
    members: Vec<FellowshipMember>,
    invites: Vec<FellowshipInvite>,
    cohorts: BTreeMap<DbId, Cohort>,
    applications: BTreeMap<DbId, GuildApplication>,
}

impl State {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    fn user_mut(&mut self, id: DbId) -> Result<&mut UserRecord, StoreError> {
        self.users
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity: "User", id })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create_user(&self, input: &NewUser) -> Result<User, StoreError> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|r| r.user.email == input.email) {
            return Err(StoreError::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: state.next_id(),
            email: input.email.clone(),
            name: input.name.clone(),
            canon_access: false,
            guild_access: false,
            fellowship_access: false,
            guild_cohort_id: None,
            is_admin: input.is_admin,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(
            user.id,
            UserRecord {
                user: user.clone(),
                password_hash: input.password_hash.clone(),
                progress: CanonProgress::default(),
            },
        );
        Ok(user)
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.users.get(&id).map(|r| r.user.clone()))
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .users
            .values()
            .find(|r| r.user.email == email)
            .map(|r| UserCredentials {
                id: r.user.id,
                password_hash: r.password_hash.clone(),
            }))
    }

    async fn load_progress(&self, user_id: DbId) -> Result<Option<CanonProgress>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.users.get(&user_id).map(|r| r.progress.clone()))
    }

    async fn complete_lesson(
        &self,
        user_id: DbId,
        module: ModuleNumber,
        lesson: i32,
        at: Timestamp,
    ) -> Result<CanonProgress, StoreError> {
        let mut state = self.state.lock().await;
        let record = state.user_mut(user_id)?;
        progression::ensure_unlocked(&record.progress, module)?;
        record.progress.module_mut(module).record_lesson(lesson, at);
        Ok(record.progress.clone())
    }

    async fn submit_assignment(&self, input: &NewAssignment) -> Result<Assignment, StoreError> {
        let mut state = self.state.lock().await;
        let record = state.user_mut(input.user_id)?;
        progression::record_submission(&mut record.progress, input.module_number)?;

        let assignment = Assignment {
            id: state.next_id(),
            user_id: input.user_id,
            module_number: input.module_number,
            content: input.content.clone(),
            status: SubmissionStatus::Pending,
            submitted_at: input.submitted_at,
            reviewed_at: None,
            reviewed_by: None,
            feedback: None,
        };
        state.assignments.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    async fn find_assignment(&self, id: DbId) -> Result<Option<Assignment>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.assignments.get(&id).cloned())
    }

    async fn record_review(&self, review: &AssignmentReview) -> Result<ReviewedAssignment, StoreError> {
        let mut state = self.state.lock().await;

        let current = state
            .assignments
            .get(&review.assignment_id)
            .ok_or(StoreError::NotFound {
                entity: "Assignment",
                id: review.assignment_id,
            })?;
        ensure_reviewable(current.status)?;
        let owner = current.user_id;
        let module = current.module_number;

        let status = SubmissionStatus::from(review.decision);
        let record = state.user_mut(owner)?;
        let course_completed =
            progression::apply_review_outcome(&mut record.progress, module, status, &review.feedback);
        let progress = record.progress.clone();

        let assignment = state
            .assignments
            .get_mut(&review.assignment_id)
            .ok_or(StoreError::NotFound {
                entity: "Assignment",
                id: review.assignment_id,
            })?;
        assignment.status = status;
        assignment.feedback = Some(review.feedback.clone());
        assignment.reviewed_by = Some(review.reviewer_id);
        assignment.reviewed_at = Some(review.reviewed_at);

        Ok(ReviewedAssignment {
            assignment: assignment.clone(),
            progress,
            course_completed,
        })
    }

    async fn list_pending_assignments(&self) -> Result<Vec<Assignment>, StoreError> {
        let state = self.state.lock().await;
        let mut pending: Vec<Assignment> = state
            .assignments
            .values()
            .filter(|a| a.status == SubmissionStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by_key(|a| (a.submitted_at, a.id));
        Ok(pending)
    }

    async fn list_user_assignments(&self, user_id: DbId) -> Result<Vec<Assignment>, StoreError> {
        let state = self.state.lock().await;
        let mut mine: Vec<Assignment> = state
            .assignments
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by_key(|a| std::cmp::Reverse((a.submitted_at, a.id)));
        Ok(mine)
    }

    async fn record_purchase(&self, input: &NewPurchase) -> Result<Option<Purchase>, StoreError> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&input.user_id) {
            return Err(StoreError::NotFound {
                entity: "User",
                id: input.user_id,
            });
        }
        if state
            .purchases
            .iter()
            .any(|p| p.processor_session_id == input.processor_session_id)
        {
            return Ok(None);
        }

        let purchase = Purchase {
            id: state.next_id(),
            user_id: input.user_id,
            product: input.product,
            amount_cents: input.amount_cents,
            currency: input.currency.clone(),
            processor_payment_id: input.processor_payment_id.clone(),
            processor_session_id: input.processor_session_id.clone(),
            status: PurchaseStatus::Completed,
            created_at: input.created_at,
        };

        match purchase.product.grant() {
            AccessGrant::Canon => {
                let record = state.user_mut(purchase.user_id)?;
                record.user.canon_access = true;
                record.user.updated_at = Utc::now();
            }
            AccessGrant::Fellowship => {
                let record = state.user_mut(purchase.user_id)?;
                record.user.fellowship_access = true;
                record.user.updated_at = Utc::now();

                let term = NewFellowshipMember::for_purchase(&purchase);
                let member = FellowshipMember {
                    id: state.next_id(),
                    user_id: term.user_id,
                    status: MembershipStatus::Active,
                    yearly_fee_cents: term.yearly_fee_cents,
                    joined_at: term.paid_at,
                    last_payment_at: term.paid_at,
                    next_payment_at: term.next_payment_at,
                };
                state.members.push(member);
            }
            AccessGrant::None => {}
        }

        state.purchases.push(purchase.clone());
        Ok(Some(purchase))
    }

    async fn list_user_purchases(&self, user_id: DbId) -> Result<Vec<Purchase>, StoreError> {
        let state = self.state.lock().await;
        let mut mine: Vec<Purchase> = state
            .purchases
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by_key(|p| std::cmp::Reverse((p.created_at, p.id)));
        Ok(mine)
    }

    async fn list_fellowship_members(
        &self,
        user_id: DbId,
    ) -> Result<Vec<FellowshipMember>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .members
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_invite(&self, input: &NewInvite) -> Result<FellowshipInvite, StoreError> {
        let mut state = self.state.lock().await;
        if state.invites.iter().any(|i| i.token == input.token) {
            return Err(StoreError::Conflict("Invite token already exists".to_string()));
        }
        let invite = FellowshipInvite {
            id: state.next_id(),
            email: input.email.clone(),
            token: input.token.clone(),
            invited_by: input.invited_by,
            status: InviteStatus::Pending,
            created_at: input.created_at,
            expires_at: input.expires_at,
        };
        state.invites.push(invite.clone());
        Ok(invite)
    }

    async fn create_cohort(&self, input: &NewCohort) -> Result<Cohort, StoreError> {
        let mut state = self.state.lock().await;
        let cohort = Cohort {
            id: state.next_id(),
            name: input.name.clone(),
            start_date: input.start_date,
            end_date: input.end_date,
            max_students: input.max_students,
            status: input.status,
            price_cents: input.price_cents,
            created_at: input.created_at,
            enrolled_user_ids: Vec::new(),
        };
        state.cohorts.insert(cohort.id, cohort.clone());
        Ok(cohort)
    }

    async fn find_cohort(&self, id: DbId) -> Result<Option<Cohort>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.cohorts.get(&id).cloned())
    }

    async fn list_open_cohorts(&self) -> Result<Vec<Cohort>, StoreError> {
        let state = self.state.lock().await;
        let mut open: Vec<Cohort> = state
            .cohorts
            .values()
            .filter(|c| c.status.is_open())
            .cloned()
            .collect();
        open.sort_by_key(|c| (c.start_date, c.id));
        Ok(open)
    }

    async fn enroll_in_cohort(
        &self,
        cohort_id: DbId,
        user_id: DbId,
        _at: Timestamp,
    ) -> Result<Cohort, StoreError> {
        let mut state = self.state.lock().await;

        let cohort = state.cohorts.get(&cohort_id).ok_or(StoreError::NotFound {
            entity: "Cohort",
            id: cohort_id,
        })?;
        if cohort.enrolled_user_ids.contains(&user_id) {
            return Ok(cohort.clone());
        }
        ensure_capacity(cohort.enrolled_user_ids.len(), cohort.max_students)?;

        let record = state.user_mut(user_id)?;
        record.user.guild_access = true;
        record.user.guild_cohort_id = Some(cohort_id);
        record.user.updated_at = Utc::now();

        let cohort = state
            .cohorts
            .get_mut(&cohort_id)
            .ok_or(StoreError::NotFound {
                entity: "Cohort",
                id: cohort_id,
            })?;
        cohort.enrolled_user_ids.push(user_id);
        Ok(cohort.clone())
    }

    async fn create_application(
        &self,
        input: &NewApplication,
    ) -> Result<GuildApplication, StoreError> {
        let mut state = self.state.lock().await;
        if let Some(cohort_id) = input.cohort_id {
            if !state.cohorts.contains_key(&cohort_id) {
                return Err(StoreError::NotFound {
                    entity: "Cohort",
                    id: cohort_id,
                });
            }
        }
        let application = GuildApplication {
            id: state.next_id(),
            user_id: input.user_id,
            cohort_id: input.cohort_id,
            strategic_doctrine: input.strategic_doctrine.clone(),
            why_guild: input.why_guild.clone(),
            commitment: input.commitment.clone(),
            status: ApplicationStatus::Pending,
            submitted_at: input.submitted_at,
            reviewed_at: None,
            reviewed_by: None,
            review_notes: None,
        };
        state.applications.insert(application.id, application.clone());
        Ok(application)
    }

    async fn list_pending_applications(&self) -> Result<Vec<GuildApplication>, StoreError> {
        let state = self.state.lock().await;
        let mut pending: Vec<GuildApplication> = state
            .applications
            .values()
            .filter(|a| a.status == ApplicationStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by_key(|a| (a.submitted_at, a.id));
        Ok(pending)
    }

    async fn review_application(
        &self,
        review: &ApplicationReview,
    ) -> Result<GuildApplication, StoreError> {
        let mut state = self.state.lock().await;
        let application = state
            .applications
            .get_mut(&review.application_id)
            .ok_or(StoreError::NotFound {
                entity: "GuildApplication",
                id: review.application_id,
            })?;
        if application.status != ApplicationStatus::Pending {
            return Err(StoreError::Conflict(format!(
                "Application has already been reviewed with status '{}'",
                application.status
            )));
        }
        application.status = review.decision.into();
        application.review_notes = review.notes.clone();
        application.reviewed_by = Some(review.reviewer_id);
        application.reviewed_at = Some(review.reviewed_at);
        Ok(application.clone())
    }

    async fn stats(&self, month_start: Timestamp) -> Result<AdminStats, StoreError> {
        let state = self.state.lock().await;
        let users: Vec<&User> = state.users.values().map(|r| &r.user).collect();

        let mut revenue = RevenueStats::empty();
        for purchase in state
            .purchases
            .iter()
            .filter(|p| p.status == PurchaseStatus::Completed)
        {
            revenue.total_cents += purchase.amount_cents;
            *revenue.by_product.entry(purchase.product).or_insert(0) += purchase.amount_cents;
            if purchase.created_at >= month_start {
                revenue.this_month_cents += purchase.amount_cents;
            }
        }

        Ok(AdminStats {
            total_users: users.len() as i64,
            canon_users: users.iter().filter(|u| u.canon_access).count() as i64,
            guild_users: users.iter().filter(|u| u.guild_access).count() as i64,
            fellowship_users: users.iter().filter(|u| u.fellowship_access).count() as i64,
            pending_assignments: state
                .assignments
                .values()
                .filter(|a| a.status == SubmissionStatus::Pending)
                .count() as i64,
            pending_applications: state
                .applications
                .values()
                .filter(|a| a.status == ApplicationStatus::Pending)
                .count() as i64,
            revenue,
        })
    }
}
