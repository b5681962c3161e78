//! Guild cohorts, manual enrollment, and applications.

use zavia_core::cohort::validate_cohort_window;
use zavia_core::error::CoreError;
use zavia_core::status::{ApplicationDecision, CohortStatus};
use zavia_core::submission::{
    validate_required_text, MAX_APPLICATION_RESPONSE_LENGTH, MAX_REVIEW_NOTES_LENGTH,
};
use zavia_core::types::{DbId, Timestamp};
use zavia_db::models::application::{ApplicationReview, GuildApplication, NewApplication};
use zavia_db::models::cohort::{Cohort, NewCohort};
use zavia_db::Store;

use crate::error::AppResult;

pub struct CohortInput {
    pub name: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub max_students: i32,
    pub status: Option<String>,
    pub price_cents: i64,
}

pub struct ApplicationInput {
    pub cohort_id: Option<DbId>,
    pub strategic_doctrine: String,
    pub why_guild: String,
    pub commitment: String,
}

pub async fn create_cohort(
    store: &dyn Store,
    admin_id: DbId,
    input: CohortInput,
    now: Timestamp,
) -> AppResult<Cohort> {
    super::require_admin(store, admin_id).await?;
    let name = validate_required_text("Cohort name", &input.name, 200)?.to_string();
    validate_cohort_window(input.start_date, input.end_date, input.max_students)?;
    let status = match input.status.as_deref() {
        Some(text) => text.parse::<CohortStatus>()?,
        None => CohortStatus::Upcoming,
    };
    if input.price_cents < 0 {
        return Err(CoreError::Validation("Cohort price cannot be negative".into()).into());
    }

    let cohort = store
        .create_cohort(&NewCohort {
            name,
            start_date: input.start_date,
            end_date: input.end_date,
            max_students: input.max_students,
            status,
            price_cents: input.price_cents,
            created_at: now,
        })
        .await?;
    tracing::info!(cohort_id = cohort.id, admin_id, "Cohort created");
    Ok(cohort)
}

pub async fn list_open_cohorts(store: &dyn Store) -> AppResult<Vec<Cohort>> {
    Ok(store.list_open_cohorts().await?)
}

/// Enroll a user and grant guild access. This is the only guild grant path.
pub async fn enroll(
    store: &dyn Store,
    admin_id: DbId,
    cohort_id: DbId,
    user_id: DbId,
    now: Timestamp,
) -> AppResult<Cohort> {
    super::require_admin(store, admin_id).await?;
    super::require_user(store, user_id).await?;

    let cohort = store.enroll_in_cohort(cohort_id, user_id, now).await?;
    tracing::info!(
        cohort_id,
        user_id,
        admin_id,
        enrolled = cohort.enrolled_user_ids.len(),
        "User enrolled in cohort; guild access granted"
    );
    Ok(cohort)
}

pub async fn submit_application(
    store: &dyn Store,
    user_id: DbId,
    input: ApplicationInput,
    now: Timestamp,
) -> AppResult<GuildApplication> {
    let user = super::require_user(store, user_id).await?;
    let progress = store.load_progress(user.id).await?.unwrap_or_default();
    if !progress.qualified_for_guild {
        return Err(CoreError::Forbidden(
            "Complete the Canon before applying to the Guild".into(),
        )
        .into());
    }

    let strategic_doctrine = validate_required_text(
        "Strategic doctrine",
        &input.strategic_doctrine,
        MAX_APPLICATION_RESPONSE_LENGTH,
    )?;
    let why_guild =
        validate_required_text("Why Guild", &input.why_guild, MAX_APPLICATION_RESPONSE_LENGTH)?;
    let commitment = validate_required_text(
        "Commitment",
        &input.commitment,
        MAX_APPLICATION_RESPONSE_LENGTH,
    )?;
    if let Some(cohort_id) = input.cohort_id {
        if store.find_cohort(cohort_id).await?.is_none() {
            return Err(CoreError::NotFound {
                entity: "Cohort",
                id: cohort_id,
            }
            .into());
        }
    }

    let application = store
        .create_application(&NewApplication {
            user_id,
            cohort_id: input.cohort_id,
            strategic_doctrine: strategic_doctrine.to_string(),
            why_guild: why_guild.to_string(),
            commitment: commitment.to_string(),
            submitted_at: now,
        })
        .await?;
    tracing::info!(application_id = application.id, user_id, "Guild application submitted");
    Ok(application)
}

pub async fn list_pending_applications(
    store: &dyn Store,
    admin_id: DbId,
) -> AppResult<Vec<GuildApplication>> {
    super::require_admin(store, admin_id).await?;
    Ok(store.list_pending_applications().await?)
}

/// Approve or reject a pending application. Access is unaffected.
pub async fn review_application(
    store: &dyn Store,
    reviewer_id: DbId,
    application_id: DbId,
    status: &str,
    notes: Option<&str>,
    now: Timestamp,
) -> AppResult<GuildApplication> {
    super::require_admin(store, reviewer_id).await?;
    let decision: ApplicationDecision = status.parse()?;
    let notes = match notes.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => {
            Some(validate_required_text("Review notes", n, MAX_REVIEW_NOTES_LENGTH)?.to_string())
        }
        None => None,
    };

    let application = store
        .review_application(&ApplicationReview {
            application_id,
            reviewer_id,
            decision,
            notes,
            reviewed_at: now,
        })
        .await?;
    tracing::info!(
        application_id,
        reviewer_id,
        status = %decision,
        "Guild application reviewed"
    );
    Ok(application)
}
