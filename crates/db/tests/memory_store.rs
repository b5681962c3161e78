use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use zavia_core::access::Product;
use zavia_core::curriculum::{module_spec, ModuleNumber};
use zavia_core::error::CoreError;
use zavia_core::status::{ApplicationDecision, CohortStatus, ReviewDecision, SubmissionStatus};
use zavia_core::types::DbId;
use zavia_db::models::application::{ApplicationReview, NewApplication};
use zavia_db::models::assignment::{AssignmentReview, NewAssignment};
use zavia_db::models::cohort::NewCohort;
use zavia_db::models::purchase::NewPurchase;
use zavia_db::models::user::NewUser;
use zavia_db::{MemoryStore, Store, StoreError};

fn new_user(email: &str, is_admin: bool) -> NewUser {
    NewUser {
        email: email.to_string(),
        name: "Test Strategist".to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        is_admin,
    }
}

fn module(n: i64) -> ModuleNumber {
    ModuleNumber::new(n).unwrap()
}

async fn complete_module_lessons(store: &MemoryStore, user_id: DbId, n: ModuleNumber) {
    for lesson in 1..=module_spec(n).total_lessons() as i32 {
        store
            .complete_lesson(user_id, n, lesson, Utc::now())
            .await
            .unwrap();
    }
}

async fn submit(store: &MemoryStore, user_id: DbId, n: ModuleNumber) -> DbId {
    store
        .submit_assignment(&NewAssignment {
            user_id,
            module_number: n,
            content: "word ".repeat(120),
            submitted_at: Utc::now(),
        })
        .await
        .unwrap()
        .id
}

fn review(assignment_id: DbId, reviewer_id: DbId, decision: ReviewDecision) -> AssignmentReview {
    AssignmentReview {
        assignment_id,
        reviewer_id,
        decision,
        feedback: "Good diagnosis.".to_string(),
        reviewed_at: Utc::now(),
    }
}

fn purchase(user_id: DbId, product: Product, session: &str) -> NewPurchase {
    NewPurchase {
        user_id,
        product,
        amount_cents: product.price_cents(),
        currency: "usd".to_string(),
        processor_payment_id: Some("pi_123".to_string()),
        processor_session_id: session.to_string(),
        created_at: Utc::now(),
    }
}

fn cohort(max_students: i32) -> NewCohort {
    let start = Utc::now() + Duration::days(14);
    NewCohort {
        name: "Spring Guild".to_string(),
        start_date: start,
        end_date: start + Duration::weeks(12),
        max_students,
        status: CohortStatus::Upcoming,
        price_cents: Product::Guild.price_cents(),
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let store = MemoryStore::new();
    store.create_user(&new_user("a@zavia.io", false)).await.unwrap();
    let err = store.create_user(&new_user("a@zavia.io", false)).await.unwrap_err();
    assert_matches!(err, StoreError::Conflict(_));
}

#[tokio::test]
async fn new_user_has_no_access_and_default_progress() {
    let store = MemoryStore::new();
    let user = store.create_user(&new_user("a@zavia.io", false)).await.unwrap();
    assert!(!user.canon_access && !user.guild_access && !user.fellowship_access);

    let progress = store.load_progress(user.id).await.unwrap().unwrap();
    assert!(!progress.completed);
    assert!(progress.modules.iter().all(|m| m.lessons_completed.is_empty()));
}

#[tokio::test]
async fn lesson_completion_is_idempotent() {
    let store = MemoryStore::new();
    let user = store.create_user(&new_user("a@zavia.io", false)).await.unwrap();

    let first = store
        .complete_lesson(user.id, ModuleNumber::FIRST, 2, Utc::now())
        .await
        .unwrap();
    let second = store
        .complete_lesson(user.id, ModuleNumber::FIRST, 2, Utc::now() + Duration::minutes(5))
        .await
        .unwrap();

    assert_eq!(second.module(ModuleNumber::FIRST).lessons_completed, vec![2]);
    assert_eq!(
        first.module(ModuleNumber::FIRST).started,
        second.module(ModuleNumber::FIRST).started
    );
}

#[tokio::test]
async fn locked_module_rejects_lessons() {
    let store = MemoryStore::new();
    let user = store.create_user(&new_user("a@zavia.io", false)).await.unwrap();
    let err = store
        .complete_lesson(user.id, module(2), 1, Utc::now())
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Rule(CoreError::Validation(msg)) if msg.contains("Module 2 is locked"));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let store = MemoryStore::new();
    let err = store
        .complete_lesson(42, ModuleNumber::FIRST, 1, Utc::now())
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::NotFound { entity: "User", id: 42 });
}

#[tokio::test]
async fn submission_requires_all_lessons_and_happens_once() {
    let store = MemoryStore::new();
    let user = store.create_user(&new_user("a@zavia.io", false)).await.unwrap();
    let input = NewAssignment {
        user_id: user.id,
        module_number: ModuleNumber::FIRST,
        content: "word ".repeat(120),
        submitted_at: Utc::now(),
    };

    let err = store.submit_assignment(&input).await.unwrap_err();
    assert_matches!(err, StoreError::Rule(CoreError::Validation(_)));

    complete_module_lessons(&store, user.id, ModuleNumber::FIRST).await;
    let assignment = store.submit_assignment(&input).await.unwrap();
    assert_eq!(assignment.status, SubmissionStatus::Pending);

    let progress = store.load_progress(user.id).await.unwrap().unwrap();
    assert!(progress.module(ModuleNumber::FIRST).assignment_submitted);

    let err = store.submit_assignment(&input).await.unwrap_err();
    assert_matches!(err, StoreError::Rule(CoreError::Validation(_)));
}

#[tokio::test]
async fn review_is_a_one_shot_transition() {
    let store = MemoryStore::new();
    let admin = store.create_user(&new_user("admin@zavia.io", true)).await.unwrap();
    let user = store.create_user(&new_user("a@zavia.io", false)).await.unwrap();
    complete_module_lessons(&store, user.id, ModuleNumber::FIRST).await;
    let id = submit(&store, user.id, ModuleNumber::FIRST).await;

    let reviewed = store
        .record_review(&review(id, admin.id, ReviewDecision::NotYet))
        .await
        .unwrap();
    assert_eq!(reviewed.assignment.status, SubmissionStatus::NotYet);
    assert_eq!(reviewed.assignment.reviewed_by, Some(admin.id));
    assert!(!reviewed.course_completed);

    let err = store
        .record_review(&review(id, admin.id, ReviewDecision::Pass))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Rule(CoreError::Conflict(_)));
}

#[tokio::test]
async fn final_pass_completes_the_canon() {
    let store = MemoryStore::new();
    let admin = store.create_user(&new_user("admin@zavia.io", true)).await.unwrap();
    let user = store.create_user(&new_user("a@zavia.io", false)).await.unwrap();

    for n in ModuleNumber::all() {
        complete_module_lessons(&store, user.id, n).await;
        let id = submit(&store, user.id, n).await;
        let reviewed = store
            .record_review(&review(id, admin.id, ReviewDecision::Pass))
            .await
            .unwrap();
        assert_eq!(reviewed.course_completed, n == ModuleNumber::LAST);
    }

    let progress = store.load_progress(user.id).await.unwrap().unwrap();
    assert!(progress.completed);
    assert!(progress.qualified_for_guild);
}

#[tokio::test]
async fn pending_queue_is_oldest_first() {
    let store = MemoryStore::new();
    let early = store.create_user(&new_user("early@zavia.io", false)).await.unwrap();
    let late = store.create_user(&new_user("late@zavia.io", false)).await.unwrap();
    for user in [&late, &early] {
        complete_module_lessons(&store, user.id, ModuleNumber::FIRST).await;
    }

    let base = Utc::now();
    for (user, offset) in [(&late, 10), (&early, 0)] {
        store
            .submit_assignment(&NewAssignment {
                user_id: user.id,
                module_number: ModuleNumber::FIRST,
                content: "word ".repeat(60),
                submitted_at: base + Duration::minutes(offset),
            })
            .await
            .unwrap();
    }

    let pending = store.list_pending_assignments().await.unwrap();
    let owners: Vec<DbId> = pending.iter().map(|a| a.user_id).collect();
    assert_eq!(owners, vec![early.id, late.id]);
}

#[tokio::test]
async fn redelivered_checkout_session_is_recorded_once() {
    let store = MemoryStore::new();
    let user = store.create_user(&new_user("a@zavia.io", false)).await.unwrap();

    let first = store
        .record_purchase(&purchase(user.id, Product::Canon, "cs_1"))
        .await
        .unwrap();
    let again = store
        .record_purchase(&purchase(user.id, Product::Canon, "cs_1"))
        .await
        .unwrap();

    assert!(first.is_some());
    assert!(again.is_none());
    assert_eq!(store.list_user_purchases(user.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn purchase_applies_its_product_grant() {
    let store = MemoryStore::new();
    let user = store.create_user(&new_user("a@zavia.io", false)).await.unwrap();

    store
        .record_purchase(&purchase(user.id, Product::Canon, "cs_canon"))
        .await
        .unwrap();
    store
        .record_purchase(&purchase(user.id, Product::Guild, "cs_guild"))
        .await
        .unwrap();
    let fellowship = store
        .record_purchase(&purchase(user.id, Product::Fellowship, "cs_fellow"))
        .await
        .unwrap()
        .unwrap();

    let user_after = store.find_user(user.id).await.unwrap().unwrap();
    assert!(user_after.canon_access);
    assert!(!user_after.guild_access);
    assert!(user_after.fellowship_access);

    let members = store.list_fellowship_members(user.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].joined_at, fellowship.created_at);
    assert_eq!(members[0].next_payment_at, fellowship.created_at + Duration::days(365));
}

#[tokio::test]
async fn purchase_for_unknown_user_records_nothing() {
    let store = MemoryStore::new();

    let err = store
        .record_purchase(&purchase(404, Product::Canon, "cs_1"))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::NotFound { entity: "User", id: 404 });
    assert!(store.list_user_purchases(404).await.unwrap().is_empty());
}

#[tokio::test]
async fn full_cohort_rejects_enrollment() {
    let store = MemoryStore::new();
    let first = store.create_user(&new_user("a@zavia.io", false)).await.unwrap();
    let second = store.create_user(&new_user("b@zavia.io", false)).await.unwrap();
    let cohort = store.create_cohort(&cohort(1)).await.unwrap();

    let enrolled = store
        .enroll_in_cohort(cohort.id, first.id, Utc::now())
        .await
        .unwrap();
    assert_eq!(enrolled.enrolled_user_ids, vec![first.id]);

    let user = store.find_user(first.id).await.unwrap().unwrap();
    assert!(user.guild_access);
    assert_eq!(user.guild_cohort_id, Some(cohort.id));

    // Re-enrolling is a no-op even when full.
    let again = store
        .enroll_in_cohort(cohort.id, first.id, Utc::now())
        .await
        .unwrap();
    assert_eq!(again.enrolled_user_ids.len(), 1);

    let err = store
        .enroll_in_cohort(cohort.id, second.id, Utc::now())
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Rule(CoreError::Conflict(msg)) if msg == "Cohort is full");
}

#[tokio::test]
async fn application_review_happens_once_and_grants_nothing() {
    let store = MemoryStore::new();
    let admin = store.create_user(&new_user("admin@zavia.io", true)).await.unwrap();
    let user = store.create_user(&new_user("a@zavia.io", false)).await.unwrap();

    let application = store
        .create_application(&NewApplication {
            user_id: user.id,
            cohort_id: None,
            strategic_doctrine: "Focus beats breadth.".to_string(),
            why_guild: "Peer pressure on real decisions.".to_string(),
            commitment: "Six hours a week.".to_string(),
            submitted_at: Utc::now(),
        })
        .await
        .unwrap();

    let input = ApplicationReview {
        application_id: application.id,
        reviewer_id: admin.id,
        decision: ApplicationDecision::Approved,
        notes: None,
        reviewed_at: Utc::now(),
    };
    store.review_application(&input).await.unwrap();
    assert_matches!(
        store.review_application(&input).await,
        Err(StoreError::Conflict(_))
    );

    let user = store.find_user(user.id).await.unwrap().unwrap();
    assert!(!user.guild_access);
    assert!(store.list_pending_applications().await.unwrap().is_empty());
}

#[tokio::test]
async fn stats_sum_completed_revenue() {
    let store = MemoryStore::new();
    let user = store.create_user(&new_user("a@zavia.io", false)).await.unwrap();
    store
        .record_purchase(&purchase(user.id, Product::Canon, "cs_1"))
        .await
        .unwrap();
    store
        .record_purchase(&purchase(user.id, Product::Coaching, "cs_2"))
        .await
        .unwrap();

    let stats = store.stats(Utc::now() - Duration::days(1)).await.unwrap();
    assert_eq!(stats.total_users, 1);
    assert_eq!(stats.canon_users, 1);
    assert_eq!(stats.revenue.total_cents, 49_700 + 99_700);
    assert_eq!(stats.revenue.this_month_cents, 49_700 + 99_700);
    assert_eq!(stats.revenue.by_product[&Product::Guild], 0);
    assert_eq!(stats.revenue.by_product[&Product::Canon], 49_700);
}
