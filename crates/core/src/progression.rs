//! Canon progression state machine.
//!
//! Per module, in order:
//!
//! ```text
//! locked -> not_started -> in_progress -> lessons_complete
//!        -> assignment_pending -> { assignment_passed | needs_revision }
//! ```
//!
//! Module N (N > 1) is locked until module N-1's assignment is `pass`.
//! Passing the last outstanding assignment cascades into course completion.
//! All functions operate on an in-memory [`CanonProgress`]; callers persist
//! the result.

use serde::Serialize;

use crate::curriculum::{module_spec, ModuleNumber};
use crate::error::CoreError;
use crate::progress::CanonProgress;
use crate::status::SubmissionStatus;
use crate::types::DbId;

/// Derived, display-oriented state of one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleState {
    Locked,
    NotStarted,
    InProgress,
    LessonsComplete,
    AssignmentPending,
    AssignmentPassed,
    NeedsRevision,
}

/// Module 1 is always unlocked; module N requires module N-1 to be passed.
pub fn is_unlocked(progress: &CanonProgress, module: ModuleNumber) -> bool {
    match module.previous() {
        None => true,
        Some(prev) => progress.module(prev).assignment_status == SubmissionStatus::Pass,
    }
}

pub fn module_state(progress: &CanonProgress, module: ModuleNumber) -> ModuleState {
    if !is_unlocked(progress, module) {
        return ModuleState::Locked;
    }

    let m = progress.module(module);
    if m.assignment_submitted {
        return match m.assignment_status {
            SubmissionStatus::Pending => ModuleState::AssignmentPending,
            SubmissionStatus::Pass => ModuleState::AssignmentPassed,
            SubmissionStatus::NotYet => ModuleState::NeedsRevision,
        };
    }

    if m.covers_lessons(module_spec(module).total_lessons()) {
        ModuleState::LessonsComplete
    } else if m.lessons_completed.is_empty() && m.started.is_none() {
        ModuleState::NotStarted
    } else {
        ModuleState::InProgress
    }
}

/// Reject lesson numbers that the module does not define.
pub fn validate_lesson(module: ModuleNumber, lesson: i32) -> Result<(), CoreError> {
    let total = module_spec(module).total_lessons() as i32;
    if (1..=total).contains(&lesson) {
        Ok(())
    } else {
        Err(CoreError::NotFound {
            entity: "Lesson",
            id: DbId::from(lesson),
        })
    }
}

pub fn ensure_unlocked(progress: &CanonProgress, module: ModuleNumber) -> Result<(), CoreError> {
    match module.previous() {
        Some(prev) if !is_unlocked(progress, module) => Err(CoreError::Validation(format!(
            "Module {module} is locked until the module {prev} assignment is passed"
        ))),
        _ => Ok(()),
    }
}

/// Check that `module`'s assignment may be submitted now.
///
/// Requires the module to be unlocked, every lesson completed, and no prior
/// submission.
pub fn check_submission_eligibility(
    progress: &CanonProgress,
    module: ModuleNumber,
) -> Result<(), CoreError> {
    ensure_unlocked(progress, module)?;

    let m = progress.module(module);
    if m.assignment_submitted {
        return Err(CoreError::Validation(format!(
            "The module {module} assignment has already been submitted"
        )));
    }

    let total = module_spec(module).total_lessons();
    if !m.covers_lessons(total) {
        return Err(CoreError::Validation(format!(
            "Complete all {total} lessons of module {module} before submitting ({} completed)",
            m.lessons_completed.len()
        )));
    }

    Ok(())
}

/// Apply a submission to the module record after re-checking eligibility.
pub fn record_submission(
    progress: &mut CanonProgress,
    module: ModuleNumber,
) -> Result<(), CoreError> {
    check_submission_eligibility(progress, module)?;
    let m = progress.module_mut(module);
    m.assignment_submitted = true;
    m.assignment_status = SubmissionStatus::Pending;
    Ok(())
}

pub fn all_modules_passed(progress: &CanonProgress) -> bool {
    progress
        .modules
        .iter()
        .all(|m| m.assignment_status == SubmissionStatus::Pass)
}

/// Set `completed` and `qualified_for_guild` if every module is passed.
///
/// Idempotent and one-directional: flags already set stay set. Returns
/// `true` if this call flipped them.
pub fn apply_completion_cascade(progress: &mut CanonProgress) -> bool {
    if progress.completed || !all_modules_passed(progress) {
        return false;
    }
    progress.completed = true;
    progress.qualified_for_guild = true;
    true
}

/// Write a terminal review outcome into the module record and, for `pass`,
/// re-evaluate course completion. Returns whether the cascade fired.
pub fn apply_review_outcome(
    progress: &mut CanonProgress,
    module: ModuleNumber,
    status: SubmissionStatus,
    feedback: &str,
) -> bool {
    let m = progress.module_mut(module);
    m.assignment_status = status;
    m.assignment_feedback = Some(feedback.to_string());

    match status {
        SubmissionStatus::Pass => apply_completion_cascade(progress),
        SubmissionStatus::Pending | SubmissionStatus::NotYet => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn module(n: i64) -> ModuleNumber {
        ModuleNumber::new(n).unwrap()
    }

    fn complete_all_lessons(progress: &mut CanonProgress, n: ModuleNumber) {
        let now = Utc::now();
        for lesson in 1..=module_spec(n).total_lessons() as i32 {
            progress.module_mut(n).record_lesson(lesson, now);
        }
    }

    fn pass(progress: &mut CanonProgress, n: ModuleNumber) {
        complete_all_lessons(progress, n);
        record_submission(progress, n).unwrap();
        apply_review_outcome(progress, n, SubmissionStatus::Pass, "ok");
    }

    #[test]
    fn module_one_is_never_locked() {
        let progress = CanonProgress::default();
        assert!(is_unlocked(&progress, ModuleNumber::FIRST));
    }

    #[test]
    fn later_modules_unlock_only_on_previous_pass() {
        for n in 2..=5 {
            for status in SubmissionStatus::ALL {
                let mut progress = CanonProgress::default();
                progress.module_mut(module(n - 1)).assignment_status = *status;
                assert_eq!(
                    is_unlocked(&progress, module(n)),
                    *status == SubmissionStatus::Pass,
                    "module {n} with previous {status}"
                );
            }
        }
    }

    #[test]
    fn state_walks_through_lifecycle() {
        let m1 = ModuleNumber::FIRST;
        let mut progress = CanonProgress::default();
        assert_eq!(module_state(&progress, m1), ModuleState::NotStarted);
        assert_eq!(module_state(&progress, module(2)), ModuleState::Locked);

        progress.module_mut(m1).record_lesson(1, Utc::now());
        assert_eq!(module_state(&progress, m1), ModuleState::InProgress);

        complete_all_lessons(&mut progress, m1);
        assert_eq!(module_state(&progress, m1), ModuleState::LessonsComplete);

        record_submission(&mut progress, m1).unwrap();
        assert_eq!(module_state(&progress, m1), ModuleState::AssignmentPending);

        apply_review_outcome(&mut progress, m1, SubmissionStatus::NotYet, "Rework it.");
        assert_eq!(module_state(&progress, m1), ModuleState::NeedsRevision);
        assert_eq!(module_state(&progress, module(2)), ModuleState::Locked);
    }

    #[test]
    fn submission_rejected_until_all_lessons_complete() {
        let m1 = ModuleNumber::FIRST;
        let mut progress = CanonProgress::default();
        for lesson in 1..=3 {
            progress.module_mut(m1).record_lesson(lesson, Utc::now());
        }
        let err = check_submission_eligibility(&progress, m1).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("3 completed"));

        progress.module_mut(m1).record_lesson(4, Utc::now());
        assert!(check_submission_eligibility(&progress, m1).is_ok());
    }

    #[test]
    fn submission_allowed_only_once() {
        let m1 = ModuleNumber::FIRST;
        let mut progress = CanonProgress::default();
        complete_all_lessons(&mut progress, m1);
        record_submission(&mut progress, m1).unwrap();

        let err = record_submission(&mut progress, m1).unwrap_err();
        assert!(err.to_string().contains("already been submitted"));
    }

    #[test]
    fn locked_module_cannot_be_submitted() {
        let m2 = module(2);
        let mut progress = CanonProgress::default();
        complete_all_lessons(&mut progress, m2);
        let err = check_submission_eligibility(&progress, m2).unwrap_err();
        assert!(err.to_string().contains("locked"));
    }

    #[test]
    fn lesson_numbers_outside_module_are_not_found() {
        assert!(validate_lesson(ModuleNumber::FIRST, 1).is_ok());
        assert!(validate_lesson(ModuleNumber::FIRST, 4).is_ok());
        assert!(matches!(
            validate_lesson(ModuleNumber::FIRST, 5),
            Err(CoreError::NotFound { entity: "Lesson", id: 5 })
        ));
        assert!(validate_lesson(ModuleNumber::FIRST, 0).is_err());
    }

    #[test]
    fn passing_module_one_unlocks_module_two_without_completion() {
        let mut progress = CanonProgress::default();
        pass(&mut progress, ModuleNumber::FIRST);

        assert!(is_unlocked(&progress, module(2)));
        assert_eq!(module_state(&progress, module(2)), ModuleState::NotStarted);
        assert!(!progress.completed);
        assert!(!progress.qualified_for_guild);
    }

    #[test]
    fn cascade_fires_on_final_pass() {
        let mut progress = CanonProgress::default();
        for n in 1..=4 {
            pass(&mut progress, module(n));
            assert!(!progress.completed);
        }

        complete_all_lessons(&mut progress, module(5));
        record_submission(&mut progress, module(5)).unwrap();
        let fired = apply_review_outcome(&mut progress, module(5), SubmissionStatus::Pass, "ok");

        assert!(fired);
        assert!(progress.completed);
        assert!(progress.qualified_for_guild);
    }

    #[test]
    fn cascade_is_idempotent_and_never_reverts() {
        let mut progress = CanonProgress::default();
        for n in 1..=5 {
            pass(&mut progress, module(n));
        }
        assert!(!apply_completion_cascade(&mut progress));

        // Even if a module record were altered, the flags stay set.
        progress.module_mut(module(3)).assignment_status = SubmissionStatus::NotYet;
        assert!(!apply_completion_cascade(&mut progress));
        assert!(progress.completed);
        assert!(progress.qualified_for_guild);
    }

    #[test]
    fn not_yet_review_records_feedback_without_cascade() {
        let m1 = ModuleNumber::FIRST;
        let mut progress = CanonProgress::default();
        complete_all_lessons(&mut progress, m1);
        record_submission(&mut progress, m1).unwrap();

        let fired = apply_review_outcome(&mut progress, m1, SubmissionStatus::NotYet, "Sharpen it.");
        assert!(!fired);
        assert_eq!(
            progress.module(m1).assignment_feedback.as_deref(),
            Some("Sharpen it.")
        );
    }
}
