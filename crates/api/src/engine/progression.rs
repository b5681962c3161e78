//! Lesson completion and the per-module progress view.

use serde::Serialize;
use zavia_core::curriculum::{module_spec, ModuleNumber};
use zavia_core::error::CoreError;
use zavia_core::progress::CanonProgress;
use zavia_core::progression::{is_unlocked, module_state, validate_lesson, ModuleState};
use zavia_core::status::SubmissionStatus;
use zavia_core::types::{DbId, Timestamp};
use zavia_core::validation::progress_percentage;
use zavia_db::Store;

use crate::error::AppResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleView {
    pub number: ModuleNumber,
    pub title: &'static str,
    pub state: ModuleState,
    pub locked: bool,
    pub started: Option<Timestamp>,
    pub lessons_completed: Vec<i32>,
    pub total_lessons: usize,
    pub percentage: u8,
    pub assignment_submitted: bool,
    pub assignment_status: SubmissionStatus,
    pub assignment_feedback: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    pub modules: Vec<ModuleView>,
    pub completed: bool,
    pub qualified_for_guild: bool,
}

pub fn build_view(progress: &CanonProgress) -> ProgressView {
    let modules = ModuleNumber::all()
        .map(|number| {
            let spec = module_spec(number);
            let m = progress.module(number);
            let total_lessons = spec.total_lessons();
            ModuleView {
                number,
                title: spec.title,
                state: module_state(progress, number),
                locked: !is_unlocked(progress, number),
                started: m.started,
                lessons_completed: m.lessons_completed.clone(),
                total_lessons,
                percentage: progress_percentage(m.lessons_completed.len(), total_lessons),
                assignment_submitted: m.assignment_submitted,
                assignment_status: m.assignment_status,
                assignment_feedback: m.assignment_feedback.clone(),
            }
        })
        .collect();

    ProgressView {
        modules,
        completed: progress.completed,
        qualified_for_guild: progress.qualified_for_guild,
    }
}

pub async fn get_progress(store: &dyn Store, user_id: DbId) -> AppResult<ProgressView> {
    let progress = store.load_progress(user_id).await?.ok_or(CoreError::NotFound {
        entity: "User",
        id: user_id,
    })?;
    Ok(build_view(&progress))
}

pub async fn complete_lesson(
    store: &dyn Store,
    user_id: DbId,
    module_number: i64,
    lesson: i32,
    now: Timestamp,
) -> AppResult<ProgressView> {
    let module = ModuleNumber::new(module_number).ok_or(CoreError::NotFound {
        entity: "Module",
        id: module_number,
    })?;
    validate_lesson(module, lesson)?;

    let progress = store.complete_lesson(user_id, module, lesson, now).await?;
    tracing::info!(
        user_id,
        module_number = module.get(),
        lesson,
        "Lesson completed"
    );
    Ok(build_view(&progress))
}
