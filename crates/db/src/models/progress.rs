//! Row shapes for `module_progress` and the completion flags on `users`.

use sqlx::FromRow;
use zavia_core::curriculum::ModuleNumber;
use zavia_core::progress::ModuleProgress;
use zavia_core::status::SubmissionStatus;
use zavia_core::types::Timestamp;

#[derive(Debug, Clone, FromRow)]
pub struct ModuleProgressRow {
    #[sqlx(try_from = "i16")]
    pub module_number: ModuleNumber,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub lessons_completed: Vec<i32>,
    pub assignment_submitted: bool,
    #[sqlx(try_from = "String")]
    pub assignment_status: SubmissionStatus,
    pub assignment_feedback: Option<String>,
}

impl From<ModuleProgressRow> for ModuleProgress {
    fn from(row: ModuleProgressRow) -> Self {
        Self {
            started: row.started_at,
            completed: row.completed_at,
            lessons_completed: row.lessons_completed,
            assignment_submitted: row.assignment_submitted,
            assignment_status: row.assignment_status,
            assignment_feedback: row.assignment_feedback,
        }
    }
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct CompletionFlags {
    pub canon_completed: bool,
    pub qualified_for_guild: bool,
}
