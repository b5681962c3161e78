//! Per-module and aggregate Canon progress attached to a user.

use serde::{Deserialize, Serialize};

use crate::curriculum::{ModuleNumber, MODULE_COUNT};
use crate::status::SubmissionStatus;
use crate::types::Timestamp;

/// Progress through a single Canon module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgress {
    /// Set by the first lesson completion and never overwritten.
    pub started: Option<Timestamp>,
    /// Reserved; no workflow writes it.
    pub completed: Option<Timestamp>,
    /// Completed lesson numbers in completion order, without duplicates.
    pub lessons_completed: Vec<i32>,
    pub assignment_submitted: bool,
    pub assignment_status: SubmissionStatus,
    pub assignment_feedback: Option<String>,
}

impl Default for ModuleProgress {
    fn default() -> Self {
        Self {
            started: None,
            completed: None,
            lessons_completed: Vec::new(),
            assignment_submitted: false,
            assignment_status: SubmissionStatus::Pending,
            assignment_feedback: None,
        }
    }
}

impl ModuleProgress {
    pub fn has_completed_lesson(&self, lesson: i32) -> bool {
        self.lessons_completed.contains(&lesson)
    }

    /// Mark `lesson` complete. Returns `true` if it was not already recorded.
    ///
    /// `started` is set to `at` only if it is still unset.
    pub fn record_lesson(&mut self, lesson: i32, at: Timestamp) -> bool {
        if self.started.is_none() {
            self.started = Some(at);
        }
        if self.has_completed_lesson(lesson) {
            return false;
        }
        self.lessons_completed.push(lesson);
        true
    }

    /// Whether every lesson `1..=total_lessons` has been completed.
    pub fn covers_lessons(&self, total_lessons: usize) -> bool {
        (1..=total_lessons as i32).all(|l| self.has_completed_lesson(l))
    }
}

/// Aggregate Canon state: five module records plus the derived completion
/// flags.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonProgress {
    pub modules: [ModuleProgress; MODULE_COUNT],
    /// All five assignments passed. Never reverts once set.
    pub completed: bool,
    /// Always set together with `completed`.
    pub qualified_for_guild: bool,
}

impl CanonProgress {
    pub fn module(&self, module: ModuleNumber) -> &ModuleProgress {
        &self.modules[module.index()]
    }

    pub fn module_mut(&mut self, module: ModuleNumber) -> &mut ModuleProgress {
        &mut self.modules[module.index()]
    }
}
