//! Assignment submission and review rules, plus the free-text bounds used by
//! guild applications.

use crate::curriculum::ModuleSpec;
use crate::error::CoreError;
use crate::status::SubmissionStatus;
use crate::validation::word_count;

/// Minimum words in any Canon assignment.
pub const MIN_SUBMISSION_WORDS: usize = 50;

/// Maximum characters in review feedback.
pub const MAX_FEEDBACK_LENGTH: usize = 500;

/// Maximum characters in each guild application response.
pub const MAX_APPLICATION_RESPONSE_LENGTH: usize = 10_000;

/// Maximum characters in application review notes.
pub const MAX_REVIEW_NOTES_LENGTH: usize = 2_000;

/// Check `content` against `[MIN_SUBMISSION_WORDS, module.word_limit]`.
///
/// Returns the word count on success.
pub fn validate_submission_content(content: &str, module: &ModuleSpec) -> Result<usize, CoreError> {
    let words = word_count(content);
    if words < MIN_SUBMISSION_WORDS {
        return Err(CoreError::Validation(format!(
            "Submission too short: {words} words, minimum is {MIN_SUBMISSION_WORDS}"
        )));
    }
    if words > module.word_limit {
        return Err(CoreError::Validation(format!(
            "Submission exceeds maximum length: {words} words, limit for module {} is {}",
            module.number, module.word_limit
        )));
    }
    Ok(words)
}

/// Trim and bound review feedback. Returns the trimmed text.
pub fn validate_feedback(feedback: &str) -> Result<&str, CoreError> {
    let trimmed = feedback.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Feedback is required".to_string()));
    }
    if trimmed.chars().count() > MAX_FEEDBACK_LENGTH {
        return Err(CoreError::Validation(format!(
            "Feedback too long - keep it concise (max {MAX_FEEDBACK_LENGTH} characters)"
        )));
    }
    Ok(trimmed)
}

/// Only pending assignments may be reviewed; review is a one-shot transition.
pub fn ensure_reviewable(status: SubmissionStatus) -> Result<(), CoreError> {
    match status {
        SubmissionStatus::Pending => Ok(()),
        SubmissionStatus::Pass | SubmissionStatus::NotYet => Err(CoreError::Conflict(format!(
            "Assignment has already been reviewed with status '{status}'"
        ))),
    }
}

/// Require a non-empty, bounded free-text field. Returns the trimmed text.
pub fn validate_required_text<'a>(
    field: &str,
    value: &'a str,
    max_len: usize,
) -> Result<&'a str, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(trimmed)
}
