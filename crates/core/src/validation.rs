//! Input validation utilities shared by signup, submission, and invites.
//!
//! All functions are pure. The word-count helper is the single authority for
//! submission length checks.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Structural `local@domain.tld` check. Deliverability is not verified.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Result of a password strength check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordCheck {
    /// `true` iff `errors` is empty.
    pub valid: bool,
    /// Every violated rule, in a fixed order.
    pub errors: Vec<&'static str>,
}

/// Check a password against all strength rules and report every violation.
pub fn check_password(password: &str) -> PasswordCheck {
    let mut errors = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push("Password must be at least 8 characters");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one number");
    }

    PasswordCheck {
        valid: errors.is_empty(),
        errors,
    }
}

/// Number of whitespace-separated words. Whitespace-only text has zero words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Rounded integer percentage of `completed` out of `total` (0 when `total` is 0).
pub fn progress_percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (completed.min(total) * 200 + total) / (2 * total);
    pct as u8
}
