//! Guild cohort rules.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Default enrollment cap for a new cohort.
pub const DEFAULT_MAX_STUDENTS: i32 = 15;

pub fn validate_cohort_window(
    start_date: Timestamp,
    end_date: Timestamp,
    max_students: i32,
) -> Result<(), CoreError> {
    if end_date <= start_date {
        return Err(CoreError::Validation(
            "Cohort end date must be after its start date".to_string(),
        ));
    }
    if max_students < 1 {
        return Err(CoreError::Validation(
            "Cohort must allow at least one student".to_string(),
        ));
    }
    Ok(())
}

/// Fail with `Conflict` when `enrolled` has reached `max_students`.
pub fn ensure_capacity(enrolled: usize, max_students: i32) -> Result<(), CoreError> {
    if enrolled as i64 >= i64::from(max_students) {
        return Err(CoreError::Conflict("Cohort is full".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn window_must_be_forward() {
        let start = Utc::now();
        assert!(validate_cohort_window(start, start + Duration::days(84), 15).is_ok());
        assert!(validate_cohort_window(start, start, 15).is_err());
        assert!(validate_cohort_window(start, start - Duration::days(1), 15).is_err());
    }

    #[test]
    fn cap_must_be_positive() {
        let start = Utc::now();
        assert!(validate_cohort_window(start, start + Duration::days(1), 0).is_err());
    }

    #[test]
    fn full_cohort_is_a_conflict() {
        assert!(ensure_capacity(14, DEFAULT_MAX_STUDENTS).is_ok());
        let err = ensure_capacity(15, DEFAULT_MAX_STUDENTS).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(ref m) if m == "Cohort is full"));
    }
}
