//! Vaccination record rules.

use crate::error::CoreError;
use crate::types::Date;
use crate::validation::require_short_text;

/// Default window for the "due soon" listing.
pub const DEFAULT_DUE_WINDOW_DAYS: i64 = 30;

pub fn validate_record(
    vaccine_name: &str,
    date_given: Date,
    next_due_date: Option<Date>,
    today: Date,
) -> Result<(), CoreError> {
    require_short_text("vaccine_name", vaccine_name)?;
    if date_given > today {
        return Err(CoreError::Validation(
            "date_given cannot be in the future".into(),
        ));
    }
    if let Some(due) = next_due_date {
        if due <= date_given {
            return Err(CoreError::Validation(
                "next_due_date must be after date_given".into(),
            ));
        }
    }
    Ok(())
}

/// Last day included in a "due soon" listing starting `today`.
pub fn due_window_end(today: Date, days: Option<i64>) -> Date {
    let days = days.unwrap_or(DEFAULT_DUE_WINDOW_DAYS).clamp(0, 365);
    today + chrono::Duration::days(days)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn due_date_must_follow_date_given() {
        let today = d(2026, 3, 1);
        assert!(validate_record("Anti-rabies", d(2026, 2, 1), Some(d(2027, 2, 1)), today).is_ok());
        assert!(validate_record("Anti-rabies", d(2026, 2, 1), Some(d(2026, 2, 1)), today).is_err());
        assert!(validate_record("Anti-rabies", d(2026, 4, 1), None, today).is_err());
        assert!(validate_record(" ", d(2026, 2, 1), None, today).is_err());
    }

    #[test]
    fn window_defaults_and_clamps() {
        let today = d(2026, 1, 1);
        assert_eq!(due_window_end(today, None), d(2026, 1, 31));
        assert_eq!(due_window_end(today, Some(-3)), today);
    }
}
