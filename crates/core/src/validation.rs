//! Field-level validation helpers shared by the server and the client forms.

use crate::error::CoreError;

/// Maximum length for short text fields (titles, names, addresses).
pub const MAX_SHORT_TEXT: usize = 255;

/// Maximum length for long text fields (descriptions, article bodies).
pub const MAX_LONG_TEXT: usize = 50_000;

/// Reject missing or whitespace-only values.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Reject values longer than `max` characters.
pub fn validate_max_len(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max} characters (got {len})"
        )));
    }
    Ok(())
}

/// Required short text: non-blank and at most [`MAX_SHORT_TEXT`] characters.
pub fn require_short_text(field: &str, value: &str) -> Result<(), CoreError> {
    require_non_blank(field, value)?;
    validate_max_len(field, value, MAX_SHORT_TEXT)
}

/// Optional short text: when present, at most [`MAX_SHORT_TEXT`] characters.
pub fn optional_short_text(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_max_len(field, v, MAX_SHORT_TEXT),
        None => Ok(()),
    }
}

/// Treat blank optional strings as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Normalize an animal's sex to `male`, `female` or `unknown`.
pub fn normalize_sex(value: Option<&str>) -> Result<Option<&'static str>, CoreError> {
    let Some(raw) = non_blank(value) else {
        return Ok(None);
    };
    match raw.to_ascii_lowercase().as_str() {
        "male" | "m" => Ok(Some("male")),
        "female" | "f" => Ok(Some("female")),
        "unknown" | "u" => Ok(Some("unknown")),
        _ => Err(CoreError::Validation(format!(
            "Invalid sex '{raw}'. Must be one of: male, female, unknown"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_rejected() {
        assert!(require_non_blank("title", "").is_err());
        assert!(require_non_blank("title", "   \n").is_err());
        assert!(require_non_blank("title", "Rabies drive").is_ok());
    }

    #[test]
    fn max_len_counts_characters_not_bytes() {
        let value = "ñ".repeat(MAX_SHORT_TEXT);
        assert!(validate_max_len("name", &value, MAX_SHORT_TEXT).is_ok());
        let value = "a".repeat(MAX_SHORT_TEXT + 1);
        assert!(require_short_text("name", &value).is_err());
    }

    #[test]
    fn non_blank_filters_whitespace() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some(" x ")), Some("x"));
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn sex_is_normalized() {
        assert_eq!(normalize_sex(Some("Female")).unwrap(), Some("female"));
        assert_eq!(normalize_sex(Some("M")).unwrap(), Some("male"));
        assert_eq!(normalize_sex(Some(" ")).unwrap(), None);
        assert!(normalize_sex(Some("dog")).is_err());
    }
}
