//! Account passwords: Argon2id hashes in PHC string form plus the
//! registration length rule.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use cityvetcare_core::error::CoreError;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// `Ok(false)` on a mismatch; `Err` only when the stored hash is unreadable.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, HashError> {
    let parsed = PasswordHash::new(stored_hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(HashError::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Registration rule: 8 to 128 characters, not only whitespace.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    let length = password.chars().count();
    if password.trim().is_empty() || length < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at most {MAX_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn hash_round_trips() {
        let hash = hash_password("rabies-free-since-2020").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("rabies-free-since-2020", &hash).unwrap());
        assert!(!verify_password("rabies-free-since-2021", &hash).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(verify_password("whatever", "not-a-phc-string").is_err());
    }

    #[test]
    fn length_rule() {
        assert_matches!(validate_password("short"), Err(CoreError::Validation(_)));
        assert_matches!(validate_password("         "), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_password(&"x".repeat(MAX_PASSWORD_LENGTH + 1)),
            Err(CoreError::Validation(_))
        );
        assert!(validate_password("eightchr").is_ok());
    }
}
