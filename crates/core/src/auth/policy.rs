//! Boundary credential policy.
//!
//! Structural rules (username length, email format) live on the request DTOs;
//! password complexity needs character-class checks, so it is a function.

use cashup_shared::AppError;

/// Special characters accepted in passwords.
const PASSWORD_SPECIALS: &str = "@$!%*?&";

/// Validates password complexity.
///
/// A password must be at least 6 characters and contain an uppercase letter,
/// a lowercase letter, a digit, and one of `@$!%*?&`.
///
/// # Errors
///
/// Returns `AppError::Validation` naming the first unmet requirement.
pub fn validate_password_complexity(password: &str) -> Result<(), AppError> {
    if password.chars().count() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters long".to_string(),
        ));
    }

    if !password.chars().any(char::is_uppercase) {
        return Err(AppError::Validation(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }

    if !password.chars().any(char::is_lowercase) {
        return Err(AppError::Validation(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Password must contain at least one digit".to_string(),
        ));
    }

    if !password.chars().any(|c| PASSWORD_SPECIALS.contains(c)) {
        return Err(AppError::Validation(format!(
            "Password must contain at least one of {PASSWORD_SPECIALS}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn accepts_compliant_password() {
        assert!(validate_password_complexity("Passw0rd!").is_ok());
    }

    #[test]
    fn minimum_length_is_six() {
        assert!(validate_password_complexity("Aa1$x").is_err());
        assert!(validate_password_complexity("Aa1$xy").is_ok());
    }

    #[rstest]
    #[case("passw0rd!")] // no uppercase
    #[case("PASSW0RD!")] // no lowercase
    #[case("Password!")] // no digit
    #[case("Passw0rd")] // no special
    fn rejects_missing_character_class(#[case] password: &str) {
        let result = validate_password_complexity(password);
        assert!(matches!(
            result,
            Err(cashup_shared::AppError::Validation(_))
        ));
    }

    #[test]
    fn special_set_is_fixed() {
        // '#' is not in the accepted special set
        assert!(validate_password_complexity("Passw0rd#").is_err());
    }
}
