// Validation utilities module
// Field rules for registration input, run before any entity is constructed

use std::sync::OnceLock;

use regex::Regex;

use crate::users::error::UserError;

const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 50;
const PASSWORD_MIN_LEN: usize = 5;

fn username_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9]+$").expect("username regex is valid"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:\+82\d{1,2}|0\d{2})-\d{3,4}-\d{4}$|^(?:\+82\d{1,2}|0\d{2})\d{7,8}$")
            .expect("phone regex is valid")
    })
}

/// Validates a username: 3-50 characters, letters and digits only.
/// Length is checked before format.
pub fn validate_username(username: &str) -> Result<(), UserError> {
    let len = username.chars().count();
    if len < USERNAME_MIN_LEN {
        return Err(UserError::UsernameTooShort);
    }
    if len > USERNAME_MAX_LEN {
        return Err(UserError::UsernameTooLong);
    }
    if !username_regex().is_match(username) {
        return Err(UserError::InvalidUsernameFormat);
    }
    Ok(())
}

/// Validates a password: at least 5 characters, at least one digit and one
/// letter. Length is checked first, then digit, then letter.
pub fn validate_password(password: &str) -> Result<(), UserError> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(UserError::PasswordTooShort);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(UserError::PasswordMissingDigit);
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(UserError::PasswordMissingLetter);
    }
    Ok(())
}

/// Validates a phone number against the accepted formats,
/// e.g. 010-1234-5678 or +821012345678.
pub fn validate_phone(phone: &str) -> Result<(), UserError> {
    if !phone_regex().is_match(phone) {
        return Err(UserError::InvalidPhoneFormat);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_username_too_short() {
        assert!(matches!(
            validate_username("ab"),
            Err(UserError::UsernameTooShort)
        ));
    }

    #[test]
    fn test_username_too_long() {
        let long = "a".repeat(51);
        assert!(matches!(
            validate_username(&long),
            Err(UserError::UsernameTooLong)
        ));
    }

    #[test]
    fn test_username_invalid_format() {
        assert!(matches!(
            validate_username("user!"),
            Err(UserError::InvalidUsernameFormat)
        ));
        assert!(matches!(
            validate_username("user name"),
            Err(UserError::InvalidUsernameFormat)
        ));
    }

    #[test]
    fn test_username_accepted() {
        assert!(validate_username("abc123").is_ok());
        assert!(validate_username("abc").is_ok());
        assert!(validate_username(&"a".repeat(50)).is_ok());
    }

    #[test]
    fn test_password_too_short_checked_first() {
        // 4 chars with digit and letter: length wins
        assert!(matches!(
            validate_password("abc1"),
            Err(UserError::PasswordTooShort)
        ));
    }

    #[test]
    fn test_password_missing_digit() {
        assert!(matches!(
            validate_password("abcde"),
            Err(UserError::PasswordMissingDigit)
        ));
    }

    #[test]
    fn test_password_missing_letter() {
        assert!(matches!(
            validate_password("12345"),
            Err(UserError::PasswordMissingLetter)
        ));
    }

    #[test]
    fn test_password_accepted() {
        assert!(validate_password("abc12").is_ok());
        assert!(validate_password("password1").is_ok());
    }

    #[test]
    fn test_phone_accepted_formats() {
        assert!(validate_phone("010-1234-5678").is_ok());
        assert!(validate_phone("010-123-5678").is_ok());
        assert!(validate_phone("+821012345678").is_ok());
        assert!(validate_phone("01012345678").is_ok());
    }

    #[test]
    fn test_phone_rejected_formats() {
        assert!(validate_phone("1234567890").is_err());
        assert!(validate_phone("010 1234 5678").is_err());
        assert!(validate_phone("phone").is_err());
    }

    proptest! {
        #[test]
        fn prop_alphanumeric_usernames_accepted(username in "[a-zA-Z0-9]{3,50}") {
            prop_assert!(validate_username(&username).is_ok());
        }

        #[test]
        fn prop_passwords_with_letter_and_digit_accepted(
            letters in "[a-zA-Z]{2,10}",
            digits in "[0-9]{3,10}"
        ) {
            let password = format!("{}{}", letters, digits);
            prop_assert!(validate_password(&password).is_ok());
        }

        #[test]
        fn prop_digit_only_passwords_rejected(password in "[0-9]{5,20}") {
            prop_assert!(matches!(
                validate_password(&password),
                Err(UserError::PasswordMissingLetter)
            ));
        }
    }
}
