//! Input validation shared by the signup and login flows.

use crate::shared::error::SharedError;

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Minimum full name length after trimming, in characters.
pub const MIN_FULL_NAME_LEN: usize = 3;

/// Normalize an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check that an email address has the `local@domain.tld` shape.
///
/// The address must contain no whitespace and exactly one `@`. The domain
/// must contain a dot with at least one character on each side.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // Any dot that leaves text on both sides is enough: "a@b.c.d" passes.
    domain
        .char_indices()
        .filter(|(_, c)| *c == '.')
        .any(|(i, _)| i > 0 && i + 1 < domain.len())
}

/// Check the password length rule.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Check the full name rule (trimmed, at least three characters).
pub fn is_valid_full_name(full_name: &str) -> bool {
    full_name.trim().chars().count() >= MIN_FULL_NAME_LEN
}

/// Check signup fields in order: password, email, full name
///
/// The first failing rule is reported, naming its field. The email is
/// checked as sent, so surrounding whitespace is rejected; normalizing
/// happens only after validation.
pub fn validate_signup_fields(
    email: &str,
    full_name: &str,
    password: &str,
) -> Result<(), SharedError> {
    if !is_valid_password(password) {
        return Err(SharedError::validation(
            "password",
            "Password must be at least 8 characters long",
        ));
    }
    if !is_valid_email(email) {
        return Err(SharedError::validation(
            "email",
            "Please provide a valid email address",
        ));
    }
    if !is_valid_full_name(full_name) {
        return Err(SharedError::validation(
            "fullName",
            "Full name must be at least 3 characters",
        ));
    }
    Ok(())
}
