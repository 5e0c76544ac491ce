use std::sync::LazyLock;

use regex::Regex;

use super::LoginError;

/// Local part, "@", and a domain containing at least one ".".
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check the login form before anything is sent.
///
/// The email is checked first, so an invalid email masks a missing password.
pub fn validate(email: &str, password: &str) -> Result<(), LoginError> {
    if !is_valid_email(email) {
        return Err(LoginError::InvalidEmail);
    }
    if password.is_empty() {
        return Err(LoginError::MissingPassword);
    }
    Ok(())
}
