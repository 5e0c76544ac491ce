use thiserror::Error;

/// Shown whenever the server gives no usable reason.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again";

/// Why a login submission failed.
///
/// The `Display` output is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter the password")]
    MissingPassword,

    /// The server refused the login and said why.
    #[error("{0}")]
    AuthRejected(String),

    #[error("{}", GENERIC_FAILURE_MESSAGE)]
    AuthUnknownFailure,

    /// The server reported success but issued no token.
    #[error("{}", GENERIC_FAILURE_MESSAGE)]
    MalformedSuccess,

    /// The token could not be written to durable storage.
    #[error("Unable to save your session. Please try again")]
    SessionNotSaved,
}

impl LoginError {
    /// Local validation errors never reach the server.
    pub fn is_validation(&self) -> bool {
        matches!(self, LoginError::InvalidEmail | LoginError::MissingPassword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(LoginError::InvalidEmail.to_string(), "Please enter a valid email address");
        assert_eq!(LoginError::MissingPassword.to_string(), "Please enter the password");
        assert_eq!(
            LoginError::AuthRejected("Account locked".to_string()).to_string(),
            "Account locked"
        );
        assert_eq!(LoginError::AuthUnknownFailure.to_string(), GENERIC_FAILURE_MESSAGE);
        assert_eq!(LoginError::MalformedSuccess.to_string(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_is_validation() {
        assert!(LoginError::InvalidEmail.is_validation());
        assert!(LoginError::MissingPassword.is_validation());
        assert!(!LoginError::AuthUnknownFailure.is_validation());
    }
}
