//! Login form validation.
//!
//! Checks run in a fixed order and the first failure wins:
//! 1. handle present
//! 2. students sign in with an email or a numeric register number
//! 3. password present
//! 4. password at least [`MIN_SECRET_LEN`] characters

use std::fmt;

use crate::auth::Role;

/// Minimum password length accepted by the login form.
pub const MIN_SECRET_LEN: usize = 6;

/// Why a login form was rejected before reaching the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRejection {
    MissingHandle,
    InvalidStudentHandle,
    MissingSecret,
    SecretTooShort,
}

impl LoginRejection {
    /// Message shown next to the login form.
    pub fn message(self) -> &'static str {
        match self {
            LoginRejection::MissingHandle => "Please enter your Email or Register Number",
            LoginRejection::InvalidStudentHandle => "Enter a valid Email or Student Reg No",
            LoginRejection::MissingSecret => "Please enter your password",
            LoginRejection::SecretTooShort => "Password must be at least 6 characters",
        }
    }
}

impl fmt::Display for LoginRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Validate login inputs for the given role.
pub fn validate_login(handle: &str, secret: &str, role: Role) -> Result<(), LoginRejection> {
    let handle = handle.trim();
    if handle.is_empty() {
        return Err(LoginRejection::MissingHandle);
    }

    if role == Role::Student && !handle.contains('@') && !is_register_number(handle) {
        return Err(LoginRejection::InvalidStudentHandle);
    }

    if secret.is_empty() {
        return Err(LoginRejection::MissingSecret);
    }

    if secret.chars().count() < MIN_SECRET_LEN {
        return Err(LoginRejection::SecretTooShort);
    }

    Ok(())
}

/// Register numbers are plain ASCII digits.
pub fn is_register_number(handle: &str) -> bool {
    !handle.is_empty() && handle.chars().all(|c| c.is_ascii_digit())
}
