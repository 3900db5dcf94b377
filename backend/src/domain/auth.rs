//! Credentials submitted to `POST /api/login`.

use std::fmt;

use zeroize::Zeroizing;

/// A login payload that cannot be passed to a login service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
}

impl LoginValidationError {
    /// Request field at fault.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
        }
    }

    /// Machine-readable reason.
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyUsername => "empty_username",
            Self::EmptyPassword => "empty_password",
        }
    }
}

/// A username and password worth checking.
///
/// Surrounding whitespace is dropped from the username only. The password
/// is wiped from memory on drop and never printed.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", "hunter2").expect("valid");
/// assert_eq!(creds.username(), "ada");
/// assert!(!format!("{creds:?}").contains("hunter2"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        match (username.is_empty(), password.is_empty()) {
            (true, _) => Err(LoginValidationError::EmptyUsername),
            (false, true) => Err(LoginValidationError::EmptyPassword),
            (false, false) => Ok(Self {
                username: username.to_owned(),
                password: Zeroizing::new(password.to_owned()),
            }),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
