//! Authentication primitives: login credentials, registration payloads and
//! passwords.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::{Bio, DisplayName, Username};

/// Minimum accepted password length for new accounts.
pub const PASSWORD_MIN: usize = 8;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Error returned when a new password is too weak to accept.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password must be at least {min} characters")]
pub struct PasswordTooShort {
    /// Minimum accepted length.
    pub min: usize,
}

/// Plain-text password held in memory that is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Accept a password for a new account.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordTooShort`] below [`PASSWORD_MIN`] characters.
    pub fn new(raw: &str) -> Result<Self, PasswordTooShort> {
        if raw.chars().count() < PASSWORD_MIN {
            return Err(PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Expose the secret for hashing or verification.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace.
///
/// # Examples
/// ```
/// use microblog::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", "hunter22").unwrap();
/// assert_eq!(creds.username(), "ada");
/// assert_eq!(creds.password(), "hunter22");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    ///
    /// # Errors
    ///
    /// Returns a [`LoginValidationError`] when either value is blank.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
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

/// Validated sign-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Requested unique handle.
    pub username: Username,
    /// Display name.
    pub name: DisplayName,
    /// Initial password, hashed before it is stored.
    pub password: Password,
    /// Optional profile blurb.
    pub bio: Option<Bio>,
}
