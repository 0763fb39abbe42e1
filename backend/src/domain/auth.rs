//! Authentication primitives: login credentials, signup registrations and
//! password hashes.
//!
//! Inbound payload parsing stays outside the domain; handlers build these
//! values through validating constructors before talking to a port.

use std::fmt;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash as PhcString, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use zeroize::Zeroizing;

use super::{FieldErrors, UserValidationError, Username};

/// Message attached to empty required fields.
pub const REQUIRED_FIELD: &str = "This field is required.";
/// Message attached when the two signup passwords differ.
pub const PASSWORD_MISMATCH: &str = "The two password fields didn't match.";

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

impl LoginValidationError {
    /// Form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyUsername => "username",
            Self::EmptyPassword => "password",
        }
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use notes_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", "secret").unwrap();
/// assert_eq!(creds.username(), "ada");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
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

    /// Username string suitable for account lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated signup request: a username plus a confirmed password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate signup inputs, collecting every field error at once.
    ///
    /// # Examples
    /// ```
    /// use notes_backend::domain::Registration;
    ///
    /// let ok = Registration::try_from_parts("ada", "s3cret", "s3cret").unwrap();
    /// assert_eq!(ok.username().as_ref(), "ada");
    ///
    /// let errors = Registration::try_from_parts("", "a", "b").unwrap_err();
    /// assert!(errors.get("username").is_some());
    /// assert!(errors.get("password2").is_some());
    /// ```
    pub fn try_from_parts(
        username: &str,
        password1: &str,
        password2: &str,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let username = Username::new(username)
            .map_err(|err: UserValidationError| errors.add("username", err.to_string()))
            .ok();

        if password1.is_empty() {
            errors.add("password1", REQUIRED_FIELD);
        }
        if password2.is_empty() {
            errors.add("password2", REQUIRED_FIELD);
        }
        if !password1.is_empty() && !password2.is_empty() && password1 != password2 {
            errors.add("password2", PASSWORD_MISMATCH);
        }

        match username {
            Some(username) if errors.is_empty() => Ok(Self {
                username,
                password: Zeroizing::new(password1.to_owned()),
            }),
            _ => Err(errors),
        }
    }

    /// Requested login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Confirmed password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Errors raised while hashing or parsing stored password hashes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// Hashing failed inside the Argon2 implementation.
    #[error("password hashing failed: {message}")]
    Hashing { message: String },
    /// A stored hash is not a valid PHC string.
    #[error("stored password hash is malformed: {message}")]
    Malformed { message: String },
}

/// Argon2id password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a plaintext password with a fresh random salt.
    pub fn hash(password: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| Self(hash.to_string()))
            .map_err(|err| PasswordHashError::Hashing {
                message: err.to_string(),
            })
    }

    /// Wrap a PHC string read back from storage, checking that it parses.
    pub fn from_phc(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = phc.into();
        PhcString::new(&phc).map_err(|err| PasswordHashError::Malformed {
            message: err.to_string(),
        })?;
        Ok(Self(phc))
    }

    /// Return `true` when `password` matches this hash.
    pub fn verify(&self, password: &str) -> bool {
        match PhcString::new(&self.0) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    /// PHC string suitable for storage.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn registration_reports_password_mismatch() {
        let errors = Registration::try_from_parts("ada", "one", "two")
            .expect_err("mismatched passwords must fail");
        assert_eq!(
            errors.get("password2"),
            Some(&[PASSWORD_MISMATCH.to_owned()][..])
        );
        assert!(errors.get("username").is_none());
    }

    #[rstest]
    fn registration_reports_every_required_field() {
        let errors =
            Registration::try_from_parts(" ", "", "").expect_err("blank inputs must fail");
        assert!(errors.get("username").is_some());
        assert!(errors.get("password1").is_some());
        assert!(errors.get("password2").is_some());
    }

    #[rstest]
    fn password_hash_verifies_matching_password_only() {
        let hash = PasswordHash::hash("correct horse").expect("hash password");
        assert!(hash.verify("correct horse"));
        assert!(!hash.verify("battery staple"));
    }

    #[rstest]
    fn stored_hash_round_trips() {
        let hash = PasswordHash::hash("pw").expect("hash password");
        let restored = PasswordHash::from_phc(hash.as_str()).expect("parse stored hash");
        assert!(restored.verify("pw"));
    }

    #[rstest]
    fn malformed_stored_hash_is_rejected() {
        assert!(matches!(
            PasswordHash::from_phc("plaintext"),
            Err(PasswordHashError::Malformed { .. })
        ));
    }

    #[rstest]
    fn debug_output_hides_hash() {
        let hash = PasswordHash::hash("pw").expect("hash password");
        assert_eq!(format!("{hash:?}"), "PasswordHash(..)");
    }
}
