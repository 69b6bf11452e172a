//! Password validation and hashing.
//!
//! A raw password is checked for strength by [ValidatedPassword] and then
//! salted and hashed with bcrypt by [PasswordHash] before it is stored.

use std::fmt::Display;

use bcrypt::{BcryptError, hash, verify};
use zxcvbn::{Score, feedback::Feedback, zxcvbn};

use crate::Error;

/// A password that passed the strength check but has not been hashed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPassword(String);

impl ValidatedPassword {
    /// Check the strength of `raw_password` for the user `username`.
    ///
    /// The username is given to the strength estimator so that passwords
    /// built from the username are scored as weak.
    ///
    /// # Errors
    /// Returns [Error::TooWeak] with suggestions for a stronger password if
    /// the password is easy to guess.
    pub fn new(raw_password: &str, username: &str) -> Result<Self, Error> {
        let analysis = zxcvbn(raw_password, &[username]);

        match analysis.score() {
            Score::Three | Score::Four => Ok(Self(raw_password.to_owned())),
            _ => Err(Error::TooWeak(
                analysis
                    .feedback()
                    .unwrap_or(&Feedback::default())
                    .to_string(),
            )),
        }
    }
}

impl Display for ValidatedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "********")
    }
}

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// The default bcrypt cost for hashing passwords.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Hash `password` with the given bcrypt `cost`.
    ///
    /// Use [PasswordHash::DEFAULT_COST] outside of tests.
    ///
    /// # Errors
    /// Returns [Error::HashingError] if bcrypt fails.
    pub fn new(password: ValidatedPassword, cost: u32) -> Result<Self, Error> {
        hash(&password.0, cost)
            .map(Self)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// Wrap a hash that was read back from the database.
    ///
    /// The caller should ensure that `raw_password_hash` is a bcrypt hash.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_owned())
    }

    /// Check that `raw_password` matches this hash.
    pub fn verify(&self, raw_password: &str) -> Result<bool, BcryptError> {
        verify(raw_password, &self.0)
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        password::{PasswordHash, ValidatedPassword},
    };

    #[test]
    fn empty_password_is_too_weak() {
        let result = ValidatedPassword::new("", "alice");

        assert!(matches!(result, Err(Error::TooWeak(_))));
    }

    #[test]
    fn password_made_from_username_is_too_weak() {
        let result = ValidatedPassword::new("bambangbambang", "bambang");

        assert!(matches!(result, Err(Error::TooWeak(_))));
    }

    #[test]
    fn long_unusual_password_is_accepted() {
        let result = ValidatedPassword::new("kerupukudangdiatasmejamakan", "alice");

        assert!(result.is_ok());
    }

    #[test]
    fn display_hides_password() {
        let password = ValidatedPassword::new("kerupukudangdiatasmejamakan", "alice").unwrap();

        assert_eq!(password.to_string(), "********");
    }

    #[test]
    fn hash_verifies_only_the_original_password() {
        let password = ValidatedPassword::new("kerupukudangdiatasmejamakan", "alice").unwrap();
        let hash = PasswordHash::new(password, 4).unwrap();

        assert!(hash.verify("kerupukudangdiatasmejamakan").unwrap());
        assert!(!hash.verify("the wrong password").unwrap());
    }

    #[test]
    fn hashing_twice_gives_different_salts() {
        let password = ValidatedPassword::new("kerupukudangdiatasmejamakan", "alice").unwrap();

        let first = PasswordHash::new(password.clone(), 4).unwrap();
        let second = PasswordHash::new(password, 4).unwrap();

        assert_ne!(first, second);
    }
}
