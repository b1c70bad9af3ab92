//! This file defines types that handle password validation and hashing.
//! `ValidatedPassword` wraps a string and ensures it meets the password policy.
//! `PasswordHash` converts a `ValidatedPassword` into a salted and hashed password.

use std::fmt::Display;

use bcrypt::{BcryptError, hash, verify};
use serde::{Deserialize, Serialize};

use crate::Error;

const MIN_LENGTH: usize = 6;
const MAX_LENGTH: usize = 30;
const MIN_LOWERCASE: usize = 5;
const SPECIAL_CHARS: &str = "_@.()@$#";

/// Passwords that are used so often that they are trivial to guess.
const COMMON_PASSWORDS: &[&str] = &[
    "123456",
    "password",
    "12345678",
    "qwerty",
    "123456789",
    "12345",
    "111111",
    "1234567",
    "dragon",
    "123123",
    "baseball",
    "abc123",
    "football",
    "monkey",
    "letmein",
    "696969",
    "shadow",
    "master",
    "666666",
    "qwertyuiop",
    "123321",
    "mustang",
    "1234567890",
    "michael",
    "654321",
    "superman",
    "1qaz2wsx",
    "7777777",
    "121212",
    "000000",
    "qazwsx",
    "password1",
    "trustno1",
];

/// A password that has been validated against the password policy, but not yet hashed.
///
/// This struct can be used to construct a [PasswordHash].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedPassword(String);

impl ValidatedPassword {
    /// Create and validate a new password from a string.
    ///
    /// The policy checks, in order: length between 6 and 30 characters, not a
    /// commonly used password, at least 5 lowercase letters, and at least one
    /// special character from `_@.()@$#`. Checking stops at the first rule
    /// the password breaks, so only one violation is ever reported.
    ///
    /// # Errors
    /// Returns [Error::TooWeak] carrying the first violated rule's message.
    pub fn new(raw_password_string: &str) -> Result<Self, Error> {
        let length = raw_password_string.chars().count();

        if length < MIN_LENGTH {
            return Err(Error::TooWeak(format!(
                "password must be at least {MIN_LENGTH} characters"
            )));
        }

        if length > MAX_LENGTH {
            return Err(Error::TooWeak(format!(
                "password must be at most {MAX_LENGTH} characters"
            )));
        }

        if COMMON_PASSWORDS.contains(&raw_password_string) {
            return Err(Error::TooWeak(
                "password cannot be a commonly used password".to_owned(),
            ));
        }

        let lowercase_count = raw_password_string
            .chars()
            .filter(char::is_ascii_lowercase)
            .count();
        if lowercase_count < MIN_LOWERCASE {
            return Err(Error::TooWeak(format!(
                "password must contain at least {MIN_LOWERCASE} lowercase letters"
            )));
        }

        if !raw_password_string
            .chars()
            .any(|character| SPECIAL_CHARS.contains(character))
        {
            return Err(Error::TooWeak(format!(
                "password must contain at least 1 special character from {SPECIAL_CHARS}"
            )));
        }

        Ok(Self(raw_password_string.to_string()))
    }

    /// Create a new `ValidatedPassword` without any validation.
    ///
    /// The caller should ensure that `raw_password_string` is a valid and secure password.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if an invalid
    /// password is provided it may cause incorrect behaviour but will not affect memory safety.
    pub fn new_unchecked(raw_password_string: &str) -> Self {
        Self(raw_password_string.to_string())
    }
}

impl Display for ValidatedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", str::repeat("*", 8))
    }
}

/// A salted and hashed password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// An alias for the default encryption cost for hashing passwords.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Create a hashed password from a validated password with the specified `cost`.
    ///
    /// `cost` increases the rounds of hashing and therefore the time needed to verify a password.
    /// Pass in [PasswordHash::DEFAULT_COST] to use the recommended cost.
    ///
    /// # Errors
    ///
    /// This function will return an error if the password could not be hashed.
    pub fn new(password: ValidatedPassword, cost: u32) -> Result<Self, Error> {
        match hash(&password.0, cost) {
            Ok(password_hash) => Ok(Self(password_hash)),
            Err(e) => Err(Error::HashingError(e.to_string())),
        }
    }

    /// Create a new `PasswordHash` without any validation.
    ///
    /// The caller should ensure that `raw_password_hash` is a valid password hash.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if an invalid hash
    /// is provided it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(raw_password_hash: &str) -> Self {
        Self(raw_password_hash.to_string())
    }

    /// Try to create a password hash from a raw password string.
    ///
    /// This is a convenience function that removes the need to manually create
    /// the intermediate `ValidatedPassword` type.
    pub fn from_raw_password(raw_password: &str, cost: u32) -> Result<Self, Error> {
        let validated_password = ValidatedPassword::new(raw_password)?;
        PasswordHash::new(validated_password, cost)
    }

    /// Check that `raw_password` matches the stored password.
    pub fn verify(&self, raw_password: &str) -> Result<bool, BcryptError> {
        verify(raw_password, &self.0)
    }
}

impl Display for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
