//! This file defines a user of the application and its supporting types.

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::models::{PasswordHash, UserId};

/// A user of the application.
///
/// Users are created at sign-up and are read on every protected request to
/// resolve the bearer token's subject. They are never mutated or deleted
/// through the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID in the database.
    pub id: UserId,
    /// The email address the user signed up with. Unique across users.
    pub email: EmailAddress,
    /// The user's first name.
    pub first_name: String,
    /// The user's last name.
    pub last_name: String,
    /// The user's password hash.
    pub password_hash: PasswordHash,
}

/// The data needed to create a new user at sign-up.
///
/// The store assigns the ID when the user is persisted.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// The email address to register. Must not belong to an existing user.
    pub email: EmailAddress,
    /// The user's first name.
    pub first_name: String,
    /// The user's last name.
    pub last_name: String,
    /// The hash of the user's validated password.
    pub password_hash: PasswordHash,
}
