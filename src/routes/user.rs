//! Route handlers for sign-up, log-in and reading users.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::token::issue_token,
    models::{NewUser, PasswordHash, User, UserId, ValidatedPassword},
    stores::Store,
};

/// The request body for creating a new account.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignUpData {
    /// The email address to register.
    pub email: String,
    /// The user's first name.
    pub first_name: String,
    /// The user's last name.
    pub last_name: String,
    /// The plain-text password, checked against the password policy.
    pub password: String,
}

/// The request body for logging in.
#[derive(Debug, Deserialize)]
pub(crate) struct LogInData {
    pub email: String,
    pub password: String,
}

/// A single user wrapped for JSON responses.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct UserResponse {
    pub user: User,
}

/// A list of users wrapped for JSON responses.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct UsersResponse {
    pub users: Vec<User>,
}

/// The response to a successful log-in.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LogInResponse {
    /// The bearer token to present on protected routes.
    pub token: String,
    pub user: User,
}

/// A route handler for creating a new account.
///
/// # Errors
/// Responds with 400 if the password fails the password policy, the email is
/// not well-formed, or the email is already registered, and with 500 if
/// hashing or persistence fails.
pub(crate) async fn sign_up<S>(
    State(state): State<AppState<S>>,
    Json(body): Json<SignUpData>,
) -> Result<Json<UserResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let password = ValidatedPassword::new(&body.password)?;
    let email = EmailAddress::from_str(&body.email).map_err(|_| Error::InvalidEmail)?;
    let password_hash = PasswordHash::new(password, PasswordHash::DEFAULT_COST)?;

    let user = state.store().sign_up(NewUser {
        email,
        first_name: body.first_name,
        last_name: body.last_name,
        password_hash,
    })?;

    Ok(Json(UserResponse { user }))
}

/// A route handler for exchanging credentials for a bearer token.
///
/// Unknown emails and wrong passwords produce the same 404 response, so the
/// endpoint cannot be used to probe which emails are registered.
pub(crate) async fn log_in<S>(
    State(state): State<AppState<S>>,
    Json(body): Json<LogInData>,
) -> Result<Json<LogInResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let user = state
        .store()
        .find_user(&body.email)
        .map_err(|_| Error::IncorrectCredentials)?;

    let password_is_correct = user
        .password_hash
        .verify(&body.password)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    if !password_is_correct {
        return Err(Error::IncorrectCredentials);
    }

    let token = issue_token(&user.email.to_string(), state.encoding_key())?;

    Ok(Json(LogInResponse { token, user }))
}

/// A route handler for listing every user.
pub(crate) async fn user_index<S>(
    State(state): State<AppState<S>>,
) -> Result<Json<UsersResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let users = state.store().get_users()?;

    Ok(Json(UsersResponse { users }))
}

/// A route handler for fetching a single user by their ID.
///
/// Responds with 404 if the ID is not a well-formed UUID or no user has it.
pub(crate) async fn user_find<S>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let id = UserId::parse(&id)?;
    let user = state.store().get_user(id)?;

    Ok(Json(UserResponse { user }))
}
