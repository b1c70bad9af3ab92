//! Defines the app level error type and its conversion to JSON HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided a password that violates the password policy.
    ///
    /// The message names the first rule the password broke and is safe to
    /// show to the client.
    #[error("{0}")]
    TooWeak(String),

    /// The email address given at sign-up is not well-formed.
    #[error("invalid email syntax")]
    InvalidEmail,

    /// The email address given at sign-up already belongs to a user.
    #[error("the email is already in use")]
    DuplicateEmail,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error is replaced
    /// with a general internal server error message.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The bearer token could not be signed.
    #[error("could not create token")]
    TokenCreation,

    /// The request did not carry a valid bearer token.
    ///
    /// Covers a missing or empty Authorization header, a missing `Bearer `
    /// prefix, a bad signature, an expired token, and a token whose subject
    /// no longer exists.
    #[error("you must be logged in to perform this request")]
    Unauthenticated,

    /// Log-in failed. The same message covers unknown emails and wrong
    /// passwords so the endpoint cannot be used to probe which emails are
    /// registered.
    #[error("email or password is incorrect")]
    IncorrectCredentials,

    /// A path parameter could not be parsed as a UUID.
    #[error("invalid uuid")]
    InvalidId,

    /// A query parameter is missing or malformed.
    #[error("{0}")]
    InvalidQuery(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created. The
    /// same error is returned for rows owned by another user so the caller
    /// cannot tell whether the row exists at all.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The category referenced by a transaction write could not be resolved
    /// for the caller.
    #[error("category not found")]
    CategoryNotFound,

    /// The priority referenced by a transaction write could not be resolved
    /// for the caller.
    #[error("priority not found")]
    PriorityNotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::TooWeak(_)
            | Error::InvalidEmail
            | Error::DuplicateEmail
            | Error::InvalidQuery(_)
            | Error::CategoryNotFound
            | Error::PriorityNotFound => StatusCode::BAD_REQUEST,
            Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::IncorrectCredentials | Error::InvalidId | Error::NotFound => {
                StatusCode::NOT_FOUND
            }
            Error::HashingError(_) | Error::TokenCreation | Error::SqlError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let message = match self {
            // The details of internal errors are not intended for clients.
            Error::HashingError(details) => {
                tracing::error!("hashing failed: {details}");
                "Internal server error".to_owned()
            }
            Error::SqlError(_) => "Internal server error".to_owned(),
            error => error.to_string(),
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}
