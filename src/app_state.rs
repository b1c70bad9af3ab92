//! Implements a struct that holds the state shared by the API's route handlers.

use jsonwebtoken::{DecodingKey, EncodingKey};

/// The state of the REST server.
///
/// Holds the store capability handed to every handler along with the keys
/// used to sign and verify bearer tokens. The state is generic over the store
/// implementation so that tests can substitute the in-memory
/// [FakeStore](crate::stores::FakeStore) for the production
/// [SQLiteStore](crate::stores::SQLiteStore).
#[derive(Clone)]
pub struct AppState<S> {
    store: S,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl<S> AppState<S> {
    /// Create a new [AppState] from a store and the secret used to sign
    /// bearer tokens.
    pub fn new(store: S, jwt_secret: &str) -> Self {
        Self {
            store,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_ref()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_ref()),
        }
    }

    /// The store holding the application's domain models.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The encoding key for signing bearer tokens.
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// The decoding key for verifying bearer tokens.
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}
