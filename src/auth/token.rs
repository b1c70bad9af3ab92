//! Creation and validation of the JSON Web Tokens used as bearer tokens.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::Error;

/// How long a token stays valid after it is issued.
pub(crate) const TOKEN_DURATION: Duration = Duration::hours(72);

/// The contents of a JSON Web Token.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    /// The expiry time of the token as a unix timestamp.
    pub exp: usize,
    /// The time the token was issued as a unix timestamp.
    pub iat: usize,
    /// Email of the user the token was issued to.
    pub email: String,
}

/// Create a signed token carrying `email` that expires [TOKEN_DURATION] from
/// now.
///
/// # Errors
/// Returns [Error::TokenCreation] if signing fails.
pub(crate) fn issue_token(email: &str, encoding_key: &EncodingKey) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        exp: (now + TOKEN_DURATION).unix_timestamp() as usize,
        iat: now.unix_timestamp() as usize,
        email: email.to_owned(),
    };

    encode(&Header::default(), &claims, encoding_key).map_err(|error| {
        tracing::error!("could not sign token: {error}");
        Error::TokenCreation
    })
}

/// Decode and verify a token, returning its claims.
///
/// # Errors
/// Returns [Error::Unauthenticated] if the signature does not verify or the
/// token is expired.
pub(crate) fn decode_token(token: &str, decoding_key: &DecodingKey) -> Result<Claims, Error> {
    decode::<Claims>(token, decoding_key, &Validation::default())
        .map(|token_data| token_data.claims)
        .map_err(|_| Error::Unauthenticated)
}

#[cfg(test)]
mod token_tests {
    use jsonwebtoken::{DecodingKey, EncodingKey, Header, encode};
    use time::{Duration, OffsetDateTime};

    use crate::Error;

    use super::{Claims, decode_token, issue_token};

    fn get_test_keys(secret: &str) -> (EncodingKey, DecodingKey) {
        (
            EncodingKey::from_secret(secret.as_ref()),
            DecodingKey::from_secret(secret.as_ref()),
        )
    }

    #[test]
    fn decode_token_gives_back_the_email() {
        let (encoding_key, decoding_key) = get_test_keys("foobar");
        let token = issue_token("averyemail@email.com", &encoding_key).unwrap();

        let claims = decode_token(&token, &decoding_key).unwrap();

        assert_eq!(claims.email, "averyemail@email.com");
    }

    #[test]
    fn decode_token_fails_with_the_wrong_key() {
        let (encoding_key, _) = get_test_keys("foobar");
        let (_, other_decoding_key) = get_test_keys("not foobar");
        let token = issue_token("averyemail@email.com", &encoding_key).unwrap();

        let result = decode_token(&token, &other_decoding_key);

        assert_eq!(result.map(|claims| claims.email), Err(Error::Unauthenticated));
    }

    #[test]
    fn decode_token_fails_after_expiry() {
        let (encoding_key, decoding_key) = get_test_keys("foobar");

        // Two hours in the past, well beyond the default validation leeway.
        let issued_at = OffsetDateTime::now_utc() - Duration::hours(3);
        let claims = Claims {
            exp: (issued_at + Duration::hours(1)).unix_timestamp() as usize,
            iat: issued_at.unix_timestamp() as usize,
            email: "averyemail@email.com".to_owned(),
        };
        let token = encode(&Header::default(), &claims, &encoding_key).unwrap();

        let result = decode_token(&token, &decoding_key);

        assert_eq!(result.map(|claims| claims.email), Err(Error::Unauthenticated));
    }

    #[test]
    fn decode_token_fails_on_garbage() {
        let (_, decoding_key) = get_test_keys("foobar");

        let result = decode_token("not.a.token", &decoding_key);

        assert_eq!(result.map(|claims| claims.email), Err(Error::Unauthenticated));
    }
}
