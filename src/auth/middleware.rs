//! Authentication middleware that validates bearer tokens and resolves the
//! current user for protected routes.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{AppState, Error, auth::token::decode_token, models::User, stores::Store};

/// Middleware function that checks for a valid bearer token and resolves it
/// to a user.
///
/// The user is fetched fresh from the store on every request, so a user that
/// was deleted after the token was issued is rejected. On success the [User]
/// is placed into the request extensions for the duration of the request;
/// nothing is cached across requests.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(user): Extension<User>` to receive the user.
pub(crate) async fn auth_guard<S>(
    State(state): State<AppState<S>>,
    mut request: Request,
    next: Next,
) -> Response
where
    S: Store + Clone + Send + Sync + 'static,
{
    let user = match resolve_user(&state, &request) {
        Ok(user) => user,
        Err(error) => return error.into_response(),
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}

fn resolve_user<S: Store>(state: &AppState<S>, request: &Request) -> Result<User, Error> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if header.is_empty() {
        return Err(Error::Unauthenticated);
    }

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(Error::Unauthenticated)?;
    let claims = decode_token(token, state.decoding_key())?;

    state
        .store()
        .find_user(&claims.email)
        .map_err(|_| Error::Unauthenticated)
}
