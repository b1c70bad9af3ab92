//! Application router configuration with protected and unprotected route
//! definitions.

use axum::{
    Json, Router,
    http::{Method, StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
};

use crate::{
    AppState, endpoints,
    auth::middleware::auth_guard,
    routes::{
        category::{
            category_create, category_delete, category_edit, category_find, category_index,
        },
        priority::{
            priority_create, priority_delete, priority_edit, priority_find, priority_index,
        },
        report::{daily_values, highest_category, highest_priority},
        transaction::{
            transaction_create, transaction_delete, transaction_edit, transaction_find,
            transaction_index,
        },
        user::{log_in, sign_up, user_find, user_index},
    },
    stores::Store,
};

/// Return a router with all the app's routes.
///
/// The sign-up and log-in routes are open; every other route is protected by
/// the bearer-token auth guard.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: Store + Clone + Send + Sync + 'static,
{
    let unprotected_routes = Router::new()
        .route(endpoints::SIGN_UP, post(sign_up::<S>))
        .route(endpoints::LOG_IN, post(log_in::<S>));

    let protected_routes = Router::new()
        .route(endpoints::USERS, get(user_index::<S>))
        .route(endpoints::USER, get(user_find::<S>))
        .route(
            endpoints::CATEGORIES,
            get(category_index::<S>).post(category_create::<S>),
        )
        .route(
            endpoints::CATEGORY,
            get(category_find::<S>)
                .put(category_edit::<S>)
                .delete(category_delete::<S>),
        )
        .route(
            endpoints::PRIORITIES,
            get(priority_index::<S>).post(priority_create::<S>),
        )
        .route(
            endpoints::PRIORITY,
            get(priority_find::<S>)
                .put(priority_edit::<S>)
                .delete(priority_delete::<S>),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(transaction_index::<S>).post(transaction_create::<S>),
        )
        .route(
            endpoints::TRANSACTION,
            get(transaction_find::<S>)
                .put(transaction_edit::<S>)
                .delete(transaction_delete::<S>),
        )
        .route(endpoints::DAILY_SPENDING, get(daily_values::<S>))
        .route(endpoints::HIGHEST_CATEGORY, get(highest_category::<S>))
        .route(endpoints::HIGHEST_PRIORITY, get(highest_priority::<S>))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_guard::<S>,
        ));

    protected_routes
        .merge(unprotected_routes)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer())
        .with_state(state)
}

/// Convert a panic in a route handler into a JSON 500 response.
///
/// Each request runs in its own task; a panic must become a response for that
/// request rather than take down the others.
fn handle_panic(error: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let details = if let Some(message) = error.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = error.downcast_ref::<&str>() {
        (*message).to_owned()
    } else {
        "unknown panic".to_owned()
    };

    tracing::error!("a route handler panicked: {details}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error" })),
    )
        .into_response()
}

/// CORS rules for the API: any origin, the standard verbs, and the headers
/// browser clients send.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}
