//! Route handlers for the priority CRUD endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    models::{NewPriority, Priority, PriorityId, PriorityUpdate, User},
    stores::Store,
};

/// The request body for creating a new priority.
#[derive(Debug, Deserialize)]
pub(crate) struct PriorityData {
    pub name: String,
    pub description: String,
    /// The urgency rank. Higher levels are more urgent.
    pub level: i64,
}

/// A single priority wrapped for JSON responses.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PriorityResponse {
    pub priority: Priority,
}

/// A list of priorities wrapped for JSON responses.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct PrioritiesResponse {
    pub priorities: Vec<Priority>,
}

/// A route handler for listing the current user's priorities.
pub(crate) async fn priority_index<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
) -> Result<Json<PrioritiesResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let priorities = state.store().get_priorities(user.id)?;

    Ok(Json(PrioritiesResponse { priorities }))
}

/// A route handler for fetching one of the current user's priorities.
pub(crate) async fn priority_find<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<PriorityResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let id = PriorityId::parse(&id)?;
    let priority = state.store().get_priority(id, user.id)?;

    Ok(Json(PriorityResponse { priority }))
}

/// A route handler for creating a new priority owned by the current user.
pub(crate) async fn priority_create<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
    Json(body): Json<PriorityData>,
) -> Result<Json<PriorityResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let priority = state.store().create_priority(NewPriority {
        name: body.name,
        description: body.description,
        level: body.level,
        user_id: user.id,
    })?;

    Ok(Json(PriorityResponse { priority }))
}

/// A route handler for editing one of the current user's priorities.
///
/// Only the supplied fields are changed.
pub(crate) async fn priority_edit<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Json(update): Json<PriorityUpdate>,
) -> Result<Json<PriorityResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let id = PriorityId::parse(&id)?;
    let priority = state.store().update_priority(id, user.id, update)?;

    Ok(Json(PriorityResponse { priority }))
}

/// A route handler for deleting one of the current user's priorities.
pub(crate) async fn priority_delete<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<PriorityResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let id = PriorityId::parse(&id)?;
    let priority = state.store().delete_priority(id, user.id)?;

    Ok(Json(PriorityResponse { priority }))
}

#[cfg(test)]
mod priority_route_tests {
    use std::sync::{Arc, Mutex};

    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState, build_router,
        db::initialize,
        endpoints,
        models::Priority,
        routes::user::{LogInResponse, UserResponse},
        stores::SQLiteStore,
    };

    use super::{PrioritiesResponse, PriorityResponse};

    const TEST_PASSWORD: &str = "averysafepassword_2024";

    fn get_test_server() -> TestServer {
        let connection = Connection::open_in_memory().expect("Could not open database in memory.");
        initialize(&connection).expect("Could not initialize database.");

        let store = SQLiteStore::new(Arc::new(Mutex::new(connection)));
        let state = AppState::new(store, "foobar");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    async fn sign_up_and_log_in(server: &TestServer, email: &str) -> String {
        server
            .post(endpoints::SIGN_UP)
            .json(&json!({
                "email": email,
                "firstName": "Test",
                "lastName": "User",
                "password": TEST_PASSWORD,
            }))
            .await
            .json::<UserResponse>();

        server
            .post(endpoints::LOG_IN)
            .json(&json!({
                "email": email,
                "password": TEST_PASSWORD,
            }))
            .await
            .json::<LogInResponse>()
            .token
    }

    async fn create_test_priority(
        server: &TestServer,
        token: &str,
        name: &str,
        level: i64,
    ) -> Priority {
        let response = server
            .post(endpoints::PRIORITIES)
            .authorization_bearer(token)
            .json(&json!({
                "name": name,
                "description": format!("{name} priority"),
                "level": level,
            }))
            .await;

        response.assert_status_ok();
        response.json::<PriorityResponse>().priority
    }

    #[tokio::test]
    async fn create_and_list_priorities() {
        let server = get_test_server();
        let token = sign_up_and_log_in(&server, "test@test.com").await;

        let essential = create_test_priority(&server, &token, "Essential", 1).await;
        let luxury = create_test_priority(&server, &token, "Luxury", 3).await;

        let response = server
            .get(endpoints::PRIORITIES)
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        let body = response.json::<PrioritiesResponse>();
        assert_eq!(body.priorities, vec![essential, luxury]);
    }

    #[tokio::test]
    async fn edit_priority_changes_the_level() {
        let server = get_test_server();
        let token = sign_up_and_log_in(&server, "test@test.com").await;
        let priority = create_test_priority(&server, &token, "Essential", 1).await;

        let response = server
            .put(&endpoints::format_endpoint(endpoints::PRIORITY, priority.id))
            .authorization_bearer(&token)
            .json(&json!({ "level": 5 }))
            .await;

        response.assert_status_ok();
        let updated = response.json::<PriorityResponse>().priority;
        assert_eq!(updated.level, 5);
        assert_eq!(updated.name, priority.name);
    }

    #[tokio::test]
    async fn delete_priority_fails_for_another_user() {
        let server = get_test_server();
        let owner_token = sign_up_and_log_in(&server, "owner@test.com").await;
        let priority = create_test_priority(&server, &owner_token, "Essential", 1).await;

        let other_token = sign_up_and_log_in(&server, "other@test.com").await;

        server
            .delete(&endpoints::format_endpoint(endpoints::PRIORITY, priority.id))
            .authorization_bearer(&other_token)
            .await
            .assert_status_not_found();

        server
            .get(&endpoints::format_endpoint(endpoints::PRIORITY, priority.id))
            .authorization_bearer(&owner_token)
            .await
            .assert_status_ok();
    }
}
