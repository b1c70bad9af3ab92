//! Route handlers for the category CRUD endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    models::{Category, CategoryId, CategoryUpdate, NewCategory, User},
    stores::Store,
};

/// The request body for creating a new category.
#[derive(Debug, Deserialize)]
pub(crate) struct CategoryData {
    pub name: String,
    pub description: String,
}

/// A single category wrapped for JSON responses.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CategoryResponse {
    pub category: Category,
}

/// A list of categories wrapped for JSON responses.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CategoriesResponse {
    pub categories: Vec<Category>,
}

/// A route handler for listing the current user's categories.
pub(crate) async fn category_index<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
) -> Result<Json<CategoriesResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let categories = state.store().get_categories(user.id)?;

    Ok(Json(CategoriesResponse { categories }))
}

/// A route handler for fetching one of the current user's categories.
///
/// Responds with 404 whether the category does not exist or belongs to
/// another user, so the caller cannot probe other users' rows.
pub(crate) async fn category_find<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<CategoryResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let id = CategoryId::parse(&id)?;
    let category = state.store().get_category(id, user.id)?;

    Ok(Json(CategoryResponse { category }))
}

/// A route handler for creating a new category owned by the current user.
pub(crate) async fn category_create<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
    Json(body): Json<CategoryData>,
) -> Result<Json<CategoryResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let category = state.store().create_category(NewCategory {
        name: body.name,
        description: body.description,
        user_id: user.id,
    })?;

    Ok(Json(CategoryResponse { category }))
}

/// A route handler for editing one of the current user's categories.
///
/// Only the supplied fields are changed.
pub(crate) async fn category_edit<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Json(update): Json<CategoryUpdate>,
) -> Result<Json<CategoryResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let id = CategoryId::parse(&id)?;
    let category = state.store().update_category(id, user.id, update)?;

    Ok(Json(CategoryResponse { category }))
}

/// A route handler for deleting one of the current user's categories.
pub(crate) async fn category_delete<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<CategoryResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let id = CategoryId::parse(&id)?;
    let category = state.store().delete_category(id, user.id)?;

    Ok(Json(CategoryResponse { category }))
}

#[cfg(test)]
mod category_route_tests {
    use std::sync::{Arc, Mutex};

    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState, build_router,
        db::initialize,
        endpoints,
        models::Category,
        routes::user::{LogInResponse, UserResponse},
        stores::SQLiteStore,
    };

    use super::{CategoriesResponse, CategoryResponse};

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

    async fn create_test_category(server: &TestServer, token: &str, name: &str) -> Category {
        let response = server
            .post(endpoints::CATEGORIES)
            .authorization_bearer(token)
            .json(&json!({
                "name": name,
                "description": format!("spending on {name}"),
            }))
            .await;

        response.assert_status_ok();
        response.json::<CategoryResponse>().category
    }

    #[tokio::test]
    async fn create_and_list_categories() {
        let server = get_test_server();
        let token = sign_up_and_log_in(&server, "test@test.com").await;

        let groceries = create_test_category(&server, &token, "Groceries").await;
        let rent = create_test_category(&server, &token, "Rent").await;

        let response = server
            .get(endpoints::CATEGORIES)
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        let body = response.json::<CategoriesResponse>();
        assert_eq!(body.categories, vec![groceries, rent]);
    }

    #[tokio::test]
    async fn find_category_round_trips() {
        let server = get_test_server();
        let token = sign_up_and_log_in(&server, "test@test.com").await;
        let category = create_test_category(&server, &token, "Groceries").await;

        let response = server
            .get(&endpoints::format_endpoint(endpoints::CATEGORY, category.id))
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<CategoryResponse>().category, category);
    }

    #[tokio::test]
    async fn find_category_fails_for_another_user() {
        let server = get_test_server();
        let owner_token = sign_up_and_log_in(&server, "owner@test.com").await;
        let category = create_test_category(&server, &owner_token, "Groceries").await;

        let other_token = sign_up_and_log_in(&server, "other@test.com").await;

        server
            .get(&endpoints::format_endpoint(endpoints::CATEGORY, category.id))
            .authorization_bearer(&other_token)
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn edit_category_changes_only_supplied_fields() {
        let server = get_test_server();
        let token = sign_up_and_log_in(&server, "test@test.com").await;
        let category = create_test_category(&server, &token, "Groceries").await;

        let response = server
            .put(&endpoints::format_endpoint(endpoints::CATEGORY, category.id))
            .authorization_bearer(&token)
            .json(&json!({ "name": "Food" }))
            .await;

        response.assert_status_ok();
        let updated = response.json::<CategoryResponse>().category;
        assert_eq!(updated.name, "Food");
        assert_eq!(updated.description, category.description);
    }

    #[tokio::test]
    async fn delete_category_removes_it() {
        let server = get_test_server();
        let token = sign_up_and_log_in(&server, "test@test.com").await;
        let category = create_test_category(&server, &token, "Groceries").await;

        server
            .delete(&endpoints::format_endpoint(endpoints::CATEGORY, category.id))
            .authorization_bearer(&token)
            .await
            .assert_status_ok();

        server
            .get(&endpoints::format_endpoint(endpoints::CATEGORY, category.id))
            .authorization_bearer(&token)
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_category_fails_for_another_user() {
        let server = get_test_server();
        let owner_token = sign_up_and_log_in(&server, "owner@test.com").await;
        let category = create_test_category(&server, &owner_token, "Groceries").await;

        let other_token = sign_up_and_log_in(&server, "other@test.com").await;

        server
            .delete(&endpoints::format_endpoint(endpoints::CATEGORY, category.id))
            .authorization_bearer(&other_token)
            .await
            .assert_status_not_found();

        // The owner must still see the category.
        server
            .get(&endpoints::format_endpoint(endpoints::CATEGORY, category.id))
            .authorization_bearer(&owner_token)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn category_routes_reject_malformed_ids() {
        let server = get_test_server();
        let token = sign_up_and_log_in(&server, "test@test.com").await;

        server
            .get("/category/not-a-uuid")
            .authorization_bearer(&token)
            .await
            .assert_status_not_found();
    }
}
