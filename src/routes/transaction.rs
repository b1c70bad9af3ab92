//! Route handlers for the transaction CRUD endpoints, including the paginated
//! listing.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    models::{
        CategoryId, NewTransaction, PriorityId, Transaction, TransactionId, TransactionUpdate,
        User,
    },
    pagination::Page,
    stores::Store,
};

/// The request body for creating a new transaction.
///
/// `category` and `priority` carry the IDs of rows owned by the caller.
#[derive(Debug, Deserialize)]
pub(crate) struct TransactionData {
    pub title: String,
    pub description: String,
    pub amount: i64,
    pub negative: bool,
    pub category: String,
    pub priority: String,
}

/// The request body for editing a transaction. Missing fields are left
/// unchanged.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TransactionEditData {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<i64>,
    pub negative: Option<bool>,
    pub category: Option<String>,
    pub priority: Option<String>,
}

/// The raw pagination query parameters.
///
/// Both values are taken as strings so that malformed numbers fall back to
/// the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PageParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// A single transaction wrapped for JSON responses.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TransactionResponse {
    pub transaction: Transaction,
}

/// One page of transactions along with the page window and total row count.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TransactionListResponse {
    /// The 1-based page number that was returned.
    pub page: u64,
    /// The page size after clamping.
    pub page_size: u64,
    /// The total number of matching transactions across all pages.
    pub total: u64,
    /// The rows on this page, newest first.
    pub transactions: Vec<Transaction>,
}

/// A route handler for listing the current user's transactions, paginated.
pub(crate) async fn transaction_index<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
    Query(params): Query<PageParams>,
) -> Result<Json<TransactionListResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let page = Page::from_params(params.page.as_deref(), params.page_size.as_deref());
    let transaction_page = state.store().get_transactions(user.id, page)?;

    Ok(Json(TransactionListResponse {
        page: page.page,
        page_size: page.page_size,
        total: transaction_page.total,
        transactions: transaction_page.transactions,
    }))
}

/// A route handler for fetching one of the current user's transactions.
pub(crate) async fn transaction_find<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<TransactionResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let id = TransactionId::parse(&id)?;
    let transaction = state.store().get_transaction(id, user.id)?;

    Ok(Json(TransactionResponse { transaction }))
}

/// A route handler for creating a new transaction owned by the current user.
///
/// The referenced category and priority must belong to the current user;
/// otherwise the request fails with a 400 "category not found" or
/// "priority not found" response.
pub(crate) async fn transaction_create<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
    Json(body): Json<TransactionData>,
) -> Result<Json<TransactionResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let category_id = CategoryId::parse(&body.category).map_err(|_| Error::CategoryNotFound)?;
    let priority_id = PriorityId::parse(&body.priority).map_err(|_| Error::PriorityNotFound)?;

    let transaction = state.store().create_transaction(NewTransaction {
        title: body.title,
        description: body.description,
        amount: body.amount,
        negative: body.negative,
        category_id,
        priority_id,
        user_id: user.id,
        created_at: OffsetDateTime::now_utc(),
    })?;

    Ok(Json(TransactionResponse { transaction }))
}

/// A route handler for editing one of the current user's transactions.
///
/// Only the supplied fields are changed. A new category or priority reference
/// is resolved scoped to the current user first.
pub(crate) async fn transaction_edit<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
    Json(body): Json<TransactionEditData>,
) -> Result<Json<TransactionResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let id = TransactionId::parse(&id)?;

    let update = TransactionUpdate {
        title: body.title,
        description: body.description,
        amount: body.amount,
        negative: body.negative,
        category_id: body
            .category
            .as_deref()
            .map(CategoryId::parse)
            .transpose()
            .map_err(|_| Error::CategoryNotFound)?,
        priority_id: body
            .priority
            .as_deref()
            .map(PriorityId::parse)
            .transpose()
            .map_err(|_| Error::PriorityNotFound)?,
    };

    let transaction = state.store().update_transaction(id, user.id, update)?;

    Ok(Json(TransactionResponse { transaction }))
}

/// A route handler for deleting one of the current user's transactions.
pub(crate) async fn transaction_delete<S>(
    State(state): State<AppState<S>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<TransactionResponse>, Error>
where
    S: Store + Clone + Send + Sync + 'static,
{
    let id = TransactionId::parse(&id)?;
    let transaction = state.store().delete_transaction(id, user.id)?;

    Ok(Json(TransactionResponse { transaction }))
}
