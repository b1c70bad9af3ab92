//! This file defines the transaction model and its supporting types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::{CategoryId, PriorityId, TransactionId, UserId};

/// A single money movement recorded by a user.
///
/// The referenced category and priority always belong to the same user as the
/// transaction; the store checks this before every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The transaction's ID in the database.
    pub id: TransactionId,
    /// A short title for the transaction.
    pub title: String,
    /// A free-form description.
    pub description: String,
    /// The amount of money moved, in minor currency units.
    pub amount: i64,
    /// Whether the transaction is an expense (`true`) or income (`false`).
    pub negative: bool,
    /// The category the transaction is filed under.
    pub category_id: CategoryId,
    /// The priority the transaction is filed under.
    pub priority_id: PriorityId,
    /// The ID of the user that owns the transaction.
    pub user_id: UserId,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The data needed to create a new transaction.
///
/// The store assigns the ID when the transaction is persisted.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// A short title for the transaction.
    pub title: String,
    /// A free-form description.
    pub description: String,
    /// The amount of money moved, in minor currency units.
    pub amount: i64,
    /// Whether the transaction is an expense (`true`) or income (`false`).
    pub negative: bool,
    /// The category the transaction is filed under. Must belong to `user_id`.
    pub category_id: CategoryId,
    /// The priority the transaction is filed under. Must belong to `user_id`.
    pub priority_id: PriorityId,
    /// The ID of the user that owns the transaction.
    pub user_id: UserId,
    /// When the transaction was recorded.
    pub created_at: OffsetDateTime,
}

/// The caller-supplied fields of a transaction edit.
///
/// Fields left as `None` keep their current value. A new category or priority
/// reference must belong to the transaction's owner.
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    /// The new title, if any.
    pub title: Option<String>,
    /// The new description, if any.
    pub description: Option<String>,
    /// The new amount, if any.
    pub amount: Option<i64>,
    /// The new sign flag, if any.
    pub negative: Option<bool>,
    /// The new category reference, if any.
    pub category_id: Option<CategoryId>,
    /// The new priority reference, if any.
    pub priority_id: Option<PriorityId>,
}
