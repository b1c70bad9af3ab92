//! This file defines the category model and its supporting types.

use serde::{Deserialize, Serialize};

use crate::models::{CategoryId, UserId};

/// A label that groups related transactions for reporting, e.g. "Groceries".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// The category's ID in the database.
    pub id: CategoryId,
    /// The category's display name.
    pub name: String,
    /// A free-form description of what the category covers.
    pub description: String,
    /// The ID of the user that owns the category.
    pub user_id: UserId,
}

/// The data needed to create a new category.
///
/// The store assigns the ID when the category is persisted.
#[derive(Debug, Clone)]
pub struct NewCategory {
    /// The category's display name.
    pub name: String,
    /// A free-form description of what the category covers.
    pub description: String,
    /// The ID of the user that owns the category.
    pub user_id: UserId,
}

/// The caller-supplied fields of a category edit.
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryUpdate {
    /// The new display name, if any.
    pub name: Option<String>,
    /// The new description, if any.
    pub description: Option<String>,
}
